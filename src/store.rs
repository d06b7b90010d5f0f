//! Cache store identity.

use std::path::{Path, PathBuf};

/// A directory-backed cache that can be cleaned.
pub trait CleanableStore {
    /// Human-readable name used in diagnostics.
    fn display_name(&self) -> String;

    /// Root directory holding the cache entries.
    fn base_dir(&self) -> &Path;
}

/// A configured cache store.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CacheStore {
    /// Short identifier (e.g., "build-cache").
    name: String,
    /// Root directory for the cache.
    base_dir: PathBuf,
    /// Optional label overriding the generated display name.
    label: Option<String>,
}

impl CacheStore {
    /// Create a new cache store.
    pub fn new(name: impl Into<String>, base_dir: impl Into<PathBuf>) -> Self {
        Self {
            name: name.into(),
            base_dir: base_dir.into(),
            label: None,
        }
    }

    /// Set an explicit display label.
    pub fn with_label(mut self, label: impl Into<String>) -> Self {
        self.label = Some(label.into());
        self
    }

    /// Get the store's short name.
    pub fn name(&self) -> &str {
        &self.name
    }
}

impl CleanableStore for CacheStore {
    fn display_name(&self) -> String {
        match &self.label {
            Some(label) => label.clone(),
            None => format!("{} ({})", self.name, self.base_dir.display()),
        }
    }

    fn base_dir(&self) -> &Path {
        &self.base_dir
    }
}

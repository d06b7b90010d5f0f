//! Exclusion of reserved cache files.

use std::path::{Path, PathBuf};

use regex::Regex;

use super::FilesFinder;
use crate::error::{Result, SweepError};

/// File-name patterns excluded when no explicit list is configured.
pub const DEFAULT_RESERVED_PATTERNS: &[&str] = &[r"\.lock$", r"^gc\.properties$"];

/// Wraps a finder and drops candidates whose file name is reserved.
pub struct ReservedFileFilter {
    inner: Box<dyn FilesFinder>,
    patterns: Vec<Regex>,
}

impl ReservedFileFilter {
    /// Create a filter from regex patterns matched against file names.
    pub fn new<S: AsRef<str>>(inner: Box<dyn FilesFinder>, patterns: &[S]) -> Result<Self> {
        let patterns = patterns
            .iter()
            .map(|p| {
                Regex::new(p.as_ref()).map_err(|e| SweepError::ConfigValidationError {
                    message: format!("invalid reserved pattern '{}': {}", p.as_ref(), e),
                })
            })
            .collect::<Result<Vec<_>>>()?;

        Ok(Self { inner, patterns })
    }

    /// Create a filter using [`DEFAULT_RESERVED_PATTERNS`].
    pub fn with_defaults(inner: Box<dyn FilesFinder>) -> Result<Self> {
        Self::new(inner, DEFAULT_RESERVED_PATTERNS)
    }

    /// Check whether a path's file name matches a reserved pattern.
    pub fn is_reserved(&self, path: &Path) -> bool {
        let Some(name) = path.file_name() else {
            return false;
        };
        let name = name.to_string_lossy();
        self.patterns.iter().any(|p| p.is_match(&name))
    }
}

impl FilesFinder for ReservedFileFilter {
    fn find_eligible_files(&self, base_dir: &Path) -> Result<Vec<PathBuf>> {
        let files = self.inner.find_eligible_files(base_dir)?;
        Ok(files
            .into_iter()
            .filter(|path| !self.is_reserved(path))
            .collect())
    }
}

impl std::fmt::Debug for ReservedFileFilter {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ReservedFileFilter")
            .field("patterns", &self.patterns)
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::finder::SingleDepthFilesFinder;
    use std::fs;
    use tempfile::TempDir;

    fn depth_one() -> Box<dyn FilesFinder> {
        Box::new(SingleDepthFilesFinder::new(1).unwrap())
    }

    #[test]
    fn default_patterns_skip_lock_and_gc_files() {
        let temp = TempDir::new().unwrap();
        fs::write(temp.path().join("entry.bin"), "data").unwrap();
        fs::write(temp.path().join("cache.lock"), "").unwrap();
        fs::write(temp.path().join("gc.properties"), "").unwrap();

        let finder = ReservedFileFilter::with_defaults(depth_one()).unwrap();
        let files = finder.find_eligible_files(temp.path()).unwrap();

        assert_eq!(files, vec![temp.path().join("entry.bin")]);
    }

    #[test]
    fn custom_patterns_replace_defaults() {
        let temp = TempDir::new().unwrap();
        fs::write(temp.path().join("keep.meta"), "").unwrap();
        fs::write(temp.path().join("cache.lock"), "").unwrap();

        let finder = ReservedFileFilter::new(depth_one(), &[r"\.meta$"]).unwrap();
        let files = finder.find_eligible_files(temp.path()).unwrap();

        assert_eq!(files, vec![temp.path().join("cache.lock")]);
    }

    #[test]
    fn invalid_pattern_is_a_validation_error() {
        let err = ReservedFileFilter::new(depth_one(), &["("]).unwrap_err();
        assert!(matches!(err, SweepError::ConfigValidationError { .. }));
    }

    #[test]
    fn is_reserved_matches_file_name_only() {
        let finder = ReservedFileFilter::with_defaults(depth_one()).unwrap();

        assert!(finder.is_reserved(Path::new("/cache/journal-1.lock")));
        assert!(!finder.is_reserved(Path::new("/cache.lock/entry.bin")));
        assert!(!finder.is_reserved(Path::new("/")));
    }
}

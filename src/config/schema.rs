//! Configuration schema definitions for cachesweep.
//!
//! This module contains the struct definitions that map to the YAML
//! configuration file format, plus the helpers that turn a store entry into
//! a finder and a cleanup strategy.

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

use crate::clock::Clock;
use crate::error::Result;
use crate::finder::{
    FilesFinder, ReservedFileFilter, SingleDepthFilesFinder, DEFAULT_RESERVED_PATTERNS,
};
use crate::store::CacheStore;
use crate::strategy::{
    FixedAgeStrategy, DEFAULT_MAX_AGE_IN_DAYS_FOR_EXTERNAL_CACHE_ENTRIES,
    DEFAULT_MAX_AGE_IN_DAYS_FOR_RECREATABLE_CACHE_ENTRIES,
};

/// Root configuration structure for config.yml
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SweepConfig {
    /// Global settings
    pub settings: Settings,

    /// Cache stores to maintain
    pub stores: Vec<StoreConfig>,
}

impl SweepConfig {
    /// Look up a store by name.
    pub fn store(&self, name: &str) -> Option<&StoreConfig> {
        self.stores.iter().find(|s| s.name == name)
    }
}

/// Global settings that apply to every store.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    /// Report what would be deleted without deleting
    #[serde(skip_serializing_if = "is_false")]
    pub dry_run: bool,
}

/// What kind of entries a store holds, which picks its default maximum age.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum StoreCategory {
    /// Entries that are cheap to rebuild locally.
    #[default]
    Recreatable,
    /// Entries downloaded from external sources.
    External,
}

impl StoreCategory {
    /// Default maximum age in days for this category.
    pub fn default_max_age_days(self) -> i64 {
        match self {
            Self::Recreatable => DEFAULT_MAX_AGE_IN_DAYS_FOR_RECREATABLE_CACHE_ENTRIES,
            Self::External => DEFAULT_MAX_AGE_IN_DAYS_FOR_EXTERNAL_CACHE_ENTRIES,
        }
    }
}

/// A single cache store.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StoreConfig {
    /// Unique store name
    pub name: String,

    /// Cache root directory; a leading `~` expands to the home directory
    pub path: PathBuf,

    /// Label used in diagnostics
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub display_name: Option<String>,

    /// Entry category
    #[serde(default)]
    pub category: StoreCategory,

    /// Overrides the category's default maximum age
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub max_age_days: Option<i64>,

    /// Depth of cache entries below the root
    #[serde(default = "default_depth")]
    pub depth: usize,

    /// File-name regexes never considered for cleanup
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub reserved: Option<Vec<String>>,
}

impl StoreConfig {
    /// Create a store entry with default settings.
    pub fn new(name: impl Into<String>, path: impl Into<PathBuf>) -> Self {
        Self {
            name: name.into(),
            path: path.into(),
            display_name: None,
            category: StoreCategory::default(),
            max_age_days: None,
            depth: default_depth(),
            reserved: None,
        }
    }

    /// Effective maximum age in days.
    pub fn resolved_max_age_days(&self) -> i64 {
        self.max_age_days
            .unwrap_or_else(|| self.category.default_max_age_days())
    }

    /// Cache root with `~` expanded.
    pub fn resolved_path(&self) -> PathBuf {
        expand_home(&self.path)
    }

    /// Build the store handle.
    pub fn to_store(&self) -> CacheStore {
        let store = CacheStore::new(&self.name, self.resolved_path());
        match &self.display_name {
            Some(label) => store.with_label(label),
            None => store,
        }
    }

    /// Build the finder listing this store's eligible entries.
    pub fn build_finder(&self) -> Result<Box<dyn FilesFinder>> {
        let depth = Box::new(SingleDepthFilesFinder::new(self.depth)?);
        let filter = match &self.reserved {
            Some(patterns) => ReservedFileFilter::new(depth, patterns)?,
            None => ReservedFileFilter::new(depth, DEFAULT_RESERVED_PATTERNS)?,
        };
        Ok(Box::new(filter))
    }

    /// Build a fresh age strategy, sampling `clock` now.
    ///
    /// `max_age_override` replaces the configured maximum age.
    pub fn build_strategy(
        &self,
        clock: &dyn Clock,
        max_age_override: Option<i64>,
    ) -> Result<FixedAgeStrategy> {
        let max_age_days = max_age_override.unwrap_or_else(|| self.resolved_max_age_days());
        Ok(FixedAgeStrategy::new(self.build_finder()?, max_age_days, clock))
    }
}

fn default_depth() -> usize {
    1
}

fn is_false(b: &bool) -> bool {
    !*b
}

fn expand_home(path: &Path) -> PathBuf {
    match path.strip_prefix("~") {
        Ok(rest) => match dirs::home_dir() {
            Some(home) => home.join(rest),
            None => path.to_path_buf(),
        },
        Err(_) => path.to_path_buf(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::clock::FixedClock;
    use crate::store::CleanableStore;
    use chrono::{TimeDelta, TimeZone, Utc};

    #[test]
    fn parse_minimal_store() {
        let yaml = r#"
stores:
  - name: build
    path: /var/cache/build
"#;
        let config: SweepConfig = serde_yaml::from_str(yaml).unwrap();
        let store = &config.stores[0];

        assert_eq!(store.name, "build");
        assert_eq!(store.category, StoreCategory::Recreatable);
        assert_eq!(store.depth, 1);
        assert_eq!(store.resolved_max_age_days(), 7);
        assert!(!config.settings.dry_run);
    }

    #[test]
    fn parse_full_store() {
        let yaml = r#"
settings:
  dry_run: true
stores:
  - name: deps
    path: /var/cache/deps
    display_name: Downloaded dependencies
    category: external
    max_age_days: 45
    depth: 3
    reserved: ['\.lock$']
"#;
        let config: SweepConfig = serde_yaml::from_str(yaml).unwrap();
        let store = config.store("deps").unwrap();

        assert!(config.settings.dry_run);
        assert_eq!(store.category, StoreCategory::External);
        assert_eq!(store.resolved_max_age_days(), 45);
        assert_eq!(store.depth, 3);
        assert_eq!(store.reserved.as_deref(), Some(&[r"\.lock$".to_string()][..]));
    }

    #[test]
    fn category_picks_default_max_age() {
        assert_eq!(StoreCategory::Recreatable.default_max_age_days(), 7);
        assert_eq!(StoreCategory::External.default_max_age_days(), 30);

        let mut store = StoreConfig::new("deps", "/tmp/deps");
        store.category = StoreCategory::External;
        assert_eq!(store.resolved_max_age_days(), 30);
    }

    #[test]
    fn unknown_category_is_rejected() {
        let yaml = r#"
stores:
  - name: build
    path: /tmp
    category: forever
"#;
        assert!(serde_yaml::from_str::<SweepConfig>(yaml).is_err());
    }

    #[test]
    fn store_lookup_by_name() {
        let config = SweepConfig {
            stores: vec![StoreConfig::new("a", "/a"), StoreConfig::new("b", "/b")],
            ..Default::default()
        };

        assert_eq!(config.store("b").map(|s| s.path.clone()), Some("/b".into()));
        assert!(config.store("c").is_none());
    }

    #[test]
    fn tilde_expands_to_home() {
        let store = StoreConfig::new("home", "~/.cache/tool");
        if let Some(home) = dirs::home_dir() {
            assert_eq!(store.resolved_path(), home.join(".cache/tool"));
        }

        let absolute = StoreConfig::new("abs", "/var/cache");
        assert_eq!(absolute.resolved_path(), PathBuf::from("/var/cache"));
    }

    #[test]
    fn to_store_uses_display_name() {
        let mut config = StoreConfig::new("build", "/var/cache/build");
        assert_eq!(config.to_store().display_name(), "build (/var/cache/build)");

        config.display_name = Some("Build cache".to_string());
        assert_eq!(config.to_store().display_name(), "Build cache");
    }

    #[test]
    fn build_strategy_applies_override() {
        let now = Utc.with_ymd_and_hms(2024, 6, 1, 0, 0, 0).unwrap();
        let clock = FixedClock::new(now);
        let store = StoreConfig::new("build", "/tmp");

        let configured = store.build_strategy(&clock, None).unwrap();
        let overridden = store.build_strategy(&clock, Some(1)).unwrap();

        assert_eq!(configured.threshold().instant(), now - TimeDelta::days(7));
        assert_eq!(overridden.threshold().instant(), now - TimeDelta::days(1));
    }

    #[test]
    fn build_finder_rejects_zero_depth() {
        let mut store = StoreConfig::new("build", "/tmp");
        store.depth = 0;
        assert!(store.build_finder().is_err());
    }

    #[test]
    fn serialization_skips_defaults() {
        let config = SweepConfig {
            stores: vec![StoreConfig::new("build", "/tmp")],
            ..Default::default()
        };
        let yaml = serde_yaml::to_string(&config).unwrap();

        assert!(!yaml.contains("dry_run"));
        assert!(!yaml.contains("max_age_days"));
        assert!(yaml.contains("category: recreatable"));
    }
}

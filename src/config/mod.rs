//! Configuration loading, parsing, and validation for cachesweep.
//!
//! This module handles all aspects of configuration:
//! - Schema definitions in [`schema`]
//! - File discovery and loading in [`loader`]
//! - Validation in [`validator`]
//!
//! # Example
//!
//! ```
//! use cachesweep::config::{parse_config, validate};
//! use std::path::Path;
//!
//! let yaml = "stores:\n  - name: build\n    path: /var/cache/build\n    category: external\n";
//! let config = parse_config(yaml, Path::new("config.yml")).unwrap();
//! validate(&config).unwrap();
//! assert_eq!(config.stores[0].resolved_max_age_days(), 30);
//! ```
//!
//! # Configuration File Location
//!
//! 1. `--config <PATH>` or `CACHESWEEP_CONFIG`
//! 2. `<config dir>/cachesweep/config.yml`

pub mod loader;
pub mod schema;
pub mod validator;

pub use loader::{
    default_config_path, load_config, load_config_file, parse_config, CONFIG_ENV_VAR,
};
pub use schema::{Settings, StoreCategory, StoreConfig, SweepConfig};
pub use validator::{validate, validate_config, ValidationError};

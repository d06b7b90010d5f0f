//! Configuration file discovery and loading.

use crate::config::schema::SweepConfig;
use crate::error::{Result, SweepError};
use std::fs;
use std::path::{Path, PathBuf};

/// Environment variable naming an explicit config file.
pub const CONFIG_ENV_VAR: &str = "CACHESWEEP_CONFIG";

/// Default config location: `<config dir>/cachesweep/config.yml`.
///
/// Falls back to `.cachesweep.yml` in the current directory when the
/// platform has no config directory.
pub fn default_config_path() -> PathBuf {
    match dirs::config_dir() {
        Some(dir) => dir.join("cachesweep").join("config.yml"),
        None => PathBuf::from(".cachesweep.yml"),
    }
}

/// Load a config file and parse it into SweepConfig.
///
/// # Errors
///
/// Returns `ConfigNotFound` if the file doesn't exist.
/// Returns `ConfigParseError` if the YAML is invalid.
pub fn load_config_file(path: &Path) -> Result<SweepConfig> {
    let content = fs::read_to_string(path).map_err(|e| {
        if e.kind() == std::io::ErrorKind::NotFound {
            SweepError::ConfigNotFound {
                path: path.to_path_buf(),
            }
        } else {
            SweepError::Io(e)
        }
    })?;

    parse_config(&content, path)
}

/// Parse YAML content into SweepConfig.
///
/// # Arguments
///
/// * `content` - The YAML content to parse
/// * `source_path` - Path for error reporting
pub fn parse_config(content: &str, source_path: &Path) -> Result<SweepConfig> {
    serde_yaml::from_str(content).map_err(|e| SweepError::ConfigParseError {
        path: source_path.to_path_buf(),
        message: e.to_string(),
    })
}

/// Load config with optional path override.
///
/// Uses `config_override` when given, otherwise [`default_config_path`].
pub fn load_config(config_override: Option<&Path>) -> Result<SweepConfig> {
    match config_override {
        Some(path) => load_config_file(path),
        None => load_config_file(&default_config_path()),
    }
}

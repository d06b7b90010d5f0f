//! CLI command implementations.
//!
//! Each command implements the [`Command`] trait, which provides a uniform
//! interface for executing commands and reporting results.
//!
//! # Architecture
//!
//! Commands are dispatched via [`CommandDispatcher`], which routes CLI
//! subcommands to their implementations.

pub mod clean;
pub mod completions;
pub mod dispatcher;
pub mod stores;

pub use dispatcher::{Command, CommandDispatcher, CommandResult};

use crate::config::{load_config, validate, SweepConfig};
use crate::error::{Result, SweepError};
use crate::ui::UserInterface;
use std::path::Path;

/// Exit code used when no configuration exists.
pub const EXIT_NO_CONFIG: i32 = 2;

/// Load and validate the configuration.
///
/// Returns `Ok(None)` after reporting to the user when the file is missing.
pub(crate) fn load_validated_config(
    config_path: Option<&Path>,
    ui: &mut dyn UserInterface,
) -> Result<Option<SweepConfig>> {
    let config = match load_config(config_path) {
        Ok(c) => c,
        Err(SweepError::ConfigNotFound { path }) => {
            ui.error(&format!(
                "No configuration found at {}. Create it or pass --config.",
                path.display()
            ));
            return Ok(None);
        }
        Err(e) => return Err(e),
    };

    validate(&config)?;
    Ok(Some(config))
}

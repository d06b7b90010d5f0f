//! Stores command implementation.
//!
//! The `cachesweep stores` command lists configured stores with the cutoff
//! a clean run would use right now.

use std::path::PathBuf;

use chrono::{DateTime, SecondsFormat, Utc};
use serde::Serialize;

use crate::cli::args::StoresArgs;
use crate::clock::{Clock, SystemClock};
use crate::config::{StoreCategory, StoreConfig};
use crate::error::Result;
use crate::ui::{SweepTheme, UserInterface};

use super::dispatcher::{Command, CommandResult};
use super::{load_validated_config, EXIT_NO_CONFIG};

/// One row of the store listing.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct StoreSummary {
    /// Store name.
    pub name: String,
    /// Resolved cache root.
    pub path: PathBuf,
    /// Entry category.
    pub category: StoreCategory,
    /// Effective maximum age in days.
    pub max_age_days: i64,
    /// Entries last modified before this instant are stale.
    pub cutoff: DateTime<Utc>,
    /// Whether the cache root exists.
    pub exists: bool,
}

impl StoreSummary {
    fn from_config(store: &StoreConfig, clock: &dyn Clock) -> Result<Self> {
        let strategy = store.build_strategy(clock, None)?;
        let path = store.resolved_path();
        Ok(Self {
            name: store.name.clone(),
            exists: path.is_dir(),
            path,
            category: store.category,
            max_age_days: store.resolved_max_age_days(),
            cutoff: strategy.threshold().instant(),
        })
    }
}

/// The stores command implementation.
pub struct StoresCommand {
    config_path: Option<PathBuf>,
    args: StoresArgs,
    clock: Box<dyn Clock>,
}

impl StoresCommand {
    /// Create a new stores command.
    pub fn new(config_path: Option<PathBuf>, args: StoresArgs) -> Self {
        Self {
            config_path,
            args,
            clock: Box::new(SystemClock),
        }
    }

    /// Replace the clock used to compute cutoffs.
    pub fn with_clock(mut self, clock: Box<dyn Clock>) -> Self {
        self.clock = clock;
        self
    }
}

impl Command for StoresCommand {
    fn execute(&self, ui: &mut dyn UserInterface) -> Result<CommandResult> {
        let Some(config) = load_validated_config(self.config_path.as_deref(), ui)? else {
            return Ok(CommandResult::failure(EXIT_NO_CONFIG));
        };

        let summaries = config
            .stores
            .iter()
            .map(|store| StoreSummary::from_config(store, self.clock.as_ref()))
            .collect::<Result<Vec<_>>>()?;

        if self.args.json {
            ui.message(&serde_json::to_string_pretty(&summaries).map_err(anyhow::Error::from)?);
            return Ok(CommandResult::success());
        }

        let theme = SweepTheme::new();
        ui.message(&format!("  {}", theme.highlight.apply_to("Stores:")));
        for summary in &summaries {
            let missing = if summary.exists {
                String::new()
            } else {
                format!(" {}", theme.warning.apply_to("(missing)"))
            };
            ui.message(&format!(
                "    {} {}{}",
                theme.highlight.apply_to(&summary.name),
                theme.dim.apply_to(summary.path.display()),
                missing
            ));
            ui.message(&format!(
                "      {}",
                theme.dim.apply_to(format!(
                    "{} entries, max age {} days, cutoff {}",
                    category_label(summary.category),
                    summary.max_age_days,
                    summary.cutoff.to_rfc3339_opts(SecondsFormat::Secs, true)
                ))
            ));
        }

        Ok(CommandResult::success())
    }
}

fn category_label(category: StoreCategory) -> &'static str {
    match category {
        StoreCategory::Recreatable => "recreatable",
        StoreCategory::External => "external",
    }
}

//! Clean command implementation.
//!
//! The `cachesweep clean` command runs one cleanup pass per selected store.

use std::path::PathBuf;

use crate::cleanup::{CacheCleanup, CleanupReport};
use crate::cli::args::CleanArgs;
use crate::clock::{Clock, SystemClock};
use crate::config::{StoreConfig, SweepConfig};
use crate::error::{Result, SweepError};
use crate::store::CleanableStore;
use crate::strategy::CleanupStrategy;
use crate::ui::{format_bytes, UserInterface};

use super::dispatcher::{Command, CommandResult};
use super::{load_validated_config, EXIT_NO_CONFIG};

/// The clean command implementation.
pub struct CleanCommand {
    config_path: Option<PathBuf>,
    args: CleanArgs,
    clock: Box<dyn Clock>,
}

impl CleanCommand {
    /// Create a new clean command.
    pub fn new(config_path: Option<PathBuf>, args: CleanArgs) -> Self {
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

    /// Whether this run only reports; `--no-dry-run` overrides the config.
    fn is_dry_run(&self, config: &SweepConfig) -> bool {
        !self.args.no_dry_run && (self.args.dry_run || config.settings.dry_run)
    }

    fn age_strategy(&self, store: &StoreConfig) -> Result<Box<dyn CleanupStrategy>> {
        // Each pass samples the clock again.
        let strategy = store.build_strategy(self.clock.as_ref(), self.args.max_age_days)?;
        Ok(Box::new(strategy))
    }

    /// Run one pass per selected store.
    ///
    /// A store whose pass fails is reported with the error and the
    /// remaining stores still run.
    fn run_passes<F>(
        &self,
        config: &SweepConfig,
        build_strategy: F,
    ) -> Result<Vec<CleanupReport>>
    where
        F: Fn(&StoreConfig) -> Result<Box<dyn CleanupStrategy>>,
    {
        let dry_run = self.is_dry_run(config);
        let mut reports = Vec::new();

        for store_config in select_stores(config, &self.args.stores)? {
            let store = store_config.to_store();
            let outcome = build_strategy(store_config)
                .and_then(|strategy| CacheCleanup::new(strategy).with_dry_run(dry_run).clean(&store));

            let report = match outcome {
                Ok(report) => report,
                Err(e) => {
                    tracing::warn!("Cleanup of {} failed: {}", store.display_name(), e);
                    CleanupReport::failed(store.display_name(), dry_run, e.to_string())
                }
            };
            reports.push(report);
        }

        Ok(reports)
    }

    fn finish(
        &self,
        reports: &[CleanupReport],
        ui: &mut dyn UserInterface,
    ) -> Result<CommandResult> {
        let total = total_of(reports);

        if self.args.json {
            ui.message(&serde_json::to_string_pretty(reports).map_err(anyhow::Error::from)?);
        } else {
            show_reports(reports, &total, ui);
        }

        Ok(if total.has_errors() {
            CommandResult::failure(1)
        } else {
            CommandResult::success()
        })
    }
}

impl Command for CleanCommand {
    fn execute(&self, ui: &mut dyn UserInterface) -> Result<CommandResult> {
        let Some(config) = load_validated_config(self.config_path.as_deref(), ui)? else {
            return Ok(CommandResult::failure(EXIT_NO_CONFIG));
        };

        let reports = self.run_passes(&config, |store| self.age_strategy(store))?;
        self.finish(&reports, ui)
    }
}

/// Pick the stores named on the command line, or all of them.
fn select_stores<'a>(config: &'a SweepConfig, names: &[String]) -> Result<Vec<&'a StoreConfig>> {
    if names.is_empty() {
        return Ok(config.stores.iter().collect());
    }

    names
        .iter()
        .map(|name| {
            config
                .store(name)
                .ok_or_else(|| SweepError::UnknownStore { name: name.clone() })
        })
        .collect()
}

fn total_of(reports: &[CleanupReport]) -> CleanupReport {
    let mut total = CleanupReport {
        store: "total".to_string(),
        dry_run: reports.iter().any(|r| r.dry_run),
        ..Default::default()
    };
    for report in reports {
        total.merge(report);
    }
    total
}

fn show_reports(reports: &[CleanupReport], total: &CleanupReport, ui: &mut dyn UserInterface) {
    let mode = ui.output_mode();
    let verb = if total.dry_run { "Would remove" } else { "Removed" };

    for report in reports {
        if mode.shows_summaries() {
            ui.show_header(&report.store);
            ui.message(&format!(
                "  {} {} of {} entries ({})",
                verb,
                report.deleted,
                report.candidates,
                format_bytes(report.bytes_reclaimed)
            ));
        }
        if mode.shows_details() && report.already_gone > 0 {
            ui.message(&format!("  {} entries were already gone", report.already_gone));
        }
        for error in &report.errors {
            ui.error(error);
        }
    }

    let summary = format!(
        "{} {} entries across {} stores, {} reclaimed",
        verb,
        total.deleted,
        reports.len(),
        format_bytes(total.bytes_reclaimed)
    );
    if total.has_errors() {
        ui.warning(&format!("{} ({} failed)", summary, total.errors.len()));
    } else {
        ui.success(&summary);
    }
}

//! Cleanup orchestration.
//!
//! [`CacheCleanup`] runs one cleanup pass over a store: it asks the
//! strategy's finder for candidates, lets the strategy choose which to
//! delete, removes them, and reports what happened. Deletion failures are
//! collected in the [`CleanupReport`] rather than aborting the pass.

use std::fs;
use std::io::{self, ErrorKind};
use std::path::Path;

use serde::Serialize;
use walkdir::WalkDir;

use crate::error::Result;
use crate::store::CleanableStore;
use crate::strategy::CleanupStrategy;

/// Result of a cleanup pass.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct CleanupReport {
    /// Display name of the cleaned store.
    pub store: String,
    /// Number of eligible entries found.
    pub candidates: usize,
    /// Number of entries the strategy selected.
    pub selected: usize,
    /// Number of entries deleted (or that would be, in a dry run).
    pub deleted: usize,
    /// Selected entries that disappeared before they could be deleted.
    pub already_gone: usize,
    /// Bytes reclaimed.
    pub bytes_reclaimed: u64,
    /// Whether this was a dry run.
    pub dry_run: bool,
    /// Errors recorded during the pass.
    pub errors: Vec<String>,
}

impl CleanupReport {
    fn new(store: String, dry_run: bool) -> Self {
        Self {
            store,
            dry_run,
            ..Default::default()
        }
    }

    /// Report for a pass that could not run, e.g. because discovery failed.
    pub fn failed(store: String, dry_run: bool, error: String) -> Self {
        Self {
            errors: vec![error],
            ..Self::new(store, dry_run)
        }
    }

    /// Check whether the pass recorded any error.
    pub fn has_errors(&self) -> bool {
        !self.errors.is_empty()
    }

    /// Merge another report's counters into this one.
    pub fn merge(&mut self, other: &CleanupReport) {
        self.candidates += other.candidates;
        self.selected += other.selected;
        self.deleted += other.deleted;
        self.already_gone += other.already_gone;
        self.bytes_reclaimed += other.bytes_reclaimed;
        self.errors.extend(other.errors.iter().cloned());
    }
}

/// Runs a cleanup strategy against a store and deletes what it selects.
pub struct CacheCleanup {
    strategy: Box<dyn CleanupStrategy>,
    dry_run: bool,
}

impl CacheCleanup {
    /// Create a new cleanup using the given strategy.
    pub fn new(strategy: Box<dyn CleanupStrategy>) -> Self {
        Self {
            strategy,
            dry_run: false,
        }
    }

    /// Set dry-run mode (report but don't delete).
    pub fn with_dry_run(mut self, dry_run: bool) -> Self {
        self.dry_run = dry_run;
        self
    }

    /// Run one cleanup pass over `store`.
    ///
    /// Errors from the finder propagate unchanged. Failures deleting
    /// individual entries are recorded in the report.
    pub fn clean(&self, store: &dyn CleanableStore) -> Result<CleanupReport> {
        let base_dir = store.base_dir();
        let mut report = CleanupReport::new(store.display_name(), self.dry_run);

        let candidates = self.strategy.finder().find_eligible_files(base_dir)?;
        report.candidates = candidates.len();

        let selected = self.strategy.find_files_to_delete(store, &candidates);
        report.selected = selected.len();

        for path in &selected {
            let outcome = if self.dry_run {
                measure(path)
            } else {
                delete_entry(path)
            };

            match outcome {
                Ok(size) => {
                    if self.dry_run {
                        tracing::info!("DRY-RUN: would delete {} ({} bytes)", path.display(), size);
                    } else {
                        tracing::debug!("Deleted {} ({} bytes)", path.display(), size);
                        remove_empty_parents(base_dir, path);
                    }
                    report.deleted += 1;
                    report.bytes_reclaimed += size;
                }
                Err(e) if e.kind() == ErrorKind::NotFound => {
                    tracing::debug!("Already removed: {}", path.display());
                    report.already_gone += 1;
                }
                Err(e) => {
                    tracing::warn!("Failed to delete {}: {}", path.display(), e);
                    report
                        .errors
                        .push(format!("Failed to delete {}: {}", path.display(), e));
                }
            }
        }

        tracing::info!(
            "{}: {} {} of {} cache entries ({} bytes)",
            report.store,
            if self.dry_run { "would delete" } else { "deleted" },
            report.deleted,
            report.candidates,
            report.bytes_reclaimed
        );

        Ok(report)
    }
}

/// Size of an entry without touching it.
fn measure(path: &Path) -> io::Result<u64> {
    let meta = fs::symlink_metadata(path)?;
    Ok(entry_size(path, &meta))
}

/// Delete a file or directory tree, returning the bytes it held.
fn delete_entry(path: &Path) -> io::Result<u64> {
    let meta = fs::symlink_metadata(path)?;
    let size = entry_size(path, &meta);

    if meta.is_dir() {
        fs::remove_dir_all(path)?;
    } else {
        fs::remove_file(path)?;
    }

    Ok(size)
}

fn entry_size(path: &Path, meta: &fs::Metadata) -> u64 {
    if !meta.is_dir() {
        return meta.len();
    }

    WalkDir::new(path)
        .into_iter()
        .filter_map(|entry| entry.ok())
        .filter_map(|entry| entry.metadata().ok())
        .filter(|meta| meta.is_file())
        .map(|meta| meta.len())
        .sum()
}

/// Remove directories left empty between `path` and `base_dir` (exclusive).
fn remove_empty_parents(base_dir: &Path, path: &Path) {
    let mut current = path.parent();

    while let Some(dir) = current {
        if dir == base_dir || !dir.starts_with(base_dir) {
            break;
        }
        // Fails when the directory still has entries.
        if fs::remove_dir(dir).is_err() {
            break;
        }
        tracing::debug!("Removed empty directory {}", dir.display());
        current = dir.parent();
    }
}

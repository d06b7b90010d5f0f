//! Age-based cleanup: delete entries older than a fixed maximum age.

use std::fmt;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use chrono::{DateTime, SecondsFormat, TimeDelta, Utc};

use super::CleanupStrategy;
use crate::clock::Clock;
use crate::finder::FilesFinder;
use crate::store::CleanableStore;

/// Default maximum age for entries that are cheap to recreate.
pub const DEFAULT_MAX_AGE_IN_DAYS_FOR_RECREATABLE_CACHE_ENTRIES: i64 = 7;

/// Default maximum age for entries fetched from external sources.
pub const DEFAULT_MAX_AGE_IN_DAYS_FOR_EXTERNAL_CACHE_ENTRIES: i64 = 30;

/// The cutoff instant: entries last modified strictly before it are stale.
///
/// Never earlier than the Unix epoch.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub struct AgeThreshold(DateTime<Utc>);

impl AgeThreshold {
    /// The earliest possible threshold. Nothing with a post-epoch mtime is stale.
    pub fn epoch() -> Self {
        Self(DateTime::UNIX_EPOCH)
    }

    /// Compute `max(epoch, now - max_age)`.
    ///
    /// A negative `max_age` yields [`AgeThreshold::epoch`] so a misconfigured
    /// policy deletes nothing.
    pub fn compute(now: DateTime<Utc>, max_age: TimeDelta) -> Self {
        if max_age < TimeDelta::zero() {
            tracing::warn!(
                "Negative maximum age ({}s); no cache entries will be removed",
                max_age.num_seconds()
            );
            return Self::epoch();
        }

        match now.checked_sub_signed(max_age) {
            Some(cutoff) => Self(cutoff.max(DateTime::UNIX_EPOCH)),
            None => Self::epoch(),
        }
    }

    /// Get the cutoff instant.
    pub fn instant(&self) -> DateTime<Utc> {
        self.0
    }

    /// Check whether a modification time falls strictly before the cutoff.
    pub fn is_older(&self, modified: DateTime<Utc>) -> bool {
        modified < self.0
    }
}

impl fmt::Display for AgeThreshold {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0.to_rfc3339_opts(SecondsFormat::Secs, true))
    }
}

/// Deletes any cache entries older than a given age.
///
/// The threshold is sampled once at construction; build a new strategy for
/// every cleanup pass.
pub struct FixedAgeStrategy {
    finder: Box<dyn FilesFinder>,
    threshold: AgeThreshold,
}

impl FixedAgeStrategy {
    /// Create a strategy removing entries older than `max_age_days`.
    pub fn new(finder: Box<dyn FilesFinder>, max_age_days: i64, clock: &dyn Clock) -> Self {
        let threshold = match TimeDelta::try_days(max_age_days) {
            Some(max_age) => AgeThreshold::compute(clock.now(), max_age),
            // Out of range either way: too far back, or absurdly negative.
            None => {
                tracing::warn!(
                    "Maximum age of {} days is out of range; no cache entries will be removed",
                    max_age_days
                );
                AgeThreshold::epoch()
            }
        };

        Self { finder, threshold }
    }

    /// Create a strategy from an exact maximum age.
    pub fn with_max_age(
        finder: Box<dyn FilesFinder>,
        max_age: TimeDelta,
        clock: &dyn Clock,
    ) -> Self {
        Self {
            finder,
            threshold: AgeThreshold::compute(clock.now(), max_age),
        }
    }

    /// Get the computed threshold.
    pub fn threshold(&self) -> AgeThreshold {
        self.threshold
    }

    fn is_stale(&self, path: &Path) -> bool {
        match last_modified(path) {
            Ok(modified) => self.threshold.is_older(modified),
            Err(e) => {
                tracing::debug!("Keeping {}: cannot read modification time: {}", path.display(), e);
                false
            }
        }
    }
}

impl CleanupStrategy for FixedAgeStrategy {
    fn finder(&self) -> &dyn FilesFinder {
        self.finder.as_ref()
    }

    fn find_files_to_delete(
        &self,
        store: &dyn CleanableStore,
        candidates: &[PathBuf],
    ) -> Vec<PathBuf> {
        tracing::info!(
            "{} remove files older than {}.",
            store.display_name(),
            self.threshold
        );

        candidates
            .iter()
            .filter(|path| self.is_stale(path))
            .cloned()
            .collect()
    }
}

impl fmt::Debug for FixedAgeStrategy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FixedAgeStrategy")
            .field("threshold", &self.threshold)
            .finish_non_exhaustive()
    }
}

/// Modification time of the entry itself; symlinks are not followed.
fn last_modified(path: &Path) -> io::Result<DateTime<Utc>> {
    Ok(fs::symlink_metadata(path)?.modified()?.into())
}

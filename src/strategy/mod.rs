//! Cleanup strategies.
//!
//! A [`CleanupStrategy`] decides which eligible files of a store should be
//! deleted. The orchestrator in [`crate::cleanup`] picks one implementation
//! per store at configuration time; it never inspects which one it holds.
//!
//! [`FixedAgeStrategy`] deletes entries whose last modification is older
//! than a configured maximum age.

pub mod fixed_age;

pub use fixed_age::{
    AgeThreshold, FixedAgeStrategy, DEFAULT_MAX_AGE_IN_DAYS_FOR_EXTERNAL_CACHE_ENTRIES,
    DEFAULT_MAX_AGE_IN_DAYS_FOR_RECREATABLE_CACHE_ENTRIES,
};

use std::path::PathBuf;

use crate::finder::FilesFinder;
use crate::store::CleanableStore;

/// Selects the files of a cache store that should be removed.
pub trait CleanupStrategy {
    /// The finder supplying candidates for this strategy.
    fn finder(&self) -> &dyn FilesFinder;

    /// Choose which of `candidates` to delete.
    ///
    /// The result is an order-preserving subsequence of `candidates`.
    /// Implementations must not fail; unreadable candidates are kept.
    fn find_files_to_delete(
        &self,
        store: &dyn CleanableStore,
        candidates: &[PathBuf],
    ) -> Vec<PathBuf>;
}

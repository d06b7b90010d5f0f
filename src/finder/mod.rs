//! Discovery of files eligible for cleanup.
//!
//! A [`FilesFinder`] lists the entries of a cache directory that may be
//! considered for removal. It makes no age judgment; that is left to a
//! [`CleanupStrategy`](crate::strategy::CleanupStrategy).
//!
//! - [`SingleDepthFilesFinder`] lists every entry at a fixed depth
//! - [`ReservedFileFilter`] drops lock files and other cache bookkeeping

pub mod reserved;
pub mod single_depth;

pub use reserved::{ReservedFileFilter, DEFAULT_RESERVED_PATTERNS};
pub use single_depth::SingleDepthFilesFinder;

use std::path::{Path, PathBuf};

use crate::error::Result;

/// Lists files within a cache directory that are candidates for cleanup.
pub trait FilesFinder {
    /// Find eligible entries below `base_dir`.
    fn find_eligible_files(&self, base_dir: &Path) -> Result<Vec<PathBuf>>;
}

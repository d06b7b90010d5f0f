//! Fixed-depth directory listing.

use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use walkdir::WalkDir;

use super::FilesFinder;
use crate::error::{Result, SweepError};

/// Finds every entry exactly `depth` levels below the base directory.
///
/// Depth 1 lists the direct children. Entries may be files or directories;
/// a directory entry is cleaned as a whole.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SingleDepthFilesFinder {
    depth: usize,
}

impl SingleDepthFilesFinder {
    /// Create a finder for the given depth.
    pub fn new(depth: usize) -> Result<Self> {
        if depth == 0 {
            return Err(SweepError::ConfigValidationError {
                message: "finder depth must be at least 1".to_string(),
            });
        }
        Ok(Self { depth })
    }
}

impl FilesFinder for SingleDepthFilesFinder {
    fn find_eligible_files(&self, base_dir: &Path) -> Result<Vec<PathBuf>> {
        if !base_dir.is_dir() {
            tracing::debug!("Cache directory {} does not exist", base_dir.display());
            return Ok(Vec::new());
        }

        let walker = WalkDir::new(base_dir)
            .min_depth(self.depth)
            .max_depth(self.depth)
            .sort_by_file_name();

        let mut files = Vec::new();
        for entry in walker {
            match entry {
                Ok(entry) => files.push(entry.into_path()),
                // Entries removed while walking are not a discovery failure.
                Err(e) if e.io_error().is_some_and(|io| io.kind() == ErrorKind::NotFound) => {
                    tracing::debug!("Skipping vanished entry: {}", e);
                }
                Err(source) => {
                    return Err(SweepError::Discovery {
                        path: base_dir.to_path_buf(),
                        source,
                    })
                }
            }
        }

        Ok(files)
    }
}

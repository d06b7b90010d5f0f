//! Error types for cachesweep operations.
//!
//! This module defines [`SweepError`], the primary error type used throughout
//! the crate, and a [`Result`] type alias for convenience.
//!
//! # Error Handling Strategy
//!
//! - Use `SweepError` for domain-specific errors that need distinct handling
//! - Use `anyhow::Error` (via `SweepError::Other`) for unexpected errors
//! - Metadata-read failures during age decisions are never errors; the
//!   affected file is simply kept

use std::path::PathBuf;
use thiserror::Error;

/// Core error type for cachesweep operations.
#[derive(Debug, Error)]
pub enum SweepError {
    /// Configuration file not found at expected location.
    #[error("Configuration not found: {path}")]
    ConfigNotFound { path: PathBuf },

    /// Failed to parse configuration file.
    #[error("Failed to parse config at {path}: {message}")]
    ConfigParseError { path: PathBuf, message: String },

    /// Invalid configuration structure or values.
    #[error("Invalid configuration: {message}")]
    ConfigValidationError { message: String },

    /// A store was requested that the configuration does not define.
    #[error("Unknown store: {name}")]
    UnknownStore { name: String },

    /// Walking a cache directory for candidates failed.
    #[error("Failed to list cache entries under {path}: {source}")]
    Discovery {
        path: PathBuf,
        #[source]
        source: walkdir::Error,
    },

    /// IO error wrapper.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Generic wrapped error for anyhow interop.
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

/// Result type alias for cachesweep operations.
pub type Result<T> = std::result::Result<T, SweepError>;

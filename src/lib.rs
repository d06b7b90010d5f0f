//! Cachesweep - Age-based cleanup for on-disk caches.
//!
//! Cachesweep deletes cache entries that have not been modified within a
//! configurable number of days. Each configured store names a cache root,
//! the depth at which its entries live, and how long entries may go
//! untouched before they are removed.
//!
//! # Modules
//!
//! - [`cleanup`] - Running a cleanup pass and reporting what it removed
//! - [`cli`] - Command-line interface and argument parsing
//! - [`clock`] - Time source used to compute cutoffs
//! - [`config`] - Configuration loading, parsing, and validation
//! - [`error`] - Error types and result aliases
//! - [`finder`] - Listing the entries eligible for cleanup
//! - [`store`] - Cache store handles
//! - [`strategy`] - Choosing which entries to delete
//! - [`ui`] - Terminal output
//!
//! # Example
//!
//! ```
//! use cachesweep::clock::FixedClock;
//! use cachesweep::finder::SingleDepthFilesFinder;
//! use cachesweep::strategy::FixedAgeStrategy;
//! use chrono::{TimeZone, Utc};
//!
//! let now = Utc.with_ymd_and_hms(1970, 4, 11, 0, 0, 0).unwrap();
//! let finder = Box::new(SingleDepthFilesFinder::new(1).unwrap());
//! let strategy = FixedAgeStrategy::new(finder, 7, &FixedClock::new(now));
//!
//! assert_eq!(strategy.threshold().to_string(), "1970-04-04T00:00:00Z");
//! ```

pub mod cleanup;
pub mod cli;
pub mod clock;
pub mod config;
pub mod error;
pub mod finder;
pub mod store;
pub mod strategy;
pub mod ui;

pub use error::{Result, SweepError};

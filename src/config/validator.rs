//! Configuration validation rules.
//!
//! This module validates configuration for correctness:
//! - At least one store must be configured
//! - Store names must be non-empty and unique
//! - Entry depth must be at least 1
//! - Reserved patterns must be valid regexes
//!
//! A negative `max_age_days` is not an error. It disables deletion for that
//! store, and is reported with a warning.

use crate::config::schema::SweepConfig;
use crate::error::{Result, SweepError};
use regex::Regex;
use std::collections::HashSet;

/// Validation error with context.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidationError {
    /// Rule identifier
    pub rule: String,
    /// Human-readable error message
    pub message: String,
    /// Store name if error is store-specific
    pub store: Option<String>,
}

/// Validate a configuration and return all errors.
///
/// This function collects all validation errors rather than stopping
/// at the first one, allowing users to fix multiple issues at once.
pub fn validate_config(config: &SweepConfig) -> Vec<ValidationError> {
    let mut errors = Vec::new();

    if config.stores.is_empty() {
        errors.push(ValidationError {
            rule: "no-stores".to_string(),
            message: "No cache stores are configured".to_string(),
            store: None,
        });
    }

    let mut seen = HashSet::new();
    for store in &config.stores {
        if store.name.trim().is_empty() {
            errors.push(ValidationError {
                rule: "empty-name".to_string(),
                message: format!("Store at {} has an empty name", store.path.display()),
                store: None,
            });
        } else if !seen.insert(store.name.as_str()) {
            errors.push(ValidationError {
                rule: "duplicate-store".to_string(),
                message: format!("Store '{}' is defined more than once", store.name),
                store: Some(store.name.clone()),
            });
        }

        if store.depth == 0 {
            errors.push(ValidationError {
                rule: "invalid-depth".to_string(),
                message: format!("Store '{}' must have a depth of at least 1", store.name),
                store: Some(store.name.clone()),
            });
        }

        for pattern in store.reserved.iter().flatten() {
            if let Err(e) = Regex::new(pattern) {
                errors.push(ValidationError {
                    rule: "invalid-pattern".to_string(),
                    message: format!(
                        "Store '{}' has invalid reserved pattern '{}': {}",
                        store.name, pattern, e
                    ),
                    store: Some(store.name.clone()),
                });
            }
        }

        if store.resolved_max_age_days() < 0 {
            tracing::warn!(
                "Store '{}' has a negative max_age_days; nothing will be removed from it",
                store.name
            );
        }
    }

    errors
}

/// Validate a configuration, failing on the first batch of errors.
pub fn validate(config: &SweepConfig) -> Result<()> {
    let errors = validate_config(config);
    if errors.is_empty() {
        return Ok(());
    }

    let message = errors
        .iter()
        .map(|e| e.message.as_str())
        .collect::<Vec<_>>()
        .join("; ");
    Err(SweepError::ConfigValidationError { message })
}

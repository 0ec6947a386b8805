//! Configuration validation.
//!
//! # Responsibilities
//! - Semantic validation (serde handles syntactic)
//! - Check every route pattern parses and every route is named
//! - Check table invariants (unique names, terminal catch-all)
//! - Validate value ranges (log level)
//!
//! # Design Decisions
//! - Returns all validation errors, not just first
//! - Validation is pure function: ViewRouterConfig → Result<(), Vec<ValidationError>>
//! - Runs before config is accepted into the system

use std::collections::HashSet;

use thiserror::Error;

use crate::config::schema::ViewRouterConfig;
use crate::routing::{PathPattern, PatternError, TableError};

const LOG_LEVELS: &[&str] = &["trace", "debug", "info", "warn", "error"];

/// A single semantic problem in a config.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("routes[{index}]: name must not be empty")]
    EmptyName { index: usize },

    #[error("routes[{index}] ({name}): view must not be empty")]
    EmptyView { index: usize, name: String },

    #[error("routes[{index}] ({name}): {source}")]
    Pattern {
        index: usize,
        name: String,
        #[source]
        source: PatternError,
    },

    #[error("observability.log_level `{0}` is not one of trace, debug, info, warn, error")]
    LogLevel(String),

    #[error(transparent)]
    Table(#[from] TableError),
}

/// Validate a parsed config.
pub fn validate_config(config: &ViewRouterConfig) -> Result<(), Vec<ValidationError>> {
    let mut errors = Vec::new();

    if !LOG_LEVELS.contains(&config.observability.log_level.to_ascii_lowercase().as_str()) {
        errors.push(ValidationError::LogLevel(
            config.observability.log_level.clone(),
        ));
    }

    let mut patterns_ok = true;
    let mut seen = HashSet::new();
    let mut duplicates = false;

    for (index, route) in config.routes.iter().enumerate() {
        if route.name.trim().is_empty() {
            errors.push(ValidationError::EmptyName { index });
        } else if !seen.insert(route.name.as_str()) {
            duplicates = true;
            errors.push(TableError::DuplicateName(route.name.clone()).into());
        }

        if route.view.trim().is_empty() {
            errors.push(ValidationError::EmptyView {
                index,
                name: route.name.clone(),
            });
        }

        if let Err(source) = PathPattern::parse(&route.path) {
            patterns_ok = false;
            errors.push(ValidationError::Pattern {
                index,
                name: route.name.clone(),
                source,
            });
        }
    }

    // Catch-all placement is only meaningful once every pattern parsed and
    // duplicates have been reported individually above.
    if patterns_ok && !duplicates {
        if let Err(err) = config.table() {
            errors.push(err.into());
        }
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}

//! Configuration validation.
//!
//! # Responsibilities
//! - Semantic validation (serde handles syntactic)
//! - Reject text that would break out of the match-expression literal
//! - Validate value ranges (timeouts > 0, known log levels)
//!
//! # Design Decisions
//! - Returns all validation errors, not just first
//! - Validation is pure function: PolicyConfig → Result<(), Vec<ValidationError>>
//! - Action configs are not validated; the edge owns that vocabulary

use std::fmt;

use tracing::level_filters::LevelFilter;

use crate::config::schema::{PolicyConfig, RouteConfig};

/// A single semantic problem in a route file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ValidationError {
    /// A quote would terminate the `req.URL.matches('...')` literal.
    QuoteInPattern { path: String },
    QuoteInBaseDomain,
    ZeroEstablishTimeout,
    UnknownLogLevel(String),
}

impl fmt::Display for ValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ValidationError::QuoteInPattern { path } => {
                write!(f, "route {} pattern contains a single quote", path)
            }
            ValidationError::QuoteInBaseDomain => write!(f, "base_domain contains a single quote"),
            ValidationError::ZeroEstablishTimeout => {
                write!(f, "listener.establish_timeout_secs must be greater than 0")
            }
            ValidationError::UnknownLogLevel(level) => {
                write!(f, "observability.log_level `{}` is not a log level", level)
            }
        }
    }
}

impl std::error::Error for ValidationError {}

/// Check a parsed config, collecting every problem found.
pub fn validate_config(config: &PolicyConfig) -> Result<(), Vec<ValidationError>> {
    let mut errors = Vec::new();

    if config.base_domain.contains('\'') {
        errors.push(ValidationError::QuoteInBaseDomain);
    }
    if config.listener.establish_timeout_secs == 0 {
        errors.push(ValidationError::ZeroEstablishTimeout);
    }
    if config.observability.log_level.parse::<LevelFilter>().is_err() {
        errors.push(ValidationError::UnknownLogLevel(
            config.observability.log_level.clone(),
        ));
    }
    for (index, route) in config.routes.iter().enumerate() {
        validate_route(route, &format!("routes[{}]", index), &mut errors);
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}

fn validate_route(route: &RouteConfig, path: &str, errors: &mut Vec<ValidationError>) {
    if route.pattern.contains('\'') {
        errors.push(ValidationError::QuoteInPattern {
            path: path.to_string(),
        });
    }
    for (index, child) in route.children.iter().enumerate() {
        validate_route(child, &format!("{}.children[{}]", path, index), errors);
    }
}

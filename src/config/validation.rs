//! Configuration validation.
//!
//! # Responsibilities
//! - Semantic validation (serde handles syntactic)
//! - Check required metric fields and dimension pairs
//! - Check every target has a supported kind and mode
//! - Check logging settings against the allowed values
//!
//! # Design Decisions
//! - Returns all validation errors, not just first
//! - Validation is pure function: BeaconConfig → Result<(), Vec<ValidationError>>
//! - Runs before config is accepted into the system

use thiserror::Error;

use crate::config::schema::{BeaconConfig, LoggingConfig, MetricConfig, ReadinessMode, TargetConfig};

const LOG_LEVELS: &[&str] = &["debug", "info"];
const LOG_FORMATS: &[&str] = &["json", "text"];

/// A single semantic problem in the configuration.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    /// A required field is empty.
    #[error("missing: {0}")]
    Missing(String),

    /// A field holds a value outside its allowed set.
    #[error("{field} invalid: {value}")]
    Invalid { field: String, value: String },
}

impl ValidationError {
    fn missing(field: impl Into<String>) -> Self {
        ValidationError::Missing(field.into())
    }

    fn invalid(field: impl Into<String>, value: impl Into<String>) -> Self {
        ValidationError::Invalid {
            field: field.into(),
            value: value.into(),
        }
    }
}

/// Validate a parsed configuration.
pub fn validate_config(config: &BeaconConfig) -> Result<(), Vec<ValidationError>> {
    let mut errors = Vec::new();

    validate_metric(&config.metric, &mut errors);
    validate_targets(&config.targets, &mut errors);
    validate_logging(&config.logging, &mut errors);

    if let Some(addr) = &config.observability.metrics_address {
        if addr.parse::<std::net::SocketAddr>().is_err() {
            errors.push(ValidationError::invalid("observability.metrics_address", addr));
        }
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}

fn validate_metric(metric: &MetricConfig, errors: &mut Vec<ValidationError>) {
    if metric.namespace.is_empty() {
        errors.push(ValidationError::missing("metric.namespace"));
    }

    if metric.name.is_empty() {
        errors.push(ValidationError::missing("metric.name"));
    }

    for (i, dimension) in metric.dimensions.iter().enumerate() {
        if dimension.name.is_empty() {
            errors.push(ValidationError::missing(format!("metric.dimensions[{}].name", i)));
        }
        if dimension.value.is_empty() {
            errors.push(ValidationError::missing(format!("metric.dimensions[{}].value", i)));
        }
    }
}

fn validate_targets(targets: &[TargetConfig], errors: &mut Vec<ValidationError>) {
    if targets.is_empty() {
        errors.push(ValidationError::missing("targets"));
        return;
    }

    for (i, target) in targets.iter().enumerate() {
        let kind = target.kind.to_string();
        if kind.is_empty() {
            errors.push(ValidationError::missing(format!("targets[{}].kind", i)));
        } else if !target.kind.is_supported() {
            errors.push(ValidationError::invalid(format!("targets[{}].kind", i), kind));
        }

        if target.namespace.is_empty() {
            errors.push(ValidationError::missing(format!("targets[{}].namespace", i)));
        }

        if target.name.is_empty() {
            errors.push(ValidationError::missing(format!("targets[{}].name", i)));
        }

        if let ReadinessMode::Unrecognized(raw) = &target.mode {
            if raw.is_empty() {
                errors.push(ValidationError::missing(format!("targets[{}].mode", i)));
            } else {
                errors.push(ValidationError::invalid(format!("targets[{}].mode", i), raw.as_str()));
            }
        }
    }
}

fn validate_logging(logging: &LoggingConfig, errors: &mut Vec<ValidationError>) {
    if !LOG_LEVELS.contains(&logging.level.as_str()) {
        errors.push(ValidationError::invalid("logging.level", logging.level.as_str()));
    }

    if !LOG_FORMATS.contains(&logging.format.as_str()) {
        errors.push(ValidationError::invalid("logging.format", logging.format.as_str()));
    }
}

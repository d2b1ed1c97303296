//! Configuration validation rules.
//!
//! - Plan overrides must name environments that exist
//! - Package names must be non-empty
//! - A package cannot be both skipped and added

use crate::config::schema::DevstationConfig;
use crate::error::{DevstationError, Result};

/// Validation error with context.
#[derive(Debug, Clone)]
pub struct ValidationError {
    /// Rule identifier
    pub rule: String,
    /// Human-readable error message
    pub message: String,
    /// Environment name if error is plan-specific
    pub environment: Option<String>,
}

/// Validate a configuration and return all errors.
///
/// Collects every error rather than stopping at the first.
pub fn validate_config(config: &DevstationConfig, known_environments: &[&str]) -> Vec<ValidationError> {
    let mut errors = Vec::new();

    for (env, plan) in &config.plans {
        let mut push = |rule: &str, message: String| {
            errors.push(ValidationError {
                rule: rule.to_string(),
                message,
                environment: Some(env.clone()),
            });
        };

        if !known_environments.contains(&env.as_str()) {
            push(
                "unknown-environment",
                format!(
                    "Plan override for unknown environment '{}' (known: {})",
                    env,
                    known_environments.join(", ")
                ),
            );
        }

        let added = plan
            .critical
            .iter()
            .map(|c| c.package.as_str())
            .chain(plan.optional.iter().map(String::as_str));
        for package in added {
            if package.trim().is_empty() {
                push(
                    "empty-package",
                    format!("Plan '{}' adds an entry with an empty package name", env),
                );
            } else if plan.skip.iter().any(|s| s == package) {
                push(
                    "skip-conflict",
                    format!("Plan '{}' both skips and adds '{}'", env, package),
                );
            }
        }

        if plan.skip.iter().any(|s| s.trim().is_empty()) {
            push(
                "empty-package",
                format!("Plan '{}' skips an empty package name", env),
            );
        }
    }

    errors
}

/// Validate a configuration, failing on the first batch of errors.
///
/// # Errors
///
/// Returns `ConfigValidationError` listing every problem found.
pub fn validate(config: &DevstationConfig, known_environments: &[&str]) -> Result<()> {
    let errors = validate_config(config, known_environments);
    if errors.is_empty() {
        return Ok(());
    }
    let message = errors
        .iter()
        .map(|e| e.message.as_str())
        .collect::<Vec<_>>()
        .join("; ");
    Err(DevstationError::ConfigValidationError { message })
}

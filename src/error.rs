//! Error types for Devstation operations.
//!
//! This module defines [`DevstationError`], the primary error type used
//! throughout the application, the narrower errors raised by the install
//! layer, and a [`Result`] type alias for convenience.
//!
//! # Error Handling Strategy
//!
//! - [`InstallError`] is produced per install attempt and is never fatal on
//!   its own; the orchestrator decides whether it aborts or warns
//! - [`BootstrapError`] and [`OrchestrationAborted`] end a setup run
//! - Use `anyhow::Error` (via `DevstationError::Other`) for unexpected errors
//! - Having no package manager yet is `None`, not an error

use std::fmt;
use std::path::PathBuf;
use thiserror::Error;

/// How an external tool ended when it did not succeed.
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize)]
#[serde(rename_all = "snake_case", tag = "kind", content = "detail")]
pub enum ExitInfo {
    /// The tool ran and exited with a nonzero code.
    Code(i32),
    /// The tool ran but produced no exit code (killed by a signal).
    Terminated,
    /// The tool could not be started at all.
    SpawnFailed(String),
}

impl fmt::Display for ExitInfo {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ExitInfo::Code(code) => write!(f, "exit code {}", code),
            ExitInfo::Terminated => write!(f, "terminated without an exit code"),
            ExitInfo::SpawnFailed(reason) => write!(f, "could not be started: {}", reason),
        }
    }
}

/// A single failed install or upgrade attempt.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum InstallError {
    /// The package manager process reported failure.
    #[error("Installing '{package}' failed ({exit_info})")]
    ExternalToolFailed { package: String, exit_info: ExitInfo },
}

impl InstallError {
    /// The package the failed attempt was for.
    pub fn package(&self) -> &str {
        match self {
            InstallError::ExternalToolFailed { package, .. } => package,
        }
    }
}

/// Failure to make any package manager available.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum BootstrapError {
    /// The default package manager could not be installed.
    #[error("No package manager could be installed ({backend}): {reason}")]
    NoBackendInstallable { backend: String, reason: String },
}

/// A critical plan entry could not be satisfied by its primary package
/// nor by any of its alternatives.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("Setting up '{environment}' aborted: could not install critical package '{unsatisfied_entry}'")]
pub struct OrchestrationAborted {
    /// Environment whose plan was running.
    pub environment: String,
    /// Primary package name of the entry that could not be satisfied.
    pub unsatisfied_entry: String,
}

/// Core error type for Devstation operations.
#[derive(Debug, Error)]
pub enum DevstationError {
    /// Environment name is not in the plan registry.
    #[error("Unknown environment: {name}")]
    UnknownEnvironment { name: String },

    /// An install plan violates its structural rules.
    #[error("Invalid plan for '{environment}': {message}")]
    InvalidPlan {
        environment: String,
        message: String,
    },

    /// Configuration file not found at expected location.
    #[error("Configuration not found: {path}")]
    ConfigNotFound { path: PathBuf },

    /// Failed to parse configuration file.
    #[error("Failed to parse config at {path}: {message}")]
    ConfigParseError { path: PathBuf, message: String },

    /// Invalid configuration structure or values.
    #[error("Invalid configuration: {message}")]
    ConfigValidationError { message: String },

    /// No package manager is present on this machine.
    #[error("No package manager available. Run 'devstation setup' to bootstrap one.")]
    NoBackend,

    /// A single install attempt failed outside of an orchestrated plan.
    #[error(transparent)]
    Install(#[from] InstallError),

    /// Bootstrapping a package manager failed.
    #[error(transparent)]
    Bootstrap(#[from] BootstrapError),

    /// A plan run stopped at an unsatisfied critical entry.
    #[error(transparent)]
    Aborted(#[from] OrchestrationAborted),

    /// IO error wrapper.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Generic wrapped error for anyhow interop.
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

/// Result type alias for Devstation operations.
pub type Result<T> = std::result::Result<T, DevstationError>;

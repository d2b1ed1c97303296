//! CLI command implementations.
//!
//! Each command implements the [`Command`] trait, which provides a uniform
//! interface for executing commands and reporting results.
//!
//! # Architecture
//!
//! Commands are dispatched via [`CommandDispatcher`], which routes CLI
//! subcommands to their implementations. Every command resolves the plan
//! registry the same way: built-in plans adjusted by the project's config.

pub mod dispatcher;
pub mod plans;
pub mod setup;
pub mod status;
pub mod upgrade;

pub use dispatcher::{Command, CommandDispatcher, CommandResult};

use std::path::Path;

use crate::backend::{pip, Backend, BackendKind, PackageBackend};
use crate::config::load_config;
use crate::error::Result;
use crate::plan::{PlanRegistry, PlanTarget};
use crate::shell::SystemRunner;

/// Load config and apply it to the built-in plans.
pub(crate) fn load_registry(project_root: &Path, config_path: Option<&Path>) -> Result<PlanRegistry> {
    let config = load_config(project_root, config_path)?;
    PlanRegistry::with_overrides(&config)
}

/// Backend a plan with `target` runs against, given the selected system one.
pub(crate) fn backend_for<'a>(
    target: PlanTarget,
    system: &'a dyn Backend,
    pip: &'a dyn Backend,
) -> &'a dyn Backend {
    match target {
        PlanTarget::System => system,
        PlanTarget::Pip => pip,
    }
}

/// Backends that launch real processes.
pub(crate) fn system_backend(kind: BackendKind) -> PackageBackend {
    PackageBackend::new(kind)
}

/// pip backend that launches real processes.
pub(crate) fn system_pip() -> PackageBackend {
    pip::pip_backend(SystemRunner)
}

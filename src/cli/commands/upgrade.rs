//! Upgrade command implementation.
//!
//! The `devstation upgrade <env>` command upgrades every package in a plan.
//! Failures are warnings; the command only fails when no package manager
//! is present.

use std::path::{Path, PathBuf};

use crate::backend::select_backend;
use crate::cli::args::UpgradeArgs;
use crate::error::{DevstationError, Result};
use crate::orchestrator::upgrade_plan;
use crate::plan::PlanTarget;
use crate::ui::UserInterface;

use super::dispatcher::{Command, CommandResult};
use super::{backend_for, load_registry, system_pip};

/// The upgrade command implementation.
pub struct UpgradeCommand {
    project_root: PathBuf,
    config_path: Option<PathBuf>,
    args: UpgradeArgs,
}

impl UpgradeCommand {
    /// Create a new upgrade command.
    pub fn new(project_root: &Path, config_path: Option<&Path>, args: UpgradeArgs) -> Self {
        Self {
            project_root: project_root.to_path_buf(),
            config_path: config_path.map(Path::to_path_buf),
            args,
        }
    }

    /// Get the command arguments.
    pub fn args(&self) -> &UpgradeArgs {
        &self.args
    }
}

impl Command for UpgradeCommand {
    fn execute(&self, ui: &mut dyn UserInterface) -> Result<CommandResult> {
        let registry = load_registry(&self.project_root, self.config_path.as_deref())?;
        let registered = registry.get(&self.args.environment)?;

        let pip = system_pip();
        let system = match (registered.target, select_backend()) {
            (_, Some(backend)) => backend,
            (PlanTarget::Pip, None) => pip.clone(),
            (PlanTarget::System, None) => return Err(DevstationError::NoBackend),
        };

        ui.show_header(&format!("Upgrading {}", registered.environment()));
        let report = upgrade_plan(
            &registered.plan,
            backend_for(registered.target, &system, &pip),
            ui,
        );

        let failed = report.failures().count();
        if failed == 0 {
            ui.success(&format!("{} upgraded", registered.environment()));
        } else {
            ui.message(&format!(
                "{} of {} packages could not be upgraded",
                failed,
                report.results.len()
            ));
        }

        Ok(CommandResult::success())
    }
}

//! Status command implementation.
//!
//! The `devstation status` command shows the selected package manager and
//! which plan packages it reports as installed. It never installs anything.

use std::path::{Path, PathBuf};

use crate::backend::{select_backend, Backend, BackendSelector};
use crate::cli::args::StatusArgs;
use crate::error::Result;
use crate::orchestrator::{inspect, EntryStatus};
use crate::plan::{PlanRegistry, PlanTarget, RegisteredPlan};
use crate::ui::UserInterface;

use super::dispatcher::{Command, CommandResult};
use super::{backend_for, load_registry, system_pip};

/// The status command implementation.
pub struct StatusCommand {
    project_root: PathBuf,
    config_path: Option<PathBuf>,
    args: StatusArgs,
}

impl StatusCommand {
    /// Create a new status command.
    pub fn new(project_root: &Path, config_path: Option<&Path>, args: StatusArgs) -> Self {
        Self {
            project_root: project_root.to_path_buf(),
            config_path: config_path.map(Path::to_path_buf),
            args,
        }
    }

    /// Get the command arguments.
    pub fn args(&self) -> &StatusArgs {
        &self.args
    }
}

impl Command for StatusCommand {
    fn execute(&self, ui: &mut dyn UserInterface) -> Result<CommandResult> {
        let registry = load_registry(&self.project_root, self.config_path.as_deref())?;
        let plans = plans_to_show(&registry, self.args.environment.as_deref())?;

        if ui.output_mode().shows_detail() {
            let available: Vec<&str> = BackendSelector::system()
                .available()
                .iter()
                .map(|k| k.name())
                .collect();
            ui.message(&format!("Detected package managers: {}", available.join(", ")));
        }

        let system = select_backend();
        let pip = system_pip();
        let display_name = system.as_ref().map(|b| b.kind().display_name());
        show_status(
            &plans,
            system.as_ref().map(|b| b as &dyn Backend),
            display_name,
            &pip,
            ui,
        );

        Ok(CommandResult::success())
    }
}

/// Plans named on the command line, or every system plan.
fn plans_to_show<'a>(
    registry: &'a PlanRegistry,
    environment: Option<&str>,
) -> Result<Vec<&'a RegisteredPlan>> {
    match environment {
        Some(name) => Ok(vec![registry.get(name)?]),
        None => Ok(registry
            .plans()
            .iter()
            .filter(|p| p.target == PlanTarget::System)
            .collect()),
    }
}

/// Report installed state for `plans`.
///
/// Without a system package manager, system plans are listed as unchecked.
pub fn show_status(
    plans: &[&RegisteredPlan],
    system: Option<&dyn Backend>,
    system_display_name: Option<&str>,
    pip: &dyn Backend,
    ui: &mut dyn UserInterface,
) {
    ui.show_header("Devstation status");

    match system_display_name {
        Some(name) => ui.message(&format!("Package manager: {}", name)),
        None => ui.warning(
            "No package manager found. Run 'devstation setup <python|c|all>' to install one.",
        ),
    }

    for registered in plans {
        ui.message("");
        ui.message(&format!("{}:", registered.environment()));

        let backend = match (registered.target, system) {
            (PlanTarget::System, None) => {
                ui.message("  (not checked: no package manager)");
                continue;
            }
            (target, Some(system)) => backend_for(target, system, pip),
            (PlanTarget::Pip, None) => pip,
        };

        for status in inspect(&registered.plan, backend) {
            show_entry(&status, ui);
        }
    }
}

fn show_entry(status: &EntryStatus, ui: &mut dyn UserInterface) {
    if status.installed {
        ui.success(&status.package);
    } else if let Some(alt) = &status.installed_alternative {
        ui.success(&format!("{} (via {})", status.package, alt));
    } else {
        ui.warning(&format!("{} not installed ({})", status.package, status.criticality));
    }
}

//! Setup command implementation.
//!
//! The `devstation setup <target>` command makes sure a package manager is
//! present, then runs the target's plans in order. An aborted plan stops
//! every plan after it.

use std::path::{Path, PathBuf};

use crate::backend::bootstrap::default_context;
use crate::backend::{ensure_backend_available, pip, Backend};
use crate::cli::args::{SetupArgs, SetupTarget};
use crate::error::{InstallError, Result};
use crate::orchestrator::{self, OrchestrationReport};
use crate::plan::PlanRegistry;
use crate::shell::SystemRunner;
use crate::ui::UserInterface;

use super::dispatcher::{Command, CommandResult};
use super::{backend_for, load_registry, system_backend, system_pip};

/// Environment run after `python` completes.
pub const PYTHON_PACKAGES: &str = "python-packages";

/// Backends and tooling a setup run drives.
pub struct SetupContext<'a> {
    /// Selected system package manager.
    pub system: &'a dyn Backend,
    /// pip, for Python package plans.
    pub pip: &'a dyn Backend,
    /// Make `python -m pip` usable.
    pub ensure_pip: &'a dyn Fn(&mut dyn UserInterface) -> std::result::Result<(), InstallError>,
}

/// The setup command implementation.
pub struct SetupCommand {
    project_root: PathBuf,
    config_path: Option<PathBuf>,
    args: SetupArgs,
}

impl SetupCommand {
    /// Create a new setup command.
    pub fn new(project_root: &Path, config_path: Option<&Path>, args: SetupArgs) -> Self {
        Self {
            project_root: project_root.to_path_buf(),
            config_path: config_path.map(Path::to_path_buf),
            args,
        }
    }

    /// Get the command arguments.
    pub fn args(&self) -> &SetupArgs {
        &self.args
    }
}

impl Command for SetupCommand {
    fn execute(&self, ui: &mut dyn UserInterface) -> Result<CommandResult> {
        let registry = load_registry(&self.project_root, self.config_path.as_deref())?;

        let kind = match ensure_backend_available(&default_context(), ui) {
            Ok(kind) => kind,
            Err(e) => {
                ui.error(&e.to_string());
                return Ok(CommandResult::failure(1));
            }
        };
        ui.message(&format!("Using {}", kind.display_name()));

        let system = system_backend(kind);
        let pip_backend = system_pip();
        let ensure_pip = |ui: &mut dyn UserInterface| pip::ensure_pip_available(&SystemRunner, ui);
        let ctx = SetupContext {
            system: &system,
            pip: &pip_backend,
            ensure_pip: &ensure_pip,
        };

        let reports = run_setup(self.args.target, &registry, &ctx, ui)?;

        if self.args.json {
            let json = serde_json::to_string_pretty(&reports).map_err(anyhow::Error::from)?;
            println!("{}", json);
        }

        if reports.iter().all(OrchestrationReport::is_completed) {
            ui.success(&format!("{} setup complete", target_label(self.args.target)));
            Ok(CommandResult::success())
        } else {
            Ok(CommandResult::failure(1))
        }
    }
}

fn target_label(target: SetupTarget) -> &'static str {
    match target {
        SetupTarget::Python => "Python",
        SetupTarget::C => "C",
        SetupTarget::All => "Toolchain",
    }
}

/// Run the plans for `target`, stopping at the first aborted plan.
///
/// After `python` completes, pip is made available and the Python package
/// plan runs. A pip failure skips the package plan with a warning, since
/// every package in it is optional.
///
/// # Errors
///
/// Returns `UnknownEnvironment` if a plan the target needs is missing.
pub fn run_setup(
    target: SetupTarget,
    registry: &PlanRegistry,
    ctx: &SetupContext<'_>,
    ui: &mut dyn UserInterface,
) -> Result<Vec<OrchestrationReport>> {
    let mut reports = Vec::new();

    for environment in target.environments() {
        let registered = registry.get(environment)?;
        ui.show_header(&format!("Setting up {}", environment));

        let backend = backend_for(registered.target, ctx.system, ctx.pip);
        let report = orchestrator::run(&registered.plan, backend, ui);
        let completed = report.is_completed();
        reports.push(report);

        if !completed {
            tracing::info!("'{}' aborted, skipping remaining plans", environment);
            break;
        }

        if *environment == "python" {
            if let Some(report) = run_python_packages(registry, ctx, ui)? {
                reports.push(report);
            }
        }
    }

    Ok(reports)
}

fn run_python_packages(
    registry: &PlanRegistry,
    ctx: &SetupContext<'_>,
    ui: &mut dyn UserInterface,
) -> Result<Option<OrchestrationReport>> {
    let registered = registry.get(PYTHON_PACKAGES)?;
    ui.show_header("Setting up Python packages");

    if let Err(e) = (ctx.ensure_pip)(ui) {
        tracing::warn!("pip unavailable: {}", e);
        ui.warning(&format!("{}; skipping Python packages", e));
        return Ok(None);
    }

    let backend = backend_for(registered.target, ctx.system, ctx.pip);
    Ok(Some(orchestrator::run(&registered.plan, backend, ui)))
}

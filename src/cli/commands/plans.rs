//! Plans command implementation.
//!
//! The `devstation plans` command lists every environment and its entries.

use std::path::{Path, PathBuf};

use crate::cli::args::PlansArgs;
use crate::error::Result;
use crate::plan::{PlanEntry, PlanRegistry, PlanTarget};
use crate::ui::UserInterface;

use super::dispatcher::{Command, CommandResult};
use super::load_registry;

/// The plans command implementation.
pub struct PlansCommand {
    project_root: PathBuf,
    config_path: Option<PathBuf>,
    args: PlansArgs,
}

impl PlansCommand {
    /// Create a new plans command.
    pub fn new(project_root: &Path, config_path: Option<&Path>, args: PlansArgs) -> Self {
        Self {
            project_root: project_root.to_path_buf(),
            config_path: config_path.map(Path::to_path_buf),
            args,
        }
    }
}

impl Command for PlansCommand {
    fn execute(&self, ui: &mut dyn UserInterface) -> Result<CommandResult> {
        let registry = load_registry(&self.project_root, self.config_path.as_deref())?;

        if self.args.json {
            let json = serde_json::to_string_pretty(registry.plans()).map_err(anyhow::Error::from)?;
            println!("{}", json);
            return Ok(CommandResult::success());
        }

        show_plans(&registry, ui);
        Ok(CommandResult::success())
    }
}

/// One listing line for an entry.
fn describe_entry(entry: &PlanEntry) -> String {
    if entry.alternatives.is_empty() {
        format!("  {} ({})", entry.package, entry.criticality)
    } else {
        format!(
            "  {} ({}, falls back to {})",
            entry.package,
            entry.criticality,
            entry.alternatives.join(", ")
        )
    }
}

fn show_plans(registry: &PlanRegistry, ui: &mut dyn UserInterface) {
    for registered in registry.plans() {
        let via = match registered.target {
            PlanTarget::System => "system package manager",
            PlanTarget::Pip => "pip",
        };
        ui.show_header(&format!(
            "{} - {} (via {})",
            registered.environment(),
            registered.description,
            via
        ));
        for entry in registered.plan.entries() {
            ui.message(&describe_entry(entry));
        }
    }
}

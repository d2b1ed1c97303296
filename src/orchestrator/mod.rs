//! Installation orchestrator.
//!
//! [`run`] installs a plan's entries one at a time, in plan order, against
//! a single backend. Failure handling depends on the entry:
//!
//! - Optional entry fails: recorded, warned about, and the run continues.
//! - Critical entry fails: its alternatives are tried in order. The first
//!   one that installs satisfies the entry. If every alternative fails too,
//!   the run stops there with an [`Verdict::Aborted`] verdict and no later
//!   entry is attempted.
//!
//! Each (entry, package) pair is attempted exactly once. There are no
//! retries; the alternatives list is the only source of resilience.
//!
//! # Modules
//!
//! - [`report`] - Per-entry results and the overall verdict
//! - [`inspect`] - Read-only installed-state queries for a plan
//! - [`upgrade`] - Upgrading every entry of a plan

pub mod inspect;
pub mod report;
pub mod upgrade;

pub use inspect::{inspect, EntryStatus};
pub use report::{InstallResult, OrchestrationReport, Verdict};
pub use upgrade::upgrade_plan;

use crate::backend::Backend;
use crate::error::InstallError;
use crate::plan::{Criticality, InstallPlan, PlanEntry};
use crate::ui::UserInterface;

/// Install every entry of `plan` through `backend`.
///
/// Always returns a report; use [`OrchestrationReport::into_result`] to turn
/// an abort into an error.
pub fn run(
    plan: &InstallPlan,
    backend: &dyn Backend,
    ui: &mut dyn UserInterface,
) -> OrchestrationReport {
    tracing::info!(
        "Running '{}' plan ({} entries) with {}",
        plan.environment(),
        plan.len(),
        backend.name()
    );

    let mut results = Vec::with_capacity(plan.len());

    for entry in plan.entries() {
        ui.message(&format!("Installing {}...", entry.package));

        let primary_error = match backend.install(&entry.package) {
            Ok(()) => {
                ui.success(&format!("{} installed", entry.package));
                results.push(InstallResult::installed(&entry.package, entry.criticality));
                continue;
            }
            Err(e) => e,
        };

        match entry.criticality {
            Criticality::Optional => {
                tracing::warn!("Optional package '{}' failed: {}", entry.package, primary_error);
                ui.warning(&format!("{} (optional, continuing)", primary_error));
                results.push(InstallResult::failed(
                    &entry.package,
                    Criticality::Optional,
                    primary_error.to_string(),
                ));
            }
            Criticality::Critical => match install_alternative(entry, primary_error, backend, ui) {
                Ok(alternative) => {
                    results.push(InstallResult::via_alternative(&entry.package, &alternative));
                }
                Err(detail) => {
                    tracing::warn!(
                        "Critical package '{}' could not be installed: {}",
                        entry.package,
                        detail
                    );
                    ui.error(&format!(
                        "Could not install critical package '{}': {}",
                        entry.package, detail
                    ));
                    results.push(InstallResult::failed(
                        &entry.package,
                        Criticality::Critical,
                        detail,
                    ));
                    return OrchestrationReport {
                        environment: plan.environment().to_string(),
                        backend: backend.name().to_string(),
                        results,
                        verdict: Verdict::Aborted {
                            unsatisfied_entry: entry.package.clone(),
                        },
                    };
                }
            },
        }
    }

    OrchestrationReport {
        environment: plan.environment().to_string(),
        backend: backend.name().to_string(),
        results,
        verdict: Verdict::Completed,
    }
}

/// Try a failed critical entry's alternatives in order.
///
/// Returns the alternative that installed, or every failure joined together.
fn install_alternative(
    entry: &PlanEntry,
    primary_error: InstallError,
    backend: &dyn Backend,
    ui: &mut dyn UserInterface,
) -> Result<String, String> {
    let mut failures = vec![primary_error.to_string()];
    let mut failed = entry.package.as_str();

    for alternative in &entry.alternatives {
        ui.warning(&format!("{} failed, trying {}", failed, alternative));
        tracing::debug!("Trying alternative '{}' for '{}'", alternative, entry.package);

        match backend.install(alternative) {
            Ok(()) => {
                ui.success(&format!("{} installed (in place of {})", alternative, entry.package));
                return Ok(alternative.clone());
            }
            Err(e) => {
                failures.push(e.to_string());
                failed = alternative.as_str();
            }
        }
    }

    Err(failures.join("; "))
}

//! Plan-wide upgrades.

use crate::backend::Backend;
use crate::plan::InstallPlan;
use crate::ui::UserInterface;

use super::{InstallResult, OrchestrationReport, Verdict};

/// Upgrade the primary package of every entry.
///
/// Upgrades never abort: a failure is a warning whatever the entry's
/// criticality, and the verdict is always `Completed`.
pub fn upgrade_plan(
    plan: &InstallPlan,
    backend: &dyn Backend,
    ui: &mut dyn UserInterface,
) -> OrchestrationReport {
    tracing::info!("Upgrading '{}' plan with {}", plan.environment(), backend.name());

    let results = plan
        .entries()
        .iter()
        .map(|entry| {
            ui.message(&format!("Upgrading {}...", entry.package));
            match backend.upgrade(&entry.package) {
                Ok(()) => {
                    ui.success(&format!("{} upgraded", entry.package));
                    InstallResult::installed(&entry.package, entry.criticality)
                }
                Err(e) => {
                    tracing::warn!("Upgrade of '{}' failed: {}", entry.package, e);
                    ui.warning(&format!("Upgrading {} failed: {}", entry.package, e));
                    InstallResult::failed(&entry.package, entry.criticality, e.to_string())
                }
            }
        })
        .collect();

    OrchestrationReport {
        environment: plan.environment().to_string(),
        backend: backend.name().to_string(),
        results,
        verdict: Verdict::Completed,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::backend::ScriptedBackend;
    use crate::plan::PlanEntry;
    use crate::ui::MockUI;

    #[test]
    fn upgrades_every_primary_and_tolerates_failures() {
        let plan = InstallPlan::new(
            "c",
            vec![
                PlanEntry::critical("mingw", ["vsbuildtools"]),
                PlanEntry::optional("cmake"),
            ],
        )
        .unwrap();
        let backend = ScriptedBackend::new("fake").failing(["mingw"]);
        let mut ui = MockUI::new();

        let report = upgrade_plan(&plan, &backend, &mut ui);

        assert!(report.is_completed());
        assert_eq!(backend.upgrades(), vec!["mingw", "cmake"]);
        assert!(backend.attempts().is_empty());
        assert!(!report.results[0].succeeded);
        assert!(report.results[1].succeeded);
        assert!(ui.has_warning("Upgrading mingw failed"));
        assert!(ui.errors().is_empty());
    }
}

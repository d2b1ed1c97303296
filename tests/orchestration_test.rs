//! Integration tests for plan orchestration through the public API.

use std::cell::Cell;
use std::path::{Path, PathBuf};

use devstation::backend::{ensure_backend_available, BackendKind, BootstrapContext, ScriptedBackend};
use devstation::error::ExitInfo;
use devstation::orchestrator::{run, upgrade_plan, Verdict};
use devstation::plan::{InstallPlan, PlanEntry, PlanRegistry};
use devstation::ui::MockUI;

fn compiler_plan() -> InstallPlan {
    InstallPlan::new(
        "c",
        vec![
            PlanEntry::critical("mingw", ["vsbuildtools"]),
            PlanEntry::optional("gdb"),
            PlanEntry::optional("clang-format"),
        ],
    )
    .unwrap()
}

#[test]
fn fallback_compiler_and_missing_debugger_complete() {
    let backend = ScriptedBackend::new("fake").failing(["mingw", "gdb"]);
    let mut ui = MockUI::new();

    let report = run(&compiler_plan(), &backend, &mut ui);

    assert_eq!(report.verdict, Verdict::Completed);
    assert_eq!(
        report.results[0].used_alternative.as_deref(),
        Some("vsbuildtools")
    );
    assert!(!report.results[1].succeeded);
    assert!(report.results[2].succeeded);
}

#[test]
fn unsatisfied_compiler_aborts_with_single_result() {
    let plan = InstallPlan::new("c", vec![PlanEntry::critical("mingw", ["vsbuildtools"])]).unwrap();
    let backend = ScriptedBackend::new("fake").failing(["mingw", "vsbuildtools"]);
    let mut ui = MockUI::new();

    let report = run(&plan, &backend, &mut ui);

    assert_eq!(report.results.len(), 1);
    let err = report.into_result().unwrap_err();
    assert_eq!(err.unsatisfied_entry, "mingw");
}

#[test]
fn builtin_c_plan_aborts_before_build_tools() {
    let registry = PlanRegistry::builtin();
    let backend =
        ScriptedBackend::new("fake").failing(["mingw", "visualstudio2022buildtools"]);
    let mut ui = MockUI::new();

    let report = run(&registry.get("c").unwrap().plan, &backend, &mut ui);

    assert!(!report.is_completed());
    assert_eq!(backend.attempts(), vec!["mingw", "visualstudio2022buildtools"]);
}

#[test]
fn upgrade_never_aborts() {
    let backend = ScriptedBackend::new("fake").failing(["mingw", "gdb", "clang-format"]);
    let mut ui = MockUI::new();

    let report = upgrade_plan(&compiler_plan(), &backend, &mut ui);

    assert_eq!(report.verdict, Verdict::Completed);
    assert_eq!(report.failures().count(), 3);
}

#[test]
fn bootstrap_twice_installs_once() {
    let present = Cell::new(false);
    let installs = Cell::new(0);
    let prepended = Cell::new(false);
    let probe = |tool: &str| present.get() && tool == "choco";
    let install = || -> Result<(), ExitInfo> {
        installs.set(installs.get() + 1);
        present.set(true);
        Ok(())
    };
    let prepend = |_: &Path| prepended.set(true);
    let bin_dir = || PathBuf::from("choco-bin");
    let ctx = BootstrapContext {
        probe: &probe,
        install_default: &install,
        prepend_path: &prepend,
        default_bin_dir: &bin_dir,
    };
    let mut ui = MockUI::new();

    let first = ensure_backend_available(&ctx, &mut ui).unwrap();
    let second = ensure_backend_available(&ctx, &mut ui).unwrap();

    assert_eq!(first, BackendKind::Chocolatey);
    assert_eq!(second, BackendKind::Chocolatey);
    assert_eq!(installs.get(), 1);
    assert!(prepended.get());
}

//! pip support for Python package plans.
//!
//! Python packages are installed through `python -m pip`. pip ships with most
//! Python installers but may be missing, so it is checked (and bootstrapped
//! with `ensurepip`) before a package plan runs.

use super::{BackendKind, PackageBackend};
use crate::error::{ExitInfo, InstallError};
use crate::shell::{CommandOptions, CommandRunner};
use crate::ui::UserInterface;

fn args(list: &[&str]) -> Vec<String> {
    list.iter().map(|s| s.to_string()).collect()
}

/// Make sure `python -m pip` works, running `ensurepip` if it does not.
pub fn ensure_pip_available<R: CommandRunner>(
    runner: &R,
    ui: &mut dyn UserInterface,
) -> Result<(), InstallError> {
    let program = BackendKind::Pip.program();

    let present = runner
        .run(program, &args(&["-m", "pip", "--version"]), &CommandOptions::captured())
        .map(|r| r.success)
        .unwrap_or(false);
    if present {
        ui.success("pip is available");
        return Ok(());
    }

    ui.message("Installing pip...");
    let exit_info = match runner.run(
        program,
        &args(&["-m", "ensurepip", "--upgrade"]),
        &CommandOptions::passthrough(),
    ) {
        Ok(result) => result.exit_info(),
        Err(e) => Some(ExitInfo::SpawnFailed(e.to_string())),
    };

    match exit_info {
        None => Ok(()),
        Some(exit_info) => Err(InstallError::ExternalToolFailed {
            package: "pip".to_string(),
            exit_info,
        }),
    }
}

/// Backend for installing Python packages with pip, sharing `runner`.
pub fn pip_backend<R: CommandRunner>(runner: R) -> PackageBackend<R> {
    PackageBackend::with_runner(BackendKind::Pip, runner)
}

//! Bootstrapping a package manager.
//!
//! When no package manager is present, the default one (Chocolatey) is
//! installed through its own PowerShell installer. This happens outside the
//! [`Backend`](super::Backend) abstraction since no backend exists yet.
//! The step is idempotent: once a package manager is found, it does nothing.

use std::path::{Path, PathBuf};

use super::selector::BackendSelector;
use super::BackendKind;
use crate::error::{BootstrapError, ExitInfo};
use crate::shell::{command_available, execute, prepend_path, CommandOptions};
use crate::ui::UserInterface;

/// Package manager installed when none is found.
pub const DEFAULT_BACKEND: BackendKind = BackendKind::Chocolatey;

const CHOCOLATEY_INSTALL_SCRIPT: &str = "Set-ExecutionPolicy Bypass -Scope Process -Force; \
[System.Net.ServicePointManager]::SecurityProtocol = \
[System.Net.ServicePointManager]::SecurityProtocol -bor 3072; \
iex ((New-Object System.Net.WebClient).DownloadString('https://community.chocolatey.org/install.ps1'))";

/// Mockable dependencies for the bootstrap step.
pub struct BootstrapContext<'a> {
    /// Report whether an executable resolves on the search path.
    pub probe: &'a dyn Fn(&str) -> bool,
    /// Run the default package manager's installer.
    pub install_default: &'a dyn Fn() -> Result<(), ExitInfo>,
    /// Prepend a directory to the process search path.
    pub prepend_path: &'a dyn Fn(&Path),
    /// Directory the default package manager's executable is installed to.
    pub default_bin_dir: &'a dyn Fn() -> PathBuf,
}

/// Build the default `BootstrapContext` for production use.
pub fn default_context() -> BootstrapContext<'static> {
    BootstrapContext {
        probe: &command_available,
        install_default: &install_chocolatey,
        prepend_path: &prepend_path,
        default_bin_dir: &chocolatey_bin_dir,
    }
}

/// Make sure some package manager is available, installing the default one
/// if needed. Returns the package manager that is now usable.
pub fn ensure_backend_available(
    ctx: &BootstrapContext<'_>,
    ui: &mut dyn UserInterface,
) -> Result<BackendKind, BootstrapError> {
    let selector = BackendSelector::new(ctx.probe);
    if let Some(kind) = selector.select() {
        return Ok(kind);
    }

    ui.message(&format!(
        "No package manager found. Installing {}...",
        DEFAULT_BACKEND.display_name()
    ));

    (ctx.install_default)().map_err(|exit_info| BootstrapError::NoBackendInstallable {
        backend: DEFAULT_BACKEND.name().to_string(),
        reason: format!("installer failed ({})", exit_info),
    })?;

    // A fresh install is not on this process's PATH yet.
    (ctx.prepend_path)(&(ctx.default_bin_dir)());

    match selector.select() {
        Some(kind) => {
            ui.success(&format!("{} installed", kind.display_name()));
            Ok(kind)
        }
        None => Err(BootstrapError::NoBackendInstallable {
            backend: DEFAULT_BACKEND.name().to_string(),
            reason: "installer exited 0 but no package manager was found on PATH. \
                     May need shell restart."
                .to_string(),
        }),
    }
}

/// Where Chocolatey places `choco.exe`.
pub fn chocolatey_bin_dir() -> PathBuf {
    std::env::var_os("ProgramData")
        .map(PathBuf::from)
        .unwrap_or_else(|| PathBuf::from(r"C:\ProgramData"))
        .join("chocolatey")
        .join("bin")
}

fn install_chocolatey() -> Result<(), ExitInfo> {
    let args: Vec<String> = [
        "-NoProfile",
        "-ExecutionPolicy",
        "Bypass",
        "-Command",
        CHOCOLATEY_INSTALL_SCRIPT,
    ]
    .iter()
    .map(|s| s.to_string())
    .collect();

    match execute("powershell", &args, &CommandOptions::passthrough()) {
        Ok(result) => match result.exit_info() {
            None => Ok(()),
            Some(info) => Err(info),
        },
        Err(e) => Err(ExitInfo::SpawnFailed(e.to_string())),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ui::MockUI;
    use std::cell::{Cell, RefCell};

    #[test]
    fn present_backend_short_circuits() {
        let installs = Cell::new(0);
        let probe = |tool: &str| tool == "winget";
        let install = || -> Result<(), ExitInfo> {
            installs.set(installs.get() + 1);
            Ok(())
        };
        let ctx = BootstrapContext {
            probe: &probe,
            install_default: &install,
            prepend_path: &|_| {},
            default_bin_dir: &|| PathBuf::from("bin"),
        };
        let mut ui = MockUI::new();

        let kind = ensure_backend_available(&ctx, &mut ui).unwrap();

        assert_eq!(kind, BackendKind::Winget);
        assert_eq!(installs.get(), 0);
        assert!(ui.messages().is_empty());
    }

    #[test]
    fn installs_default_when_nothing_present() {
        let present = Cell::new(false);
        let probe = |tool: &str| present.get() && tool == "choco";
        let install = || -> Result<(), ExitInfo> {
            present.set(true);
            Ok(())
        };
        let ctx = BootstrapContext {
            probe: &probe,
            install_default: &install,
            prepend_path: &|_| {},
            default_bin_dir: &|| PathBuf::from("bin"),
        };
        let mut ui = MockUI::new();

        let kind = ensure_backend_available(&ctx, &mut ui).unwrap();

        assert_eq!(kind, BackendKind::Chocolatey);
        assert!(ui.has_message("Installing Chocolatey"));
        assert!(ui.has_success("Chocolatey installed"));
    }

    #[test]
    fn second_call_never_reinstalls() {
        let present = Cell::new(false);
        let installs = Cell::new(0);
        let probe = |tool: &str| present.get() && tool == "choco";
        let install = || -> Result<(), ExitInfo> {
            installs.set(installs.get() + 1);
            present.set(true);
            Ok(())
        };
        let ctx = BootstrapContext {
            probe: &probe,
            install_default: &install,
            prepend_path: &|_| {},
            default_bin_dir: &|| PathBuf::from("bin"),
        };
        let mut ui = MockUI::new();

        ensure_backend_available(&ctx, &mut ui).unwrap();
        ensure_backend_available(&ctx, &mut ui).unwrap();

        assert_eq!(installs.get(), 1);
    }

    #[test]
    fn failed_installer_is_no_backend_installable() {
        let probe = |_: &str| false;
        let install = || -> Result<(), ExitInfo> { Err(ExitInfo::Code(1)) };
        let ctx = BootstrapContext {
            probe: &probe,
            install_default: &install,
            prepend_path: &|_| {},
            default_bin_dir: &|| PathBuf::from("bin"),
        };
        let mut ui = MockUI::new();

        let err = ensure_backend_available(&ctx, &mut ui).unwrap_err();

        let BootstrapError::NoBackendInstallable { backend, reason } = err;
        assert_eq!(backend, "chocolatey");
        assert!(reason.contains("exit code 1"));
    }

    #[test]
    fn installed_but_not_found_is_error() {
        let probe = |_: &str| false;
        let install = || -> Result<(), ExitInfo> { Ok(()) };
        let ctx = BootstrapContext {
            probe: &probe,
            install_default: &install,
            prepend_path: &|_| {},
            default_bin_dir: &|| PathBuf::from("bin"),
        };
        let mut ui = MockUI::new();

        let err = ensure_backend_available(&ctx, &mut ui).unwrap_err();

        assert!(err.to_string().contains("shell restart"));
    }

    #[test]
    fn bin_dir_is_prepended_before_reprobe() {
        let prepended = RefCell::new(Vec::new());
        let probe = |tool: &str| {
            tool == "choco" && prepended.borrow().contains(&PathBuf::from("choco-bin"))
        };
        let install = || -> Result<(), ExitInfo> { Ok(()) };
        let prepend = |dir: &Path| prepended.borrow_mut().push(dir.to_path_buf());
        let ctx = BootstrapContext {
            probe: &probe,
            install_default: &install,
            prepend_path: &prepend,
            default_bin_dir: &|| PathBuf::from("choco-bin"),
        };
        let mut ui = MockUI::new();

        let kind = ensure_backend_available(&ctx, &mut ui).unwrap();

        assert_eq!(kind, BackendKind::Chocolatey);
        assert_eq!(*prepended.borrow(), vec![PathBuf::from("choco-bin")]);
    }

    #[test]
    fn chocolatey_bin_dir_ends_in_chocolatey_bin() {
        let dir = chocolatey_bin_dir();
        assert!(dir.ends_with(Path::new("chocolatey").join("bin")));
    }
}

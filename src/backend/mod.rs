//! Package-manager backends.
//!
//! A [`Backend`] installs, queries, and upgrades named packages by driving
//! one external package manager. Backends are pure dispatchers: each call
//! launches the tool once, waits for it, and maps its exit status. They never
//! retry and keep no state between calls; fallback policy belongs to the
//! orchestrator.
//!
//! The set of package managers is closed ([`BackendKind`]). The trait exists
//! so the orchestrator can be exercised against [`ScriptedBackend`].
//!
//! # Modules
//!
//! - [`selector`] - Picks the first package manager present on the host
//! - [`bootstrap`] - Installs a default package manager when none is present
//! - [`pip`] - pip availability for the Python package plan
//! - [`scripted`] - In-memory backend with scripted outcomes

pub mod bootstrap;
pub mod pip;
pub mod scripted;
pub mod selector;

pub use bootstrap::{ensure_backend_available, BootstrapContext};
pub use scripted::ScriptedBackend;
pub use selector::{select_backend, BackendSelector, SYSTEM_PRIORITY};

use crate::error::{ExitInfo, InstallError};
use crate::shell::{CommandOptions, CommandRunner, SystemRunner};
use serde::Serialize;
use std::fmt;

/// Capability set of one package manager.
pub trait Backend {
    /// Short identifier used in messages and reports.
    fn name(&self) -> &str;

    /// Install a package. Tool output is passed through to the user.
    fn install(&self, package: &str) -> Result<(), InstallError>;

    /// Query whether a package is installed. Never changes the system.
    fn is_installed(&self, package: &str) -> bool;

    /// Upgrade a package. Tool output is passed through to the user.
    fn upgrade(&self, package: &str) -> Result<(), InstallError>;
}

/// Known package managers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum BackendKind {
    /// Windows Package Manager, built into current Windows releases.
    Winget,
    /// Chocolatey, third-party and installable on demand.
    Chocolatey,
    /// pip, driven through the Python interpreter.
    Pip,
}

impl BackendKind {
    /// Executable launched for this package manager.
    pub fn program(&self) -> &'static str {
        match self {
            Self::Winget => "winget",
            Self::Chocolatey => "choco",
            Self::Pip => "python",
        }
    }

    /// Short identifier.
    pub fn name(&self) -> &'static str {
        match self {
            Self::Winget => "winget",
            Self::Chocolatey => "chocolatey",
            Self::Pip => "pip",
        }
    }

    /// Human-readable name.
    pub fn display_name(&self) -> &'static str {
        match self {
            Self::Winget => "Windows Package Manager",
            Self::Chocolatey => "Chocolatey",
            Self::Pip => "pip",
        }
    }

    /// Arguments for installing `package`.
    pub fn install_args(&self, package: &str) -> Vec<String> {
        let args: Vec<&str> = match self {
            Self::Winget => vec![
                "install",
                package,
                "--accept-package-agreements",
                "--accept-source-agreements",
            ],
            Self::Chocolatey => vec!["install", package, "-y"],
            Self::Pip => vec!["-m", "pip", "install", package],
        };
        args.into_iter().map(String::from).collect()
    }

    /// Arguments for querying whether `package` is installed.
    pub fn query_args(&self, package: &str) -> Vec<String> {
        let args: Vec<&str> = match self {
            Self::Winget => vec!["list", package],
            Self::Chocolatey => vec!["list", "--local-only", package],
            Self::Pip => vec!["-m", "pip", "show", package],
        };
        args.into_iter().map(String::from).collect()
    }

    /// Arguments for upgrading `package`.
    pub fn upgrade_args(&self, package: &str) -> Vec<String> {
        let args: Vec<&str> = match self {
            Self::Winget => vec!["upgrade", package],
            Self::Chocolatey => vec!["upgrade", package, "-y"],
            Self::Pip => vec!["-m", "pip", "install", "--upgrade", package],
        };
        args.into_iter().map(String::from).collect()
    }

    /// winget and choco exit 0 for empty listings, so their output must
    /// mention the package. `pip show` exits nonzero when it finds nothing.
    fn query_needs_name_in_output(&self) -> bool {
        matches!(self, Self::Winget | Self::Chocolatey)
    }
}

impl fmt::Display for BackendKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name())
    }
}

/// A backend that drives a real package manager process.
#[derive(Debug, Clone)]
pub struct PackageBackend<R = SystemRunner> {
    kind: BackendKind,
    runner: R,
}

impl PackageBackend<SystemRunner> {
    /// Create a backend that launches real processes.
    pub fn new(kind: BackendKind) -> Self {
        Self {
            kind,
            runner: SystemRunner,
        }
    }
}

impl<R: CommandRunner> PackageBackend<R> {
    /// Create a backend with a custom command runner.
    pub fn with_runner(kind: BackendKind, runner: R) -> Self {
        Self { kind, runner }
    }

    /// Which package manager this backend drives.
    pub fn kind(&self) -> BackendKind {
        self.kind
    }

    fn invoke(&self, package: &str, args: Vec<String>) -> Result<(), InstallError> {
        let outcome = self
            .runner
            .run(self.kind.program(), &args, &CommandOptions::passthrough());

        let exit_info = match outcome {
            Ok(result) => match result.exit_info() {
                None => return Ok(()),
                Some(info) => info,
            },
            Err(e) => ExitInfo::SpawnFailed(e.to_string()),
        };

        Err(InstallError::ExternalToolFailed {
            package: package.to_string(),
            exit_info,
        })
    }
}

impl<R: CommandRunner> Backend for PackageBackend<R> {
    fn name(&self) -> &str {
        self.kind.name()
    }

    fn install(&self, package: &str) -> Result<(), InstallError> {
        self.invoke(package, self.kind.install_args(package))
    }

    fn is_installed(&self, package: &str) -> bool {
        let result = match self.runner.run(
            self.kind.program(),
            &self.kind.query_args(package),
            &CommandOptions::captured(),
        ) {
            Ok(result) => result,
            Err(e) => {
                tracing::debug!("{} query for {} failed to start: {}", self.kind, package, e);
                return false;
            }
        };

        if !result.success {
            return false;
        }
        if self.kind.query_needs_name_in_output() {
            result
                .stdout
                .to_lowercase()
                .contains(&package.to_lowercase())
        } else {
            true
        }
    }

    fn upgrade(&self, package: &str) -> Result<(), InstallError> {
        self.invoke(package, self.kind.upgrade_args(package))
    }
}

#[cfg(test)]
pub(crate) mod test_support {
    use crate::error::{DevstationError, Result};
    use crate::shell::{CommandOptions, CommandResult, CommandRunner};
    use std::cell::RefCell;
    use std::time::Duration;

    /// One recorded invocation: program, args, whether output was captured.
    pub type Call = (String, Vec<String>, bool);

    /// Command runner that records calls and answers from a closure.
    pub struct RecordingRunner {
        pub calls: RefCell<Vec<Call>>,
        respond: Box<dyn Fn(&str, &[String]) -> Option<(Option<i32>, String)>>,
    }

    impl RecordingRunner {
        /// `respond` returns `None` to simulate a program that cannot start,
        /// otherwise the exit code and stdout.
        pub fn new(
            respond: impl Fn(&str, &[String]) -> Option<(Option<i32>, String)> + 'static,
        ) -> Self {
            Self {
                calls: RefCell::new(Vec::new()),
                respond: Box::new(respond),
            }
        }

        pub fn exiting(code: i32) -> Self {
            Self::new(move |_, _| Some((Some(code), String::new())))
        }
    }

    impl CommandRunner for RecordingRunner {
        fn run(
            &self,
            program: &str,
            args: &[String],
            options: &CommandOptions,
        ) -> Result<CommandResult> {
            self.calls.borrow_mut().push((
                program.to_string(),
                args.to_vec(),
                options.capture_stdout,
            ));
            match (self.respond)(program, args) {
                None => Err(DevstationError::Io(std::io::Error::new(
                    std::io::ErrorKind::NotFound,
                    "program not found",
                ))),
                Some((Some(0), stdout)) => {
                    Ok(CommandResult::success(stdout, String::new(), Duration::ZERO))
                }
                Some((code, stdout)) => Ok(CommandResult::failure(
                    code,
                    stdout,
                    String::new(),
                    Duration::ZERO,
                )),
            }
        }
    }
}

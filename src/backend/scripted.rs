//! In-memory backend with scripted outcomes.
//!
//! `ScriptedBackend` implements [`Backend`] without launching anything.
//! Packages marked as failing return an [`InstallError`]; everything else
//! succeeds. Every call is recorded for later assertion.
//!
//! # Example
//!
//! ```
//! use devstation::backend::{Backend, ScriptedBackend};
//!
//! let backend = ScriptedBackend::new("fake").failing(["mingw"]);
//! assert!(backend.install("mingw").is_err());
//! assert!(backend.install("gdb").is_ok());
//! assert_eq!(backend.attempts(), vec!["mingw", "gdb"]);
//! ```

use std::cell::RefCell;
use std::collections::HashSet;

use crate::error::{ExitInfo, InstallError};

use super::Backend;

/// Backend whose outcomes are fixed up front.
#[derive(Debug, Default)]
pub struct ScriptedBackend {
    name: String,
    failing: HashSet<String>,
    installed: HashSet<String>,
    attempts: RefCell<Vec<String>>,
    upgrades: RefCell<Vec<String>>,
    queries: RefCell<Vec<String>>,
}

impl ScriptedBackend {
    /// Create a backend where every operation succeeds.
    pub fn new(name: &str) -> Self {
        Self {
            name: name.to_string(),
            ..Default::default()
        }
    }

    /// Make install and upgrade of these packages fail.
    pub fn failing<I, S>(mut self, packages: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.failing.extend(packages.into_iter().map(Into::into));
        self
    }

    /// Report these packages as already installed.
    pub fn with_installed<I, S>(mut self, packages: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.installed.extend(packages.into_iter().map(Into::into));
        self
    }

    /// Packages passed to `install`, in call order.
    pub fn attempts(&self) -> Vec<String> {
        self.attempts.borrow().clone()
    }

    /// Packages passed to `upgrade`, in call order.
    pub fn upgrades(&self) -> Vec<String> {
        self.upgrades.borrow().clone()
    }

    /// Packages passed to `is_installed`, in call order.
    pub fn queries(&self) -> Vec<String> {
        self.queries.borrow().clone()
    }

    fn outcome(&self, package: &str) -> Result<(), InstallError> {
        if self.failing.contains(package) {
            Err(InstallError::ExternalToolFailed {
                package: package.to_string(),
                exit_info: ExitInfo::Code(1),
            })
        } else {
            Ok(())
        }
    }
}

impl Backend for ScriptedBackend {
    fn name(&self) -> &str {
        &self.name
    }

    fn install(&self, package: &str) -> Result<(), InstallError> {
        self.attempts.borrow_mut().push(package.to_string());
        self.outcome(package)
    }

    fn is_installed(&self, package: &str) -> bool {
        self.queries.borrow_mut().push(package.to_string());
        self.installed.contains(package)
    }

    fn upgrade(&self, package: &str) -> Result<(), InstallError> {
        self.upgrades.borrow_mut().push(package.to_string());
        self.outcome(package)
    }
}

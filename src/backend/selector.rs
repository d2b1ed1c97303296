//! Backend selection.
//!
//! Probes system package managers in a fixed priority order and picks the
//! first whose executable is on the search path. Finding none is a normal
//! state meaning "bootstrap first", so selection returns `Option`.

use super::{BackendKind, PackageBackend};
use crate::shell::command_available;

/// System package managers in probe order: built-in winget first, then
/// the third-party Chocolatey.
pub const SYSTEM_PRIORITY: [BackendKind; 2] = [BackendKind::Winget, BackendKind::Chocolatey];

/// Picks the package manager to use for a run.
///
/// Holds no memory between calls; every `select` probes again.
pub struct BackendSelector<'a> {
    probe: &'a dyn Fn(&str) -> bool,
}

impl<'a> BackendSelector<'a> {
    /// Create a selector with a custom presence probe.
    ///
    /// `probe` receives an executable name and reports whether it resolves.
    pub fn new(probe: &'a dyn Fn(&str) -> bool) -> Self {
        Self { probe }
    }

    /// The first present package manager, if any.
    pub fn select(&self) -> Option<BackendKind> {
        let selected = SYSTEM_PRIORITY
            .iter()
            .copied()
            .find(|kind| (self.probe)(kind.program()));
        match selected {
            Some(kind) => tracing::info!("Using package manager: {}", kind.display_name()),
            None => tracing::debug!("No package manager found on PATH"),
        }
        selected
    }

    /// Every present package manager, in priority order.
    pub fn available(&self) -> Vec<BackendKind> {
        SYSTEM_PRIORITY
            .iter()
            .copied()
            .filter(|kind| (self.probe)(kind.program()))
            .collect()
    }
}

impl BackendSelector<'static> {
    /// Selector that probes the real search path.
    pub fn system() -> Self {
        Self {
            probe: &command_available,
        }
    }
}

/// Select a package manager on this machine.
pub fn select_backend() -> Option<PackageBackend> {
    BackendSelector::system().select().map(PackageBackend::new)
}

//! Read-only plan inspection.

use serde::Serialize;

use crate::backend::Backend;
use crate::plan::{Criticality, InstallPlan};

/// Installed state of one plan entry.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct EntryStatus {
    /// Primary package name.
    pub package: String,
    /// Criticality of the entry.
    pub criticality: Criticality,
    /// Whether the primary package reports as installed.
    pub installed: bool,
    /// First alternative that reports as installed, when the primary does not.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub installed_alternative: Option<String>,
}

impl EntryStatus {
    /// Whether the primary or one of its alternatives is present.
    pub fn is_satisfied(&self) -> bool {
        self.installed || self.installed_alternative.is_some()
    }
}

/// Query the installed state of every entry. Never installs anything.
///
/// Alternatives are only queried for entries whose primary is missing.
pub fn inspect(plan: &InstallPlan, backend: &dyn Backend) -> Vec<EntryStatus> {
    plan.entries()
        .iter()
        .map(|entry| {
            let installed = backend.is_installed(&entry.package);
            let installed_alternative = if installed {
                None
            } else {
                entry
                    .alternatives
                    .iter()
                    .find(|alt| backend.is_installed(alt))
                    .cloned()
            };
            tracing::debug!(
                "{}: installed={} alternative={:?}",
                entry.package,
                installed,
                installed_alternative
            );
            EntryStatus {
                package: entry.package.clone(),
                criticality: entry.criticality,
                installed,
                installed_alternative,
            }
        })
        .collect()
}

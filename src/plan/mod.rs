//! Install plans.
//!
//! An [`InstallPlan`] is the ordered list of packages an environment needs.
//! Each [`PlanEntry`] is either critical (failure aborts the rest of the
//! plan, after trying its alternatives) or optional (failure is a warning).
//! Order matters: later entries may rely on earlier ones.
//!
//! # Modules
//!
//! - [`registry`] - Built-in plans per environment and config overrides

pub mod registry;

pub use registry::{PlanRegistry, PlanTarget, RegisteredPlan};

use std::collections::HashSet;

use serde::Serialize;

use crate::error::{DevstationError, Result};

/// How a failed entry affects the rest of the plan.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Criticality {
    /// Must succeed (possibly via an alternative) or the plan aborts.
    Critical,
    /// Failure is reported and the plan continues.
    Optional,
}

impl std::fmt::Display for Criticality {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Criticality::Critical => write!(f, "critical"),
            Criticality::Optional => write!(f, "optional"),
        }
    }
}

/// One step of an install plan.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PlanEntry {
    /// Package installed first.
    pub package: String,
    /// Effect of failure on the plan.
    pub criticality: Criticality,
    /// Packages tried in order when `package` fails. Critical entries only.
    pub alternatives: Vec<String>,
}

impl PlanEntry {
    /// A critical entry with ordered fallbacks.
    pub fn critical<I, S>(package: &str, alternatives: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            package: package.to_string(),
            criticality: Criticality::Critical,
            alternatives: alternatives.into_iter().map(Into::into).collect(),
        }
    }

    /// An optional entry. Optional entries never have fallbacks.
    pub fn optional(package: &str) -> Self {
        Self {
            package: package.to_string(),
            criticality: Criticality::Optional,
            alternatives: Vec::new(),
        }
    }

    /// Whether failure of this entry aborts the plan.
    pub fn is_critical(&self) -> bool {
        self.criticality == Criticality::Critical
    }

    fn check(&self) -> std::result::Result<(), String> {
        if self.package.trim().is_empty() {
            return Err("entry has an empty package name".to_string());
        }
        if !self.is_critical() && !self.alternatives.is_empty() {
            return Err(format!(
                "optional entry '{}' cannot have alternatives",
                self.package
            ));
        }
        let mut seen = HashSet::new();
        for alt in &self.alternatives {
            if alt.trim().is_empty() {
                return Err(format!(
                    "entry '{}' has an empty alternative",
                    self.package
                ));
            }
            if *alt == self.package {
                return Err(format!(
                    "entry '{}' lists itself as an alternative",
                    self.package
                ));
            }
            if !seen.insert(alt.as_str()) {
                return Err(format!(
                    "entry '{}' lists alternative '{}' twice",
                    self.package, alt
                ));
            }
        }
        Ok(())
    }
}

/// Ordered packages for one environment.
///
/// Construction validates the plan, so every `InstallPlan` in circulation
/// is well-formed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct InstallPlan {
    environment: String,
    entries: Vec<PlanEntry>,
}

impl InstallPlan {
    /// Create a plan, rejecting malformed entries.
    ///
    /// # Errors
    ///
    /// Returns `InvalidPlan` if an entry name is empty, an optional entry has
    /// alternatives, an entry lists itself or a duplicate as an alternative,
    /// or two entries share a package name.
    pub fn new(environment: &str, entries: Vec<PlanEntry>) -> Result<Self> {
        let invalid = |message: String| DevstationError::InvalidPlan {
            environment: environment.to_string(),
            message,
        };

        let mut seen = HashSet::new();
        for entry in &entries {
            entry.check().map_err(invalid)?;
            if !seen.insert(entry.package.as_str()) {
                return Err(invalid(format!(
                    "package '{}' appears more than once",
                    entry.package
                )));
            }
        }

        Ok(Self {
            environment: environment.to_string(),
            entries,
        })
    }

    /// Environment this plan sets up.
    pub fn environment(&self) -> &str {
        &self.environment
    }

    /// Entries in install order.
    pub fn entries(&self) -> &[PlanEntry] {
        &self.entries
    }

    /// Number of entries.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether the plan has no entries.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Find an entry by its primary package name.
    pub fn entry(&self, package: &str) -> Option<&PlanEntry> {
        self.entries.iter().find(|e| e.package == package)
    }

    /// Consume the plan, returning its entries for rebuilding.
    pub fn into_entries(self) -> Vec<PlanEntry> {
        self.entries
    }
}

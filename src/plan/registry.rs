//! Built-in install plans.
//!
//! Plans are declarative data keyed by environment name. Which entries are
//! critical, and which fallbacks they carry, lives here and nowhere else;
//! the orchestrator only applies the policy.
//!
//! Projects can adjust a plan through `.devstation/config.yml` (see
//! [`PlanRegistry::with_overrides`]), including giving fallbacks to entries
//! that have none by default.

use serde::Serialize;

use super::{Criticality, InstallPlan, PlanEntry};
use crate::config::{validate, DevstationConfig, PlanOverride};
use crate::error::{DevstationError, Result};

/// Which package manager a plan is run against.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum PlanTarget {
    /// The selected system package manager (winget or Chocolatey).
    System,
    /// pip, through the installed Python.
    Pip,
}

/// A plan together with how it is run.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RegisteredPlan {
    /// The plan itself.
    pub plan: InstallPlan,
    /// One-line description for listings.
    pub description: &'static str,
    /// Package manager the plan runs against.
    pub target: PlanTarget,
}

impl RegisteredPlan {
    /// Environment name.
    pub fn environment(&self) -> &str {
        self.plan.environment()
    }
}

struct EntryDef {
    package: &'static str,
    critical: bool,
    alternatives: &'static [&'static str],
}

struct PlanDef {
    environment: &'static str,
    description: &'static str,
    target: PlanTarget,
    entries: &'static [EntryDef],
}

const fn critical(package: &'static str, alternatives: &'static [&'static str]) -> EntryDef {
    EntryDef {
        package,
        critical: true,
        alternatives,
    }
}

const fn optional(package: &'static str) -> EntryDef {
    EntryDef {
        package,
        critical: false,
        alternatives: &[],
    }
}

/// Built-in plan definitions, in listing order.
const PLAN_DEFS: &[PlanDef] = &[
    PlanDef {
        environment: "c",
        description: "C compiler, build tools, and editor",
        target: PlanTarget::System,
        entries: &[
            critical("mingw", &["visualstudio2022buildtools"]),
            optional("cmake"),
            optional("make"),
            optional("git"),
            optional("vscode"),
            optional("clang-format"),
            optional("gdb"),
        ],
    },
    PlanDef {
        environment: "python",
        description: "Python interpreter, git, and editor",
        target: PlanTarget::System,
        entries: &[critical("python", &[]), optional("git"), optional("vscode")],
    },
    PlanDef {
        environment: "python-packages",
        description: "Common Python development packages",
        target: PlanTarget::Pip,
        entries: &[
            optional("virtualenv"),
            optional("pip-tools"),
            optional("black"),
            optional("flake8"),
            optional("pytest"),
            optional("requests"),
            optional("numpy"),
            optional("pandas"),
            optional("jupyter"),
        ],
    },
];

impl PlanDef {
    fn build(&self) -> RegisteredPlan {
        let entries = self
            .entries
            .iter()
            .map(|def| PlanEntry {
                package: def.package.to_string(),
                criticality: if def.critical {
                    Criticality::Critical
                } else {
                    Criticality::Optional
                },
                alternatives: def.alternatives.iter().map(|a| a.to_string()).collect(),
            })
            .collect();

        RegisteredPlan {
            plan: InstallPlan {
                environment: self.environment.to_string(),
                entries,
            },
            description: self.description,
            target: self.target,
        }
    }
}

/// Read-only mapping from environment name to install plan.
#[derive(Debug, Clone)]
pub struct PlanRegistry {
    plans: Vec<RegisteredPlan>,
}

impl PlanRegistry {
    /// Registry holding the built-in plans.
    pub fn builtin() -> Self {
        Self {
            plans: PLAN_DEFS.iter().map(PlanDef::build).collect(),
        }
    }

    /// Registry with built-in plans adjusted by `config`.
    ///
    /// For each environment override: `skip` entries are removed first, then
    /// each `critical` item either promotes the existing entry of that name
    /// (replacing its alternatives) or is appended, then `optional` packages
    /// not already present are appended.
    ///
    /// # Errors
    ///
    /// Returns `ConfigValidationError` for overrides of unknown environments
    /// and `InvalidPlan` if the adjusted plan is malformed.
    pub fn with_overrides(config: &DevstationConfig) -> Result<Self> {
        let mut registry = Self::builtin();
        let known: Vec<&str> = PLAN_DEFS.iter().map(|d| d.environment).collect();
        validate(config, &known)?;

        for (environment, overrides) in &config.plans {
            let slot = registry
                .plans
                .iter_mut()
                .find(|p| p.environment() == environment)
                .ok_or_else(|| DevstationError::UnknownEnvironment {
                    name: environment.clone(),
                })?;
            let plan = slot.plan.clone();
            slot.plan = apply_override(plan, overrides)?;
            tracing::debug!(
                "Applied config overrides to '{}' ({} entries)",
                environment,
                slot.plan.len()
            );
        }

        Ok(registry)
    }

    /// Look up a plan by environment name.
    ///
    /// # Errors
    ///
    /// Returns `UnknownEnvironment` if no plan has that name.
    pub fn get(&self, environment: &str) -> Result<&RegisteredPlan> {
        self.plans
            .iter()
            .find(|p| p.environment() == environment)
            .ok_or_else(|| DevstationError::UnknownEnvironment {
                name: environment.to_string(),
            })
    }

    /// All plans in listing order.
    pub fn plans(&self) -> &[RegisteredPlan] {
        &self.plans
    }

    /// Environment names in listing order.
    pub fn environments(&self) -> impl Iterator<Item = &str> {
        self.plans.iter().map(|p| p.environment())
    }
}

impl Default for PlanRegistry {
    fn default() -> Self {
        Self::builtin()
    }
}

fn apply_override(plan: InstallPlan, overrides: &PlanOverride) -> Result<InstallPlan> {
    let environment = plan.environment().to_string();
    let mut entries = plan.into_entries();

    entries.retain(|e| !overrides.skip.contains(&e.package));

    for c in &overrides.critical {
        match entries.iter_mut().find(|e| e.package == c.package) {
            Some(existing) => {
                existing.criticality = Criticality::Critical;
                existing.alternatives = c.alternatives.clone();
            }
            None => entries.push(PlanEntry::critical(&c.package, c.alternatives.clone())),
        }
    }

    for package in &overrides.optional {
        if !entries.iter().any(|e| &e.package == package) {
            entries.push(PlanEntry::optional(package));
        }
    }

    InstallPlan::new(&environment, entries)
}

//! Configuration schema.
//!
//! ```yaml
//! settings:
//!   output: quiet
//! plans:
//!   c:
//!     critical:
//!       - package: cmake
//!         alternatives: [cmake.portable]
//!     optional: [ninja]
//!     skip: [vscode]
//! ```

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Root configuration.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct DevstationConfig {
    /// Global settings.
    pub settings: Settings,

    /// Per-environment plan overrides, keyed by environment name.
    #[serde(skip_serializing_if = "BTreeMap::is_empty")]
    pub plans: BTreeMap<String, PlanOverride>,
}

/// Global settings.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Settings {
    /// Output verbosity when no CLI flag is given.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub output: Option<OutputMode>,
}

/// Output verbosity as written in config.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OutputMode {
    Verbose,
    #[default]
    Normal,
    Quiet,
    Silent,
}

/// Changes applied on top of a built-in plan.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct PlanOverride {
    /// Entries to make critical (or add as critical), with their fallbacks.
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub critical: Vec<CriticalOverride>,

    /// Packages appended as optional entries.
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub optional: Vec<String>,

    /// Primary package names removed from the plan.
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub skip: Vec<String>,
}

/// A critical entry declared in config.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct CriticalOverride {
    /// Primary package name.
    pub package: String,

    /// Fallback packages, tried in order.
    #[serde(default)]
    pub alternatives: Vec<String>,
}

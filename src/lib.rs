//! Devstation - Development toolchain provisioning.
//!
//! Devstation installs a C or Python toolchain by driving the host's package
//! manager (winget, or Chocolatey, which it installs when nothing is present).
//! Each toolchain is an install plan: an ordered list of packages, some
//! critical (with fallbacks) and some optional.
//!
//! # Modules
//!
//! - [`backend`] - Package-manager backends, selection, and bootstrap
//! - [`cli`] - Command-line interface and argument parsing
//! - [`config`] - Configuration loading, parsing, and validation
//! - [`error`] - Error types and result aliases
//! - [`orchestrator`] - Running install plans against a backend
//! - [`plan`] - Install plans and the built-in plan registry
//! - [`shell`] - External process execution and search-path handling
//! - [`ui`] - Terminal output
//!
//! # Example
//!
//! ```
//! use devstation::backend::ScriptedBackend;
//! use devstation::orchestrator::{run, Verdict};
//! use devstation::plan::PlanRegistry;
//! use devstation::ui::MockUI;
//!
//! let registry = PlanRegistry::builtin();
//! let c = &registry.get("c").unwrap().plan;
//! let backend = ScriptedBackend::new("fake").failing(["mingw"]);
//! let mut ui = MockUI::new();
//!
//! let report = run(c, &backend, &mut ui);
//! assert_eq!(report.verdict, Verdict::Completed);
//! assert_eq!(
//!     report.results[0].used_alternative.as_deref(),
//!     Some("visualstudio2022buildtools")
//! );
//! ```

pub mod backend;
pub mod cli;
pub mod config;
pub mod error;
pub mod orchestrator;
pub mod plan;
pub mod shell;
pub mod ui;

pub use error::{DevstationError, Result};

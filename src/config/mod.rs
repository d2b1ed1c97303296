//! Configuration loading, parsing, and validation for Devstation.
//!
//! - Schema definitions in [`schema`]
//! - File discovery and loading in [`loader`]
//! - Validation in [`validator`]
//!
//! # Example
//!
//! ```
//! use devstation::config::{load_config, validate};
//! use tempfile::TempDir;
//! use std::fs;
//!
//! let temp = TempDir::new().unwrap();
//! let dir = temp.path().join(".devstation");
//! fs::create_dir_all(&dir).unwrap();
//! fs::write(dir.join("config.yml"), "plans:\n  c:\n    skip: [vscode]\n").unwrap();
//!
//! let config = load_config(temp.path(), None).unwrap();
//! validate(&config, &["c", "python"]).unwrap();
//! assert_eq!(config.plans["c"].skip, vec!["vscode"]);
//! ```
//!
//! # Configuration File Locations
//!
//! 1. `--config <path>` when given (must exist)
//! 2. Project config (`.devstation/config.yml`)
//! 3. Built-in defaults

pub mod loader;
pub mod schema;
pub mod validator;

pub use loader::{load_config, load_config_file, parse_config, project_config_path};
pub use schema::{CriticalOverride, DevstationConfig, OutputMode, PlanOverride, Settings};
pub use validator::{validate, validate_config, ValidationError};

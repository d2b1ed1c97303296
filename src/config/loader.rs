//! Configuration file discovery and loading.

use crate::config::schema::DevstationConfig;
use crate::error::{DevstationError, Result};
use std::fs;
use std::path::{Path, PathBuf};

/// Directory holding project configuration.
pub const CONFIG_DIR: &str = ".devstation";

/// Configuration file name inside [`CONFIG_DIR`].
pub const CONFIG_FILE: &str = "config.yml";

/// Default config location for a project root.
pub fn project_config_path(project_root: &Path) -> PathBuf {
    project_root.join(CONFIG_DIR).join(CONFIG_FILE)
}

/// Load a single config file.
///
/// # Errors
///
/// Returns `ConfigNotFound` if the file doesn't exist.
/// Returns `ConfigParseError` if the YAML is invalid.
pub fn load_config_file(path: &Path) -> Result<DevstationConfig> {
    let content = fs::read_to_string(path).map_err(|e| {
        if e.kind() == std::io::ErrorKind::NotFound {
            DevstationError::ConfigNotFound {
                path: path.to_path_buf(),
            }
        } else {
            DevstationError::Io(e)
        }
    })?;

    parse_config(&content, path)
}

/// Parse YAML content into `DevstationConfig`.
///
/// An empty document yields the default configuration.
pub fn parse_config(content: &str, source_path: &Path) -> Result<DevstationConfig> {
    if content.trim().is_empty() {
        return Ok(DevstationConfig::default());
    }
    serde_yaml::from_str(content).map_err(|e| DevstationError::ConfigParseError {
        path: source_path.to_path_buf(),
        message: e.to_string(),
    })
}

/// Load config with optional path override.
///
/// An explicit `config_override` must exist. Without one, the project's
/// `.devstation/config.yml` is used if present, otherwise defaults.
pub fn load_config(project_root: &Path, config_override: Option<&Path>) -> Result<DevstationConfig> {
    if let Some(path) = config_override {
        return load_config_file(path);
    }

    let path = project_config_path(project_root);
    if path.exists() {
        tracing::debug!("Loading config from {}", path.display());
        load_config_file(&path)
    } else {
        Ok(DevstationConfig::default())
    }
}

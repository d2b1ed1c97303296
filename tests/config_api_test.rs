//! Integration tests for config module public API.

use devstation::config::{load_config, validate, DevstationConfig, OutputMode};
use devstation::plan::PlanRegistry;
use devstation::DevstationError;
use std::fs;
use tempfile::TempDir;

fn setup_project(config: &str) -> TempDir {
    let temp = TempDir::new().unwrap();
    let dir = temp.path().join(".devstation");
    fs::create_dir_all(&dir).unwrap();
    fs::write(dir.join("config.yml"), config).unwrap();
    temp
}

#[test]
fn public_api_is_accessible() {
    let _config = DevstationConfig::default();
    let _mode = OutputMode::Verbose;
}

#[test]
fn project_config_adjusts_registry() {
    let temp = setup_project(
        r#"
settings:
  output: quiet
plans:
  c:
    critical:
      - package: cmake
        alternatives: [cmake.portable]
    skip: [vscode]
"#,
    );

    let config = load_config(temp.path(), None).unwrap();
    validate(&config, &["c", "python", "python-packages"]).unwrap();
    let registry = PlanRegistry::with_overrides(&config).unwrap();

    assert_eq!(config.settings.output, Some(OutputMode::Quiet));
    let c = &registry.get("c").unwrap().plan;
    assert!(c.entry("vscode").is_none());
    let cmake = c.entry("cmake").unwrap();
    assert!(cmake.is_critical());
    assert_eq!(cmake.alternatives, vec!["cmake.portable"]);
}

#[test]
fn unknown_keys_are_parse_errors() {
    let temp = setup_project("plans:\n  c:\n    retries: 2\n");

    let err = load_config(temp.path(), None).unwrap_err();

    assert!(matches!(err, DevstationError::ConfigParseError { .. }));
}

#[test]
fn no_config_means_builtin_plans() {
    let temp = TempDir::new().unwrap();

    let config = load_config(temp.path(), None).unwrap();
    let registry = PlanRegistry::with_overrides(&config).unwrap();

    assert_eq!(
        registry.get("c").unwrap().plan,
        PlanRegistry::builtin().get("c").unwrap().plan
    );
}

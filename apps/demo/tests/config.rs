use herald_demo::config::{DemoConfig, WorkflowConfig, load_config};
use herald_logger::RotationPolicy;
use std::fs;
use std::path::Path;
use tempfile::tempdir;

#[test]
fn defaults_describe_a_console_run() {
    let cfg = DemoConfig::default();

    assert_eq!(cfg.workflow, WorkflowConfig { orders: 3, namespace: "order".into(), min_amount: 1 });
    assert!(cfg.logger.console);
    assert!(cfg.logger.path.is_none());
}

#[test]
fn partial_sections_fall_back_to_defaults() {
    let cfg: DemoConfig = serde_json::from_str(
        r#"{ "logger": { "level": "debug", "rotation": "hourly" }, "workflow": { "orders": 9 } }"#,
    )
    .unwrap();

    assert_eq!(cfg.logger.level, "debug");
    assert_eq!(cfg.logger.rotation, RotationPolicy::Hourly);
    assert_eq!(cfg.logger.name, "herald");
    assert_eq!(cfg.workflow.orders, 9);
    assert_eq!(cfg.workflow.namespace, "order");
}

#[test]
fn unknown_rotation_is_rejected() {
    let result = serde_json::from_str::<DemoConfig>(r#"{ "logger": { "rotation": "weekly" } }"#);
    assert!(result.is_err());
}

#[test]
fn loads_explicit_toml_file() -> Result<(), Box<dyn std::error::Error>> {
    let dir = tempdir()?;
    let path = dir.path().join("desk.toml");
    fs::write(
        &path,
        "[logger]\nname = \"desk\"\njson = true\n\n[workflow]\nnamespace = \"shop\"\nmin_amount = 50\n",
    )?;

    let cfg: DemoConfig = load_config(Some(path.as_path()))?;

    assert_eq!(cfg.logger.name, "desk");
    assert!(cfg.logger.json);
    assert_eq!(cfg.workflow.namespace, "shop");
    assert_eq!(cfg.workflow.min_amount, 50);
    assert_eq!(cfg.workflow.orders, 3);
    Ok(())
}

#[test]
fn missing_explicit_file_is_an_error() {
    let err = load_config::<DemoConfig>(Some(Path::new("/nonexistent/herald-demo.toml")))
        .expect_err("explicit file must exist");
    assert!(err.to_string().starts_with("Config error (Failed to build config)"));
}

#[test]
fn sample_config_is_valid() -> Result<(), Box<dyn std::error::Error>> {
    let path = Path::new(env!("CARGO_MANIFEST_DIR")).join("herald.toml");
    let cfg: DemoConfig = load_config(Some(path.as_path()))?;

    assert_eq!(cfg.workflow.orders, 5);
    assert_eq!(cfg.logger.directives.as_deref(), Some("herald_events=debug"));
    Ok(())
}

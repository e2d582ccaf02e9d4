use std::io::Write;

use flowcell_core::AppConfig;

#[test]
fn test_load_full_config_from_file() {
    let toml_content = r#"
[executor]
base_url = "http://192.168.1.20:8000"
request_timeout_secs = 12

[gateway]
bind = "0.0.0.0:9999"

[layout]
direction = "LR"
"#;

    let mut file = tempfile::NamedTempFile::new().unwrap();
    file.write_all(toml_content.as_bytes()).unwrap();

    let config = AppConfig::load(file.path()).unwrap();
    assert_eq!(config.executor.base_url, "http://192.168.1.20:8000");
    assert_eq!(config.executor.request_timeout_secs, 12);
    assert_eq!(config.gateway.bind, "0.0.0.0:9999");
    assert_eq!(config.layout.direction, "LR");
}

#[test]
fn test_load_empty_config_uses_defaults() {
    let mut file = tempfile::NamedTempFile::new().unwrap();
    file.write_all(b"").unwrap();

    let config = AppConfig::load(file.path()).unwrap();
    assert_eq!(config.executor.base_url, "http://127.0.0.1:8000");
    assert_eq!(config.gateway.bind, "127.0.0.1:7430");
    assert_eq!(config.layout.direction, "TB");
}

#[test]
fn test_missing_config_file() {
    let err = AppConfig::load(std::path::Path::new("/nonexistent/flowcell.toml")).unwrap_err();
    assert!(matches!(
        err,
        flowcell_core::FlowcellError::ConfigNotFound(_)
    ));
}

#[test]
fn test_malformed_config_is_rejected() {
    let mut file = tempfile::NamedTempFile::new().unwrap();
    file.write_all(b"[executor\nbase_url = ").unwrap();

    let err = AppConfig::load(file.path()).unwrap_err();
    assert!(matches!(err, flowcell_core::FlowcellError::Config(_)));
}

//! Layered configuration loading from files, environment and overrides

use std::collections::HashMap;
use std::path::Path;
use tempfile::TempDir;
use v7go::config::{ConfigLoader, ConfigOverrides, V7Config};
use v7go::V7Error;

fn write_config(dir: &TempDir, contents: &str) -> std::path::PathBuf {
    let path = dir.path().join("config.toml");
    std::fs::write(&path, contents).unwrap();
    path
}

fn load(
    file: Option<&Path>,
    overrides: &ConfigOverrides,
    env: &[(&str, &str)],
) -> Result<V7Config, V7Error> {
    let env: HashMap<String, String> = env
        .iter()
        .map(|(k, v)| (k.to_string(), v.to_string()))
        .collect();
    ConfigLoader::load_with(file, file.is_some(), overrides, move |key| {
        env.get(key).cloned()
    })
}

const FULL_FILE: &str = r#"
[client]
api_key = "file-key"
base_url = "https://file.example.test/"
workspace_id = "ws-file"
request_timeout_secs = 30

[logging]
level = "info"
format = "json"
color = false

[logging.modules]
"v7go::waiter" = "debug"
"#;

#[test]
fn test_file_values_are_loaded_and_normalized() {
    let dir = TempDir::new().unwrap();
    let path = write_config(&dir, FULL_FILE);

    let config = load(Some(&path), &ConfigOverrides::default(), &[]).unwrap();

    assert_eq!(config.client.api_key.as_deref(), Some("file-key"));
    assert_eq!(config.client.base_url, "https://file.example.test");
    assert_eq!(config.client.workspace_id.as_deref(), Some("ws-file"));
    assert_eq!(config.client.request_timeout_secs, 30);
    assert_eq!(config.logging.level, "info");
    assert_eq!(config.logging.format, "json");
    assert!(!config.logging.color);
    assert_eq!(
        config.logging.modules.get("v7go::waiter").map(String::as_str),
        Some("debug")
    );
}

#[test]
fn test_precedence_override_then_env_then_file() {
    let dir = TempDir::new().unwrap();
    let path = write_config(&dir, FULL_FILE);
    let overrides = ConfigOverrides {
        api_key: Some("flag-key".to_string()),
        ..Default::default()
    };

    let config = load(
        Some(&path),
        &overrides,
        &[
            ("V7_GO_API_KEY", "env-key"),
            ("V7_GO_WORKSPACE_ID", "ws-env"),
        ],
    )
    .unwrap();

    assert_eq!(config.client.api_key.as_deref(), Some("flag-key"));
    assert_eq!(config.client.workspace_id.as_deref(), Some("ws-env"));
    assert_eq!(config.client.base_url, "https://file.example.test");
    assert_eq!(config.client.request_timeout_secs, 30);
}

#[test]
fn test_base_api_url_preferred_over_base_url_and_file() {
    let dir = TempDir::new().unwrap();
    let path = write_config(&dir, FULL_FILE);

    let config = load(
        Some(&path),
        &ConfigOverrides::default(),
        &[
            ("V7_GO_BASE_URL", "https://base.example.test"),
            ("V7_GO_BASE_API_URL", "http://localhost:4000/"),
        ],
    )
    .unwrap();

    assert_eq!(config.client.base_url, "http://localhost:4000");
}

#[test]
fn test_empty_environment_values_are_ignored() {
    let dir = TempDir::new().unwrap();
    let path = write_config(&dir, FULL_FILE);

    let config = load(
        Some(&path),
        &ConfigOverrides::default(),
        &[("V7_GO_API_KEY", ""), ("V7_GO_WORKSPACE_ID", "")],
    )
    .unwrap();

    assert_eq!(config.client.api_key.as_deref(), Some("file-key"));
    assert_eq!(config.client.workspace_id.as_deref(), Some("ws-file"));
}

#[test]
fn test_invalid_base_url_rejected() {
    let dir = TempDir::new().unwrap();
    let path = write_config(&dir, "[client]\nbase_url = \"ftp://files.example.test\"\n");

    let result = load(Some(&path), &ConfigOverrides::default(), &[]);

    assert!(matches!(result, Err(V7Error::Config(_))));
}

#[test]
fn test_malformed_file_is_config_error() {
    let dir = TempDir::new().unwrap();
    let path = write_config(&dir, "[client\napi_key = ");

    let result = load(Some(&path), &ConfigOverrides::default(), &[]);

    assert!(matches!(result, Err(V7Error::Config(_))));
}

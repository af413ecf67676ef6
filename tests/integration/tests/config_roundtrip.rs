//! Config install/load roundtrip integration tests.
//!
//! These tests verify that the installed default configuration loads back
//! with the documented defaults and that edited files are picked up.

use ansible_hcv_core::config::{Config, KvVersion};
use ansible_hcv_core::ConfigError;
use std::path::Path;
use tempfile::TempDir;

#[test]
fn test_install_and_load_default() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join(".ansible-hcv/ansible-hcv-config.toml");

    Config::install_default(&path).unwrap();
    let config = Config::load(&path).unwrap();

    assert!(config.vault.verify_tls);
    assert_eq!(config.vault.namespace(), None);
    assert_eq!(config.vault.kv_version, KvVersion::V2);
    assert_eq!(config.vault.kv_mount, "secret");
    assert_eq!(config.vault.key_name, "ansible_vault_key");
    assert!(config
        .vault
        .credential_path()
        .ends_with(".ansible-hcv/hcv-token"));
}

#[test]
fn test_install_replaces_edited_file() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("config.toml");
    std::fs::write(&path, "[vault]\nuri = \"https://edited:8200\"\n").unwrap();

    Config::install_default(&path).unwrap();
    let content = std::fs::read_to_string(&path).unwrap();
    assert!(!content.contains("edited"));
    assert!(Config::load(&path).is_ok());
}

#[test]
fn test_edit_and_reload() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("config.toml");
    Config::install_default(&path).unwrap();

    let edited = std::fs::read_to_string(&path)
        .unwrap()
        .replace("kv_version = 2", "kv_version = 1")
        .replace("namespace = \"\"", "namespace = \"team-a\"");
    std::fs::write(&path, edited).unwrap();

    let config = Config::load(&path).unwrap();
    assert_eq!(config.vault.kv_version, KvVersion::V1);
    assert_eq!(config.vault.namespace(), Some("team-a"));
}

#[test]
fn test_config_load_nonexistent() {
    let result = Config::load(Path::new("/nonexistent/ansible-hcv-config.toml"));
    assert!(matches!(result, Err(ConfigError::NotFound(_))));
}

#[test]
fn test_config_parse_invalid() {
    assert!(Config::parse("not valid toml [").is_err());
}

#[test]
fn test_unsupported_kv_version_rejected_on_load() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("config.toml");
    std::fs::write(
        &path,
        "[vault]\nuri = \"https://vault:8200\"\nkv_version = 3\ntoken_path = \"/tmp/t\"\nkey_name = \"k\"\n",
    )
    .unwrap();

    let err = Config::load(&path).unwrap_err();
    assert!(
        matches!(err, ConfigError::UnsupportedKvVersion(3)),
        "got: {:?}",
        err
    );
    assert!(err.to_string().contains("Unsupported KV engine version 3"));
}

#[test]
fn test_missing_kv_version_rejected_on_load() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("config.toml");
    std::fs::write(
        &path,
        "[vault]\nuri = \"https://vault:8200\"\ntoken_path = \"/tmp/t\"\nkey_name = \"k\"\n",
    )
    .unwrap();

    match Config::load(&path) {
        Err(ConfigError::Parse(msg)) => assert!(msg.contains("kv_version"), "{msg}"),
        other => panic!("expected parse error, got {:?}", other),
    }
}

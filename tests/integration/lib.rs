//! Shared fixtures for the integration tests.

use std::path::Path;

use ansible_hcv_core::config::{Config, KvVersion, VaultSettings};

/// Render a `[vault]` config pointing at `uri`, with the token kept under `dir`.
pub fn config_toml(dir: &Path, uri: &str) -> String {
    format!(
        "[vault]\nuri = \"{uri}\"\ntimeout = 5\nkv_version = 2\nkv_mount = \"secret\"\ntoken_path = \"{}\"\nkey_name = \"ansible_vault_key\"\n",
        dir.join("tokens/hcv-token").display()
    )
}

/// Parse and validate [`config_toml`], then select the KV generation.
pub fn settings(dir: &Path, uri: &str, kv_version: KvVersion) -> VaultSettings {
    let mut config = Config::parse(&config_toml(dir, uri)).expect("fixture config parses");
    config.validate().expect("fixture config is valid");
    config.vault.kv_version = kv_version;
    config.vault
}

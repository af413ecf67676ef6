//! Configuration loading and installation.

use super::Config;
use crate::error::ConfigError;
use crate::config::KvVersion;
use crate::fs as private_fs;
use std::fs;
use std::path::Path;
use tracing::debug;

/// Default configuration written by `--install-config`.
pub const DEFAULT_CONFIG: &str = include_str!("../../data/default-config.toml");

impl Config {
    /// Load and validate configuration from a file path.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        if !path.exists() {
            return Err(ConfigError::NotFound(path.to_path_buf()));
        }

        debug!(path = %path.display(), "loading configuration");
        let content = fs::read_to_string(path)?;
        let config = Self::parse(&content)?;
        config.validate()?;
        Ok(config)
    }

    /// Parse configuration from a string.
    ///
    /// `vault.kv_version` is checked before the table is mapped onto
    /// [`Config`], so an unknown generation is reported as
    /// [`ConfigError::UnsupportedKvVersion`] rather than a parse message.
    pub fn parse(content: &str) -> Result<Self, ConfigError> {
        let table: toml::Table = content
            .parse()
            .map_err(|e: toml::de::Error| ConfigError::Parse(e.to_string()))?;

        let kv_version = table
            .get("vault")
            .and_then(|vault| vault.get("kv_version"))
            .and_then(toml::Value::as_integer);
        if let Some(version) = kv_version {
            KvVersion::try_from(version)?;
        }

        toml::Value::Table(table)
            .try_into()
            .map_err(|e: toml::de::Error| ConfigError::Parse(e.to_string()))
    }

    /// Write the default configuration to `path`, replacing any existing file.
    ///
    /// Missing parent directories are created with mode 0700 and the file
    /// itself with mode 0600.
    pub fn install_default(path: &Path) -> Result<(), ConfigError> {
        debug!(path = %path.display(), "installing default configuration");
        private_fs::write_private_file(path, DEFAULT_CONFIG.as_bytes())?;
        Ok(())
    }

    /// Validate the configuration, collecting all errors before returning.
    pub fn validate(&self) -> Result<(), ConfigError> {
        let mut errors = Vec::new();
        let vault = &self.vault;

        // 1. Server address
        if vault.uri.trim().is_empty() {
            errors.push("vault.uri must not be empty".to_string());
        } else {
            match url::Url::parse(&vault.uri) {
                Ok(url) if matches!(url.scheme(), "http" | "https") => {}
                Ok(url) => errors.push(format!(
                    "vault.uri must use http or https, got '{}'",
                    url.scheme()
                )),
                Err(e) => errors.push(format!("vault.uri is not a valid URL: {}", e)),
            }
        }

        // 2. Timeout must bound the request
        if vault.timeout == 0 {
            errors.push("vault.timeout must be greater than 0".to_string());
        }

        // 3. KV coordinates
        if vault.kv_mount.trim_matches('/').is_empty() {
            errors.push("vault.kv_mount must not be empty".to_string());
        }
        if vault.key_name.is_empty() {
            errors.push("vault.key_name must not be empty".to_string());
        }

        // 4. Token location
        if vault.token_path.trim().is_empty() {
            errors.push("vault.token_path must not be empty".to_string());
        }

        if errors.is_empty() {
            Ok(())
        } else {
            Err(ConfigError::Validation(errors.join("; ")))
        }
    }
}

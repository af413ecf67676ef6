//! Configuration schema definitions.

use crate::error::ConfigError;
use crate::paths;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use std::time::Duration;

/// Main ansible-hcv configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    /// Vault connection and storage settings.
    pub vault: VaultSettings,
}

/// The `[vault]` table.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct VaultSettings {
    /// Vault server address.
    pub uri: String,

    /// Verify the server's TLS certificate.
    #[serde(default = "default_verify_tls")]
    pub verify_tls: bool,

    /// Vault Enterprise namespace; empty means none.
    #[serde(default)]
    pub namespace: String,

    /// Request timeout in seconds.
    #[serde(default = "default_timeout")]
    pub timeout: u64,

    /// KV secrets engine API generation. Required; there is no default.
    pub kv_version: KvVersion,

    /// Mount point of the KV engine.
    #[serde(default = "default_kv_mount")]
    pub kv_mount: String,

    /// Location of the encrypted token file. May start with `~`.
    pub token_path: String,

    /// Field of the secret document holding the ansible-vault key.
    pub key_name: String,
}

fn default_verify_tls() -> bool {
    true
}

fn default_timeout() -> u64 {
    30
}

fn default_kv_mount() -> String {
    "secret".to_string()
}

impl VaultSettings {
    /// Token file path with `~` expanded.
    pub fn credential_path(&self) -> PathBuf {
        paths::expand_tilde(&self.token_path)
    }

    /// Namespace header value, if one is configured.
    pub fn namespace(&self) -> Option<&str> {
        let ns = self.namespace.trim();
        (!ns.is_empty()).then_some(ns)
    }

    /// Request deadline.
    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.timeout)
    }
}

/// KV secrets engine API generation.
///
/// Stored as a bare integer in the config file. [`Config::parse`] reports
/// any other value as [`ConfigError::UnsupportedKvVersion`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "i64", into = "i64")]
pub enum KvVersion {
    /// Flat documents: `{"data": {...}}`.
    V1,
    /// Versioned documents: `{"data": {"data": {...}, "metadata": {...}}}`.
    V2,
}

impl TryFrom<i64> for KvVersion {
    type Error = ConfigError;

    fn try_from(value: i64) -> Result<Self, Self::Error> {
        match value {
            1 => Ok(Self::V1),
            2 => Ok(Self::V2),
            other => Err(ConfigError::UnsupportedKvVersion(other)),
        }
    }
}

impl From<KvVersion> for i64 {
    fn from(version: KvVersion) -> Self {
        match version {
            KvVersion::V1 => 1,
            KvVersion::V2 => 2,
        }
    }
}

impl std::fmt::Display for KvVersion {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "v{}", i64::from(*self))
    }
}

//! Error types for ansible-hcv core.

use std::path::PathBuf;
use thiserror::Error;

/// Core result type alias.
pub type Result<T> = std::result::Result<T, ConfigError>;

/// Configuration-related errors.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Configuration file not found: {0} (run with --install-config to create one)")]
    NotFound(PathBuf),

    #[error("Parse error: {0}")]
    Parse(String),

    #[error("Validation error: {0}")]
    Validation(String),

    #[error("Unsupported KV engine version {0} (expected 1 or 2)")]
    UnsupportedKvVersion(i64),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

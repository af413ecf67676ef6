//! Error types for credential storage.

use std::path::PathBuf;
use thiserror::Error;

/// Errors that can occur while encrypting, decrypting, or storing a credential.
#[derive(Debug, Error)]
pub enum SecretError {
    #[error("Credential integrity check failed (file corrupted or tampered with)")]
    Integrity,

    #[error("Malformed credential blob: {0}")]
    Format(String),

    #[error("Random number generator failure: {0}")]
    Entropy(String),

    #[error("Storage error at {}: {source}", path.display())]
    Storage {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

impl SecretError {
    /// Create a format error.
    pub fn format(message: impl Into<String>) -> Self {
        Self::Format(message.into())
    }

    /// Wrap an I/O failure on `path`.
    pub fn storage(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Storage {
            path: path.into(),
            source,
        }
    }
}

/// Convenience result alias for credential operations.
pub type Result<T> = std::result::Result<T, SecretError>;

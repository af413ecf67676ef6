//! Error types for the Vault client.

use thiserror::Error;

/// Result type for Vault operations.
pub type Result<T> = std::result::Result<T, VaultError>;

/// Vault client error types.
///
/// None of the variants carry the token or any secret field value.
#[derive(Debug, Error)]
pub enum VaultError {
    /// Settings or arguments that cannot produce a valid request.
    #[error("Configuration error: {0}")]
    Config(String),

    /// Vault rejected the token (invalid, expired, or lacking policy).
    #[error("Authentication error: {0}")]
    Auth(String),

    /// No secret exists at the requested location.
    #[error("Secret not found: {mount}/{path}")]
    SecretNotFound { mount: String, path: String },

    /// The secret exists but does not contain the requested field.
    #[error("Field '{field}' not found in secret '{path}'")]
    FieldNotFound { path: String, field: String },

    /// Any other non-success status from Vault.
    #[error("Server error: {status} - {message}")]
    Server { status: u16, message: String },

    /// Network error.
    #[error("Network error: {0}")]
    Transport(#[from] reqwest::Error),

    /// Timeout error.
    #[error("Request timed out after {0} seconds")]
    Timeout(u64),

    /// The response body could not be decoded.
    #[error("Invalid response: {0}")]
    InvalidResponse(String),
}

impl VaultError {
    /// Create a config error.
    pub fn config(message: impl Into<String>) -> Self {
        Self::Config(message.into())
    }

    /// Create an authentication error.
    pub fn auth(message: impl Into<String>) -> Self {
        Self::Auth(message.into())
    }

    /// Create a server error.
    pub fn server_error(status: u16, message: impl Into<String>) -> Self {
        Self::Server {
            status,
            message: message.into(),
        }
    }

    /// Create an invalid response error.
    pub fn invalid_response(message: impl Into<String>) -> Self {
        Self::InvalidResponse(message.into())
    }

    /// Check if this error means the secret or field is absent.
    pub fn is_not_found(&self) -> bool {
        matches!(
            self,
            Self::SecretNotFound { .. } | Self::FieldNotFound { .. }
        )
    }

    /// Check if this error came from the network layer.
    pub fn is_transport(&self) -> bool {
        matches!(self, Self::Transport(_) | Self::Timeout(_))
    }
}

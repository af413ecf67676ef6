//! Encrypted credential storage for ansible-hcv.
//!
//! Provides the AES-256-GCM credential cipher, its self-describing blob
//! format, and an owner-only file store for the Vault token.

pub mod crypto;
pub mod error;
pub mod store;
pub mod types;

pub use error::{Result, SecretError};
pub use store::{CredentialStore, FileCredentialStore};
pub use types::EncryptedCredential;

//! # ansible-hcv-core
//!
//! Core types, configuration, and utilities for ansible-hcv.
//!
//! This crate provides shared functionality used across all ansible-hcv crates:
//!
//! - **Configuration**: Loading, validation, and installation of the settings file
//! - **Paths**: Well-known locations and `~` expansion
//! - **Filesystem**: Owner-only directory and file creation
//! - **Secrets**: A zeroizing, redacting string type for credentials

pub mod config;
pub mod error;
pub mod fs;
pub mod paths;
pub mod secret;

// Re-exports for convenience
pub use config::{Config, KvVersion, VaultSettings};
pub use error::{ConfigError, Result};
pub use secret::SecretString;

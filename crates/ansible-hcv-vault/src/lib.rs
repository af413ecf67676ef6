//! HashiCorp Vault client for ansible-hcv.
//!
//! Reads one field of one secret from a KV secrets engine. Both API
//! generations are supported and selected per call from the settings:
//!
//! - **KV v1**: `GET /v1/{mount}/{path}` returning a flat document.
//! - **KV v2**: `GET /v1/{mount}/data/{path}` returning the latest version,
//!   with the fields nested under a second `data` key.
//!
//! # Example
//!
//! ```rust,ignore
//! use ansible_hcv_vault::fetch_field;
//!
//! let key = fetch_field(&config.vault, &token, "prod").await?;
//! println!("{}", key.expose_secret());
//! ```

pub mod client;
pub mod error;
pub mod kv;

pub use client::{fetch_field, VaultClient};
pub use error::{Result, VaultError};
pub use kv::{KvRead, KvResponse};

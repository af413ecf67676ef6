//! `--set-token`: encrypt and store the Vault token.

use std::path::Path;

use ansible_hcv_core::{Config, SecretString};
use ansible_hcv_secrets::{CredentialStore, FileCredentialStore};
use anyhow::Context;

/// Store `token`, or a token read from a hidden prompt when `None`.
pub fn run(config_path: &Path, token: Option<String>) -> anyhow::Result<()> {
    let token = match token {
        Some(t) => SecretString::from(t),
        None => rpassword::prompt_password("HashiCorp Vault token: ")
            .map(SecretString::from)
            .context("Failed to read token")?,
    };

    let store = save_token(config_path, &token)?;
    println!("Token stored in {}", store.path().display());
    Ok(())
}

/// Encrypt `token` into the file named by the configuration's `token_path`.
pub fn save_token(
    config_path: &Path,
    token: &SecretString,
) -> anyhow::Result<FileCredentialStore> {
    let token = token.trimmed();
    if token.is_empty() {
        anyhow::bail!("Token must not be empty");
    }

    let config = Config::load(config_path)?;
    let store = FileCredentialStore::from_settings(&config.vault);
    store
        .save(token.expose_secret())
        .with_context(|| format!("Failed to store token in {}", store.path().display()))?;

    Ok(store)
}

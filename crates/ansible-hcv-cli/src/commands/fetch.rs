//! `--vault-id`: print the ansible-vault key for an id.

use std::io::Write;
use std::path::Path;

use ansible_hcv_core::{Config, SecretString};
use ansible_hcv_secrets::{CredentialStore, FileCredentialStore};
use ansible_hcv_vault::VaultError;
use anyhow::Context;
use tracing::warn;

/// Print the key for `vault_id` to stdout.
///
/// Prints nothing and succeeds when no token has been stored.
pub async fn run(config_path: &Path, vault_id: &str) -> anyhow::Result<()> {
    let Some(key) = fetch_key(config_path, vault_id).await? else {
        return Ok(());
    };

    let mut stdout = std::io::stdout().lock();
    writeln!(stdout, "{}", key.expose_secret()).context("Failed to write key to stdout")?;
    Ok(())
}

/// Resolve the key for `vault_id`, or `None` when no token is configured.
pub async fn fetch_key(
    config_path: &Path,
    vault_id: &str,
) -> anyhow::Result<Option<SecretString>> {
    if vault_id.trim().is_empty() {
        anyhow::bail!("Vault id must not be empty");
    }

    let config = Config::load(config_path)?;
    let store = FileCredentialStore::from_settings(&config.vault);
    let token = store
        .load()
        .with_context(|| format!("Failed to read token from {}", store.path().display()))?;

    let Some(token) = token else {
        warn!(
            path = %store.path().display(),
            "no Vault token configured; run with --set-token"
        );
        return Ok(None);
    };

    let key = ansible_hcv_vault::fetch_field(&config.vault, &token, vault_id)
        .await
        .map_err(|e| {
            let context = failure_context(vault_id, &e);
            anyhow::Error::new(e).context(context)
        })?;
    Ok(Some(key))
}

/// Top-level message for a failed fetch, naming the settings to check.
fn failure_context(vault_id: &str, err: &VaultError) -> String {
    let base = format!("Failed to fetch key for vault id '{vault_id}'");
    if err.is_not_found() {
        format!("{base} (check vault.kv_mount, vault.kv_version and vault.key_name)")
    } else if err.is_transport() {
        format!("{base} (check vault.uri and vault.timeout)")
    } else {
        base
    }
}

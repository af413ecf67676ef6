//! `--install-config`: write the default configuration file.

use std::path::Path;

use ansible_hcv_core::Config;
use anyhow::Context;
use tracing::info;

/// Install the default configuration at `config_path`, replacing any
/// existing file.
pub fn run(config_path: &Path) -> anyhow::Result<()> {
    if config_path.exists() {
        info!(path = %config_path.display(), "replacing existing configuration");
    }

    Config::install_default(config_path).with_context(|| {
        format!(
            "Failed to install configuration to {}",
            config_path.display()
        )
    })?;

    println!("Installed default configuration to {}", config_path.display());
    Ok(())
}

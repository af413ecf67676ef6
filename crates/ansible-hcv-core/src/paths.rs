//! Path resolution utilities.

use crate::error::ConfigError;
use std::path::PathBuf;

/// Name of the configuration directory under the user's home.
const BASE_DIR_NAME: &str = ".ansible-hcv";

/// Name of the configuration file inside the base directory.
const CONFIG_FILE_NAME: &str = "ansible-hcv-config.toml";

/// Get the ansible-hcv base directory (~/.ansible-hcv).
pub fn base_dir() -> Result<PathBuf, ConfigError> {
    let home = dirs::home_dir().ok_or_else(|| {
        ConfigError::Validation("Could not determine home directory".to_string())
    })?;
    Ok(home.join(BASE_DIR_NAME))
}

/// Get the main config file path (~/.ansible-hcv/ansible-hcv-config.toml).
pub fn config_file() -> Result<PathBuf, ConfigError> {
    Ok(base_dir()?.join(CONFIG_FILE_NAME))
}

/// Expand a leading tilde (`~` or `~/...`) to the home directory.
///
/// Paths that do not start with a tilde, and `~user` forms, are returned
/// unchanged.
pub fn expand_tilde(path: &str) -> PathBuf {
    if path == "~" {
        if let Some(home) = dirs::home_dir() {
            return home;
        }
    }
    if let Some(rest) = path.strip_prefix("~/") {
        if let Some(home) = dirs::home_dir() {
            return home.join(rest);
        }
    }
    PathBuf::from(path)
}

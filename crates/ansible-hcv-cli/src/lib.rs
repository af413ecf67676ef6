//! ansible-hcv command-line interface.
//!
//! ansible-vault invokes client scripts as `<script> --vault-id <id>` and
//! reads the key from stdout, so the three operations are top-level flags
//! rather than subcommands.

pub mod commands;

use std::path::PathBuf;

use ansible_hcv_core::paths;
use clap::{ArgGroup, Parser};

/// Store and retrieve ansible-vault keys using HashiCorp Vault
#[derive(Debug, Parser)]
#[command(name = "ansible-hcv-client")]
#[command(author, version, about, long_about = None)]
#[command(group(
    ArgGroup::new("operation")
        .required(true)
        .args(["vault_id", "set_token", "install_config"]),
))]
pub struct Cli {
    /// Increase logging verbosity (logs go to stderr)
    #[arg(short, long, action = clap::ArgAction::Count)]
    pub verbose: u8,

    /// Path to config file [default: ~/.ansible-hcv/ansible-hcv-config.toml]
    #[arg(short, long, env = "ANSIBLE_HCV_CONFIG")]
    pub config: Option<PathBuf>,

    /// Print the key stored for this ansible-vault-id
    #[arg(long, value_name = "ID")]
    pub vault_id: Option<String>,

    /// Encrypt and store the HashiCorp Vault token (prompts if TOKEN is omitted)
    #[arg(long, value_name = "TOKEN")]
    pub set_token: Option<Option<String>>,

    /// Install the default configuration file
    #[arg(long)]
    pub install_config: bool,
}

/// The operation selected on the command line.
#[derive(Debug, PartialEq, Eq)]
pub enum Operation {
    /// `--install-config`
    InstallConfig,
    /// `--set-token [TOKEN]`; `None` means prompt.
    SetToken(Option<String>),
    /// `--vault-id ID`
    FetchKey(String),
}

impl Cli {
    /// The single operation requested. clap guarantees exactly one is set.
    pub fn operation(&self) -> Operation {
        if let Some(id) = &self.vault_id {
            Operation::FetchKey(id.clone())
        } else if let Some(token) = &self.set_token {
            Operation::SetToken(token.clone())
        } else {
            Operation::InstallConfig
        }
    }
}

/// Logging filter used when `RUST_LOG` is not set.
pub fn default_log_filter(verbose: u8) -> String {
    let level = match verbose {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    };
    format!("ansible_hcv={level}")
}

/// Run the CLI with the given arguments.
pub async fn run(cli: Cli) -> anyhow::Result<()> {
    let config_path = match &cli.config {
        Some(path) => path.clone(),
        None => paths::config_file()?,
    };

    match cli.operation() {
        Operation::InstallConfig => commands::install::run(&config_path),
        Operation::SetToken(token) => commands::token::run(&config_path, token),
        Operation::FetchKey(id) => commands::fetch::run(&config_path, &id).await,
    }
}

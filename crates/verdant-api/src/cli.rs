//! Command-line surface of the `verdant` binary.

use std::path::PathBuf;

use clap::{Parser, Subcommand};
use verdant_core::{Error, Result};

use crate::config::{LOCAL_CONFIG_FILE, VerdantConfig, resolve_config_path};

/// Verdant site server
#[derive(Parser, Debug)]
#[command(name = "verdant")]
#[command(version, about = "Verdant landscaping site and content admin", long_about = None)]
pub struct Cli {
    /// Configuration file path
    #[arg(short, long, global = true)]
    pub config: Option<String>,

    /// Subcommand; `serve` when omitted
    #[command(subcommand)]
    pub command: Option<Command>,
}

/// Top-level subcommands.
#[derive(Subcommand, Debug, Clone, PartialEq, Eq)]
pub enum Command {
    /// Run the HTTP server
    Serve,
    /// Write default content for every section
    Seed,
    /// Inspect or create the configuration file
    Config {
        /// Config action
        #[command(subcommand)]
        action: ConfigAction,
    },
}

/// `verdant config ...`
#[derive(Subcommand, Debug, Clone, PartialEq, Eq)]
pub enum ConfigAction {
    /// Print the resolved configuration as TOML
    Show,
    /// Print the config file that would be read
    Path,
    /// Write a default config file
    Init {
        /// Target file (default: ./verdant.toml)
        #[arg(long)]
        file: Option<String>,
        /// Overwrite an existing file
        #[arg(long)]
        force: bool,
    },
}

// ============================================================================
// Config commands
// ============================================================================

/// Dispatch a config subcommand.
pub fn handle_config_command(config_path: Option<&str>, action: ConfigAction) -> Result<()> {
    match action {
        ConfigAction::Show => cmd_config_show(config_path),
        ConfigAction::Path => cmd_config_path(config_path),
        ConfigAction::Init { file, force } => cmd_config_init(file.as_deref(), force).map(|path| {
            println!("Config file created at {}", path.display());
        }),
    }
}

/// Print the effective configuration, env overrides included.
pub fn cmd_config_show(config_path: Option<&str>) -> Result<()> {
    let config = VerdantConfig::load(config_path)?;
    print!("{}", config.to_toml_string()?);
    Ok(())
}

/// Print the config file that would be read.
pub fn cmd_config_path(config_path: Option<&str>) -> Result<()> {
    match resolve_config_path(config_path) {
        Some(path) => {
            println!("{}", path.display());
            if !path.exists() {
                eprintln!("(file does not exist, run `verdant config init` to create it)");
            }
        }
        None => println!("(no config file, using defaults)"),
    }
    Ok(())
}

/// Write the default configuration to `file`, returning the path written.
pub fn cmd_config_init(file: Option<&str>, force: bool) -> Result<PathBuf> {
    let path = PathBuf::from(file.unwrap_or(LOCAL_CONFIG_FILE));

    if path.exists() && !force {
        return Err(Error::config(format!(
            "Config file already exists at {}. Use --force to overwrite.",
            path.display()
        )));
    }

    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        std::fs::create_dir_all(parent).map_err(|e| Error::io_with_path(e, parent))?;
    }

    let toml_str = VerdantConfig::default().to_toml_string()?;
    std::fs::write(&path, &toml_str).map_err(|e| Error::io_with_path(e, &path))?;
    Ok(path)
}

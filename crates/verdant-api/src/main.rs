//! Verdant server binary.

#![warn(clippy::all)]
#![forbid(unsafe_code)]

use anyhow::Result;
use clap::Parser;
use tracing_subscriber::EnvFilter;
use verdant_api::cli::{Cli, Command, handle_config_command};
use verdant_api::{AppState, VerdantConfig};

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    let command = match cli.command {
        Some(Command::Config { action }) => {
            handle_config_command(cli.config.as_deref(), action)?;
            return Ok(());
        }
        Some(command) => command,
        None => Command::Serve,
    };

    let config = VerdantConfig::load(cli.config.as_deref())?;
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| config.logging.filter.as_str().into()),
        )
        .init();

    if command == Command::Seed {
        let state = AppState::from_config(&config);
        let seeded = verdant_seed::seed_all(&state.content).await?;
        tracing::info!(count = seeded.len(), "Seeded default content");
    } else {
        verdant_api::serve(&config).await?;
    }
    Ok(())
}

//! Tic-tac-toe - terminal game and headless autoplay.

#![warn(missing_docs)]

use anyhow::Result;
use clap::Parser;
use tictactoe::{Cli, Command, GameConfig, run_autoplay, run_tui};
use tracing::info;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> Result<()> {
    // Load .env file
    dotenvy::dotenv().ok();

    let cli = Cli::parse();
    let config = GameConfig::load(cli.config.as_deref())?;

    match cli.command {
        Command::Play {
            seed,
            delay_ms,
            strategy,
        } => run_tui(config.with_overrides(seed, delay_ms, strategy)).await,
        Command::Auto {
            games,
            seed,
            delay_ms,
            strategy,
        } => run_auto(config.with_overrides(seed, Some(delay_ms), strategy), games).await,
    }
}

/// Play headless games and print the tally.
async fn run_auto(config: GameConfig, games: u32) -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .init();

    info!(games, "Starting autoplay");
    let tally = run_autoplay(&config, games).await?;
    println!("{tally}");
    Ok(())
}

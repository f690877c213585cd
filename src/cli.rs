//! Command-line interface for tictactoe.

use clap::{Parser, Subcommand};
use std::path::PathBuf;
use tictactoe_engine::Strategy;

/// Tic-tac-toe against a greedy computer opponent
#[derive(Parser, Debug)]
#[command(name = "tictactoe")]
#[command(about = "Tic-tac-toe against a greedy computer opponent", long_about = None)]
#[command(version)]
pub struct Cli {
    /// Path to a TOML config file
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,

    /// Subcommand to run
    #[command(subcommand)]
    pub command: Command,
}

/// Available commands
#[derive(Subcommand, Debug)]
pub enum Command {
    /// Play in the terminal
    Play {
        /// Seed for the computer's random fallback
        #[arg(long)]
        seed: Option<u64>,

        /// Pause before the computer replies, in milliseconds
        #[arg(long)]
        delay_ms: Option<u64>,

        /// Computer strategy (heuristic or random)
        #[arg(long)]
        strategy: Option<Strategy>,
    },

    /// Play headless games with a random human and print the tally
    Auto {
        /// Number of games to play
        #[arg(short = 'n', long, default_value = "100")]
        games: u32,

        /// Seed for both players' random choices
        #[arg(long)]
        seed: Option<u64>,

        /// Pause before the computer replies, in milliseconds
        #[arg(long, default_value = "0")]
        delay_ms: u64,

        /// Computer strategy (heuristic or random)
        #[arg(long)]
        strategy: Option<Strategy>,
    },
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_definition_is_valid() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_parse_play_with_overrides() {
        let cli = Cli::try_parse_from([
            "tictactoe", "play", "--seed", "3", "--delay-ms", "250", "--strategy", "random",
        ])
        .unwrap();

        match cli.command {
            Command::Play {
                seed,
                delay_ms,
                strategy,
            } => {
                assert_eq!(seed, Some(3));
                assert_eq!(delay_ms, Some(250));
                assert_eq!(strategy, Some(Strategy::Random));
            }
            Command::Auto { .. } => panic!("Expected play"),
        }
    }

    #[test]
    fn test_parse_auto_defaults() {
        let cli = Cli::try_parse_from(["tictactoe", "auto", "--config", "game.toml"]).unwrap();

        assert_eq!(cli.config, Some(PathBuf::from("game.toml")));
        match cli.command {
            Command::Auto {
                games,
                seed,
                delay_ms,
                strategy,
            } => {
                assert_eq!(games, 100);
                assert_eq!(seed, None);
                assert_eq!(delay_ms, 0);
                assert_eq!(strategy, None);
            }
            Command::Play { .. } => panic!("Expected auto"),
        }
    }

    #[test]
    fn test_unknown_strategy_rejected() {
        assert!(Cli::try_parse_from(["tictactoe", "auto", "--strategy", "minimax"]).is_err());
    }
}

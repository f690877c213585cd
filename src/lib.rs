//! Tic-tac-toe front ends built on `tictactoe_engine`.
//!
//! # Architecture
//!
//! - **Engine**: board, rules and the game session (`tictactoe_engine`)
//! - **Scheduler**: delayed, cancellable delivery of computer turns
//! - **TUI**: ratatui front end for a human player
//! - **Autoplay**: headless batches of games with a random human
//!
//! # Example
//!
//! ```no_run
//! use tictactoe::{GameConfig, run_autoplay};
//!
//! # async fn example() -> anyhow::Result<()> {
//! let config = GameConfig::default().with_overrides(Some(7), Some(0), None);
//! let tally = run_autoplay(&config, 10).await?;
//! println!("{tally}");
//! # Ok(())
//! # }
//! ```

#![warn(missing_docs)]
#![forbid(unsafe_code)]

// Private module declarations
mod alert;
mod autoplay;
mod cli;
mod config;
mod scheduler;
mod tui;

// Crate-level exports
pub use alert::AlertItem;
pub use autoplay::{Tally, run_autoplay};
pub use cli::{Cli, Command};
pub use config::{ConfigError, GameConfig};
pub use scheduler::ComputerTurnScheduler;
pub use tui::run_tui;

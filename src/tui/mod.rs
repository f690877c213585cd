//! Terminal UI for playing against the computer.

mod app;
mod input;
mod ui;

use crate::config::GameConfig;
use anyhow::{Context, Result};
use crossterm::{
    event::{self, Event, KeyEventKind},
    execute,
    terminal::{EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode},
};
use ratatui::{Terminal, backend::CrosstermBackend};
use std::io::{self, Stdout};
use std::time::Duration;
use tracing::{error, info, instrument};

use app::App;

/// Run the TUI until the player quits.
pub async fn run_tui(config: GameConfig) -> Result<()> {
    // Setup logging to file to avoid interfering with TUI
    let log_file = std::fs::File::create(config.log_file())
        .with_context(|| format!("Failed to create log file {}", config.log_file().display()))?;
    let _ = tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .with_writer(std::sync::Arc::new(log_file))
        .with_ansi(false)
        .try_init(); // Don't panic if already initialized

    info!(
        delay_ms = config.computer_delay_ms(),
        strategy = %config.strategy(),
        "Starting tic-tac-toe TUI"
    );

    enable_raw_mode()?;
    let mut terminal = restore_on_error(enter_alternate_screen, || {
        disable_raw_mode().context("Failed to leave raw mode")
    })?;

    let mut app = App::new(&config);
    let res = run_game(&mut terminal, &mut app).await;

    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;

    if let Err(err) = res {
        error!(error = ?err, "Game loop error");
        return Err(err);
    }

    info!("Player quit");
    Ok(())
}

fn enter_alternate_screen() -> Result<Terminal<CrosstermBackend<Stdout>>> {
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    Ok(Terminal::new(CrosstermBackend::new(stdout))?)
}

/// Runs `setup`; if it fails, runs `restore` before returning the setup error.
fn restore_on_error<T>(
    setup: impl FnOnce() -> Result<T>,
    restore: impl FnOnce() -> Result<()>,
) -> Result<T> {
    setup().inspect_err(|err| {
        error!(error = ?err, "Terminal setup failed");
        if let Err(restore_err) = restore() {
            error!(error = ?restore_err, "Terminal restore failed");
        }
    })
}

/// Draw, poll keys, apply delivered computer turns.
#[instrument(skip_all)]
async fn run_game(terminal: &mut Terminal<CrosstermBackend<Stdout>>, app: &mut App) -> Result<()> {
    while !app.should_quit() {
        app.tick();
        terminal.draw(|f| ui::draw(f, app))?;

        if event::poll(Duration::from_millis(50))?
            && let Event::Key(key) = event::read()?
            && key.kind == KeyEventKind::Press
        {
            app.handle_key(key.code);
        }

        // Let the scheduler's timer task run.
        tokio::task::yield_now().await;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::Cell;

    #[test]
    fn test_failed_setup_restores_terminal() {
        let restored = Cell::new(false);
        let result: Result<()> = restore_on_error(
            || anyhow::bail!("no alternate screen"),
            || {
                restored.set(true);
                Ok(())
            },
        );

        assert_eq!(result.unwrap_err().to_string(), "no alternate screen");
        assert!(restored.get());
    }

    #[test]
    fn test_successful_setup_leaves_terminal_alone() {
        let restored = Cell::new(false);
        let value = restore_on_error(
            || Ok(7),
            || {
                restored.set(true);
                Ok(())
            },
        )
        .unwrap();

        assert_eq!(value, 7);
        assert!(!restored.get());
    }
}

//! Headless games: a random human against the configured computer.

use crate::config::GameConfig;
use crate::scheduler::ComputerTurnScheduler;
use anyhow::{Context, Result};
use rand::SeedableRng;
use rand::rngs::StdRng;
use serde::Serialize;
use tictactoe_engine::{GameOutcome, Strategy};
use tracing::{debug, info, instrument};

/// Results of a batch of games.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct Tally {
    /// Games the human won.
    pub human_wins: u32,
    /// Games the computer won.
    pub computer_wins: u32,
    /// Games that filled the board.
    pub draws: u32,
}

impl Tally {
    /// Counts one finished game. In-progress outcomes are not counted.
    pub fn record(&mut self, outcome: GameOutcome) {
        match outcome {
            GameOutcome::HumanWin => self.human_wins += 1,
            GameOutcome::ComputerWin => self.computer_wins += 1,
            GameOutcome::Draw => self.draws += 1,
            GameOutcome::InProgress => {}
        }
    }

    /// Total games counted.
    pub fn games(&self) -> u32 {
        self.human_wins + self.computer_wins + self.draws
    }
}

impl std::fmt::Display for Tally {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{} games: human {} / computer {} / draw {}",
            self.games(),
            self.human_wins,
            self.computer_wins,
            self.draws
        )
    }
}

/// Plays `games` games where the human picks uniformly random squares.
///
/// Computer turns go through the scheduler, so the configured delay
/// applies between every human move and its reply.
#[instrument(skip(config), fields(strategy = %config.strategy(), delay_ms = config.computer_delay_ms()))]
pub async fn run_autoplay(config: &GameConfig, games: u32) -> Result<Tally> {
    let (mut scheduler, mut turns) = ComputerTurnScheduler::new(config.computer_delay());
    let mut session = config.new_session();
    let mut human_rng = match config.seed() {
        Some(seed) => StdRng::seed_from_u64(seed.wrapping_add(1)),
        None => StdRng::from_entropy(),
    };
    let mut tally = Tally::default();

    for game in 0..games {
        while !session.is_over() {
            let (position, _) = Strategy::Random
                .select(session.board(), &mut human_rng)
                .context("Board full but game not over")?;
            let result = session.apply_human_move(position.to_index())?;

            if let Some(token) = result.computer_turn() {
                scheduler.schedule(token);
                let token = turns.recv().await.context("Turn channel closed")?;
                session.apply_computer_move(token);
            }
        }

        let outcome = session.outcome();
        debug!(game, board = %session.board().display(), "Final board");
        info!(game, %outcome, "Game finished");
        tally.record(outcome);
        session.reset();
    }

    Ok(tally)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tally_records_terminal_outcomes_only() {
        let mut tally = Tally::default();
        tally.record(GameOutcome::HumanWin);
        tally.record(GameOutcome::Draw);
        tally.record(GameOutcome::Draw);
        tally.record(GameOutcome::InProgress);

        assert_eq!(tally.games(), 3);
        assert_eq!(tally.draws, 2);
        assert_eq!(tally.to_string(), "3 games: human 1 / computer 0 / draw 2");
    }
}

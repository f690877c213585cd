//! Serializable, read-only view of a session for renderers.

use crate::{GameOutcome, GameSession, Move, Player, Position, SessionPhase};
use derive_getters::Getters;
use serde::{Deserialize, Serialize};

/// Copy of everything a renderer needs from a [`GameSession`].
#[derive(Debug, Clone, PartialEq, Eq, Getters, Serialize, Deserialize)]
pub struct SessionSnapshot {
    /// Mark in each square, row-major.
    cells: [Option<Player>; 9],
    /// Outcome derived from the board.
    outcome: GameOutcome,
    /// Turn phase.
    phase: SessionPhase,
    /// Reset counter.
    generation: u64,
    /// Moves since the last reset, oldest first.
    history: Vec<Move>,
}

impl From<&GameSession> for SessionSnapshot {
    fn from(session: &GameSession) -> Self {
        let board = session.board();
        Self {
            cells: Position::ALL.map(|pos| board.player_at(pos)),
            outcome: session.outcome(),
            phase: session.phase(),
            generation: session.generation(),
            history: session.history().to_vec(),
        }
    }
}

impl SessionSnapshot {
    /// Returns true while input should be disabled for the computer's reply.
    pub fn is_locked(&self) -> bool {
        self.phase == SessionPhase::Locked
    }

    /// Returns true if the game is over.
    pub fn is_over(&self) -> bool {
        self.outcome.is_terminal()
    }

    /// Mark to draw at `pos`, or an empty string.
    pub fn indicator(&self, pos: Position) -> &'static str {
        self.cells[pos.to_index()].map_or("", Player::indicator)
    }

    /// Returns a status string for display.
    pub fn status_string(&self) -> String {
        match (self.phase, self.outcome) {
            (SessionPhase::Open, _) => "Your move.".to_string(),
            (SessionPhase::Locked, _) => "Computer is thinking...".to_string(),
            (SessionPhase::Terminal(_), GameOutcome::HumanWin) => "Game over. You win!".to_string(),
            (SessionPhase::Terminal(_), GameOutcome::ComputerWin) => {
                "Game over. The computer wins!".to_string()
            }
            (SessionPhase::Terminal(_), _) => "Game over. Draw!".to_string(),
        }
    }
}

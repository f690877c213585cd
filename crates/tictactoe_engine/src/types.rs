//! Core domain types for tic-tac-toe.

use crate::error::EngineError;
use crate::position::Position;
use serde::{Deserialize, Serialize};
use tracing::instrument;

/// Participant in the game.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, strum::Display, strum::EnumIter,
)]
pub enum Player {
    /// The person at the keyboard. Always moves first.
    Human,
    /// The heuristic opponent.
    Computer,
}

impl Player {
    /// Returns the opponent player.
    pub fn opponent(self) -> Self {
        match self {
            Player::Human => Player::Computer,
            Player::Computer => Player::Human,
        }
    }

    /// Mark drawn on the board for this player's moves.
    pub fn indicator(self) -> &'static str {
        match self {
            Player::Human => "X",
            Player::Computer => "O",
        }
    }
}

/// A move in tic-tac-toe: a player placing their mark at a position.
///
/// Moves are never mutated once placed; only a full reset removes them.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Move {
    player: Player,
    position: Position,
}

impl Move {
    /// Creates a new move.
    pub fn new(player: Player, position: Position) -> Self {
        Self { player, position }
    }

    /// Returns the player making this move.
    pub fn player(&self) -> Player {
        self.player
    }

    /// Returns the position of this move.
    pub fn position(&self) -> Position {
        self.position
    }
}

impl std::fmt::Display for Move {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} -> {}", self.player, self.position.label())
    }
}

/// 3x3 tic-tac-toe board.
///
/// Each slot holds at most one [`Move`], and a stored move's position always
/// equals its slot index. Deserialization enforces the same rule.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "[Option<Move>; 9]", into = "[Option<Move>; 9]")]
pub struct Board {
    /// Slots in row-major order (0-8).
    cells: [Option<Move>; 9],
}

impl Board {
    /// Creates a new empty board.
    pub fn new() -> Self {
        Self { cells: [None; 9] }
    }

    /// Gets the move at the given position, if any.
    pub fn get(&self, pos: Position) -> Option<Move> {
        self.cells[pos.to_index()]
    }

    /// Gets the player occupying the given position, if any.
    pub fn player_at(&self, pos: Position) -> Option<Player> {
        self.get(pos).map(|mov| mov.player())
    }

    /// Checks if a square is empty.
    pub fn is_empty(&self, pos: Position) -> bool {
        self.get(pos).is_none()
    }

    /// Places a move in its slot.
    ///
    /// # Errors
    ///
    /// Returns [`EngineError::SquareOccupied`] if the slot already holds a move.
    #[instrument(skip(self), fields(player = %mov.player(), position = %mov.position()))]
    pub fn place(&mut self, mov: Move) -> Result<(), EngineError> {
        let slot = &mut self.cells[mov.position().to_index()];
        if slot.is_some() {
            return Err(EngineError::SquareOccupied(mov.position()));
        }
        *slot = Some(mov);
        Ok(())
    }

    /// Empties every slot.
    pub fn clear(&mut self) {
        self.cells = [None; 9];
    }

    /// Returns all slots as a slice.
    pub fn cells(&self) -> &[Option<Move>; 9] {
        &self.cells
    }

    /// Positions currently held by `player`, in index order.
    pub fn positions_of(&self, player: Player) -> impl Iterator<Item = Position> + '_ {
        self.cells
            .iter()
            .flatten()
            .filter(move |mov| mov.player() == player)
            .map(|mov| mov.position())
    }

    /// Number of occupied slots.
    pub fn occupied_count(&self) -> usize {
        self.cells.iter().flatten().count()
    }

    /// Formats the board as a human-readable string.
    ///
    /// Empty squares show their 1-based key so a player can type it.
    pub fn display(&self) -> String {
        let mut result = String::new();
        for (index, pos) in Position::ALL.iter().enumerate() {
            match self.player_at(*pos) {
                Some(player) => result.push_str(player.indicator()),
                None => result.push_str(&(index + 1).to_string()),
            }
            if index % 3 < 2 {
                result.push('|');
            } else if index < 8 {
                result.push_str("\n-+-+-\n");
            }
        }
        result
    }

    /// Overwrites a slot without any checks, for building corrupt states in tests.
    #[cfg(test)]
    pub(crate) fn set_unchecked(&mut self, pos: Position, cell: Option<Move>) {
        self.cells[pos.to_index()] = cell;
    }
}

impl Default for Board {
    fn default() -> Self {
        Self::new()
    }
}

impl TryFrom<[Option<Move>; 9]> for Board {
    type Error = EngineError;

    fn try_from(cells: [Option<Move>; 9]) -> Result<Self, Self::Error> {
        for (slot, cell) in cells.iter().enumerate() {
            if let Some(mov) = cell
                && mov.position().to_index() != slot
            {
                return Err(EngineError::MisplacedMove {
                    slot,
                    position: mov.position(),
                });
            }
        }
        Ok(Self { cells })
    }
}

impl From<Board> for [Option<Move>; 9] {
    fn from(board: Board) -> Self {
        board.cells
    }
}

/// Classification of a board. Derived from the board, never stored on its own.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, derive_more::Display)]
pub enum GameOutcome {
    /// Nobody has won and empty squares remain.
    #[display("In progress")]
    InProgress,
    /// The human completed a line.
    #[display("Human wins")]
    HumanWin,
    /// The computer completed a line.
    #[display("Computer wins")]
    ComputerWin,
    /// Every square is filled with no line completed.
    #[display("Draw")]
    Draw,
}

impl GameOutcome {
    /// Outcome in which `player` has won.
    pub fn win_for(player: Player) -> Self {
        match player {
            Player::Human => GameOutcome::HumanWin,
            Player::Computer => GameOutcome::ComputerWin,
        }
    }

    /// Returns true once the game has ended.
    pub fn is_terminal(&self) -> bool {
        !matches!(self, GameOutcome::InProgress)
    }

    /// Returns the winner if there is one.
    pub fn winner(&self) -> Option<Player> {
        match self {
            GameOutcome::HumanWin => Some(Player::Human),
            GameOutcome::ComputerWin => Some(Player::Computer),
            GameOutcome::InProgress | GameOutcome::Draw => None,
        }
    }
}

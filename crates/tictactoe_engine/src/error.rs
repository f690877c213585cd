//! Engine error types.

use crate::position::Position;
use derive_more::{Display, Error};

/// Error returned when a caller hands the engine something it cannot act on.
///
/// Routine rejections (occupied square, locked board, stale turn token) are
/// not errors; the session ignores them and reports the unchanged outcome.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Display, Error)]
pub enum EngineError {
    /// Cell index outside 0-8.
    #[display("Position {_0} is out of range (must be 0-8)")]
    InvalidPosition(#[error(not(source))] usize),

    /// Attempted to overwrite a square on the board.
    #[display("Square {_0} is already occupied")]
    SquareOccupied(#[error(not(source))] Position),

    /// A stored move names a different square than the slot holding it.
    #[display("Slot {slot} holds a move for {position}")]
    MisplacedMove {
        /// Slot index the move was found in.
        slot: usize,
        /// Square the move claims.
        position: Position,
    },
}

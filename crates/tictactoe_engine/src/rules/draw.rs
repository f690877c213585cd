//! Draw detection logic for tic-tac-toe.

use crate::Board;
use tracing::instrument;

/// Checks if the board is full (all squares occupied).
#[instrument(skip(board))]
pub fn is_full(board: &Board) -> bool {
    board.cells().iter().all(Option::is_some)
}

/// Checks for a draw: every square is occupied.
///
/// Only meaningful once neither player has won. Callers must check for a
/// win first; [`super::outcome_after`] and [`super::evaluate`] do.
pub fn is_draw(board: &Board) -> bool {
    is_full(board)
}

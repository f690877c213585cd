//! Move selection for the computer opponent.
//!
//! The heuristic is greedy, not minimax. In strict priority order it will
//! complete its own line, block the human's line, take the center, or fall
//! back to a uniformly random empty square.

use super::win::WIN_PATTERNS;
use crate::{Board, Player, Position};
use rand::Rng;
use rand::seq::SliceRandom;
use serde::{Deserialize, Serialize};
use tracing::{debug, instrument};

/// Which rule of the heuristic produced a move.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, strum::Display)]
pub enum MoveReason {
    /// Completes three in a row for the computer.
    Win,
    /// Stops the human from completing three in a row.
    Block,
    /// Takes the center square.
    Center,
    /// Uniform pick among empty squares.
    Random,
}

/// How the computer opponent chooses its moves.
#[derive(
    Debug,
    Clone,
    Copy,
    Default,
    PartialEq,
    Eq,
    Hash,
    Serialize,
    Deserialize,
    strum::Display,
    strum::EnumString,
    strum::EnumIter,
)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum Strategy {
    /// Win, then block, then center, then random.
    #[default]
    Heuristic,
    /// Random empty square only.
    Random,
}

impl Strategy {
    /// Chooses a square with this strategy. `None` only for a full board.
    #[instrument(skip(board, rng))]
    pub fn select<R: Rng + ?Sized>(self, board: &Board, rng: &mut R) -> Option<(Position, MoveReason)> {
        match self {
            Strategy::Heuristic => select_computer_move_with_reason(board, rng),
            Strategy::Random => random_empty(board, rng).map(|pos| (pos, MoveReason::Random)),
        }
    }
}

/// Chooses the computer's next square.
///
/// The returned position is always empty. Returns `None` only when the
/// board is full, which callers rule out by checking for a draw first.
pub fn select_computer_move<R: Rng + ?Sized>(board: &Board, rng: &mut R) -> Option<Position> {
    select_computer_move_with_reason(board, rng).map(|(pos, _)| pos)
}

/// Like [`select_computer_move`], also reporting which rule fired.
///
/// When several lines qualify for a win or a block, the first one in
/// [`WIN_PATTERNS`] order is taken.
#[instrument(skip(board, rng))]
pub fn select_computer_move_with_reason<R: Rng + ?Sized>(
    board: &Board,
    rng: &mut R,
) -> Option<(Position, MoveReason)> {
    let choice = completing_square(board, Player::Computer)
        .map(|pos| (pos, MoveReason::Win))
        .or_else(|| completing_square(board, Player::Human).map(|pos| (pos, MoveReason::Block)))
        .or_else(|| board.is_empty(Position::Center).then_some((Position::Center, MoveReason::Center)))
        .or_else(|| random_empty(board, rng).map(|pos| (pos, MoveReason::Random)));

    if let Some((position, reason)) = choice {
        debug!(%position, %reason, "Computer selected square");
    }
    choice
}

/// First empty square that would give `player` three in a row.
///
/// For each line, the cells `player` does not hold are the set difference
/// between the line and the player's squares. Exactly one such cell, and
/// that cell empty, means the line can be completed now.
fn completing_square(board: &Board, player: Player) -> Option<Position> {
    WIN_PATTERNS.iter().find_map(|pattern| {
        let mut missing = pattern
            .iter()
            .copied()
            .filter(|&pos| board.player_at(pos) != Some(player));
        match (missing.next(), missing.next()) {
            (Some(pos), None) if board.is_empty(pos) => Some(pos),
            _ => None,
        }
    })
}

fn random_empty<R: Rng + ?Sized>(board: &Board, rng: &mut R) -> Option<Position> {
    Position::valid_moves(board).choose(rng).copied()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Move;
    use rand::SeedableRng;
    use rand::rngs::StdRng;

    fn board_with(human: &[Position], computer: &[Position]) -> Board {
        let mut board = Board::new();
        for &pos in human {
            board.place(Move::new(Player::Human, pos)).unwrap();
        }
        for &pos in computer {
            board.place(Move::new(Player::Computer, pos)).unwrap();
        }
        board
    }

    fn rng() -> StdRng {
        StdRng::seed_from_u64(7)
    }

    #[test]
    fn test_takes_center_on_opening_reply() {
        let board = board_with(&[Position::TopLeft], &[]);
        let choice = select_computer_move_with_reason(&board, &mut rng());
        assert_eq!(choice, Some((Position::Center, MoveReason::Center)));
    }

    #[test]
    fn test_win_beats_block() {
        // Computer can finish the middle row; human threatens the top row.
        let board = board_with(
            &[Position::TopLeft, Position::TopCenter, Position::BottomRight],
            &[Position::MiddleLeft, Position::Center],
        );
        let choice = select_computer_move_with_reason(&board, &mut rng());
        assert_eq!(choice, Some((Position::MiddleRight, MoveReason::Win)));
    }

    #[test]
    fn test_block_beats_center() {
        let board = board_with(&[Position::TopLeft, Position::TopCenter], &[Position::BottomLeft]);
        let choice = select_computer_move_with_reason(&board, &mut rng());
        assert_eq!(choice, Some((Position::TopRight, MoveReason::Block)));
    }

    #[test]
    fn test_center_beats_random() {
        let board = board_with(&[Position::TopLeft], &[Position::BottomRight]);
        for seed in 0..20 {
            let mut rng = StdRng::seed_from_u64(seed);
            assert_eq!(select_computer_move(&board, &mut rng), Some(Position::Center));
        }
    }

    #[test]
    fn test_blocked_line_is_not_a_win() {
        // Computer holds two of the top row but the human sits on the third.
        let board = board_with(
            &[Position::TopRight, Position::Center],
            &[Position::TopLeft, Position::TopCenter],
        );
        // The human threatens the anti-diagonal through the center.
        let choice = select_computer_move_with_reason(&board, &mut rng());
        assert_eq!(choice, Some((Position::BottomLeft, MoveReason::Block)));
    }

    #[test]
    fn test_first_pattern_wins_tie_break() {
        // Computer can complete both the top row and the left column.
        let board = board_with(
            &[Position::BottomRight, Position::MiddleRight, Position::Center],
            &[Position::TopLeft, Position::TopCenter, Position::BottomLeft],
        );
        let choice = select_computer_move_with_reason(&board, &mut rng());
        assert_eq!(choice, Some((Position::TopRight, MoveReason::Win)));
    }

    #[test]
    fn test_random_fallback_picks_empty_square() {
        // X O X / X O O / O X _  -> no lines to complete or block, center taken
        let board = board_with(
            &[Position::TopLeft, Position::TopRight, Position::MiddleLeft, Position::BottomCenter],
            &[Position::TopCenter, Position::Center, Position::MiddleRight, Position::BottomLeft],
        );
        let choice = select_computer_move_with_reason(&board, &mut rng());
        assert_eq!(choice, Some((Position::BottomRight, MoveReason::Random)));
    }

    #[test]
    fn test_full_board_yields_none() {
        let board = board_with(
            &[
                Position::TopLeft,
                Position::TopRight,
                Position::MiddleLeft,
                Position::BottomCenter,
                Position::BottomRight,
            ],
            &[Position::TopCenter, Position::Center, Position::MiddleRight, Position::BottomLeft],
        );
        assert_eq!(select_computer_move(&board, &mut rng()), None);
        assert_eq!(Strategy::Random.select(&board, &mut rng()), None);
    }

    #[test]
    fn test_random_strategy_ignores_heuristic() {
        let board = board_with(&[Position::TopLeft, Position::TopCenter], &[]);
        let (pos, reason) = Strategy::Random.select(&board, &mut rng()).unwrap();
        assert_eq!(reason, MoveReason::Random);
        assert!(board.is_empty(pos));
    }

    #[test]
    fn test_strategy_parses_from_lowercase() {
        assert_eq!("heuristic".parse::<Strategy>(), Ok(Strategy::Heuristic));
        assert_eq!("random".parse::<Strategy>(), Ok(Strategy::Random));
        assert_eq!(Strategy::default(), Strategy::Heuristic);
        assert_eq!(Strategy::Random.to_string(), "random");
    }
}

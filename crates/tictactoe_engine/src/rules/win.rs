//! Win detection logic for tic-tac-toe.

use crate::{Board, Player, Position};
use tracing::instrument;

/// Three cells forming a row, column or diagonal.
pub type WinPattern = [Position; 3];

/// Every winning line, in the order the heuristic scans them.
pub const WIN_PATTERNS: [WinPattern; 8] = [
    // Rows
    [Position::TopLeft, Position::TopCenter, Position::TopRight],
    [Position::MiddleLeft, Position::Center, Position::MiddleRight],
    [Position::BottomLeft, Position::BottomCenter, Position::BottomRight],
    // Columns
    [Position::TopLeft, Position::MiddleLeft, Position::BottomLeft],
    [Position::TopCenter, Position::Center, Position::BottomCenter],
    [Position::TopRight, Position::MiddleRight, Position::BottomRight],
    // Diagonals
    [Position::TopLeft, Position::Center, Position::BottomRight],
    [Position::TopRight, Position::Center, Position::BottomLeft],
];

/// Checks if `player` holds every cell of some winning line.
#[instrument(skip(board))]
pub fn is_winning_for(board: &Board, player: Player) -> bool {
    WIN_PATTERNS
        .iter()
        .any(|pattern| pattern.iter().all(|&pos| board.player_at(pos) == Some(player)))
}

/// Returns the player with three in a row, if any.
///
/// The human is checked first; reachable boards never have two winners.
#[instrument(skip(board))]
pub fn winner(board: &Board) -> Option<Player> {
    [Player::Human, Player::Computer]
        .into_iter()
        .find(|&player| is_winning_for(board, player))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Move;
    use strum::IntoEnumIterator;

    #[test]
    fn test_no_winner_empty_board() {
        let board = Board::new();
        assert_eq!(winner(&board), None);
        assert!(!is_winning_for(&board, Player::Human));
        assert!(!is_winning_for(&board, Player::Computer));
    }

    #[test]
    fn test_every_pattern_wins_for_its_owner_only() {
        for player in Player::iter() {
            for pattern in WIN_PATTERNS {
                let mut board = Board::new();
                for pos in pattern {
                    board.place(Move::new(player, pos)).unwrap();
                }
                assert!(is_winning_for(&board, player), "{pattern:?} for {player}");
                assert!(!is_winning_for(&board, player.opponent()));
                assert_eq!(winner(&board), Some(player));
            }
        }
    }

    #[test]
    fn test_mixed_line_does_not_win() {
        let mut board = Board::new();
        board.place(Move::new(Player::Human, Position::TopLeft)).unwrap();
        board.place(Move::new(Player::Human, Position::TopCenter)).unwrap();
        board.place(Move::new(Player::Computer, Position::TopRight)).unwrap();
        assert_eq!(winner(&board), None);
    }

    #[test]
    fn test_win_independent_of_move_order() {
        let mut board = Board::new();
        board.place(Move::new(Player::Computer, Position::BottomLeft)).unwrap();
        board.place(Move::new(Player::Computer, Position::TopRight)).unwrap();
        board.place(Move::new(Player::Computer, Position::Center)).unwrap();
        assert!(is_winning_for(&board, Player::Computer));
    }
}

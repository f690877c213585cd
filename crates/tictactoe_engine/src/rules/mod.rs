//! Game rules for tic-tac-toe.
//!
//! This module contains pure functions for evaluating game state
//! according to tic-tac-toe rules. Rules are separated from board
//! storage so the session can compose them.

pub mod draw;
pub mod strategy;
pub mod win;

pub use draw::{is_draw, is_full};
pub use strategy::{MoveReason, Strategy, select_computer_move, select_computer_move_with_reason};
pub use win::{WIN_PATTERNS, WinPattern, is_winning_for, winner};

use crate::{Board, GameOutcome, Player, Position};

/// Checks if a move has been placed at `pos`.
pub fn is_occupied(board: &Board, pos: Position) -> bool {
    !board.is_empty(pos)
}

/// Outcome after `mover` has just played.
///
/// Win is checked before draw: a full board with a completed line is a win.
pub fn outcome_after(board: &Board, mover: Player) -> GameOutcome {
    if is_winning_for(board, mover) {
        GameOutcome::win_for(mover)
    } else if is_draw(board) {
        GameOutcome::Draw
    } else {
        GameOutcome::InProgress
    }
}

/// Derives the outcome of any board, regardless of who moved last.
pub fn evaluate(board: &Board) -> GameOutcome {
    match winner(board) {
        Some(player) => GameOutcome::win_for(player),
        None if is_draw(board) => GameOutcome::Draw,
        None => GameOutcome::InProgress,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Move;

    fn board_with(human: &[usize], computer: &[usize]) -> Board {
        let mut board = Board::new();
        for &i in human {
            board.place(Move::new(Player::Human, Position::ALL[i])).unwrap();
        }
        for &i in computer {
            board.place(Move::new(Player::Computer, Position::ALL[i])).unwrap();
        }
        board
    }

    #[test]
    fn test_is_occupied() {
        let board = board_with(&[0], &[4]);
        assert!(is_occupied(&board, Position::TopLeft));
        assert!(is_occupied(&board, Position::Center));
        assert!(!is_occupied(&board, Position::BottomRight));
    }

    #[test]
    fn test_full_board_with_line_is_win_not_draw() {
        // X X X / O O X / O X O
        let board = board_with(&[0, 1, 2, 5, 7], &[3, 4, 6, 8]);
        assert!(is_draw(&board));
        assert_eq!(outcome_after(&board, Player::Human), GameOutcome::HumanWin);
        assert_eq!(evaluate(&board), GameOutcome::HumanWin);
    }

    #[test]
    fn test_full_board_without_line_is_draw() {
        // X O X / X O O / O X X
        let board = board_with(&[0, 2, 3, 7, 8], &[1, 4, 5, 6]);
        assert_eq!(outcome_after(&board, Player::Human), GameOutcome::Draw);
        assert_eq!(evaluate(&board), GameOutcome::Draw);
    }

    #[test]
    fn test_open_board_in_progress() {
        let board = board_with(&[0, 1], &[4]);
        assert_eq!(outcome_after(&board, Player::Human), GameOutcome::InProgress);
        assert_eq!(evaluate(&board), GameOutcome::InProgress);
    }
}

//! History consistency: the board is exactly the replayed history.

use super::Invariant;
use crate::{Board, GameSession};

/// Invariant: replaying the move history onto an empty board never
/// overwrites a square and reproduces the current board.
///
/// This also makes squares monotonic: once occupied, a square keeps its
/// move until reset.
pub struct HistoryConsistentInvariant;

impl Invariant<GameSession> for HistoryConsistentInvariant {
    fn holds(session: &GameSession) -> bool {
        let mut reconstructed = Board::new();

        for mov in session.history() {
            if reconstructed.place(*mov).is_err() {
                return false;
            }
        }

        reconstructed == *session.board()
    }

    fn description() -> &'static str {
        "Board matches the replayed move history"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{Move, Player, Position};

    #[test]
    fn test_after_moves_holds() {
        let mut session = GameSession::with_seed(5);
        let token = session.apply_human_move(0).unwrap().computer_turn().unwrap();
        session.apply_computer_move(token);
        assert_eq!(session.history().len(), 2);
        assert!(HistoryConsistentInvariant::holds(&session));
    }

    #[test]
    fn test_overwritten_square_violates() {
        let mut session = GameSession::with_seed(5);
        session.apply_human_move(4).unwrap();
        session
            .board
            .set_unchecked(Position::Center, Some(Move::new(Player::Computer, Position::Center)));
        assert!(!HistoryConsistentInvariant::holds(&session));
    }
}

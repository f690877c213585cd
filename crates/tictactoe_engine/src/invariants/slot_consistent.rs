//! Slot consistency: a stored move sits in the slot it names.

use super::Invariant;
use crate::GameSession;

/// Invariant: every stored move's position equals its slot index.
pub struct SlotConsistentInvariant;

impl Invariant<GameSession> for SlotConsistentInvariant {
    fn holds(session: &GameSession) -> bool {
        session
            .board()
            .cells()
            .iter()
            .enumerate()
            .all(|(index, cell)| cell.is_none_or(|mov| mov.position().to_index() == index))
    }

    fn description() -> &'static str {
        "Every move is stored in the slot matching its position"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{Move, Player, Position};

    #[test]
    fn test_fresh_session_holds() {
        assert!(SlotConsistentInvariant::holds(&GameSession::with_seed(3)));
    }

    #[test]
    fn test_misplaced_move_violates() {
        let mut session = GameSession::with_seed(3);
        session
            .board
            .set_unchecked(Position::TopLeft, Some(Move::new(Player::Human, Position::Center)));
        assert!(!SlotConsistentInvariant::holds(&session));
    }
}

//! Phase consistency: lock state and outcome agree with the board.

use super::Invariant;
use crate::{GameOutcome, GameSession, Player, SessionPhase, rules};

/// Invariant: the session phase is what the board implies.
///
/// - Open: the board has no outcome yet.
/// - Locked: no outcome yet, and the last move was the human's.
/// - Terminal: carries exactly the outcome derived from the board.
pub struct PhaseConsistentInvariant;

impl Invariant<GameSession> for PhaseConsistentInvariant {
    fn holds(session: &GameSession) -> bool {
        let derived = rules::evaluate(session.board());

        match session.phase() {
            SessionPhase::Open => derived == GameOutcome::InProgress,
            SessionPhase::Locked => {
                derived == GameOutcome::InProgress
                    && session
                        .history()
                        .last()
                        .is_some_and(|mov| mov.player() == Player::Human)
            }
            SessionPhase::Terminal(outcome) => outcome.is_terminal() && outcome == derived,
        }
    }

    fn description() -> &'static str {
        "Session phase agrees with the last mover and board outcome"
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_locked_after_human_move_holds() {
        let mut session = GameSession::with_seed(9);
        session.apply_human_move(0).unwrap();
        assert!(session.is_locked());
        assert!(PhaseConsistentInvariant::holds(&session));
    }

    #[test]
    fn test_terminal_without_outcome_violates() {
        let mut session = GameSession::with_seed(9);
        session.apply_human_move(0).unwrap();
        session.phase = SessionPhase::Terminal(GameOutcome::HumanWin);
        assert!(!PhaseConsistentInvariant::holds(&session));
    }

    #[test]
    fn test_locked_after_computer_move_violates() {
        let mut session = GameSession::with_seed(9);
        let token = session.apply_human_move(0).unwrap().computer_turn().unwrap();
        session.apply_computer_move(token);
        session.phase = SessionPhase::Locked;
        assert!(!PhaseConsistentInvariant::holds(&session));
    }
}

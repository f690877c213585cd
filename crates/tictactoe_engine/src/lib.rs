//! Tic-tac-toe engine - a human against a greedy computer opponent.
//!
//! The engine is pure logic. A front-end owns the timing and the drawing;
//! it feeds taps into [`GameSession::apply_human_move`], schedules the
//! computer's reply with the returned [`TurnToken`], and renders
//! [`SessionSnapshot`]s.
//!
//! # Example
//!
//! ```
//! use tictactoe_engine::{GameOutcome, GameSession, Player, Position};
//!
//! let mut session = GameSession::with_seed(42);
//! let result = session.apply_human_move(0)?;
//! assert_eq!(result.outcome(), GameOutcome::InProgress);
//!
//! // Later, after the front-end's delay:
//! if let Some(token) = result.computer_turn() {
//!     session.apply_computer_move(token);
//! }
//! assert_eq!(session.board().player_at(Position::Center), Some(Player::Computer));
//! # Ok::<(), tictactoe_engine::EngineError>(())
//! ```

#![warn(missing_docs)]
#![forbid(unsafe_code)]

mod error;
pub mod invariants;
mod position;
pub mod rules;
mod session;
mod snapshot;
mod types;

pub use error::EngineError;
pub use position::Position;
pub use rules::{MoveReason, Strategy, WIN_PATTERNS, WinPattern};
pub use session::{GameSession, MoveResult, SessionEvent, SessionPhase, SubscriptionId, TurnToken};
pub use snapshot::SessionSnapshot;
pub use types::{Board, GameOutcome, Move, Player};

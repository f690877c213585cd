//! Game session: the board plus turn and lock bookkeeping.
//!
//! A session moves through three phases:
//!
//! ```text
//!   Open --human move--> Locked --computer move--> Open
//!     |                    |
//!     +--win/draw--> Terminal <--win/draw--+
//!
//!   any phase --reset--> Open
//! ```
//!
//! The delay between a human move and the computer's reply belongs to the
//! caller. When a human move locks the board the caller receives a
//! [`TurnToken`]; handing it back to [`GameSession::apply_computer_move`]
//! applies the reply. A reset invalidates every outstanding token.

use crate::error::EngineError;
use crate::invariants::{InvariantSet, SessionInvariants};
use crate::rules::{self, Strategy};
use crate::snapshot::SessionSnapshot;
use crate::{Board, GameOutcome, Move, Player, Position};
use rand::SeedableRng;
use rand::rngs::StdRng;
use serde::{Deserialize, Serialize};
use tracing::{debug, info, instrument, warn};

/// Where a session is in its turn cycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum SessionPhase {
    /// Waiting for the human.
    Open,
    /// The human has moved; the computer's reply is pending.
    Locked,
    /// The game is over. Only a reset leaves this phase.
    Terminal(GameOutcome),
}

/// Permission to apply one computer move.
///
/// Issued when a human move locks the board. Stamped with the session
/// generation, so a token issued before a reset is ignored after it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct TurnToken {
    generation: u64,
}

impl TurnToken {
    /// Generation of the session that issued this token.
    pub fn generation(&self) -> u64 {
        self.generation
    }
}

/// What a move call did.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MoveResult {
    outcome: GameOutcome,
    placed: Option<Move>,
    computer_turn: Option<TurnToken>,
}

impl MoveResult {
    fn ignored(outcome: GameOutcome) -> Self {
        Self {
            outcome,
            placed: None,
            computer_turn: None,
        }
    }

    /// Outcome after the call.
    pub fn outcome(&self) -> GameOutcome {
        self.outcome
    }

    /// The move placed by the call, or `None` if the call was ignored.
    pub fn placed(&self) -> Option<Move> {
        self.placed
    }

    /// Token for the computer's reply, present when the board is now locked.
    pub fn computer_turn(&self) -> Option<TurnToken> {
        self.computer_turn
    }

    /// Returns true if the call changed nothing.
    pub fn is_ignored(&self) -> bool {
        self.placed.is_none()
    }
}

/// Change notification delivered to subscribers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum SessionEvent {
    /// A move landed on the board.
    MovePlaced(Move),
    /// The board is locked until the computer replies.
    Locked(TurnToken),
    /// The computer replied; the human may move again.
    Unlocked,
    /// The game ended.
    OutcomeDecided(GameOutcome),
    /// The board was cleared and a new generation started.
    Reset {
        /// Generation after the reset.
        generation: u64,
    },
}

/// Handle returned by [`GameSession::subscribe`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SubscriptionId(u64);

type Subscriber = Box<dyn FnMut(&SessionEvent) + Send>;

/// A single-player game against the computer.
pub struct GameSession {
    pub(crate) board: Board,
    history: Vec<Move>,
    pub(crate) phase: SessionPhase,
    generation: u64,
    strategy: Strategy,
    rng: StdRng,
    subscribers: Vec<(SubscriptionId, Subscriber)>,
    next_subscription: u64,
}

impl GameSession {
    /// Creates a session whose random fallback is seeded from the OS.
    #[instrument]
    pub fn new() -> Self {
        Self::from_rng(StdRng::from_entropy())
    }

    /// Creates a session with a deterministic random fallback.
    #[instrument]
    pub fn with_seed(seed: u64) -> Self {
        Self::from_rng(StdRng::seed_from_u64(seed))
    }

    fn from_rng(rng: StdRng) -> Self {
        Self {
            board: Board::new(),
            history: Vec::new(),
            phase: SessionPhase::Open,
            generation: 0,
            strategy: Strategy::default(),
            rng,
            subscribers: Vec::new(),
            next_subscription: 0,
        }
    }

    /// Sets how the computer picks its squares.
    pub fn with_strategy(mut self, strategy: Strategy) -> Self {
        self.strategy = strategy;
        self
    }

    /// Resumes play from `board`, with the human to move.
    ///
    /// The history is rebuilt in square order. A board that is already won
    /// or full starts in the terminal phase.
    #[instrument(skip(self, board))]
    pub fn with_board(mut self, board: Board) -> Self {
        self.history = board.cells().iter().flatten().copied().collect();
        self.phase = match rules::evaluate(&board) {
            GameOutcome::InProgress => SessionPhase::Open,
            outcome => SessionPhase::Terminal(outcome),
        };
        self.board = board;
        debug!(moves = self.history.len(), phase = ?self.phase, "Session resumed from board");
        self.assert_invariants();
        self
    }

    /// Returns the board.
    pub fn board(&self) -> &Board {
        &self.board
    }

    /// Returns the moves placed since the last reset, oldest first.
    pub fn history(&self) -> &[Move] {
        &self.history
    }

    /// Returns the current phase.
    pub fn phase(&self) -> SessionPhase {
        self.phase
    }

    /// Outcome of the current board, derived on demand.
    pub fn outcome(&self) -> GameOutcome {
        rules::evaluate(&self.board)
    }

    /// Returns true while the computer's reply is pending.
    pub fn is_locked(&self) -> bool {
        self.phase == SessionPhase::Locked
    }

    /// Returns true once the game has ended.
    pub fn is_over(&self) -> bool {
        matches!(self.phase, SessionPhase::Terminal(_))
    }

    /// Number of resets so far.
    pub fn generation(&self) -> u64 {
        self.generation
    }

    /// Returns the strategy in use.
    pub fn strategy(&self) -> Strategy {
        self.strategy
    }

    /// Token for the pending computer reply, if the board is locked.
    pub fn pending_turn(&self) -> Option<TurnToken> {
        self.is_locked().then_some(TurnToken {
            generation: self.generation,
        })
    }

    /// Read-only copy of the state for renderers.
    pub fn snapshot(&self) -> SessionSnapshot {
        SessionSnapshot::from(self)
    }

    /// Places the human's mark at `index` (0-8).
    ///
    /// Ignored, with no state change, when the square is occupied, the board
    /// is locked, or the game is over.
    ///
    /// # Errors
    ///
    /// Returns [`EngineError::InvalidPosition`] if `index` is outside 0-8.
    #[instrument(skip(self), fields(generation = self.generation))]
    pub fn apply_human_move(&mut self, index: usize) -> Result<MoveResult, EngineError> {
        let position = Position::try_from(index)?;

        match self.phase {
            SessionPhase::Open => {}
            SessionPhase::Locked => {
                debug!(%position, "Board locked, ignoring human move");
                return Ok(MoveResult::ignored(self.outcome()));
            }
            SessionPhase::Terminal(outcome) => {
                debug!(%position, %outcome, "Game over, ignoring human move");
                return Ok(MoveResult::ignored(outcome));
            }
        }

        if rules::is_occupied(&self.board, position) {
            debug!(%position, "Square occupied, ignoring human move");
            return Ok(MoveResult::ignored(self.outcome()));
        }

        let mov = Move::new(Player::Human, position);
        self.place(mov)?;

        let outcome = rules::outcome_after(&self.board, Player::Human);
        let computer_turn = if outcome.is_terminal() {
            self.finish(outcome);
            None
        } else {
            let token = TurnToken {
                generation: self.generation,
            };
            self.phase = SessionPhase::Locked;
            self.emit(SessionEvent::Locked(token));
            Some(token)
        };

        self.assert_invariants();
        Ok(MoveResult {
            outcome,
            placed: Some(mov),
            computer_turn,
        })
    }

    /// Applies the computer's reply for `token`.
    ///
    /// Ignored unless the board is locked and `token` belongs to the current
    /// generation. Delivering the same token twice places one move.
    #[instrument(skip(self), fields(generation = self.generation))]
    pub fn apply_computer_move(&mut self, token: TurnToken) -> MoveResult {
        if token.generation != self.generation {
            debug!(token = token.generation, "Stale turn token, ignoring computer move");
            return MoveResult::ignored(self.outcome());
        }
        if !self.is_locked() {
            debug!(phase = ?self.phase, "Board not locked, ignoring computer move");
            return MoveResult::ignored(self.outcome());
        }

        let Some((position, reason)) = self.strategy.select(&self.board, &mut self.rng) else {
            warn!("Computer asked to move on a full board");
            debug_assert!(false, "computer move requested on a full board");
            return MoveResult::ignored(self.outcome());
        };

        let mov = Move::new(Player::Computer, position);
        if let Err(e) = self.place(mov) {
            warn!(error = %e, "Strategy chose an occupied square");
            debug_assert!(false, "strategy chose an occupied square: {e}");
            return MoveResult::ignored(self.outcome());
        }
        debug!(%position, %reason, "Computer moved");

        let outcome = rules::outcome_after(&self.board, Player::Computer);
        if outcome.is_terminal() {
            self.finish(outcome);
        } else {
            self.phase = SessionPhase::Open;
            self.emit(SessionEvent::Unlocked);
        }

        self.assert_invariants();
        MoveResult {
            outcome,
            placed: Some(mov),
            computer_turn: None,
        }
    }

    /// Clears the board and starts a new generation.
    ///
    /// Any turn token issued before the reset is ignored afterwards.
    #[instrument(skip(self), fields(generation = self.generation))]
    pub fn reset(&mut self) {
        self.board.clear();
        self.history.clear();
        self.phase = SessionPhase::Open;
        self.generation = self.generation.wrapping_add(1);
        info!(generation = self.generation, "Session reset");

        self.emit(SessionEvent::Reset {
            generation: self.generation,
        });
        self.assert_invariants();
    }

    /// Registers a callback invoked after every state change.
    pub fn subscribe<F>(&mut self, callback: F) -> SubscriptionId
    where
        F: FnMut(&SessionEvent) + Send + 'static,
    {
        let id = SubscriptionId(self.next_subscription);
        self.next_subscription += 1;
        self.subscribers.push((id, Box::new(callback)));
        id
    }

    /// Removes a subscriber. Returns false if it was not registered.
    pub fn unsubscribe(&mut self, id: SubscriptionId) -> bool {
        let before = self.subscribers.len();
        self.subscribers.retain(|(existing, _)| *existing != id);
        self.subscribers.len() != before
    }

    fn place(&mut self, mov: Move) -> Result<(), EngineError> {
        self.board.place(mov)?;
        self.history.push(mov);
        self.emit(SessionEvent::MovePlaced(mov));
        Ok(())
    }

    fn finish(&mut self, outcome: GameOutcome) {
        info!(%outcome, moves = self.history.len(), "Game over");
        self.phase = SessionPhase::Terminal(outcome);
        self.emit(SessionEvent::OutcomeDecided(outcome));
    }

    fn emit(&mut self, event: SessionEvent) {
        for (_, subscriber) in self.subscribers.iter_mut() {
            subscriber(&event);
        }
    }

    fn assert_invariants(&self) {
        if !cfg!(debug_assertions) {
            return;
        }
        if let Err(violations) = SessionInvariants::check_all(self) {
            let descriptions = violations
                .iter()
                .map(|v| v.description.as_str())
                .collect::<Vec<_>>()
                .join("; ");
            panic!("Session invariants violated: {descriptions}");
        }
    }
}

impl Default for GameSession {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Debug for GameSession {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("GameSession")
            .field("board", &self.board)
            .field("history", &self.history)
            .field("phase", &self.phase)
            .field("generation", &self.generation)
            .field("strategy", &self.strategy)
            .field("subscribers", &self.subscribers.len())
            .finish_non_exhaustive()
    }
}

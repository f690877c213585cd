//! Application state and logic.

use crate::alert::AlertItem;
use crate::config::GameConfig;
use crate::scheduler::ComputerTurnScheduler;
use crossterm::event::KeyCode;
use tictactoe_engine::{
    GameSession, Player, Position, SessionEvent, SessionSnapshot, TurnToken,
};
use tokio::sync::mpsc;
use tracing::{debug, instrument, warn};

use super::input::{digit_square, move_cursor};

/// Main application state.
pub struct App {
    session: GameSession,
    scheduler: ComputerTurnScheduler,
    turns: mpsc::UnboundedReceiver<TurnToken>,
    events: mpsc::UnboundedReceiver<SessionEvent>,
    cursor: Position,
    alert: Option<AlertItem>,
    status_message: String,
    should_quit: bool,
}

impl App {
    /// Creates a new application.
    ///
    /// Must be called from within a tokio runtime.
    pub fn new(config: &GameConfig) -> Self {
        let mut session = config.new_session();
        let (event_tx, events) = mpsc::unbounded_channel();
        session.subscribe(move |event| {
            let _ = event_tx.send(*event);
        });
        let (scheduler, turns) = ComputerTurnScheduler::new(config.computer_delay());

        Self {
            session,
            scheduler,
            turns,
            events,
            cursor: Position::Center,
            alert: None,
            status_message: "Your move.".to_string(),
            should_quit: false,
        }
    }

    /// Read-only view of the game for drawing.
    pub fn snapshot(&self) -> SessionSnapshot {
        self.session.snapshot()
    }

    /// Square under the cursor.
    pub fn cursor(&self) -> Position {
        self.cursor
    }

    /// End-of-game dialog, while one is showing.
    pub fn alert(&self) -> Option<AlertItem> {
        self.alert
    }

    /// Gets the current status message.
    pub fn status_message(&self) -> &str {
        &self.status_message
    }

    /// Returns true once the user asked to leave.
    pub fn should_quit(&self) -> bool {
        self.should_quit
    }

    /// Handles a key press.
    #[instrument(skip(self))]
    pub fn handle_key(&mut self, key: KeyCode) {
        if key == KeyCode::Char('q') {
            self.should_quit = true;
            return;
        }

        if self.alert.is_some() {
            if matches!(key, KeyCode::Enter | KeyCode::Char(' ') | KeyCode::Esc) {
                debug!("Alert dismissed");
                self.restart();
            }
            return;
        }

        match key {
            KeyCode::Up | KeyCode::Down | KeyCode::Left | KeyCode::Right => {
                self.cursor = move_cursor(self.cursor, key);
            }
            KeyCode::Enter | KeyCode::Char(' ') => self.select(self.cursor.to_index()),
            KeyCode::Char('r') => self.restart(),
            _ => {
                if let Some(index) = digit_square(key) {
                    self.select(index);
                }
            }
        }
    }

    /// Applies delivered computer turns and folds session events into the status line.
    pub fn tick(&mut self) {
        while let Ok(token) = self.turns.try_recv() {
            self.apply_computer_turn(token);
        }
        self.drain_events();
    }

    /// Waits for the next scheduled computer turn and applies it.
    #[cfg(test)]
    pub async fn next_computer_turn(&mut self) {
        if let Some(token) = self.turns.recv().await {
            self.apply_computer_turn(token);
        }
        self.drain_events();
    }

    fn select(&mut self, index: usize) {
        if let Some(pos) = Position::from_index(index) {
            self.cursor = pos;
        }

        match self.session.apply_human_move(index) {
            Ok(result) => {
                if let Some(token) = result.computer_turn() {
                    self.scheduler.schedule(token);
                }
                self.alert = AlertItem::for_outcome(result.outcome());
            }
            Err(e) => {
                warn!(error = %e, "Rejected human move");
                self.status_message = e.to_string();
            }
        }
        self.drain_events();
    }

    fn apply_computer_turn(&mut self, token: TurnToken) {
        let result = self.session.apply_computer_move(token);
        if !result.is_ignored() {
            self.alert = AlertItem::for_outcome(result.outcome());
        }
    }

    /// Starts a new game, dropping any pending computer turn.
    fn restart(&mut self) {
        debug!("Restarting game");
        self.scheduler.cancel();
        self.session.reset();
        self.alert = None;
        self.cursor = Position::Center;
        self.drain_events();
    }

    fn drain_events(&mut self) {
        while let Ok(event) = self.events.try_recv() {
            match event {
                SessionEvent::MovePlaced(mov) if mov.player() == Player::Computer => {
                    self.status_message = format!("Computer took {}. Your move.", mov.position());
                }
                SessionEvent::MovePlaced(mov) => {
                    self.status_message = format!("You took {}.", mov.position());
                }
                SessionEvent::Locked(_) => {
                    self.status_message = "Computer is thinking...".to_string();
                }
                SessionEvent::Unlocked => {}
                SessionEvent::OutcomeDecided(outcome) => {
                    self.status_message = format!("Game over: {outcome}. Press Enter to play again.");
                }
                SessionEvent::Reset { .. } => {
                    self.status_message = "New game. Your move.".to_string();
                }
            }
        }
    }
}

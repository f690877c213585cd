//! Delayed delivery of the computer's turn.
//!
//! The engine locks the board after a human move and hands back a
//! [`TurnToken`]. The scheduler holds on to that token for the configured
//! delay, so the human sees their own mark first, then sends it down a
//! channel for the front-end to apply.

use std::time::Duration;
use tictactoe_engine::TurnToken;
use tokio::sync::mpsc;
use tokio::task::JoinHandle;
use tracing::{debug, instrument};

/// Owns the single pending computer turn, if any.
#[derive(Debug)]
pub struct ComputerTurnScheduler {
    delay: Duration,
    tx: mpsc::UnboundedSender<TurnToken>,
    pending: Option<JoinHandle<()>>,
}

impl ComputerTurnScheduler {
    /// Creates a scheduler and the receiver its tokens arrive on.
    pub fn new(delay: Duration) -> (Self, mpsc::UnboundedReceiver<TurnToken>) {
        let (tx, rx) = mpsc::unbounded_channel();
        let scheduler = Self {
            delay,
            tx,
            pending: None,
        };
        (scheduler, rx)
    }

    /// Sends `token` after the delay. Replaces any turn already pending.
    ///
    /// Must be called from within a tokio runtime.
    #[instrument(skip(self), fields(delay_ms = self.delay.as_millis() as u64))]
    pub fn schedule(&mut self, token: TurnToken) {
        self.cancel();

        let delay = self.delay;
        let tx = self.tx.clone();
        self.pending = Some(tokio::spawn(async move {
            tokio::time::sleep(delay).await;
            if tx.send(token).is_err() {
                debug!("Turn receiver dropped before delivery");
            }
        }));
    }

    /// Drops the pending turn, if it has not been delivered yet.
    pub fn cancel(&mut self) {
        if let Some(handle) = self.pending.take()
            && !handle.is_finished()
        {
            debug!("Cancelling pending computer turn");
            handle.abort();
        }
    }

    /// Returns true while a turn is waiting out its delay.
    pub fn is_pending(&self) -> bool {
        self.pending.as_ref().is_some_and(|handle| !handle.is_finished())
    }

    /// Configured delay.
    pub fn delay(&self) -> Duration {
        self.delay
    }
}

impl Drop for ComputerTurnScheduler {
    fn drop(&mut self) {
        self.cancel();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tictactoe_engine::GameSession;
    use tokio::time::timeout;

    fn locked_session() -> (GameSession, TurnToken) {
        let mut session = GameSession::with_seed(1);
        let token = session.apply_human_move(0).unwrap().computer_turn().unwrap();
        (session, token)
    }

    #[tokio::test]
    async fn test_delivers_token_after_delay() {
        let (mut scheduler, mut rx) = ComputerTurnScheduler::new(Duration::from_millis(10));
        let (mut session, token) = locked_session();

        scheduler.schedule(token);
        assert!(scheduler.is_pending());

        let delivered = timeout(Duration::from_secs(2), rx.recv()).await.unwrap().unwrap();
        assert_eq!(delivered, token);
        assert!(!session.apply_computer_move(delivered).is_ignored());
    }

    #[tokio::test]
    async fn test_cancel_drops_pending_turn() {
        let (mut scheduler, mut rx) = ComputerTurnScheduler::new(Duration::from_millis(50));
        let (_session, token) = locked_session();

        scheduler.schedule(token);
        scheduler.cancel();
        assert!(!scheduler.is_pending());

        let received = timeout(Duration::from_millis(200), rx.recv()).await;
        assert!(received.is_err(), "cancelled turn must not be delivered");
    }

    #[tokio::test]
    async fn test_late_token_is_ignored_by_reset_session() {
        let (mut scheduler, mut rx) = ComputerTurnScheduler::new(Duration::from_millis(5));
        let (mut session, token) = locked_session();

        scheduler.schedule(token);
        session.reset();

        let delivered = timeout(Duration::from_secs(2), rx.recv()).await.unwrap().unwrap();
        assert!(session.apply_computer_move(delivered).is_ignored());
        assert_eq!(session.board().occupied_count(), 0);
    }
}

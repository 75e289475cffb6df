//! Delayed, cancellable delivery of the computer's turn.
//!
//! The session decides *whether* the computer may move; the scheduler only
//! decides *when*. Each scheduled ticket runs on a tokio timer task that
//! sends the ticket back over a channel once the thinking delay elapses.
//! Cancelling aborts the task, and the session rejects any ticket that
//! slips through after a reset.

use rand::Rng;
use std::time::Duration;
use tokio::sync::mpsc;
use tokio::task::JoinHandle;
use tracing::{debug, instrument};

use crate::session::ComputerTurn;

/// Random thinking delay in `[min, max]`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ThinkDelay {
    min: Duration,
    max: Duration,
}

impl ThinkDelay {
    /// Creates a delay range; bounds are swapped if given in reverse.
    pub fn new(min: Duration, max: Duration) -> Self {
        if min <= max {
            Self { min, max }
        } else {
            Self { min: max, max: min }
        }
    }

    /// No delay at all.
    pub fn none() -> Self {
        Self::new(Duration::ZERO, Duration::ZERO)
    }

    /// Draws a delay.
    pub fn sample<R: Rng + ?Sized>(&self, rng: &mut R) -> Duration {
        let min = u64::try_from(self.min.as_millis()).unwrap_or(u64::MAX);
        let max = u64::try_from(self.max.as_millis()).unwrap_or(u64::MAX);
        if min == max {
            self.min
        } else {
            Duration::from_millis(rng.gen_range(min..=max))
        }
    }
}

/// Runs at most one pending computer turn at a time.
#[derive(Debug)]
pub struct ComputerMoveScheduler {
    tx: mpsc::UnboundedSender<ComputerTurn>,
    pending: Option<(ComputerTurn, JoinHandle<()>)>,
}

impl ComputerMoveScheduler {
    /// Creates a scheduler and the receiver its tickets arrive on.
    pub fn new() -> (Self, mpsc::UnboundedReceiver<ComputerTurn>) {
        let (tx, rx) = mpsc::unbounded_channel();
        (Self { tx, pending: None }, rx)
    }

    /// Schedules `ticket` to be delivered after `delay`.
    ///
    /// Re-scheduling the ticket already pending is a no-op; scheduling a
    /// different ticket cancels the previous one. Must be called from
    /// within a tokio runtime.
    #[instrument(skip(self))]
    pub fn schedule(&mut self, ticket: ComputerTurn, delay: Duration) {
        if self.scheduled() == Some(ticket) {
            return;
        }
        self.cancel();

        let tx = self.tx.clone();
        let handle = tokio::spawn(async move {
            tokio::time::sleep(delay).await;
            // Receiver gone means the front end has shut down.
            let _ = tx.send(ticket);
        });
        debug!(?delay, "Computer turn scheduled");
        self.pending = Some((ticket, handle));
    }

    /// Aborts the pending turn, if any.
    #[instrument(skip(self))]
    pub fn cancel(&mut self) {
        if let Some((ticket, handle)) = self.pending.take() {
            handle.abort();
            debug!(?ticket, "Computer turn cancelled");
        }
    }

    /// Ticket most recently scheduled and not cancelled.
    pub fn scheduled(&self) -> Option<ComputerTurn> {
        self.pending.as_ref().map(|(ticket, _)| *ticket)
    }

    /// True while a timer task is still waiting.
    pub fn is_waiting(&self) -> bool {
        self.pending
            .as_ref()
            .is_some_and(|(_, handle)| !handle.is_finished())
    }
}

impl Drop for ComputerMoveScheduler {
    fn drop(&mut self) {
        self.cancel();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::MemoryStore;
    use crate::games::dots_and_boxes::{GameMode, GridSize, LineId};
    use crate::session::GameSession;
    use rand::SeedableRng;
    use rand_chacha::ChaCha8Rng;

    fn computer_to_move() -> GameSession<MemoryStore> {
        let grid = GridSize::new(3).unwrap();
        let mut session = GameSession::new(GameMode::Pvc, grid, MemoryStore::new());
        session.start_game(GameMode::Pvc, grid);
        session.submit_move(LineId::horizontal(0, 0)).unwrap();
        session
    }

    #[test]
    fn test_think_delay_in_range() {
        let delay = ThinkDelay::new(Duration::from_millis(500), Duration::from_millis(1000));
        let mut rng = ChaCha8Rng::seed_from_u64(5);
        for _ in 0..100 {
            let d = delay.sample(&mut rng);
            assert!(d >= Duration::from_millis(500) && d <= Duration::from_millis(1000));
        }
        assert_eq!(ThinkDelay::none().sample(&mut rng), Duration::ZERO);
    }

    #[test]
    fn test_think_delay_saturates_huge_bounds() {
        let delay = ThinkDelay::new(Duration::from_millis(10), Duration::MAX);
        let mut rng = ChaCha8Rng::seed_from_u64(1);
        for _ in 0..20 {
            assert!(delay.sample(&mut rng) >= Duration::from_millis(10));
        }
    }

    #[tokio::test(start_paused = true)]
    async fn test_ticket_delivered_after_delay() {
        let session = computer_to_move();
        let ticket = session.pending_computer_turn().unwrap();
        let (mut scheduler, mut rx) = ComputerMoveScheduler::new();

        scheduler.schedule(ticket, Duration::from_millis(800));
        tokio::task::yield_now().await;
        assert!(rx.try_recv().is_err());

        tokio::time::advance(Duration::from_millis(900)).await;
        assert_eq!(rx.recv().await, Some(ticket));
    }

    #[tokio::test(start_paused = true)]
    async fn test_cancel_prevents_delivery() {
        let session = computer_to_move();
        let ticket = session.pending_computer_turn().unwrap();
        let (mut scheduler, mut rx) = ComputerMoveScheduler::new();

        scheduler.schedule(ticket, Duration::from_millis(500));
        scheduler.cancel();
        tokio::time::advance(Duration::from_secs(2)).await;
        tokio::task::yield_now().await;

        assert!(rx.try_recv().is_err());
        assert_eq!(scheduler.scheduled(), None);
    }

    #[tokio::test(start_paused = true)]
    async fn test_reschedule_same_ticket_is_noop() {
        let session = computer_to_move();
        let ticket = session.pending_computer_turn().unwrap();
        let (mut scheduler, mut rx) = ComputerMoveScheduler::new();

        scheduler.schedule(ticket, Duration::from_millis(300));
        scheduler.schedule(ticket, Duration::from_millis(300));
        tokio::time::advance(Duration::from_millis(400)).await;

        assert_eq!(rx.recv().await, Some(ticket));
        tokio::task::yield_now().await;
        assert!(rx.try_recv().is_err());
    }

    #[tokio::test(start_paused = true)]
    async fn test_late_ticket_rejected_after_reset() {
        let mut session = computer_to_move();
        let ticket = session.pending_computer_turn().unwrap();
        let (mut scheduler, mut rx) = ComputerMoveScheduler::new();
        scheduler.schedule(ticket, Duration::from_millis(100));

        session.reset_game();
        let delivered = rx.recv().await.unwrap();
        let mut rng = ChaCha8Rng::seed_from_u64(0);
        assert!(session.play_computer_turn(delivered, &mut rng).is_none());
        assert!(session.game().unwrap().selected_lines().is_empty());
    }
}

//! Application state and key handling.

use crossterm::event::KeyCode;
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;
use tokio::sync::mpsc;
use tracing::{debug, info, instrument};

use super::input;
use crate::db::KeyValueStore;
use crate::games::dots_and_boxes::{LineId, MoveReport};
use crate::scheduler::{ComputerMoveScheduler, ThinkDelay};
use crate::session::{ComputerTurn, GameSession};

/// Whether the event loop should keep running.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Flow {
    /// Keep going.
    Continue,
    /// Leave the application.
    Quit,
}

/// Main application state.
pub struct App<S> {
    session: GameSession<S>,
    cursor: LineId,
    rng: ChaCha8Rng,
    think: ThinkDelay,
    scheduler: ComputerMoveScheduler,
    last_event: Option<String>,
}

impl<S: KeyValueStore> App<S> {
    /// Creates the application and the channel computer turns arrive on.
    ///
    /// Without a seed the RNG is seeded randomly; the seed is logged
    /// either way so a session can be reproduced.
    pub fn new(
        session: GameSession<S>,
        think: ThinkDelay,
        seed: Option<u64>,
    ) -> (Self, mpsc::UnboundedReceiver<ComputerTurn>) {
        let seed = seed.unwrap_or_else(|| rand::thread_rng().r#gen());
        info!(seed, "Computer RNG seeded");
        let (scheduler, rx) = ComputerMoveScheduler::new();
        let app = Self {
            session,
            cursor: LineId::horizontal(0, 0),
            rng: ChaCha8Rng::seed_from_u64(seed),
            think,
            scheduler,
            last_event: None,
        };
        (app, rx)
    }

    /// The game session.
    pub fn session(&self) -> &GameSession<S> {
        &self.session
    }

    /// Line under the cursor.
    pub fn cursor(&self) -> LineId {
        self.cursor
    }

    /// Most recent notable event, for the status panel.
    pub fn last_event(&self) -> Option<&str> {
        self.last_event.as_deref()
    }

    /// Handles one key press.
    #[instrument(skip(self))]
    pub fn handle_key(&mut self, key: KeyCode) -> Flow {
        if self.session.game().is_some() {
            self.handle_game_key(key)
        } else {
            self.handle_menu_key(key)
        }
    }

    fn handle_menu_key(&mut self, key: KeyCode) -> Flow {
        match key {
            KeyCode::Char('q') | KeyCode::Esc => return Flow::Quit,
            KeyCode::Enter | KeyCode::Char('s') => {
                let (mode, grid) = (self.session.mode(), self.session.grid());
                self.session.start_game(mode, grid);
                self.cursor = LineId::horizontal(0, 0);
                self.last_event = None;
            }
            KeyCode::Char('m') | KeyCode::Tab => {
                self.session.set_mode(self.session.mode().toggle());
            }
            KeyCode::Char('+') | KeyCode::Char('=') | KeyCode::Right => self.resize(1),
            KeyCode::Char('-') | KeyCode::Left => self.resize(-1),
            _ => {}
        }
        Flow::Continue
    }

    fn handle_game_key(&mut self, key: KeyCode) -> Flow {
        match key {
            KeyCode::Char('q') => {
                self.scheduler.cancel();
                return Flow::Quit;
            }
            KeyCode::Enter | KeyCode::Char(' ') => {
                if let Some(report) = self.session.submit_move(self.cursor) {
                    self.describe(&report);
                }
            }
            KeyCode::Char('r') => {
                self.scheduler.cancel();
                self.session.reset_game();
                self.cursor = LineId::horizontal(0, 0);
                self.last_event = None;
            }
            KeyCode::Char('m') | KeyCode::Esc => {
                self.scheduler.cancel();
                self.session.leave_game();
                self.last_event = None;
            }
            other => {
                self.cursor = input::move_cursor(self.session.grid(), self.cursor, other);
            }
        }
        self.sync_computer();
        Flow::Continue
    }

    fn resize(&mut self, delta: i16) {
        let requested = self.session.grid().dots() as i16 + delta;
        let Ok(dots) = u8::try_from(requested) else {
            return;
        };
        self.last_event = self.session.change_grid_size(dots).err().map(|e| e.to_string());
    }

    /// Schedules the computer's move if it is due, or drops a stale one.
    pub fn sync_computer(&mut self) {
        match self.session.pending_computer_turn() {
            Some(ticket) if self.scheduler.scheduled() != Some(ticket) => {
                let delay = self.think.sample(&mut self.rng);
                self.scheduler.schedule(ticket, delay);
            }
            Some(_) => {}
            None if self.scheduler.is_waiting() => self.scheduler.cancel(),
            None => {}
        }
    }

    /// Plays a computer turn whose thinking delay has elapsed.
    #[instrument(skip(self))]
    pub fn on_computer_ready(&mut self, ticket: ComputerTurn) {
        match self.session.play_computer_turn(ticket, &mut self.rng) {
            Some(report) => self.describe(&report),
            None => debug!("Computer turn no longer applies"),
        }
        self.sync_computer();
    }

    fn describe(&mut self, report: &MoveReport) {
        let name = self.session.player_name(report.mover);
        let mut text = format!("{} drew {}", name, report.line);
        match report.completed.len() {
            0 => {}
            1 => text.push_str(" and closed a box"),
            n => text.push_str(&format!(" and closed {} boxes", n)),
        }
        self.last_event = Some(text);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::MemoryStore;
    use crate::games::dots_and_boxes::{GameMode, GridSize};
    use std::time::Duration;

    fn app(mode: GameMode) -> (App<MemoryStore>, mpsc::UnboundedReceiver<ComputerTurn>) {
        let session = GameSession::new(mode, GridSize::new(3).unwrap(), MemoryStore::new());
        App::new(session, ThinkDelay::none(), Some(7))
    }

    #[test]
    fn test_menu_keys() {
        let (mut app, _rx) = app(GameMode::Pvp);
        app.handle_key(KeyCode::Char('m'));
        assert_eq!(app.session().mode(), GameMode::Pvc);
        app.handle_key(KeyCode::Char('+'));
        assert_eq!(app.session().grid().dots(), 4);
        app.handle_key(KeyCode::Char('-'));
        app.handle_key(KeyCode::Char('-'));
        assert_eq!(app.session().grid().dots(), 3);
        assert!(app.last_event().is_some());
        assert_eq!(app.handle_key(KeyCode::Char('q')), Flow::Quit);
    }

    #[test]
    fn test_pvp_claim_and_leave() {
        let (mut app, _rx) = app(GameMode::Pvp);
        app.handle_key(KeyCode::Enter);
        app.handle_key(KeyCode::Right);
        assert_eq!(app.cursor(), LineId::horizontal(0, 1));
        app.handle_key(KeyCode::Char(' '));
        let game = app.session().game().unwrap();
        assert!(game.is_drawn(LineId::horizontal(0, 1)));
        assert_eq!(app.last_event(), Some("Red Player drew h-0-1"));

        app.handle_key(KeyCode::Esc);
        assert!(app.session().game().is_none());
    }

    #[tokio::test(start_paused = true)]
    async fn test_computer_replies_after_human_move() {
        let (mut app, mut rx) = app(GameMode::Pvc);
        app.handle_key(KeyCode::Enter);
        app.handle_key(KeyCode::Enter);

        let ticket = rx.recv().await.unwrap();
        app.on_computer_ready(ticket);

        let game = app.session().game().unwrap();
        assert_eq!(game.selected_lines().len(), 2);
        assert!(app.last_event().unwrap().starts_with("Computer drew"));
    }

    #[tokio::test(start_paused = true)]
    async fn test_reset_discards_pending_computer_turn() {
        let (mut app, mut rx) = app(GameMode::Pvc);
        app.handle_key(KeyCode::Enter);
        app.handle_key(KeyCode::Enter);
        app.handle_key(KeyCode::Char('r'));

        tokio::time::advance(Duration::from_secs(1)).await;
        tokio::task::yield_now().await;
        if let Ok(ticket) = rx.try_recv() {
            app.on_computer_ready(ticket);
        }
        assert!(app.session().game().unwrap().selected_lines().is_empty());
    }

    async fn computer_pending_then(key: KeyCode) -> (App<MemoryStore>, Flow, bool) {
        let session =
            GameSession::new(GameMode::Pvc, GridSize::new(3).unwrap(), MemoryStore::new());
        let think = ThinkDelay::new(Duration::from_millis(500), Duration::from_millis(500));
        let (mut app, mut rx) = App::new(session, think, Some(7));
        app.handle_key(KeyCode::Enter);
        app.handle_key(KeyCode::Enter);
        assert!(app.scheduler.scheduled().is_some());

        let flow = app.handle_key(key);
        tokio::time::advance(Duration::from_secs(2)).await;
        tokio::task::yield_now().await;
        let delivered = rx.try_recv().is_ok();
        (app, flow, delivered)
    }

    #[tokio::test(start_paused = true)]
    async fn test_menu_keys_cancel_pending_computer_turn() {
        for key in [KeyCode::Char('m'), KeyCode::Esc] {
            let (app, flow, delivered) = computer_pending_then(key).await;
            assert_eq!(flow, Flow::Continue);
            assert!(!delivered);
            assert_eq!(app.scheduler.scheduled(), None);
            assert!(app.session().game().is_none());
        }
    }

    #[tokio::test(start_paused = true)]
    async fn test_quit_cancels_pending_computer_turn() {
        let (app, flow, delivered) = computer_pending_then(KeyCode::Char('q')).await;
        assert_eq!(flow, Flow::Quit);
        assert!(!delivered);
        assert_eq!(app.scheduler.scheduled(), None);
    }
}

//! Game session: the boundary between input, the engine and persistence.
//!
//! A [`GameSession`] owns the mode, grid size, the running [`Game`] (if
//! any), cumulative stats and the persistence collaborator. Invalid input
//! is logged and ignored; nothing here can corrupt the game.
//!
//! Every start, reset or leave bumps an epoch. The computer's move is
//! requested through a [`ComputerTurn`] ticket carrying the epoch it was
//! issued in, so a move scheduled before a reset can never land on the
//! new board.

use derive_more::{Display, Error};
use rand::Rng;
use tracing::{debug, info, instrument, warn};

use crate::db::KeyValueStore;
use crate::games::dots_and_boxes::{
    Game, GameMode, GridSize, GridSizeError, LineId, MoveReport, Player, ai,
};
use crate::stats::CumulativeStats;

/// Permission for the computer to make one move.
///
/// Valid only for the epoch and board position it was issued for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ComputerTurn {
    epoch: u64,
    moves_played: usize,
}

impl ComputerTurn {
    /// Epoch the ticket was issued in.
    pub fn epoch(&self) -> u64 {
        self.epoch
    }

    /// Number of lines drawn when the ticket was issued.
    pub fn moves_played(&self) -> usize {
        self.moves_played
    }
}

/// Rejected session-level request.
#[derive(Debug, Clone, PartialEq, Eq, Display, Error)]
pub enum SessionError {
    /// Requested grid size is out of range.
    #[display("{}", _0)]
    InvalidGridSize(GridSizeError),

    /// Grid size changes are only allowed between games.
    #[display("Grid size can only change when no game is being played")]
    GameInProgress,
}

impl From<GridSizeError> for SessionError {
    fn from(err: GridSizeError) -> Self {
        SessionError::InvalidGridSize(err)
    }
}

/// A game session with its persistence collaborator.
#[derive(Debug)]
pub struct GameSession<S> {
    mode: GameMode,
    grid: GridSize,
    game: Option<Game>,
    epoch: u64,
    stats: CumulativeStats,
    store: S,
}

impl<S: KeyValueStore> GameSession<S> {
    /// Creates a session at the menu (no game running).
    #[instrument(skip(store))]
    pub fn new(mode: GameMode, grid: GridSize, store: S) -> Self {
        let mut session = Self {
            mode,
            grid,
            game: None,
            epoch: 0,
            stats: CumulativeStats::default(),
            store,
        };
        session.load_stats();
        session
    }

    /// Current mode.
    pub fn mode(&self) -> GameMode {
        self.mode
    }

    /// Grid size used for the next (or current) game.
    pub fn grid(&self) -> GridSize {
        self.grid
    }

    /// The running or finished game, if any.
    pub fn game(&self) -> Option<&Game> {
        self.game.as_ref()
    }

    /// True while a game is running and not yet over.
    pub fn is_playing(&self) -> bool {
        self.game.as_ref().is_some_and(|g| !g.is_over())
    }

    /// Current epoch.
    pub fn epoch(&self) -> u64 {
        self.epoch
    }

    /// Cumulative stats for the current mode.
    pub fn stats(&self) -> &CumulativeStats {
        &self.stats
    }

    /// The persistence collaborator.
    pub fn store(&self) -> &S {
        &self.store
    }

    /// Display name of a seat in the current mode.
    pub fn player_name(&self, player: Player) -> String {
        self.mode.player_name(player)
    }

    /// Switches mode while at the menu; ignored during play.
    #[instrument(skip(self))]
    pub fn set_mode(&mut self, mode: GameMode) {
        if self.is_playing() {
            warn!(?mode, "Ignoring mode change during play");
            return;
        }
        self.mode = mode;
        self.load_stats();
    }

    /// Starts a new game, replacing any current one.
    #[instrument(skip(self))]
    pub fn start_game(&mut self, mode: GameMode, grid: GridSize) {
        self.mode = mode;
        self.grid = grid;
        self.load_stats();
        self.begin();
        info!(epoch = self.epoch, %grid, %mode, "Game started");
    }

    /// Restarts with the same mode and grid; ignored at the menu.
    #[instrument(skip(self))]
    pub fn reset_game(&mut self) {
        if self.game.is_none() {
            debug!("No game to reset");
            return;
        }
        self.begin();
        info!(epoch = self.epoch, "Game reset");
    }

    /// Abandons the current game and returns to the menu.
    #[instrument(skip(self))]
    pub fn leave_game(&mut self) {
        self.game = None;
        self.epoch += 1;
        info!(epoch = self.epoch, "Returned to menu");
    }

    /// Changes the grid size; only allowed while no game is in progress.
    ///
    /// On success any finished game is cleared. On rejection the previous
    /// size is kept.
    #[instrument(skip(self))]
    pub fn change_grid_size(&mut self, dots: u8) -> Result<GridSize, SessionError> {
        if self.is_playing() {
            warn!(dots, "Rejected grid change during play");
            return Err(SessionError::GameInProgress);
        }
        let grid = GridSize::new(dots).inspect_err(|e| warn!(error = %e, "Rejected grid size"))?;
        self.grid = grid;
        if self.game.take().is_some() {
            self.epoch += 1;
        }
        info!(%grid, "Grid size changed");
        Ok(grid)
    }

    /// Applies a human move.
    ///
    /// Ignored (returns `None`) when there is no game, the game is over,
    /// the line is taken or off the grid, or it is the computer's turn.
    #[instrument(skip(self, line), fields(line = %line))]
    pub fn submit_move(&mut self, line: LineId) -> Option<MoveReport> {
        let game = self.game.as_ref()?;
        if self.mode.computer_seat() == Some(game.current_player()) && !game.is_over() {
            debug!("Ignoring human input during the computer's turn");
            return None;
        }
        self.apply(line)
    }

    /// Ticket for the computer's move, if the computer is to move now.
    pub fn pending_computer_turn(&self) -> Option<ComputerTurn> {
        let game = self.game.as_ref()?;
        let seat = self.mode.computer_seat()?;
        (!game.is_over() && game.current_player() == seat).then_some(ComputerTurn {
            epoch: self.epoch,
            moves_played: game.selected_lines().len(),
        })
    }

    /// Plays the computer's move for `ticket`.
    ///
    /// Stale tickets (issued before a reset, leave or new game) and
    /// tickets presented when it is not the computer's turn are ignored.
    #[instrument(skip(self, ticket, rng), fields(ticket = ticket.epoch, epoch = self.epoch))]
    pub fn play_computer_turn<R: Rng + ?Sized>(
        &mut self,
        ticket: ComputerTurn,
        rng: &mut R,
    ) -> Option<MoveReport> {
        if self.pending_computer_turn() != Some(ticket) {
            debug!("Discarding stale computer turn");
            return None;
        }
        let game = self.game.as_ref()?;
        let line = ai::select_move(game.grid(), game.selected_lines(), rng)?;
        info!(%line, "Computer chose line");
        self.apply(line)
    }

    /// Human-readable status line.
    pub fn status(&self) -> String {
        match &self.game {
            None => format!("{} on {}: press Enter to start", self.mode.label(), self.grid),
            Some(game) => match game.outcome() {
                Some(outcome) => outcome.banner(self.mode),
                None if self.mode.computer_seat() == Some(game.current_player()) => {
                    "Computer is thinking...".to_string()
                }
                None => format!("{}'s Turn", self.player_name(game.current_player())),
            },
        }
    }

    fn begin(&mut self) {
        self.game = Some(Game::new(self.grid));
        self.epoch += 1;
    }

    fn apply(&mut self, line: LineId) -> Option<MoveReport> {
        let game = self.game.as_mut()?;
        match game.apply_move(line) {
            Ok(report) => {
                debug!(
                    mover = ?report.mover,
                    completed = report.completed.len(),
                    next = ?report.next_player,
                    "Move applied"
                );
                if let Some(outcome) = report.outcome {
                    self.stats.record(outcome);
                    self.save_stats();
                }
                Some(report)
            }
            Err(e) => {
                warn!(error = %e, "Move rejected");
                None
            }
        }
    }

    fn load_stats(&mut self) {
        self.stats = CumulativeStats::load(&self.store, self.mode).unwrap_or_else(|e| {
            warn!(error = %e, "Stats unavailable, starting from zero");
            CumulativeStats::default()
        });
    }

    fn save_stats(&mut self) {
        if let Err(e) = self.stats.save(&mut self.store, self.mode) {
            warn!(error = %e, "Failed to save stats");
        }
    }
}

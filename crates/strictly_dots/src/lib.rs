//! Strictly Dots library - a contract-checked Dots & Boxes engine
//!
//! # Architecture
//!
//! - **Games**: grid addressing, completion detection, the turn/scoring
//!   state machine and the heuristic computer opponent
//! - **Session**: mode, grid size, reset/leave and the computer's turn
//!   ticket, on top of a key-value store for cumulative stats
//! - **Scheduler**: delayed, cancellable delivery of the computer's move
//! - **TUI**: ratatui front end
//!
//! # Example
//!
//! ```
//! use strictly_dots::{Game, GridSize, LineId};
//!
//! # fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let mut game = Game::new(GridSize::new(3)?);
//! let report = game.apply_move(LineId::horizontal(0, 0))?;
//! assert!(report.completed.is_empty());
//! # Ok(())
//! # }
//! # example().unwrap();
//! ```

#![warn(missing_docs)]
#![forbid(unsafe_code)]

// Private module declarations
mod config;
mod db;
mod games;
mod scheduler;
mod session;
mod simulate;
mod stats;

/// Terminal front end.
pub mod tui;

// Crate-level exports - Configuration
pub use config::{ConfigError, DotsConfig};

// Crate-level exports - Persistence
pub use db::{DbError, KeyValueStore, KvEntry, MemoryStore, NewKvEntry, SqliteStore};

// Crate-level exports - Session management
pub use scheduler::{ComputerMoveScheduler, ThinkDelay};
pub use session::{ComputerTurn, GameSession, SessionError};
pub use simulate::{SimulationSummary, play_one, simulate};
pub use stats::CumulativeStats;

// Crate-level exports - Game types (dots and boxes)
pub use games::dots_and_boxes::{
    BoxId, CompletedBox, Contract, DEFAULT_GRID_SIZE, Game, GameMode, GameNotOver, GridSize,
    GridSizeError, LegalMove, LineIsOpen, LineId, LineOnGrid, LineSet, MAX_GRID_SIZE,
    MIN_GRID_SIZE, Move, MoveContract, MoveError, MoveReport, Orientation, Outcome,
    ParseLineError, Player, PlayersTurn, Scores, ai, invariants, rules,
};

//! First-class action types for Dots & Boxes.
//!
//! A move is a player's intent to draw one line. It can be validated
//! against a game before it is applied.

use super::grid::{BoxId, LineId};
use super::phases::Outcome;
use super::types::Player;
use serde::{Deserialize, Serialize};
use tracing::instrument;

/// A move: a player drawing a line.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Move {
    /// The player drawing the line.
    pub player: Player,
    /// The line being drawn.
    pub line: LineId,
}

impl Move {
    /// Creates a new move.
    #[instrument]
    pub fn new(player: Player, line: LineId) -> Self {
        Self { player, line }
    }
}

impl std::fmt::Display for Move {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{:?} -> {}", self.player, self.line)
    }
}

/// What an accepted move did.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MoveReport {
    /// Player who drew the line.
    pub mover: Player,
    /// The line drawn.
    pub line: LineId,
    /// Boxes this move closed (0, 1 or 2).
    pub completed: Vec<BoxId>,
    /// Player to move next.
    pub next_player: Player,
    /// Set once the last line has been drawn.
    pub outcome: Option<Outcome>,
}

impl MoveReport {
    /// True if the mover keeps the turn.
    pub fn extra_turn(&self) -> bool {
        !self.completed.is_empty()
    }
}

/// Error that can occur when validating or applying a move.
#[derive(Debug, Clone, PartialEq, Eq, derive_more::Display)]
pub enum MoveError {
    /// The line has already been drawn.
    #[display("Line {} is already drawn", _0)]
    LineTaken(LineId),

    /// The line does not exist on this grid.
    #[display("Line {} is not on the grid", _0)]
    LineOutOfBounds(LineId),

    /// The game is already over.
    #[display("Game is already over")]
    GameOver,

    /// It's not this player's turn.
    #[display("It's not {:?}'s turn", _0)]
    WrongPlayer(Player),

    /// An invariant was violated (postcondition failure).
    #[display("Invariant violation: {}", _0)]
    InvariantViolation(String),
}

impl std::error::Error for MoveError {}

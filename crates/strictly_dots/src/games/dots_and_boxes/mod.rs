//! Dots & Boxes: grid addressing, rules, turn/scoring engine and computer opponent.

mod action;
pub mod ai;
mod contracts;
mod game;
mod grid;
pub mod invariants;
mod phases;
pub mod rules;
mod types;

pub use action::{Move, MoveError, MoveReport};
pub use contracts::{
    Contract, GameNotOver, LegalMove, LineIsOpen, LineOnGrid, MoveContract, PlayersTurn,
};
pub use game::Game;
pub use grid::{
    BoxId, DEFAULT_GRID_SIZE, GridSize, GridSizeError, LineId, MAX_GRID_SIZE, MIN_GRID_SIZE,
    Orientation, ParseLineError,
};
pub use phases::Outcome;
pub use rules::LineSet;
pub use types::{CompletedBox, GameMode, Player, Scores};

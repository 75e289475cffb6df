//! Turn and scoring state machine for Dots & Boxes.
//!
//! [`Game`] owns the whole session state. It is only mutated through
//! [`Game::make_move`] (or [`Game::apply_move`] for the player to move),
//! which validates preconditions, applies the line, scores any boxes it
//! closed and hands the turn over unless the mover earned an extra turn.

use super::action::{Move, MoveError, MoveReport};
use super::contracts::{Contract, MoveContract};
use super::grid::{BoxId, GridSize, LineId};
use super::phases::Outcome;
use super::rules::{self, LineSet};
use super::types::{CompletedBox, Player, Scores};
use tracing::{debug, info, instrument};

/// Dots & Boxes game engine.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Game {
    pub(super) grid: GridSize,
    pub(super) selected: LineSet,
    pub(super) history: Vec<Move>,
    pub(super) completed: Vec<CompletedBox>,
    pub(super) current_player: Player,
    pub(super) scores: Scores,
    pub(super) outcome: Option<Outcome>,
}

impl Game {
    /// Creates a new game; Player One moves first.
    #[instrument]
    pub fn new(grid: GridSize) -> Self {
        Self {
            grid,
            selected: LineSet::new(),
            history: Vec::new(),
            completed: Vec::new(),
            current_player: Player::One,
            scores: Scores::default(),
            outcome: None,
        }
    }

    /// Returns the grid size.
    pub fn grid(&self) -> GridSize {
        self.grid
    }

    /// Returns the set of drawn lines.
    pub fn selected_lines(&self) -> &LineSet {
        &self.selected
    }

    /// Returns move history in the order played.
    pub fn history(&self) -> &[Move] {
        &self.history
    }

    /// Returns completed boxes in the order they were closed.
    pub fn completed_boxes(&self) -> &[CompletedBox] {
        &self.completed
    }

    /// Returns the player to move.
    pub fn current_player(&self) -> Player {
        self.current_player
    }

    /// Returns the scores.
    pub fn scores(&self) -> Scores {
        self.scores
    }

    /// Returns true once every line is drawn.
    pub fn is_over(&self) -> bool {
        self.outcome.is_some()
    }

    /// Returns the outcome once the game is over.
    pub fn outcome(&self) -> Option<Outcome> {
        self.outcome
    }

    /// Returns true if the line has been drawn.
    pub fn is_drawn(&self, line: LineId) -> bool {
        self.selected.contains(&line)
    }

    /// Undrawn lines in canonical order.
    pub fn available_lines(&self) -> Vec<LineId> {
        rules::remaining_lines(self.grid, &self.selected)
    }

    /// Player who drew `line`, if it has been drawn.
    pub fn line_owner(&self, line: LineId) -> Option<Player> {
        self.history
            .iter()
            .find(|m| m.line == line)
            .map(|m| m.player)
    }

    /// Player who closed `id`, if it is complete.
    pub fn box_owner(&self, id: BoxId) -> Option<Player> {
        self.completed
            .iter()
            .find(|b| b.box_id == id)
            .map(|b| b.owner)
    }

    /// Draws `line` for the player whose turn it is.
    #[instrument(skip(self, line), fields(line = %line, player = ?self.current_player))]
    pub fn apply_move(&mut self, line: LineId) -> Result<MoveReport, MoveError> {
        self.make_move(Move::new(self.current_player, line))
    }

    /// Applies a move.
    ///
    /// Preconditions are always checked; postconditions are verified in
    /// debug builds. A rejected move leaves the game untouched.
    #[instrument(skip(self, action), fields(action = %action))]
    pub fn make_move(&mut self, action: Move) -> Result<MoveReport, MoveError> {
        MoveContract::pre(self, &action)?;

        let mut next = self.clone();
        next.selected.insert(action.line);
        next.history.push(action);

        let closed = rules::detect_completions(next.grid, action.line, &next.selected);
        for box_id in &closed {
            next.completed.push(CompletedBox {
                box_id: *box_id,
                owner: action.player,
            });
        }
        next.scores.award(action.player, closed.len() as u32);

        if closed.is_empty() {
            next.current_player = action.player.opponent();
        } else {
            debug!(boxes = closed.len(), "Boxes completed, mover keeps the turn");
        }

        if rules::is_complete(next.grid, &next.selected) {
            let outcome = Outcome::from_scores(&next.scores);
            info!(%outcome, scores = ?next.scores, "Game over");
            next.outcome = Some(outcome);
        }

        #[cfg(debug_assertions)]
        MoveContract::post(self, &next)?;

        *self = next;

        Ok(MoveReport {
            mover: action.player,
            line: action.line,
            completed: closed,
            next_player: self.current_player,
            outcome: self.outcome,
        })
    }

    /// Replays moves from an empty grid.
    #[instrument(skip(moves), fields(moves = moves.len()))]
    pub fn replay(grid: GridSize, moves: &[Move]) -> Result<Self, MoveError> {
        let mut game = Self::new(grid);
        for action in moves {
            game.make_move(*action)?;
        }
        Ok(game)
    }
}

impl Default for Game {
    fn default() -> Self {
        Self::new(GridSize::default())
    }
}

//! Contract-based validation for Dots & Boxes.
//!
//! Contracts formalize Hoare-style reasoning: {P} action {Q}

use super::action::{Move, MoveError};
use super::game::Game;
use super::invariants::{DotsInvariants, InvariantSet};
use tracing::{instrument, warn};

// ─────────────────────────────────────────────────────────────
//  Contract Trait
// ─────────────────────────────────────────────────────────────

/// A contract defines preconditions and postconditions for state transitions.
///
/// - Precondition: {P(state, action)} - must hold before applying action
/// - Postcondition: {Q(before, after)} - must hold after applying action
pub trait Contract<S, A> {
    /// Checks preconditions before applying the action.
    fn pre(state: &S, action: &A) -> Result<(), MoveError>;

    /// Checks postconditions after applying the action.
    fn post(before: &S, after: &S) -> Result<(), MoveError>;
}

// ─────────────────────────────────────────────────────────────
//  Move Preconditions
// ─────────────────────────────────────────────────────────────

/// Precondition: no moves after the last line is drawn.
pub struct GameNotOver;

impl GameNotOver {
    /// Fails with [`MoveError::GameOver`] once the game has ended.
    #[instrument(skip(game))]
    pub fn check(_mov: &Move, game: &Game) -> Result<(), MoveError> {
        if game.is_over() {
            Err(MoveError::GameOver)
        } else {
            Ok(())
        }
    }
}

/// Precondition: the line exists on this grid.
pub struct LineOnGrid;

impl LineOnGrid {
    /// Fails with [`MoveError::LineOutOfBounds`] for off-grid lines.
    #[instrument(skip(game))]
    pub fn check(mov: &Move, game: &Game) -> Result<(), MoveError> {
        if game.grid().contains_line(mov.line) {
            Ok(())
        } else {
            Err(MoveError::LineOutOfBounds(mov.line))
        }
    }
}

/// Precondition: the line has not been drawn yet.
pub struct LineIsOpen;

impl LineIsOpen {
    /// Fails with [`MoveError::LineTaken`] for drawn lines.
    #[instrument(skip(game))]
    pub fn check(mov: &Move, game: &Game) -> Result<(), MoveError> {
        if game.is_drawn(mov.line) {
            Err(MoveError::LineTaken(mov.line))
        } else {
            Ok(())
        }
    }
}

/// Precondition: it must be the player's turn.
pub struct PlayersTurn;

impl PlayersTurn {
    /// Fails with [`MoveError::WrongPlayer`] out of turn.
    #[instrument(skip(game))]
    pub fn check(mov: &Move, game: &Game) -> Result<(), MoveError> {
        if mov.player != game.current_player() {
            Err(MoveError::WrongPlayer(mov.player))
        } else {
            Ok(())
        }
    }
}

/// Composite precondition for a legal move.
pub struct LegalMove;

impl LegalMove {
    /// Validates all preconditions for a move.
    #[instrument(skip(game))]
    pub fn check(mov: &Move, game: &Game) -> Result<(), MoveError> {
        GameNotOver::check(mov, game)?;
        LineOnGrid::check(mov, game)?;
        LineIsOpen::check(mov, game)?;
        PlayersTurn::check(mov, game)?;
        Ok(())
    }
}

// ─────────────────────────────────────────────────────────────
//  Move Contract (Pre + Post)
// ─────────────────────────────────────────────────────────────

/// Contract for move actions.
///
/// Postconditions:
/// - exactly one line was added
/// - the turn passed iff no box was completed
/// - the game is over iff every line is drawn
/// - all [`DotsInvariants`] hold
pub struct MoveContract;

impl MoveContract {
    fn transition_holds(before: &Game, after: &Game) -> Result<(), String> {
        if after.selected_lines().len() != before.selected_lines().len() + 1 {
            return Err("Exactly one line is added per move".to_string());
        }

        let mover = before.current_player();
        let scored = after.completed_boxes().len() > before.completed_boxes().len();
        let expected_next = if scored { mover } else { mover.opponent() };
        if after.current_player() != expected_next {
            warn!(?mover, scored, next = ?after.current_player(), "Turn law violated");
            return Err("Turn passes if and only if no box was completed".to_string());
        }

        let full = after.selected_lines().len() == after.grid().total_lines();
        if after.is_over() != full {
            return Err("Game ends exactly when every line is drawn".to_string());
        }

        Ok(())
    }
}

impl Contract<Game, Move> for MoveContract {
    fn pre(game: &Game, action: &Move) -> Result<(), MoveError> {
        LegalMove::check(action, game)
    }

    fn post(before: &Game, after: &Game) -> Result<(), MoveError> {
        Self::transition_holds(before, after).map_err(|description| {
            MoveError::InvariantViolation(format!("Postcondition failed: {}", description))
        })?;

        DotsInvariants::check_all(after).map_err(|violations| {
            let descriptions = violations
                .iter()
                .map(|v| v.description.as_str())
                .collect::<Vec<_>>()
                .join("; ");
            MoveError::InvariantViolation(format!("Postcondition failed: {}", descriptions))
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::games::dots_and_boxes::{GridSize, LineId, Player};

    fn small() -> Game {
        Game::new(GridSize::new(3).unwrap())
    }

    #[test]
    fn test_precondition_open_line() {
        let game = small();
        let action = Move::new(Player::One, LineId::horizontal(0, 0));
        assert!(MoveContract::pre(&game, &action).is_ok());
    }

    #[test]
    fn test_precondition_taken_line() {
        let mut game = small();
        game.apply_move(LineId::horizontal(0, 0)).unwrap();
        let action = Move::new(Player::Two, LineId::horizontal(0, 0));
        assert!(matches!(
            MoveContract::pre(&game, &action),
            Err(MoveError::LineTaken(_))
        ));
    }

    #[test]
    fn test_precondition_wrong_turn() {
        let game = small();
        let action = Move::new(Player::Two, LineId::horizontal(0, 0));
        assert!(matches!(
            MoveContract::pre(&game, &action),
            Err(MoveError::WrongPlayer(Player::Two))
        ));
    }

    #[test]
    fn test_postcondition_holds_after_move() {
        let before = small();
        let mut after = before.clone();
        after.apply_move(LineId::vertical(1, 2)).unwrap();
        assert!(MoveContract::post(&before, &after).is_ok());
    }

    #[test]
    fn test_postcondition_detects_stolen_turn() {
        let before = small();
        let mut after = before.clone();
        after.apply_move(LineId::vertical(1, 2)).unwrap();
        after.current_player = Player::One;
        assert!(matches!(
            MoveContract::post(&before, &after),
            Err(MoveError::InvariantViolation(_))
        ));
    }

    #[test]
    fn test_postcondition_detects_corrupted_score() {
        let before = small();
        let mut after = before.clone();
        after.apply_move(LineId::horizontal(2, 1)).unwrap();
        after.scores.player1 = 3;
        assert!(MoveContract::post(&before, &after).is_err());
    }
}

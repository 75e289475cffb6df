//! First-class invariants for Dots & Boxes.
//!
//! Invariants are logical properties that must hold throughout game execution.
//! They are testable independently and serve as documentation of system guarantees.

/// A logical property that must hold for a given state.
pub trait Invariant<S> {
    /// Checks if the invariant holds for the given state.
    fn holds(state: &S) -> bool;

    /// Human-readable description of the invariant.
    fn description() -> &'static str;
}

/// Violation of an invariant.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InvariantViolation {
    /// Description of the violated invariant.
    pub description: String,
}

impl InvariantViolation {
    /// Creates a new invariant violation.
    pub fn new(description: impl Into<String>) -> Self {
        Self {
            description: description.into(),
        }
    }
}

/// A set of invariants that can be checked together.
///
/// Implementations are provided for tuples.
pub trait InvariantSet<S> {
    /// Checks all invariants in the set, collecting every violation.
    fn check_all(state: &S) -> Result<(), Vec<InvariantViolation>>;
}

impl<S, I1, I2, I3> InvariantSet<S> for (I1, I2, I3)
where
    I1: Invariant<S>,
    I2: Invariant<S>,
    I3: Invariant<S>,
{
    fn check_all(state: &S) -> Result<(), Vec<InvariantViolation>> {
        let violations: Vec<_> = [
            (I1::holds(state), I1::description()),
            (I2::holds(state), I2::description()),
            (I3::holds(state), I3::description()),
        ]
        .into_iter()
        .filter(|(holds, _)| !holds)
        .map(|(_, description)| InvariantViolation::new(description))
        .collect();

        if violations.is_empty() {
            Ok(())
        } else {
            Err(violations)
        }
    }
}

impl<S, I1, I2> InvariantSet<S> for (I1, I2)
where
    I1: Invariant<S>,
    I2: Invariant<S>,
{
    fn check_all(state: &S) -> Result<(), Vec<InvariantViolation>> {
        let mut violations = Vec::new();

        if !I1::holds(state) {
            violations.push(InvariantViolation::new(I1::description()));
        }

        if !I2::holds(state) {
            violations.push(InvariantViolation::new(I2::description()));
        }

        if violations.is_empty() {
            Ok(())
        } else {
            Err(violations)
        }
    }
}

pub mod monotonic_lines;
pub mod score_consistent;
pub mod unique_boxes;

pub use monotonic_lines::MonotonicLinesInvariant;
pub use score_consistent::ScoreConsistentInvariant;
pub use unique_boxes::UniqueBoxesInvariant;

/// All Dots & Boxes invariants as a composable set.
pub type DotsInvariants = (
    MonotonicLinesInvariant,
    ScoreConsistentInvariant,
    UniqueBoxesInvariant,
);

#[cfg(test)]
mod tests {
    use super::*;
    use crate::games::dots_and_boxes::{BoxId, CompletedBox, Game, GridSize, LineId, Player};

    fn small() -> Game {
        Game::new(GridSize::new(3).unwrap())
    }

    #[test]
    fn test_invariant_set_holds_for_empty_game() {
        assert!(DotsInvariants::check_all(&small()).is_ok());
    }

    #[test]
    fn test_invariant_set_holds_through_full_game() {
        let mut game = small();
        for line in game.available_lines() {
            game.apply_move(line).unwrap();
            assert!(DotsInvariants::check_all(&game).is_ok());
        }
    }

    #[test]
    fn test_invariant_set_reports_each_violation() {
        let mut game = small();
        game.apply_move(LineId::horizontal(0, 0)).unwrap();
        game.completed.push(CompletedBox {
            box_id: BoxId::new(1, 1),
            owner: Player::One,
        });

        let violations = DotsInvariants::check_all(&game).unwrap_err();
        // Score no longer matches and the box is not actually enclosed.
        assert_eq!(violations.len(), 2);
    }

    #[test]
    fn test_two_invariants_as_set() {
        type TwoInvariants = (MonotonicLinesInvariant, UniqueBoxesInvariant);
        assert!(TwoInvariants::check_all(&small()).is_ok());
    }
}

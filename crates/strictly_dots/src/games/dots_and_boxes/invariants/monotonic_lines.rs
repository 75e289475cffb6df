//! Monotonic lines invariant: lines are never drawn twice or removed.

use super::super::Game;
use super::super::rules::LineSet;
use super::Invariant;

/// Invariant: the drawn-line set is exactly the replayed move history.
///
/// Every move adds a new on-grid line, so replaying the history must
/// never meet a repeat and must rebuild the current set.
pub struct MonotonicLinesInvariant;

impl Invariant<Game> for MonotonicLinesInvariant {
    fn holds(game: &Game) -> bool {
        let mut reconstructed = LineSet::new();

        for mov in game.history() {
            if !game.grid().contains_line(mov.line) || !reconstructed.insert(mov.line) {
                return false;
            }
        }

        reconstructed == *game.selected_lines()
    }

    fn description() -> &'static str {
        "Lines are monotonic (drawn once, never removed)"
    }
}

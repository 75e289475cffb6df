//! Unique boxes invariant: every enclosed box is claimed exactly once.

use super::super::{BoxId, Game};
use super::Invariant;
use std::collections::HashSet;

/// Invariant: completed boxes are distinct, fully enclosed, and cover
/// every enclosed box on the grid.
pub struct UniqueBoxesInvariant;

impl Invariant<Game> for UniqueBoxesInvariant {
    fn holds(game: &Game) -> bool {
        let enclosed = |id: BoxId| id.sides().iter().all(|side| game.is_drawn(*side));

        let mut seen = HashSet::new();
        for claimed in game.completed_boxes() {
            if !game.grid().contains_box(claimed.box_id)
                || !enclosed(claimed.box_id)
                || !seen.insert(claimed.box_id)
            {
                return false;
            }
        }

        game.grid().boxes().filter(|id| enclosed(*id)).count() == seen.len()
    }

    fn description() -> &'static str {
        "Each enclosed box is claimed exactly once"
    }
}

//! Score consistency invariant: scores count completed boxes.

use super::super::{Game, Player};
use super::Invariant;

/// Invariant: each player's score equals the boxes attributed to them.
///
/// Implies `player1 + player2 == completed_boxes().len()`.
pub struct ScoreConsistentInvariant;

impl Invariant<Game> for ScoreConsistentInvariant {
    fn holds(game: &Game) -> bool {
        let owned_by = |player: Player| {
            game.completed_boxes()
                .iter()
                .filter(|b| b.owner == player)
                .count() as u32
        };

        let scores = game.scores();
        scores.player1 == owned_by(Player::One)
            && scores.player2 == owned_by(Player::Two)
            && scores.total() as usize == game.completed_boxes().len()
    }

    fn description() -> &'static str {
        "Scores equal completed boxes per player"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::games::dots_and_boxes::{GridSize, LineId};

    #[test]
    fn test_scored_game_holds() {
        let mut game = Game::new(GridSize::new(3).unwrap());
        for line in [
            LineId::horizontal(0, 0),
            LineId::vertical(0, 0),
            LineId::vertical(0, 1),
            LineId::horizontal(1, 0),
        ] {
            game.apply_move(line).unwrap();
        }
        assert_eq!(game.scores().total(), 1);
        assert!(ScoreConsistentInvariant::holds(&game));
    }

    #[test]
    fn test_inflated_score_violates() {
        let mut game = Game::new(GridSize::new(3).unwrap());
        game.scores.player2 = 1;
        assert!(!ScoreConsistentInvariant::holds(&game));
    }
}

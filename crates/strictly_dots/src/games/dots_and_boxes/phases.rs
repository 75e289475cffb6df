//! Game outcome.

use super::types::{GameMode, Player, Scores};
use serde::{Deserialize, Serialize};

/// Outcome of a finished game.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Outcome {
    /// Player with more boxes.
    Winner(Player),
    /// Equal box counts.
    Tie,
}

impl Outcome {
    /// Resolves the outcome from final scores.
    pub fn from_scores(scores: &Scores) -> Self {
        match scores.player1.cmp(&scores.player2) {
            std::cmp::Ordering::Greater => Outcome::Winner(Player::One),
            std::cmp::Ordering::Less => Outcome::Winner(Player::Two),
            std::cmp::Ordering::Equal => Outcome::Tie,
        }
    }

    /// Returns the winner if there is one.
    pub fn winner(&self) -> Option<Player> {
        match self {
            Outcome::Winner(player) => Some(*player),
            Outcome::Tie => None,
        }
    }

    /// Returns true if the game was a tie.
    pub fn is_tie(&self) -> bool {
        matches!(self, Outcome::Tie)
    }

    /// Banner shown once the game is over.
    pub fn banner(&self, mode: GameMode) -> String {
        match self {
            Outcome::Winner(player) => format!("🎉 {} Wins!", mode.player_name(*player)),
            Outcome::Tie => "🤝 It's a Tie!".to_string(),
        }
    }
}

impl std::fmt::Display for Outcome {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Outcome::Winner(player) => write!(f, "Player {:?} wins", player),
            Outcome::Tie => write!(f, "Tie"),
        }
    }
}

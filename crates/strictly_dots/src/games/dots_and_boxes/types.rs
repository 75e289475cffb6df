//! Core domain types for Dots & Boxes.

use super::grid::BoxId;
use serde::{Deserialize, Serialize};

/// Player in the game.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Player {
    /// Red player (moves first).
    One,
    /// Blue player, or the computer in player-vs-computer mode.
    Two,
}

impl Player {
    /// Returns the opponent player.
    pub fn opponent(self) -> Self {
        match self {
            Player::One => Player::Two,
            Player::Two => Player::One,
        }
    }

    /// Colour name used for display.
    pub fn color_name(self) -> &'static str {
        match self {
            Player::One => "Red",
            Player::Two => "Blue",
        }
    }
}

/// Who plays the second seat.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    Default,
    Serialize,
    Deserialize,
    strum::Display,
    strum::EnumString,
    strum::EnumIter,
)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum GameMode {
    /// Two humans share the keyboard.
    Pvp,
    /// Human (Red) against the computer (Blue).
    #[default]
    Pvc,
}

impl GameMode {
    /// Returns the display label for this mode.
    pub fn label(self) -> &'static str {
        match self {
            GameMode::Pvp => "Player vs Player",
            GameMode::Pvc => "Player vs Computer",
        }
    }

    /// Toggles between the two modes.
    pub fn toggle(self) -> Self {
        match self {
            GameMode::Pvp => GameMode::Pvc,
            GameMode::Pvc => GameMode::Pvp,
        }
    }

    /// The seat the computer occupies, if any.
    pub fn computer_seat(self) -> Option<Player> {
        match self {
            GameMode::Pvp => None,
            GameMode::Pvc => Some(Player::Two),
        }
    }

    /// Display name for a seat; Player Two is "Computer" in PvC.
    pub fn player_name(self, player: Player) -> String {
        if self.computer_seat() == Some(player) {
            "Computer".to_string()
        } else {
            format!("{} Player", player.color_name())
        }
    }
}

/// Running box counts.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Scores {
    /// Boxes claimed by Player One.
    pub player1: u32,
    /// Boxes claimed by Player Two.
    pub player2: u32,
}

impl Scores {
    /// Score for one player.
    pub fn get(&self, player: Player) -> u32 {
        match player {
            Player::One => self.player1,
            Player::Two => self.player2,
        }
    }

    /// Adds `boxes` to a player's score.
    pub(super) fn award(&mut self, player: Player, boxes: u32) {
        match player {
            Player::One => self.player1 += boxes,
            Player::Two => self.player2 += boxes,
        }
    }

    /// Sum of both scores.
    pub fn total(&self) -> u32 {
        self.player1 + self.player2
    }
}

/// A completed box and the player who closed it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct CompletedBox {
    /// The box.
    pub box_id: BoxId,
    /// Player whose move drew the fourth side.
    pub owner: Player,
}

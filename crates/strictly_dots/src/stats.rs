//! Cumulative results across sessions.

use chrono::{DateTime, Utc};
use derive_getters::Getters;
use serde::{Deserialize, Serialize};
use tracing::{debug, instrument};

use crate::db::{DbError, KeyValueStore};
use crate::games::dots_and_boxes::{GameMode, Outcome, Player};

/// Win/tie counts for one game mode.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, Getters)]
pub struct CumulativeStats {
    games_played: u32,
    player1_wins: u32,
    player2_wins: u32,
    ties: u32,
    #[serde(default)]
    last_played: Option<DateTime<Utc>>,
}

impl CumulativeStats {
    /// Storage key for a mode's stats.
    pub fn key(mode: GameMode) -> String {
        format!("dots_and_boxes.stats.{}", mode)
    }

    /// Counts a finished game.
    #[instrument(skip(self))]
    pub fn record(&mut self, outcome: Outcome) {
        self.games_played += 1;
        match outcome {
            Outcome::Winner(Player::One) => self.player1_wins += 1,
            Outcome::Winner(Player::Two) => self.player2_wins += 1,
            Outcome::Tie => self.ties += 1,
        }
        self.last_played = Some(Utc::now());
    }

    /// Wins for a seat.
    pub fn wins(&self, player: Player) -> u32 {
        match player {
            Player::One => self.player1_wins,
            Player::Two => self.player2_wins,
        }
    }

    /// Loads stats for `mode`; a missing key yields zeroed stats.
    ///
    /// # Errors
    ///
    /// Returns [`DbError`] if the store fails or the stored value is malformed.
    #[instrument(skip(store))]
    pub fn load<S: KeyValueStore + ?Sized>(store: &S, mode: GameMode) -> Result<Self, DbError> {
        match store.get(&Self::key(mode))? {
            Some(raw) => {
                let stats: Self = serde_json::from_str(&raw)?;
                debug!(games = stats.games_played, "Stats loaded");
                Ok(stats)
            }
            None => Ok(Self::default()),
        }
    }

    /// Saves stats for `mode`.
    ///
    /// # Errors
    ///
    /// Returns [`DbError`] if the store fails.
    #[instrument(skip(self, store))]
    pub fn save<S: KeyValueStore + ?Sized>(
        &self,
        store: &mut S,
        mode: GameMode,
    ) -> Result<(), DbError> {
        let raw = serde_json::to_string(self)?;
        store.set(&Self::key(mode), &raw)
    }
}

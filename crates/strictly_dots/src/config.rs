//! Runtime configuration loaded from TOML.

use derive_getters::Getters;
use derive_more::{Display, Error};
use serde::{Deserialize, Serialize};
use std::path::Path;
use std::time::Duration;
use tracing::{debug, info, instrument};

use crate::games::dots_and_boxes::{GameMode, GridSize};

/// Game configuration.
///
/// Every field has a default, so an empty file (or no file) is valid.
#[derive(Debug, Clone, PartialEq, Eq, Getters, Serialize, Deserialize)]
#[serde(default)]
pub struct DotsConfig {
    /// Dots per side for new games.
    grid_size: GridSize,

    /// Who plays the second seat.
    mode: GameMode,

    /// Lower bound of the computer's thinking delay.
    think_min_ms: u64,

    /// Upper bound of the computer's thinking delay.
    think_max_ms: u64,

    /// Fixed RNG seed for reproducible computer play.
    seed: Option<u64>,

    /// SQLite file for cumulative stats.
    db_path: String,
}

impl Default for DotsConfig {
    fn default() -> Self {
        Self {
            grid_size: GridSize::default(),
            mode: GameMode::default(),
            think_min_ms: 500,
            think_max_ms: 1000,
            seed: None,
            db_path: "strictly_dots.db".to_string(),
        }
    }
}

impl DotsConfig {
    /// Loads configuration from a TOML file.
    #[instrument(skip(path), fields(path = %path.as_ref().display()))]
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        debug!("Loading config from file");
        let content = std::fs::read_to_string(path.as_ref())
            .map_err(|e| ConfigError::new(format!("Failed to read config file: {}", e)))?;

        let config = Self::from_toml(&content)?;
        info!(grid_size = %config.grid_size, mode = %config.mode, "Config loaded successfully");
        Ok(config)
    }

    /// Loads the file if it exists, otherwise returns defaults.
    #[instrument(skip(path), fields(path = %path.as_ref().display()))]
    pub fn load_or_default(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        if path.as_ref().exists() {
            Self::from_file(path)
        } else {
            info!("Config file not found, using defaults");
            Ok(Self::default())
        }
    }

    /// Parses configuration from TOML text.
    pub fn from_toml(content: &str) -> Result<Self, ConfigError> {
        let config: Self = toml::from_str(content)
            .map_err(|e| ConfigError::new(format!("Failed to parse config: {}", e)))?;
        config.validate()
    }

    fn validate(self) -> Result<Self, ConfigError> {
        if self.think_min_ms > self.think_max_ms {
            return Err(ConfigError::new(format!(
                "think_min_ms ({}) exceeds think_max_ms ({})",
                self.think_min_ms, self.think_max_ms
            )));
        }
        Ok(self)
    }

    /// Returns a copy with the grid size replaced.
    pub fn with_grid_size(mut self, grid_size: GridSize) -> Self {
        self.grid_size = grid_size;
        self
    }

    /// Returns a copy with the mode replaced.
    pub fn with_mode(mut self, mode: GameMode) -> Self {
        self.mode = mode;
        self
    }

    /// Returns a copy with the seed replaced.
    pub fn with_seed(mut self, seed: Option<u64>) -> Self {
        self.seed = seed.or(self.seed);
        self
    }

    /// Returns a copy with the database path replaced.
    pub fn with_db_path(mut self, db_path: String) -> Self {
        self.db_path = db_path;
        self
    }

    /// Thinking delay bounds.
    pub fn think_range(&self) -> (Duration, Duration) {
        (
            Duration::from_millis(self.think_min_ms),
            Duration::from_millis(self.think_max_ms),
        )
    }
}

/// Configuration error.
#[derive(Debug, Clone, Display, Error)]
#[display("Config error: {} at {}:{}", message, file, line)]
pub struct ConfigError {
    /// Error message.
    pub message: String,
    /// Line number where error occurred.
    pub line: u32,
    /// Source file where error occurred.
    pub file: &'static str,
}

impl ConfigError {
    /// Creates a new configuration error.
    #[track_caller]
    #[instrument(skip(message))]
    pub fn new(message: String) -> Self {
        let loc = std::panic::Location::caller();
        Self {
            message,
            line: loc.line(),
            file: loc.file(),
        }
    }
}

//! Command-line interface for strictly_dots.

use clap::{Parser, Subcommand};
use std::path::PathBuf;
use strictly_dots::GameMode;

/// Strictly Dots - Dots & Boxes in the terminal
#[derive(Parser, Debug)]
#[command(name = "strictly_dots")]
#[command(about = "Dots & Boxes against a friend or the computer", long_about = None)]
#[command(version)]
pub struct Cli {
    /// Subcommand to run
    #[command(subcommand)]
    pub command: Command,
}

/// Available commands
#[derive(Subcommand, Debug)]
pub enum Command {
    /// Play in the terminal UI
    Play {
        /// Path to a TOML config file
        #[arg(long, default_value = "strictly_dots.toml")]
        config: PathBuf,

        /// Dots per side (3-8), overrides the config file
        #[arg(long)]
        grid_size: Option<u8>,

        /// Game mode (pvp or pvc), overrides the config file
        #[arg(long)]
        mode: Option<GameMode>,

        /// RNG seed for reproducible computer play
        #[arg(long)]
        seed: Option<u64>,

        /// Stats database path, overrides the config file
        #[arg(long)]
        db_path: Option<String>,
    },

    /// Play computer-vs-computer games and print a summary
    Simulate {
        /// Number of games
        #[arg(short, long, default_value = "100")]
        games: u32,

        /// Dots per side (3-8)
        #[arg(long, default_value = "5")]
        grid_size: u8,

        /// RNG seed
        #[arg(long, default_value = "0")]
        seed: u64,
    },

    /// Print cumulative stats for each mode
    Stats {
        /// Stats database path
        #[arg(long, default_value = "strictly_dots.db")]
        db_path: String,
    },
}

//! Strictly Dots - Unified CLI
//!
//! Interactive play, headless simulation and stats inspection.

#![warn(missing_docs)]

mod cli;

use anyhow::{Context, Result};
use clap::Parser;
use cli::{Cli, Command};
use std::path::PathBuf;
use strictly_dots::{CumulativeStats, DotsConfig, GameMode, GridSize, SqliteStore, tui};
use strum::IntoEnumIterator;
use tracing::{info, instrument};
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> Result<()> {
    // Load .env file
    dotenvy::dotenv().ok();

    let cli = Cli::parse();

    match cli.command {
        Command::Play {
            config,
            grid_size,
            mode,
            seed,
            db_path,
        } => run_play(config, grid_size, mode, seed, db_path).await,
        Command::Simulate {
            games,
            grid_size,
            seed,
        } => run_simulate(games, grid_size, seed),
        Command::Stats { db_path } => run_stats(db_path),
    }
}

fn init_stderr_logging() {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(std::io::stderr)
        .init();
}

/// Run the terminal UI
async fn run_play(
    config_path: PathBuf,
    grid_size: Option<u8>,
    mode: Option<GameMode>,
    seed: Option<u64>,
    db_path: Option<String>,
) -> Result<()> {
    let mut config = DotsConfig::load_or_default(&config_path)
        .with_context(|| format!("Failed to load {}", config_path.display()))?;
    if let Some(dots) = grid_size {
        config = config.with_grid_size(GridSize::new(dots)?);
    }
    if let Some(mode) = mode {
        config = config.with_mode(mode);
    }
    if let Some(db_path) = db_path {
        config = config.with_db_path(db_path);
    }
    config = config.with_seed(seed);

    tui::run_tui(config).await
}

/// Play computer-vs-computer games and print the tally
#[instrument]
fn run_simulate(games: u32, grid_size: u8, seed: u64) -> Result<()> {
    init_stderr_logging();

    let grid = GridSize::new(grid_size)?;
    info!(games, %grid, seed, "Starting simulation");
    let summary = strictly_dots::simulate(grid, games, seed)?;

    println!("{} games on a {} grid (seed {})", summary.games(), grid, seed);
    println!("  Red wins:  {}", summary.player1_wins());
    println!("  Blue wins: {}", summary.player2_wins());
    println!("  Ties:      {}", summary.ties());
    if *summary.games() > 0 {
        println!(
            "  Avg moves: {:.1}",
            *summary.total_moves() as f64 / f64::from(*summary.games())
        );
    }
    Ok(())
}

/// Print stored stats for every mode
#[instrument]
fn run_stats(db_path: String) -> Result<()> {
    init_stderr_logging();

    let store = SqliteStore::open(&db_path)
        .with_context(|| format!("Failed to open stats database {}", db_path))?;

    for mode in GameMode::iter() {
        let stats = CumulativeStats::load(&store, mode)?;
        println!("{}", mode.label());
        println!("  Games played: {}", stats.games_played());
        println!(
            "  {} wins: {}",
            mode.player_name(strictly_dots::Player::One),
            stats.player1_wins()
        );
        println!(
            "  {} wins: {}",
            mode.player_name(strictly_dots::Player::Two),
            stats.player2_wins()
        );
        println!("  Ties: {}", stats.ties());
        if let Some(last) = stats.last_played() {
            println!("  Last played: {}", last.format("%Y-%m-%d %H:%M UTC"));
        }
    }
    Ok(())
}

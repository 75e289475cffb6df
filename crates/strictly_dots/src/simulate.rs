//! Headless computer-vs-computer games.

use derive_getters::Getters;
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;
use tracing::{debug, info, instrument};

use crate::games::dots_and_boxes::{Game, GridSize, MoveError, Outcome, Player, ai};

/// Tally of simulated games.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Getters)]
pub struct SimulationSummary {
    games: u32,
    player1_wins: u32,
    player2_wins: u32,
    ties: u32,
    total_moves: u64,
}

impl SimulationSummary {
    fn record(&mut self, outcome: Outcome, moves: usize) {
        self.games += 1;
        self.total_moves += moves as u64;
        match outcome {
            Outcome::Winner(Player::One) => self.player1_wins += 1,
            Outcome::Winner(Player::Two) => self.player2_wins += 1,
            Outcome::Tie => self.ties += 1,
        }
    }
}

/// Plays one game with the computer in both seats.
///
/// # Errors
///
/// Returns [`MoveError`] only if the engine rejects a selected move,
/// which would indicate a bug in move selection.
#[instrument(skip(rng))]
pub fn play_one(grid: GridSize, rng: &mut ChaCha8Rng) -> Result<Game, MoveError> {
    let mut game = Game::new(grid);
    while let Some(line) = ai::select_move(grid, game.selected_lines(), rng) {
        game.apply_move(line)?;
    }
    debug!(outcome = ?game.outcome(), "Simulated game finished");
    Ok(game)
}

/// Plays `games` seeded games and tallies the results.
///
/// # Errors
///
/// Propagates the first [`MoveError`] from [`play_one`].
#[instrument]
pub fn simulate(grid: GridSize, games: u32, seed: u64) -> Result<SimulationSummary, MoveError> {
    let mut rng = ChaCha8Rng::seed_from_u64(seed);
    let mut summary = SimulationSummary::default();
    for _ in 0..games {
        let game = play_one(grid, &mut rng)?;
        if let Some(outcome) = game.outcome() {
            summary.record(outcome, game.history().len());
        }
    }
    info!(?summary, "Simulation complete");
    Ok(summary)
}

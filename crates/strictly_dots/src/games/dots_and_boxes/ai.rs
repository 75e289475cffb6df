//! Heuristic computer opponent.
//!
//! Priority order:
//! 1. take the line that closes the most boxes,
//! 2. otherwise play a line that leaves no box on three sides,
//! 3. in the opening, prefer safe lines near the middle of the grid,
//! 4. otherwise pick at random (safe lines first).
//!
//! Lookahead is a single ply; long chains are not analysed.

use super::grid::{GridSize, LineId};
use super::rules::{self, LineSet};
use rand::Rng;
use rand::seq::SliceRandom;
use tracing::{debug, instrument};

/// An available line that closes at least one box.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CompletingMove {
    /// The line.
    pub line: LineId,
    /// Boxes it would close (1 or 2).
    pub boxes: usize,
}

/// Available lines that would close a box, in canonical order.
#[instrument(skip(selected), fields(selected = selected.len()))]
pub fn completing_moves(grid: GridSize, selected: &LineSet) -> Vec<CompletingMove> {
    rules::remaining_lines(grid, selected)
        .into_iter()
        .filter_map(|line| {
            let boxes = rules::completing_box_count(grid, line, selected);
            (boxes > 0).then_some(CompletingMove { line, boxes })
        })
        .collect()
}

/// Available lines after which the opponent has no box to close.
#[instrument(skip(selected), fields(selected = selected.len()))]
pub fn safe_moves(grid: GridSize, selected: &LineSet) -> Vec<LineId> {
    let available = rules::remaining_lines(grid, selected);
    let mut prospective = selected.clone();

    available
        .iter()
        .copied()
        .filter(|&line| {
            prospective.insert(line);
            let gifts_box = available
                .iter()
                .filter(|reply| **reply != line)
                .any(|reply| rules::completing_box_count(grid, *reply, &prospective) > 0);
            prospective.remove(&line);
            !gifts_box
        })
        .collect()
}

/// Chooses the computer's line, or `None` if the grid is full.
#[instrument(skip(selected, rng), fields(selected = selected.len()))]
pub fn select_move<R: Rng + ?Sized>(
    grid: GridSize,
    selected: &LineSet,
    rng: &mut R,
) -> Option<LineId> {
    let available = rules::remaining_lines(grid, selected);
    if available.is_empty() {
        return None;
    }

    // First maximum wins ties.
    let best = completing_moves(grid, selected)
        .into_iter()
        .fold(None::<CompletingMove>, |best, candidate| match best {
            Some(b) if b.boxes >= candidate.boxes => Some(b),
            _ => Some(candidate),
        });
    if let Some(best) = best {
        debug!(line = %best.line, boxes = best.boxes, "Taking completing move");
        return Some(best.line);
    }

    let safe = safe_moves(grid, selected);

    if selected.len() < grid.dots() && !safe.is_empty() {
        let center = grid.center();
        let central: Vec<LineId> = safe
            .iter()
            .copied()
            .filter(|line| line.distance_from(center) <= 1)
            .collect();
        if let Some(line) = central.choose(rng) {
            debug!(%line, "Opening near the center");
            return Some(*line);
        }
    }

    let pool = if safe.is_empty() { &available } else { &safe };
    let line = pool.choose(rng).copied();
    debug!(line = ?line, safe = !safe.is_empty(), "Random move");
    line
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand_chacha::ChaCha8Rng;

    fn grid(n: u8) -> GridSize {
        GridSize::new(n).unwrap()
    }

    fn set(lines: &[LineId]) -> LineSet {
        lines.iter().copied().collect()
    }

    #[test]
    fn test_takes_completing_move() {
        let selected = set(&[
            LineId::horizontal(0, 0),
            LineId::vertical(0, 0),
            LineId::vertical(0, 1),
        ]);
        for seed in 0..20 {
            let mut rng = ChaCha8Rng::seed_from_u64(seed);
            assert_eq!(
                select_move(grid(3), &selected, &mut rng),
                Some(LineId::horizontal(1, 0))
            );
        }
    }

    #[test]
    fn test_prefers_double_completion() {
        // v(0,1) closes both top boxes; h(2,0) closes only the lower-left one.
        let selected = set(&[
            LineId::horizontal(0, 0),
            LineId::horizontal(1, 0),
            LineId::vertical(0, 0),
            LineId::horizontal(0, 1),
            LineId::horizontal(1, 1),
            LineId::vertical(0, 2),
            LineId::vertical(1, 0),
            LineId::vertical(1, 1),
        ]);
        let moves = completing_moves(grid(3), &selected);
        assert!(moves.contains(&CompletingMove {
            line: LineId::vertical(0, 1),
            boxes: 2
        }));
        let mut rng = ChaCha8Rng::seed_from_u64(7);
        assert_eq!(
            select_move(grid(3), &selected, &mut rng),
            Some(LineId::vertical(0, 1))
        );
    }

    #[test]
    fn test_avoids_third_side() {
        // Two sides of box (0,0) drawn; any third side gifts it.
        let selected = set(&[LineId::horizontal(0, 0), LineId::vertical(0, 0)]);
        let safe = safe_moves(grid(3), &selected);
        assert!(!safe.contains(&LineId::horizontal(1, 0)));
        assert!(!safe.contains(&LineId::vertical(0, 1)));
        for seed in 0..50 {
            let mut rng = ChaCha8Rng::seed_from_u64(seed);
            let line = select_move(grid(3), &selected, &mut rng).unwrap();
            assert!(safe.contains(&line), "{line} is not safe");
        }
    }

    #[test]
    fn test_opening_stays_near_center() {
        let g = grid(7);
        for seed in 0..50 {
            let mut rng = ChaCha8Rng::seed_from_u64(seed);
            let line = select_move(g, &LineSet::new(), &mut rng).unwrap();
            assert!(line.distance_from(g.center()) <= 1, "{line} is off center");
        }
    }

    #[test]
    fn test_falls_back_to_any_line_when_nothing_is_safe() {
        // Every box of a 3x3 grid has two sides drawn; any new line gives one away.
        let selected = set(&[
            LineId::horizontal(0, 0),
            LineId::horizontal(0, 1),
            LineId::horizontal(2, 0),
            LineId::horizontal(2, 1),
            LineId::vertical(0, 0),
            LineId::vertical(0, 2),
            LineId::vertical(1, 0),
            LineId::vertical(1, 2),
        ]);
        assert!(completing_moves(grid(3), &selected).is_empty());
        assert!(safe_moves(grid(3), &selected).is_empty());
        let mut rng = ChaCha8Rng::seed_from_u64(1);
        let line = select_move(grid(3), &selected, &mut rng).unwrap();
        assert!(!selected.contains(&line));
    }

    #[test]
    fn test_full_grid_has_no_move() {
        let g = grid(3);
        let all: LineSet = g.lines().collect();
        let mut rng = ChaCha8Rng::seed_from_u64(0);
        assert_eq!(select_move(g, &all, &mut rng), None);
    }

    #[test]
    fn test_same_seed_same_choice() {
        let g = grid(6);
        let selected = set(&[LineId::horizontal(0, 0), LineId::vertical(4, 5)]);
        let first = select_move(g, &selected, &mut ChaCha8Rng::seed_from_u64(99));
        let second = select_move(g, &selected, &mut ChaCha8Rng::seed_from_u64(99));
        assert_eq!(first, second);
    }
}

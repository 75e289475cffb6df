//! End-of-game detection.

use super::super::grid::{GridSize, LineId};
use super::LineSet;
use tracing::instrument;

/// True once every line on the grid has been drawn.
#[instrument(skip(selected), fields(selected = selected.len()))]
pub fn is_complete(grid: GridSize, selected: &LineSet) -> bool {
    selected.len() >= grid.total_lines()
}

/// Undrawn lines in canonical order.
pub fn remaining_lines(grid: GridSize, selected: &LineSet) -> Vec<LineId> {
    grid.lines().filter(|line| !selected.contains(line)).collect()
}

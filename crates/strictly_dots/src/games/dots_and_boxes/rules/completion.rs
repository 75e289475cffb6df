//! Box completion detection.

use super::super::grid::{BoxId, GridSize, LineId, Orientation};
use super::LineSet;
use tracing::instrument;

/// Boxes that border `line`: left/right of a vertical, above/below a horizontal.
///
/// Boxes off the edge of the grid are skipped, so the result holds one or
/// two ids; the left/upper box comes first.
fn adjacent_boxes(grid: GridSize, line: LineId) -> impl Iterator<Item = BoxId> {
    let (before, after) = match line.orientation {
        Orientation::Vertical => (
            line.col.checked_sub(1).map(|col| BoxId::new(line.row, col)),
            BoxId::new(line.row, line.col),
        ),
        Orientation::Horizontal => (
            line.row.checked_sub(1).map(|row| BoxId::new(row, line.col)),
            BoxId::new(line.row, line.col),
        ),
    };
    before
        .into_iter()
        .chain(std::iter::once(after))
        .filter(move |id| grid.contains_box(*id))
}

fn closed_by(grid: GridSize, line: LineId, drawn: impl Fn(&LineId) -> bool) -> Vec<BoxId> {
    adjacent_boxes(grid, line)
        .filter(|id| id.sides().iter().all(|side| *side == line || drawn(side)))
        .collect()
}

/// Boxes completed by `line`, given the prospective set that already contains it.
///
/// Returns 0, 1 or 2 box ids. The set is not modified.
#[instrument(skip(selected), fields(selected = selected.len()))]
pub fn detect_completions(grid: GridSize, line: LineId, selected: &LineSet) -> Vec<BoxId> {
    closed_by(grid, line, |side| selected.contains(side))
}

/// How many boxes drawing `line` would close, given the lines drawn so far.
///
/// `selected` need not contain `line`.
pub fn completing_box_count(grid: GridSize, line: LineId, selected: &LineSet) -> usize {
    closed_by(grid, line, |side| selected.contains(side)).len()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn grid(n: u8) -> GridSize {
        GridSize::new(n).unwrap()
    }

    fn set(lines: &[LineId]) -> LineSet {
        lines.iter().copied().collect()
    }

    #[test]
    fn test_fourth_side_completes_single_box() {
        let lines = [
            LineId::horizontal(0, 0),
            LineId::vertical(0, 0),
            LineId::vertical(0, 1),
            LineId::horizontal(1, 0),
        ];
        let selected = set(&lines);
        assert_eq!(
            detect_completions(grid(3), LineId::horizontal(1, 0), &selected),
            vec![BoxId::new(0, 0)]
        );
    }

    #[test]
    fn test_three_sides_complete_nothing() {
        let selected = set(&[
            LineId::horizontal(0, 0),
            LineId::vertical(0, 0),
            LineId::vertical(0, 1),
        ]);
        assert!(detect_completions(grid(3), LineId::vertical(0, 1), &selected).is_empty());
    }

    #[test]
    fn test_shared_vertical_completes_both_boxes() {
        let selected = set(&[
            LineId::horizontal(0, 0),
            LineId::horizontal(1, 0),
            LineId::vertical(0, 0),
            LineId::horizontal(0, 1),
            LineId::horizontal(1, 1),
            LineId::vertical(0, 2),
            LineId::vertical(0, 1),
        ]);
        assert_eq!(
            detect_completions(grid(3), LineId::vertical(0, 1), &selected),
            vec![BoxId::new(0, 0), BoxId::new(0, 1)]
        );
    }

    #[test]
    fn test_shared_horizontal_completes_both_boxes() {
        let selected = set(&[
            LineId::horizontal(0, 0),
            LineId::vertical(0, 0),
            LineId::vertical(0, 1),
            LineId::horizontal(2, 0),
            LineId::vertical(1, 0),
            LineId::vertical(1, 1),
            LineId::horizontal(1, 0),
        ]);
        assert_eq!(
            detect_completions(grid(3), LineId::horizontal(1, 0), &selected),
            vec![BoxId::new(0, 0), BoxId::new(1, 0)]
        );
    }

    #[test]
    fn test_edge_lines_only_check_on_grid_boxes() {
        let g = grid(3);
        let right_edge = LineId::vertical(1, 2);
        let selected = set(&[
            LineId::horizontal(1, 1),
            LineId::horizontal(2, 1),
            LineId::vertical(1, 1),
            right_edge,
        ]);
        assert_eq!(detect_completions(g, right_edge, &selected), vec![BoxId::new(1, 1)]);
    }

    #[test]
    fn test_box_missing_far_side_is_not_complete() {
        // Top, bottom and the new right side are drawn, the left side is not.
        let selected = set(&[
            LineId::horizontal(0, 1),
            LineId::horizontal(1, 1),
            LineId::vertical(0, 2),
        ]);
        assert!(detect_completions(grid(3), LineId::vertical(0, 2), &selected).is_empty());
    }

    #[test]
    fn test_completing_count_does_not_need_line_in_set() {
        let selected = set(&[
            LineId::horizontal(0, 0),
            LineId::vertical(0, 0),
            LineId::vertical(0, 1),
        ]);
        assert_eq!(completing_box_count(grid(3), LineId::horizontal(1, 0), &selected), 1);
        assert!(!selected.contains(&LineId::horizontal(1, 0)));
    }
}

//! Cursor movement for keyboard navigation.
//!
//! The board is drawn on a `(2N-1) x (2N-1)` lattice: dots sit on
//! `(even, even)` cells, boxes on `(odd, odd)`, horizontal lines on
//! `(even, odd)` and vertical lines on `(odd, even)`. The cursor always
//! rests on a line cell.

use crate::games::dots_and_boxes::{GridSize, LineId, Orientation};
use crossterm::event::KeyCode;

/// Lattice coordinates `(y, x)` of a line.
pub fn lattice(line: LineId) -> (usize, usize) {
    match line.orientation {
        Orientation::Horizontal => (2 * line.row, 2 * line.col + 1),
        Orientation::Vertical => (2 * line.row + 1, 2 * line.col),
    }
}

/// Line at lattice cell `(y, x)`, if that cell holds one.
pub fn line_at(grid: GridSize, y: usize, x: usize) -> Option<LineId> {
    let line = match (y % 2, x % 2) {
        (0, 1) => LineId::horizontal(y / 2, x / 2),
        (1, 0) => LineId::vertical(y / 2, x / 2),
        _ => return None,
    };
    grid.contains_line(line).then_some(line)
}

fn offset(value: usize, delta: isize, extent: usize) -> Option<usize> {
    value.checked_add_signed(delta).filter(|v| *v < extent)
}

/// Moves the cursor based on arrow keys (or `hjkl`); `Tab` flips orientation.
pub fn move_cursor(grid: GridSize, cursor: LineId, key: KeyCode) -> LineId {
    let (dy, dx): (isize, isize) = match key {
        KeyCode::Up | KeyCode::Char('k') => (-1, 0),
        KeyCode::Down | KeyCode::Char('j') => (1, 0),
        KeyCode::Left | KeyCode::Char('h') => (0, -1),
        KeyCode::Right | KeyCode::Char('l') => (0, 1),
        KeyCode::Tab => return flip(grid, cursor),
        _ => return cursor,
    };

    let extent = 2 * grid.dots() - 1;
    let (y, x) = lattice(cursor);
    let Some((ny, nx)) = offset(y, dy, extent).zip(offset(x, dx, extent)) else {
        return cursor;
    };
    if let Some(line) = line_at(grid, ny, nx) {
        return line;
    }

    // Landed on a dot or box: keep going, else slide onto a neighbouring line.
    let further = offset(ny, dy, extent)
        .zip(offset(nx, dx, extent))
        .and_then(|(fy, fx)| line_at(grid, fy, fx));
    let (py, px) = (dx.abs(), dy.abs());
    further
        .or_else(|| {
            let (sy, sx) = (ny.checked_sub(py as usize)?, nx.checked_sub(px as usize)?);
            line_at(grid, sy, sx)
        })
        .or_else(|| line_at(grid, ny + py as usize, nx + px as usize))
        .unwrap_or(cursor)
}

/// Switches between a horizontal and a vertical line at the same corner.
fn flip(grid: GridSize, cursor: LineId) -> LineId {
    let last = grid.boxes_per_side() - 1;
    match cursor.orientation {
        Orientation::Horizontal => LineId::vertical(cursor.row.min(last), cursor.col),
        Orientation::Vertical => LineId::horizontal(cursor.row, cursor.col.min(last)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn grid() -> GridSize {
        GridSize::new(3).unwrap()
    }

    #[test]
    fn test_lattice_round_trip_covers_every_line() {
        let g = grid();
        for line in g.lines() {
            let (y, x) = lattice(line);
            assert_eq!(line_at(g, y, x), Some(line));
        }
        assert_eq!(line_at(g, 0, 0), None);
        assert_eq!(line_at(g, 1, 1), None);
    }

    #[test]
    fn test_arrows_skip_over_dots_and_boxes() {
        let g = grid();
        let start = LineId::horizontal(0, 0);
        assert_eq!(move_cursor(g, start, KeyCode::Right), LineId::horizontal(0, 1));
        assert_eq!(move_cursor(g, start, KeyCode::Down), LineId::horizontal(1, 0));
        let v = LineId::vertical(0, 0);
        assert_eq!(move_cursor(g, v, KeyCode::Right), LineId::vertical(0, 1));
        assert_eq!(move_cursor(g, v, KeyCode::Down), LineId::vertical(1, 0));
    }

    #[test]
    fn test_edges_slide_or_stay() {
        let g = grid();
        assert_eq!(
            move_cursor(g, LineId::horizontal(0, 0), KeyCode::Left),
            LineId::vertical(0, 0)
        );
        assert_eq!(
            move_cursor(g, LineId::horizontal(0, 0), KeyCode::Up),
            LineId::horizontal(0, 0)
        );
        assert_eq!(
            move_cursor(g, LineId::horizontal(2, 1), KeyCode::Down),
            LineId::horizontal(2, 1)
        );
    }

    #[test]
    fn test_tab_flips_orientation_within_grid() {
        let g = grid();
        assert_eq!(
            move_cursor(g, LineId::horizontal(2, 1), KeyCode::Tab),
            LineId::vertical(1, 1)
        );
        assert_eq!(
            move_cursor(g, LineId::vertical(1, 2), KeyCode::Tab),
            LineId::horizontal(1, 1)
        );
    }
}

//! Dot, line and box addressing for a Dots & Boxes grid.
//!
//! A grid of `N` dots per side has `(N-1)×(N-1)` boxes. Horizontal lines
//! run between dots in the same row, vertical lines between dots in the
//! same column:
//!
//! ```text
//!  ●─h(0,0)─●─h(0,1)─●
//!  │        │        │
//! v(0,0)  v(0,1)   v(0,2)
//!  │        │        │
//!  ●─h(1,0)─●─h(1,1)─●
//! ```

use derive_more::{Display, Error};
use serde::{Deserialize, Serialize};
use std::str::FromStr;
use tracing::instrument;

/// Smallest supported grid (dots per side).
pub const MIN_GRID_SIZE: u8 = 3;
/// Largest supported grid (dots per side).
pub const MAX_GRID_SIZE: u8 = 8;
/// Grid used when nothing else is configured.
pub const DEFAULT_GRID_SIZE: u8 = 5;

/// Number of dots per side, validated to `[3, 8]`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "u8", into = "u8")]
pub struct GridSize(u8);

impl GridSize {
    /// Creates a grid size, rejecting values outside `[3, 8]`.
    #[instrument]
    pub fn new(dots: u8) -> Result<Self, GridSizeError> {
        if (MIN_GRID_SIZE..=MAX_GRID_SIZE).contains(&dots) {
            Ok(Self(dots))
        } else {
            Err(GridSizeError::new(dots))
        }
    }

    /// Dots per side.
    pub fn dots(self) -> usize {
        self.0 as usize
    }

    /// Boxes per side (`dots - 1`).
    pub fn boxes_per_side(self) -> usize {
        self.dots() - 1
    }

    /// Total number of lines; a game ends once this many are drawn.
    pub fn total_lines(self) -> usize {
        let n = self.dots();
        n * (n - 1) + (n - 1) * n
    }

    /// Total number of boxes.
    pub fn total_boxes(self) -> usize {
        self.boxes_per_side() * self.boxes_per_side()
    }

    /// Row/column index treated as the middle of the grid.
    pub fn center(self) -> usize {
        self.dots() / 2
    }

    /// Returns true if `line` addresses a line on this grid.
    pub fn contains_line(self, line: LineId) -> bool {
        let n = self.dots();
        match line.orientation {
            Orientation::Horizontal => line.row < n && line.col < n - 1,
            Orientation::Vertical => line.row < n - 1 && line.col < n,
        }
    }

    /// Returns true if `id` addresses a box on this grid.
    pub fn contains_box(self, id: BoxId) -> bool {
        id.row < self.boxes_per_side() && id.col < self.boxes_per_side()
    }

    /// All lines in canonical order: horizontals row-major, then verticals row-major.
    pub fn lines(self) -> impl Iterator<Item = LineId> {
        let n = self.dots();
        let horizontal = (0..n)
            .flat_map(move |row| (0..n - 1).map(move |col| LineId::horizontal(row, col)));
        let vertical = (0..n - 1)
            .flat_map(move |row| (0..n).map(move |col| LineId::vertical(row, col)));
        horizontal.chain(vertical)
    }

    /// All boxes, row-major.
    pub fn boxes(self) -> impl Iterator<Item = BoxId> {
        let side = self.boxes_per_side();
        (0..side).flat_map(move |row| (0..side).map(move |col| BoxId::new(row, col)))
    }
}

impl Default for GridSize {
    fn default() -> Self {
        Self(DEFAULT_GRID_SIZE)
    }
}

impl TryFrom<u8> for GridSize {
    type Error = GridSizeError;

    fn try_from(dots: u8) -> Result<Self, Self::Error> {
        Self::new(dots)
    }
}

impl From<GridSize> for u8 {
    fn from(size: GridSize) -> Self {
        size.0
    }
}

impl std::fmt::Display for GridSize {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}×{}", self.0, self.0)
    }
}

/// Grid size outside the supported range.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Display, Error)]
#[display("Grid size {} is outside [{}, {}]", requested, MIN_GRID_SIZE, MAX_GRID_SIZE)]
pub struct GridSizeError {
    /// The rejected size.
    pub requested: u8,
}

impl GridSizeError {
    /// Creates an error for the rejected size.
    pub fn new(requested: u8) -> Self {
        Self { requested }
    }
}

/// Direction of a line.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Orientation {
    /// Joins two dots in the same row.
    Horizontal,
    /// Joins two dots in the same column.
    Vertical,
}

impl Orientation {
    fn tag(self) -> char {
        match self {
            Orientation::Horizontal => 'h',
            Orientation::Vertical => 'v',
        }
    }
}

/// A line between two adjacent dots.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct LineId {
    /// Horizontal or vertical.
    pub orientation: Orientation,
    /// Row of the line's top/left dot.
    pub row: usize,
    /// Column of the line's top/left dot.
    pub col: usize,
}

impl LineId {
    /// Creates a line id.
    pub fn new(orientation: Orientation, row: usize, col: usize) -> Self {
        Self {
            orientation,
            row,
            col,
        }
    }

    /// Horizontal line starting at dot `(row, col)`.
    pub fn horizontal(row: usize, col: usize) -> Self {
        Self::new(Orientation::Horizontal, row, col)
    }

    /// Vertical line starting at dot `(row, col)`.
    pub fn vertical(row: usize, col: usize) -> Self {
        Self::new(Orientation::Vertical, row, col)
    }

    /// Chebyshev distance from `(row, col)` to `(center, center)`.
    pub fn distance_from(&self, center: usize) -> usize {
        self.row.abs_diff(center).max(self.col.abs_diff(center))
    }
}

impl std::fmt::Display for LineId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}-{}-{}", self.orientation.tag(), self.row, self.col)
    }
}

/// Failure to parse a `h-r-c` / `v-r-c` line label.
#[derive(Debug, Clone, PartialEq, Eq, Display, Error)]
#[display("Invalid line label '{}'", label)]
pub struct ParseLineError {
    /// The offending input.
    pub label: String,
}

impl FromStr for LineId {
    type Err = ParseLineError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let err = || ParseLineError {
            label: s.to_string(),
        };
        let mut parts = s.trim().split('-');
        let orientation = match parts.next() {
            Some("h") | Some("H") => Orientation::Horizontal,
            Some("v") | Some("V") => Orientation::Vertical,
            _ => return Err(err()),
        };
        let row = parts.next().and_then(|p| p.parse().ok()).ok_or_else(err)?;
        let col = parts.next().and_then(|p| p.parse().ok()).ok_or_else(err)?;
        if parts.next().is_some() {
            return Err(err());
        }
        Ok(Self::new(orientation, row, col))
    }
}

/// A unit box, addressed by its top-left dot.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct BoxId {
    /// Row of the top-left dot.
    pub row: usize,
    /// Column of the top-left dot.
    pub col: usize,
}

impl BoxId {
    /// Creates a box id.
    pub fn new(row: usize, col: usize) -> Self {
        Self { row, col }
    }

    /// The four bounding lines: top, bottom, left, right.
    pub fn sides(&self) -> [LineId; 4] {
        [
            LineId::horizontal(self.row, self.col),
            LineId::horizontal(self.row + 1, self.col),
            LineId::vertical(self.row, self.col),
            LineId::vertical(self.row, self.col + 1),
        ]
    }
}

impl std::fmt::Display for BoxId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "box-{}-{}", self.row, self.col)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn test_grid_size_bounds() {
        assert!(GridSize::new(2).is_err());
        assert!(GridSize::new(3).is_ok());
        assert!(GridSize::new(8).is_ok());
        assert_eq!(GridSize::new(9), Err(GridSizeError::new(9)));
    }

    #[test]
    fn test_total_lines_matches_enumeration() {
        for n in MIN_GRID_SIZE..=MAX_GRID_SIZE {
            let grid = GridSize::new(n).unwrap();
            let lines: HashSet<_> = grid.lines().collect();
            assert_eq!(lines.len(), grid.total_lines());
            assert!(lines.iter().all(|l| grid.contains_line(*l)));
        }
        assert_eq!(GridSize::new(3).unwrap().total_lines(), 12);
    }

    #[test]
    fn test_box_sides_are_on_grid() {
        let grid = GridSize::new(4).unwrap();
        assert_eq!(grid.boxes().count(), 9);
        for id in grid.boxes() {
            assert!(id.sides().iter().all(|l| grid.contains_line(*l)));
        }
    }

    #[test]
    fn test_line_label_parse() {
        assert_eq!("h-2-3".parse::<LineId>(), Ok(LineId::horizontal(2, 3)));
        assert_eq!("v-0-1".parse::<LineId>(), Ok(LineId::vertical(0, 1)));
        assert!("x-0-1".parse::<LineId>().is_err());
        assert!("h-0".parse::<LineId>().is_err());
        assert!("h-0-1-2".parse::<LineId>().is_err());
        assert_eq!(LineId::vertical(4, 5).to_string(), "v-4-5");
    }

    #[test]
    fn test_grid_size_serde_rejects_out_of_range() {
        assert!(serde_json::from_str::<GridSize>("4").is_ok());
        assert!(serde_json::from_str::<GridSize>("12").is_err());
    }
}

//! Game rules for Dots & Boxes.
//!
//! Pure functions over a grid and a set of drawn lines. Rules are kept
//! apart from the session state so the computer opponent can run them
//! against hypothetical line sets.

pub mod completion;
pub mod terminal;

use super::grid::LineId;
use std::collections::HashSet;

/// Set of drawn lines.
pub type LineSet = HashSet<LineId>;

pub use completion::{completing_box_count, detect_completions};
pub use terminal::{is_complete, remaining_lines};

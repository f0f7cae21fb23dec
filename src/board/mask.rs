//! Legal-move mask.

use serde::{Deserialize, Serialize};

use super::grid::Grid;
use super::topology::Coord;

/// Boolean grid of currently-legal destinations.
///
/// Meaningful only while a piece is selected or a capture is pending;
/// cleared to all-false otherwise.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct MoveMask {
    cells: Grid<bool>,
}

impl MoveMask {
    /// An all-false mask.
    #[must_use]
    pub fn new() -> Self {
        Self {
            cells: Grid::filled(false),
        }
    }

    /// Mark a cell legal.
    pub fn mark(&mut self, at: Coord) {
        self.cells[at] = true;
    }

    /// Reset every cell to illegal.
    pub fn clear(&mut self) {
        self.cells.fill(false);
    }

    /// True if the cell is marked legal.
    #[must_use]
    pub fn is_legal(&self, at: Coord) -> bool {
        at.in_bounds() && self.cells[at]
    }

    /// Number of marked cells.
    #[must_use]
    pub fn count(&self) -> usize {
        Grid::<bool>::coords().filter(|&c| self.cells[c]).count()
    }
}

impl Default for MoveMask {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_starts_empty() {
        let mask = MoveMask::new();
        assert_eq!(mask.count(), 0);
        assert!(!mask.is_legal(Coord::new(0, 0)));
    }

    #[test]
    fn test_mark_and_clear() {
        let mut mask = MoveMask::new();

        mask.mark(Coord::new(0, 3));
        mask.mark(Coord::new(2, 2));
        assert!(mask.is_legal(Coord::new(0, 3)));
        assert_eq!(mask.count(), 2);

        mask.clear();
        assert_eq!(mask.count(), 0);
    }

    #[test]
    fn test_out_of_bounds_is_illegal() {
        let mask = MoveMask::new();
        assert!(!mask.is_legal(Coord::new(9, 9)));
    }
}

//! Generic 7×7 grid container.

use serde::{Deserialize, Serialize};
use std::ops::{Index, IndexMut};

use super::topology::{Coord, BOARD_SIZE};

/// A dense `BOARD_SIZE` × `BOARD_SIZE` table indexed by `Coord`.
///
/// Row-major over x then y, matching the save-file cell order.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Grid<T> {
    cells: [[T; BOARD_SIZE]; BOARD_SIZE],
}

impl<T: Copy> Grid<T> {
    /// Create a grid with every cell set to `value`.
    #[must_use]
    pub fn filled(value: T) -> Self {
        Self {
            cells: [[value; BOARD_SIZE]; BOARD_SIZE],
        }
    }

    /// Reset every cell to `value`.
    pub fn fill(&mut self, value: T) {
        self.cells = [[value; BOARD_SIZE]; BOARD_SIZE];
    }
}

impl<T> Grid<T> {
    /// Iterate over all coordinates in row-major (x outer, y inner) order.
    pub fn coords() -> impl Iterator<Item = Coord> {
        (0..BOARD_SIZE).flat_map(|x| (0..BOARD_SIZE).map(move |y| Coord::new(x, y)))
    }
}

impl<T> Index<Coord> for Grid<T> {
    type Output = T;

    fn index(&self, at: Coord) -> &Self::Output {
        &self.cells[at.x][at.y]
    }
}

impl<T> IndexMut<Coord> for Grid<T> {
    fn index_mut(&mut self, at: Coord) -> &mut Self::Output {
        &mut self.cells[at.x][at.y]
    }
}

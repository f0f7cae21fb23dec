//! Board geometry: the fixed topology and the grid containers.
//!
//! The board is a 7×7 index grid of which 16 cells are playable points,
//! 20 are connecting path cells, and the rest are unused. `Topology` holds
//! that classification plus the neighbor lookup; `Grid` is the generic 7×7
//! container used for occupancy and the legal-move mask.

mod grid;
mod mask;
mod topology;

pub use grid::Grid;
pub use mask::MoveMask;
pub use topology::{CellKind, Coord, Dir, Topology, BOARD_SIZE, PATHS, POINTS};

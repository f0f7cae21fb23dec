//! The fixed board topology.
//!
//! Six men's morris is played on two concentric squares of eight points
//! each, joined through the midpoints of their sides. On the 7×7 index grid
//! the playable points and the path cells between them sit at fixed
//! coordinates; everything else (including the center) is unused.
//!
//! Collinear points are separated by zero or more path cells, never by
//! another point, so "adjacent" means: the first non-path cell reached by
//! sweeping outward along one axis. `Topology` precomputes that sweep into
//! a per-point, per-direction neighbor table; the mill and move logic only
//! ever walks the table.

use rustc_hash::FxHashMap;
use serde::{Deserialize, Serialize};
use smallvec::SmallVec;

use super::grid::Grid;

/// Square dimension of the modeled board.
pub const BOARD_SIZE: usize = 7;

/// A cell index on the 7×7 grid.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Coord {
    pub x: usize,
    pub y: usize,
}

impl Coord {
    #[must_use]
    pub const fn new(x: usize, y: usize) -> Self {
        Self { x, y }
    }

    /// True if both indices are on the grid.
    #[must_use]
    pub const fn in_bounds(self) -> bool {
        self.x < BOARD_SIZE && self.y < BOARD_SIZE
    }
}

impl std::fmt::Display for Coord {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "({}, {})", self.x, self.y)
    }
}

/// What a grid cell is, fixed at construction.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum CellKind {
    /// Unused index, never visited by a sweep.
    #[default]
    Invalid,
    /// Connector between two points; transparent to sweeps, never occupied.
    Path,
    /// A playable point that can hold one piece.
    Point,
}

/// The four sweep directions.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Dir {
    Left,
    Right,
    Up,
    Down,
}

impl Dir {
    pub const ALL: [Dir; 4] = [Dir::Left, Dir::Right, Dir::Up, Dir::Down];

    /// One step in this direction, or `None` at the board edge.
    #[must_use]
    pub fn step(self, from: Coord) -> Option<Coord> {
        let Coord { x, y } = from;
        let stepped = match self {
            Dir::Left => Coord::new(x.checked_sub(1)?, y),
            Dir::Right => Coord::new(x + 1, y),
            Dir::Up => Coord::new(x, y.checked_sub(1)?),
            Dir::Down => Coord::new(x, y + 1),
        };
        stepped.in_bounds().then_some(stepped)
    }
}

/// The 16 playable points: outer square first, then inner square.
pub const POINTS: [Coord; 16] = [
    // outer square
    Coord::new(0, 0),
    Coord::new(0, 3),
    Coord::new(0, 6),
    Coord::new(3, 0),
    Coord::new(3, 6),
    Coord::new(6, 0),
    Coord::new(6, 3),
    Coord::new(6, 6),
    // inner square
    Coord::new(2, 2),
    Coord::new(2, 3),
    Coord::new(2, 4),
    Coord::new(3, 2),
    Coord::new(3, 4),
    Coord::new(4, 2),
    Coord::new(4, 3),
    Coord::new(4, 4),
];

/// The 20 path cells linking the points.
pub const PATHS: [Coord; 20] = [
    Coord::new(0, 1),
    Coord::new(0, 2),
    Coord::new(0, 4),
    Coord::new(0, 5),
    Coord::new(1, 0),
    Coord::new(1, 3),
    Coord::new(1, 6),
    Coord::new(2, 0),
    Coord::new(2, 6),
    Coord::new(3, 1),
    Coord::new(3, 5),
    Coord::new(4, 0),
    Coord::new(4, 6),
    Coord::new(5, 0),
    Coord::new(5, 3),
    Coord::new(5, 6),
    Coord::new(6, 1),
    Coord::new(6, 2),
    Coord::new(6, 4),
    Coord::new(6, 5),
];

/// The board graph: cell classification plus the neighbor-via-path lookup.
#[derive(Clone, Debug, PartialEq)]
pub struct Topology {
    kinds: Grid<CellKind>,
    neighbors: FxHashMap<Coord, [Option<Coord>; 4]>,
}

impl Topology {
    /// Build the standard six men's morris board.
    #[must_use]
    pub fn standard() -> Self {
        let mut kinds = Grid::filled(CellKind::Invalid);
        for &point in &POINTS {
            kinds[point] = CellKind::Point;
        }
        for &path in &PATHS {
            kinds[path] = CellKind::Path;
        }

        let mut neighbors = FxHashMap::default();
        for &point in &POINTS {
            let mut entry = [None; 4];
            for (slot, dir) in Dir::ALL.into_iter().enumerate() {
                entry[slot] = sweep(&kinds, point, dir);
            }
            neighbors.insert(point, entry);
        }

        Self { kinds, neighbors }
    }

    /// Classification of a cell. Out-of-bounds coordinates are `Invalid`.
    #[must_use]
    pub fn kind(&self, at: Coord) -> CellKind {
        if at.in_bounds() {
            self.kinds[at]
        } else {
            CellKind::Invalid
        }
    }

    /// True if the cell is a playable point.
    #[must_use]
    pub fn is_point(&self, at: Coord) -> bool {
        self.kind(at) == CellKind::Point
    }

    /// The adjacent point in `dir`: the first non-path cell sweeping outward,
    /// or `None` if the sweep leaves the board or hits an unused cell.
    #[must_use]
    pub fn neighbor(&self, at: Coord, dir: Dir) -> Option<Coord> {
        self.neighbors.get(&at)?[dir as usize]
    }

    /// All adjacent points of a point, in `Dir::ALL` order.
    #[must_use]
    pub fn neighbors(&self, at: Coord) -> SmallVec<[Coord; 4]> {
        match self.neighbors.get(&at) {
            Some(entry) => entry.iter().flatten().copied().collect(),
            None => SmallVec::new(),
        }
    }

    /// Iterate over all playable points.
    pub fn points(&self) -> impl Iterator<Item = Coord> {
        POINTS.into_iter()
    }
}

impl Default for Topology {
    fn default() -> Self {
        Self::standard()
    }
}

/// Walk from `from` in `dir`, skipping path cells, to the first point.
fn sweep(kinds: &Grid<CellKind>, from: Coord, dir: Dir) -> Option<Coord> {
    let mut cur = from;
    loop {
        cur = dir.step(cur)?;
        match kinds[cur] {
            CellKind::Path => continue,
            CellKind::Point => return Some(cur),
            CellKind::Invalid => return None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cell_census() {
        let topo = Topology::standard();

        let mut points = 0;
        let mut paths = 0;
        let mut invalid = 0;
        for c in Grid::<CellKind>::coords() {
            match topo.kind(c) {
                CellKind::Point => points += 1,
                CellKind::Path => paths += 1,
                CellKind::Invalid => invalid += 1,
            }
        }

        assert_eq!(points, 16);
        assert_eq!(paths, 20);
        assert_eq!(invalid, 13);
    }

    #[test]
    fn test_center_is_unused() {
        let topo = Topology::standard();
        assert_eq!(topo.kind(Coord::new(3, 3)), CellKind::Invalid);
    }

    #[test]
    fn test_out_of_bounds_is_invalid() {
        let topo = Topology::standard();
        assert_eq!(topo.kind(Coord::new(7, 0)), CellKind::Invalid);
        assert_eq!(topo.kind(Coord::new(0, 7)), CellKind::Invalid);
    }

    #[test]
    fn test_corner_neighbors() {
        let topo = Topology::standard();

        // (0,0) reaches (3,0) rightward across paths and (0,3) downward.
        assert_eq!(topo.neighbor(Coord::new(0, 0), Dir::Right), Some(Coord::new(3, 0)));
        assert_eq!(topo.neighbor(Coord::new(0, 0), Dir::Down), Some(Coord::new(0, 3)));
        assert_eq!(topo.neighbor(Coord::new(0, 0), Dir::Left), None);
        assert_eq!(topo.neighbor(Coord::new(0, 0), Dir::Up), None);
    }

    #[test]
    fn test_cross_midline_neighbors() {
        let topo = Topology::standard();

        // (0,3) connects outward to both squares along the midline.
        assert_eq!(topo.neighbor(Coord::new(0, 3), Dir::Right), Some(Coord::new(2, 3)));
        assert_eq!(topo.neighbor(Coord::new(0, 3), Dir::Up), Some(Coord::new(0, 0)));
        assert_eq!(topo.neighbor(Coord::new(0, 3), Dir::Down), Some(Coord::new(0, 6)));

        // The unused center blocks the inner midline points from each other.
        assert_eq!(topo.neighbor(Coord::new(2, 3), Dir::Right), None);
        assert_eq!(topo.neighbor(Coord::new(4, 3), Dir::Left), None);
    }

    #[test]
    fn test_neighbor_relation_is_symmetric() {
        let topo = Topology::standard();

        for a in topo.points() {
            for b in topo.neighbors(a) {
                assert!(
                    topo.neighbors(b).contains(&a),
                    "{} -> {} but not back",
                    a,
                    b
                );
            }
        }
    }

    #[test]
    fn test_every_point_has_two_to_four_neighbors() {
        let topo = Topology::standard();

        for p in topo.points() {
            let n = topo.neighbors(p).len();
            assert!((2..=4).contains(&n), "{} has {} neighbors", p, n);
        }
    }

    #[test]
    fn test_paths_have_no_neighbor_entry() {
        let topo = Topology::standard();
        assert_eq!(topo.neighbor(Coord::new(0, 1), Dir::Down), None);
        assert!(topo.neighbors(Coord::new(0, 1)).is_empty());
    }
}

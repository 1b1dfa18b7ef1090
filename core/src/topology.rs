//! Precomputed Moore neighborhoods on a grid with a dead border.
//!
//! Cells beyond the edge of the grid are permanently dead, so they are simply
//! left out of each neighborhood. Nothing wraps around.

use itertools::Itertools;
use parking_lot::Mutex;
use std::collections::HashMap;
use std::sync::Arc;

/// Offsets `(d_row, d_col)` of the eight cells surrounding a cell.
const MOORE_OFFSETS: [(isize, isize); 8] = [
    (-1, -1),
    (-1, 0),
    (-1, 1),
    (0, -1),
    (0, 1),
    (1, -1),
    (1, 0),
    (1, 1),
];

lazy_static::lazy_static! {
    /// Topologies that have already been computed, keyed by side length.
    static ref SHARED_TOPOLOGIES: Mutex<HashMap<usize, Arc<NeighborTopology>>> =
        Mutex::new(HashMap::new());
}

/// Neighbor indices of every cell on a `side` × `side` grid.
///
/// The indices are stored back to back in one flat array; `starts[i]` and
/// `starts[i + 1]` delimit the neighbors of cell `i`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NeighborTopology {
    side: usize,
    starts: Box<[usize]>,
    neighbors: Box<[usize]>,
}

impl NeighborTopology {
    /// Computes the topology of a `side` × `side` grid.
    pub fn new(side: usize) -> Self {
        let cell_count = side * side;
        let mut starts = Vec::with_capacity(cell_count + 1);
        let mut neighbors = Vec::with_capacity(cell_count * MOORE_OFFSETS.len());
        starts.push(0);
        for (row, col) in (0..side).cartesian_product(0..side) {
            for &(d_row, d_col) in &MOORE_OFFSETS {
                let r = row as isize + d_row;
                let c = col as isize + d_col;
                if (0..side as isize).contains(&r) && (0..side as isize).contains(&c) {
                    neighbors.push(r as usize * side + c as usize);
                }
            }
            starts.push(neighbors.len());
        }
        Self {
            side,
            starts: starts.into_boxed_slice(),
            neighbors: neighbors.into_boxed_slice(),
        }
    }

    /// Returns the topology of a `side` × `side` grid, computing it only the
    /// first time it is requested for that side length.
    pub fn shared(side: usize) -> Arc<Self> {
        let mut topologies = SHARED_TOPOLOGIES.lock();
        Arc::clone(
            topologies
                .entry(side)
                .or_insert_with(|| Arc::new(Self::new(side))),
        )
    }

    /// Returns the number of cells along each edge.
    #[inline]
    pub fn side(&self) -> usize {
        self.side
    }
    /// Returns the number of cells in the grid.
    #[inline]
    pub fn cell_count(&self) -> usize {
        self.starts.len() - 1
    }

    /// Returns the indices of the cells adjacent to cell `i`, in ascending
    /// order.
    ///
    /// # Panics
    ///
    /// This method panics if `i` is not a cell of the grid.
    #[inline]
    pub fn neighbors(&self, i: usize) -> &[usize] {
        &self.neighbors[self.starts[i]..self.starts[i + 1]]
    }

    /// Returns the number of live cells adjacent to cell `i`.
    #[inline]
    pub fn live_neighbors(&self, cells: &[bool], i: usize) -> usize {
        self.neighbors(i).iter().filter(|&&n| cells[n]).count()
    }
}

use itertools::Itertools;
use std::fmt;
use std::ops::Index;

use super::{PatternError, PatternResult};
use crate::config;

/// Square grid of live/dead cells, stored flat in row-major order.
///
/// Two grids are equal exactly when they have the same side length and every
/// cell matches.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Grid {
    side: usize,
    cells: Box<[bool]>,
}

impl Index<usize> for Grid {
    type Output = bool;

    #[inline]
    fn index(&self, idx: usize) -> &bool {
        &self.cells[idx]
    }
}

/// Rows of `0` and `1`, one line per row. The last row has no trailing newline.
impl fmt::Display for Grid {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let rows = self
            .rows()
            .map(|row| row.iter().map(|&alive| if alive { '1' } else { '0' }).join(""))
            .join("\n");
        write!(f, "{}", rows)
    }
}

impl Grid {
    /// Creates a grid with every cell dead.
    ///
    /// # Panics
    ///
    /// This function panics if `side` is not a supported side length.
    pub fn dead(side: usize) -> Self {
        assert!(config::check_side(side).is_ok(), "Unsupported grid side");
        Self::from_checked_cells(side, vec![false; side * side].into_boxed_slice())
    }
    /// Creates a grid from a flat row-major vector of cells.
    pub fn from_cells(side: usize, cells: impl Into<Box<[bool]>>) -> PatternResult<Self> {
        config::check_side(side).map_err(|_| PatternError::UnsupportedSide(side))?;
        let cells = cells.into();
        if cells.len() != side * side {
            return Err(PatternError::WrongGridLength {
                expected: side * side,
                got: cells.len(),
            });
        }
        Ok(Self { side, cells })
    }
    /// Creates a grid with exactly the given `(row, col)` cells alive.
    pub fn from_live_cells(
        side: usize,
        live: impl IntoIterator<Item = (usize, usize)>,
    ) -> PatternResult<Self> {
        let mut cells = vec![false; side * side];
        for (row, col) in live {
            if row >= side || col >= side {
                return Err(PatternError::CellOutOfRange { row, col, side });
            }
            cells[row * side + col] = true;
        }
        Self::from_cells(side, cells)
    }
    pub(crate) fn from_checked_cells(side: usize, cells: Box<[bool]>) -> Self {
        debug_assert_eq!(side * side, cells.len());
        Self { side, cells }
    }

    /// Returns the number of cells along each edge.
    #[inline]
    pub fn side(&self) -> usize {
        self.side
    }
    /// Returns the total number of cells, which is always `side * side`.
    #[inline]
    pub fn len(&self) -> usize {
        self.cells.len()
    }
    /// Returns `true` if every cell is dead.
    pub fn is_empty(&self) -> bool {
        !self.cells.iter().any(|&alive| alive)
    }
    /// Returns the flat row-major cells.
    #[inline]
    pub fn cells(&self) -> &[bool] {
        &self.cells
    }
    pub(crate) fn cells_mut(&mut self) -> &mut [bool] {
        &mut self.cells
    }
    /// Returns the state of the cell at `(row, col)`.
    #[inline]
    pub fn get(&self, row: usize, col: usize) -> bool {
        assert!(row < self.side && col < self.side, "Cell out of range");
        self.cells[row * self.side + col]
    }
    /// Returns the number of live cells.
    pub fn population(&self) -> usize {
        self.cells.iter().filter(|&&alive| alive).count()
    }
    /// Returns an iterator over the rows of the grid, top to bottom.
    pub fn rows(&self) -> impl '_ + Iterator<Item = &[bool]> {
        self.cells.chunks(self.side)
    }
    /// Returns the cells as `0`/`1` values.
    pub fn to_bits(&self) -> Vec<u8> {
        self.cells.iter().map(|&alive| alive as u8).collect()
    }
}

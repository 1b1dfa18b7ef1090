//! Conversion between pattern ids and grids.
//!
//! A pattern id is a `side * side`-bit number. Bit `k` (least significant
//! first) is the state of cell `k`, and cells are numbered in row-major order,
//! so cell `k` lies at row `k / side` and column `k % side`.

use std::convert::TryFrom;
use std::fmt;
use thiserror::Error;

mod grid;

use crate::config::{self, DEFAULT_SIDE};
pub use grid::Grid;

/// Result type returned by fallible pattern routines.
pub type PatternResult<T> = Result<T, PatternError>;

/// Error encountered while converting between ids and grids.
#[allow(missing_docs)]
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum PatternError {
    #[error("pattern id {id} is outside of the valid range 0..2^{cells}")]
    InvalidPattern { id: i128, cells: usize },
    #[error("cannot parse pattern id from {0:?}")]
    Unparseable(String),
    #[error("expected a grid of {expected} cells; got {got}")]
    WrongGridLength { expected: usize, got: usize },
    #[error("cell ({row}, {col}) is outside of a {side}x{side} grid")]
    CellOutOfRange { row: usize, col: usize, side: usize },
    #[error("unsupported grid side {0}")]
    UnsupportedSide(usize),
}

/// Identifier of a pattern on a grid of some fixed size.
///
/// Ids can only be created by a [`PatternCodec`], which checks that they lie
/// within the id space of its grid.
#[derive(Debug, Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct PatternId(u64);
impl fmt::Display for PatternId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}
impl From<PatternId> for u64 {
    fn from(id: PatternId) -> Self {
        id.0
    }
}
impl PatternId {
    /// Wraps an id that the caller has already checked against the id space.
    #[inline]
    pub(crate) fn from_bits(bits: u64) -> Self {
        Self(bits)
    }
    #[inline]
    pub(crate) fn bits(self) -> u64 {
        self.0
    }
}

/// Bidirectional mapping between pattern ids and grids of a fixed side length.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub struct PatternCodec {
    side: usize,
}
impl Default for PatternCodec {
    fn default() -> Self {
        Self { side: DEFAULT_SIDE }
    }
}
impl PatternCodec {
    /// Constructs a codec for a `side` × `side` grid.
    pub fn new(side: usize) -> PatternResult<Self> {
        config::check_side(side).map_err(|_| PatternError::UnsupportedSide(side))?;
        Ok(Self { side })
    }

    /// Returns the side length of the grid.
    #[inline]
    pub fn side(&self) -> usize {
        self.side
    }
    /// Returns the number of cells in the grid.
    #[inline]
    pub fn cell_count(&self) -> usize {
        self.side * self.side
    }
    /// Returns the number of distinct patterns, which is also the exclusive
    /// upper bound of the id space.
    #[inline]
    pub fn id_count(&self) -> u64 {
        1 << self.cell_count()
    }

    /// Returns the id with the given numeric value, failing if it lies
    /// outside of `0..2^(side * side)`.
    pub fn id(&self, raw: impl Into<i128>) -> PatternResult<PatternId> {
        let raw = raw.into();
        match u64::try_from(raw) {
            Ok(bits) if bits < self.id_count() => Ok(PatternId(bits)),
            _ => Err(self.invalid(raw)),
        }
    }
    /// Parses an id written in decimal.
    pub fn parse_id(&self, s: &str) -> PatternResult<PatternId> {
        let s = s.trim();
        let raw = s
            .parse::<i128>()
            .map_err(|_| PatternError::Unparseable(s.to_owned()))?;
        self.id(raw)
    }

    /// Returns the id of a grid, treating cell 0 as the least significant bit.
    pub fn encode(&self, grid: &Grid) -> PatternResult<PatternId> {
        if grid.side() != self.side {
            return Err(PatternError::WrongGridLength {
                expected: self.cell_count(),
                got: grid.len(),
            });
        }
        Ok(PatternId(encode_cells(grid.cells())))
    }
    /// Returns the grid described by an id.
    pub fn decode(&self, id: PatternId) -> PatternResult<Grid> {
        self.check(id)?;
        let mut cells = vec![false; self.cell_count()];
        decode_cells(id.0, &mut cells);
        Ok(Grid::from_checked_cells(self.side, cells.into_boxed_slice()))
    }

    /// Checks that an id belongs to this codec's id space.
    pub(crate) fn check(&self, id: PatternId) -> PatternResult<()> {
        if id.0 < self.id_count() {
            Ok(())
        } else {
            Err(self.invalid(id.0.into()))
        }
    }

    fn invalid(&self, id: i128) -> PatternError {
        PatternError::InvalidPattern {
            id,
            cells: self.cell_count(),
        }
    }
}

/// Writes the low `cells.len()` bits of `bits` into `cells`, low bit first.
#[inline]
pub(crate) fn decode_cells(bits: u64, cells: &mut [bool]) {
    for (k, cell) in cells.iter_mut().enumerate() {
        *cell = (bits >> k) & 1 != 0;
    }
}

/// Reads `cells` as a binary number, cell 0 first.
#[inline]
pub(crate) fn encode_cells(cells: &[bool]) -> u64 {
    cells
        .iter()
        .enumerate()
        .filter(|&(_, &alive)| alive)
        .fold(0, |bits, (k, _)| bits | (1 << k))
}

#[cfg(test)]
mod tests;

//! Toroidal grid coordinates and the fixed constants of the simulation.
//!
//! The grid is a 4×4 torus: every coordinate component wraps modulo
//! [`GRID_SIZE`], so every cell has exactly four diagonal neighbours no
//! matter where it sits.

use std::fmt;

/// Width and height of the grid.
pub const GRID_SIZE: usize = 4;

/// Number of cells in the grid.
pub const CELL_COUNT: usize = GRID_SIZE * GRID_SIZE;

/// Completed moves after which a dweller stops with an end-of-turns event.
pub const MOVE_BUDGET: u32 = 100;

/// Diagonal offsets `(d_row, d_col)` in candidate priority order.
pub const DIAGONAL_OFFSETS: [(i32, i32); 4] = [(-1, -1), (1, 1), (1, -1), (-1, 1)];

/// A cell position on the grid.
///
/// Both components are always in `[0, GRID_SIZE)`.  The derived `Ord` is
/// row-major, which is the fixed order cell locks are acquired in.
#[derive(Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Debug)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Coord {
    pub row: u8,
    pub col: u8,
}

impl Coord {
    /// Build a coordinate, wrapping both components onto the torus.
    #[inline]
    pub fn new(row: usize, col: usize) -> Self {
        Self {
            row: (row % GRID_SIZE) as u8,
            col: (col % GRID_SIZE) as u8,
        }
    }

    /// Build a coordinate from signed components, wrapping negatives too.
    #[inline]
    pub fn wrapping(row: i32, col: i32) -> Self {
        let n = GRID_SIZE as i32;
        Self {
            row: row.rem_euclid(n) as u8,
            col: col.rem_euclid(n) as u8,
        }
    }

    /// The coordinate reached by applying `(d_row, d_col)` with wraparound.
    #[inline]
    pub fn offset(self, d_row: i32, d_col: i32) -> Self {
        Self::wrapping(self.row as i32 + d_row, self.col as i32 + d_col)
    }

    /// Row-major index into a flat `[_; CELL_COUNT]` array.
    #[inline(always)]
    pub fn index(self) -> usize {
        self.row as usize * GRID_SIZE + self.col as usize
    }

    /// Inverse of [`index`](Self::index).  Wraps indices past `CELL_COUNT`.
    #[inline]
    pub fn from_index(index: usize) -> Self {
        let index = index % CELL_COUNT;
        Self::new(index / GRID_SIZE, index % GRID_SIZE)
    }

    /// All sixteen coordinates in row-major order.
    pub fn all() -> impl Iterator<Item = Coord> {
        (0..CELL_COUNT).map(Coord::from_index)
    }
}

impl fmt::Display for Coord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.row, self.col)
    }
}

impl From<(usize, usize)> for Coord {
    fn from((row, col): (usize, usize)) -> Self {
        Coord::new(row, col)
    }
}

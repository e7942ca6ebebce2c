//! The initial occupancy matrix handed to a simulation run.
//!
//! Text form is four rows of four characters, `X` for an occupied cell and
//! `-` for an empty one:
//!
//! ```text
//! X-X-
//! -X--
//! X-X-
//! ----
//! ```

use std::fmt;
use std::str::FromStr;

use crate::{CoreError, CoreResult, Coord, GRID_SIZE, SimRng};

const OCCUPIED: char = 'X';
const EMPTY: char = '-';

/// A 4×4 matrix of occupancy flags, indexed `[row][col]`.
#[derive(Copy, Clone, PartialEq, Eq, Hash, Debug, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Layout {
    rows: [[bool; GRID_SIZE]; GRID_SIZE],
}

impl Layout {
    /// No occupied cells.
    pub fn empty() -> Self {
        Self::default()
    }

    /// Every cell occupied.
    pub fn full() -> Self {
        Self { rows: [[true; GRID_SIZE]; GRID_SIZE] }
    }

    pub fn from_rows(rows: [[bool; GRID_SIZE]; GRID_SIZE]) -> Self {
        Self { rows }
    }

    /// Layout with exactly the given cells occupied.
    pub fn with_occupied<I>(cells: I) -> Self
    where
        I: IntoIterator<Item = Coord>,
    {
        let mut layout = Self::empty();
        for c in cells {
            layout.set(c, true);
        }
        layout
    }

    /// Each cell occupied independently with probability `density`.
    pub fn random(seed: u64, density: f64) -> Self {
        let mut rng = SimRng::new(seed);
        let mut layout = Self::empty();
        for c in Coord::all() {
            layout.set(c, rng.gen_bool(density));
        }
        layout
    }

    /// Parse the `X` / `-` text form.  Blank lines and surrounding
    /// whitespace are ignored.
    pub fn parse(text: &str) -> CoreResult<Self> {
        let lines: Vec<&str> = text
            .lines()
            .map(str::trim)
            .filter(|l| !l.is_empty())
            .collect();
        if lines.len() != GRID_SIZE {
            return Err(CoreError::RowCount(lines.len()));
        }

        let mut layout = Self::empty();
        for (row, line) in lines.iter().enumerate() {
            let width = line.chars().count();
            if width != GRID_SIZE {
                return Err(CoreError::RowWidth { row, got: width });
            }
            for (col, ch) in line.chars().enumerate() {
                let occupied = match ch {
                    OCCUPIED => true,
                    EMPTY => false,
                    other => return Err(CoreError::UnknownCell { row, col, ch: other }),
                };
                layout.rows[row][col] = occupied;
            }
        }
        Ok(layout)
    }

    #[inline]
    pub fn is_occupied(&self, c: Coord) -> bool {
        self.rows[c.row as usize][c.col as usize]
    }

    #[inline]
    pub fn set(&mut self, c: Coord, occupied: bool) {
        self.rows[c.row as usize][c.col as usize] = occupied;
    }

    /// Occupied cells in row-major order.  Dweller ids follow this order.
    pub fn occupied_cells(&self) -> Vec<Coord> {
        Coord::all().filter(|&c| self.is_occupied(c)).collect()
    }

    pub fn occupied_count(&self) -> usize {
        self.rows.iter().flatten().filter(|&&o| o).count()
    }

    pub fn rows(&self) -> &[[bool; GRID_SIZE]; GRID_SIZE] {
        &self.rows
    }
}

impl FromStr for Layout {
    type Err = CoreError;

    fn from_str(s: &str) -> CoreResult<Self> {
        Layout::parse(s)
    }
}

impl fmt::Display for Layout {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, row) in self.rows.iter().enumerate() {
            if i > 0 {
                writeln!(f)?;
            }
            for &occupied in row {
                let ch = if occupied { OCCUPIED } else { EMPTY };
                write!(f, "{ch}")?;
            }
        }
        Ok(())
    }
}

//! Core error type.
//!
//! Only layout parsing can fail at this level.  Grid and simulation errors
//! live in their own crates and wrap this one where needed.

use thiserror::Error;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum CoreError {
    #[error("layout has {0} rows, expected 4")]
    RowCount(usize),

    #[error("layout row {row} has {got} cells, expected 4")]
    RowWidth { row: usize, got: usize },

    #[error("unknown cell {ch:?} at row {row}, column {col} (use 'X' or '-')")]
    UnknownCell { row: usize, col: usize, ch: char },
}

/// Shorthand result type for `md-core`.
pub type CoreResult<T> = Result<T, CoreError>;

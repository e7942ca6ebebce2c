use md_core::Coord;
use thiserror::Error;

/// Which precondition of a move was violated.
#[derive(Copy, Clone, PartialEq, Eq, Debug)]
pub enum InvalidMoveReason {
    /// The source cell holds no dweller.
    SourceEmpty,
    /// The destination cell already holds a dweller.
    DestinationOccupied,
}

impl std::fmt::Display for InvalidMoveReason {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            InvalidMoveReason::SourceEmpty         => f.write_str("source cell is empty"),
            InvalidMoveReason::DestinationOccupied => f.write_str("destination cell is occupied"),
        }
    }
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum GridError {
    /// Under correct locking this never happens; seeing it means the
    /// locking discipline was broken.
    #[error("invalid move from {from} to {to}: {reason}")]
    InvalidMove {
        from:   Coord,
        to:     Coord,
        reason: InvalidMoveReason,
    },

    #[error("cell {0} is not held by this lock set")]
    NotLocked(Coord),

    #[error("lock for cell {0} was poisoned by a panicking worker")]
    Poisoned(Coord),
}

pub type GridResult<T> = Result<T, GridError>;

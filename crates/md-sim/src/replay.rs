//! Replay an event log against a fresh board and check it is a valid
//! serialisation of dweller moves.
//!
//! The board is rebuilt from the starting layout with dwellers numbered in
//! row-major order (the same numbering [`Mall`](crate::Mall) uses).  Each
//! event is applied in log order:
//!
//! - ordinary move: `from` holds the named, still-active dweller; `to` is a
//!   diagonal candidate of `from`, is empty, and every higher-priority
//!   candidate is occupied; the dweller has moves left.
//! - stuck: all four candidates of `from` are occupied.
//! - end-of-turns: the dweller has made exactly `MOVE_BUDGET` moves.
//!
//! At the end every dweller must have stopped, and every dweller that was not
//! stuck must have made exactly `MOVE_BUDGET` moves.

use md_core::{CELL_COUNT, Coord, DwellerId, EventLog, Layout, MOVE_BUDGET, MoveTarget};
use md_grid::candidate_moves;
use thiserror::Error;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ReplayError {
    #[error("event {index}: no dweller at {from}")]
    NoDweller { index: usize, from: Coord },

    #[error("event {index}: {claimed} claims {from}, which holds {actual}")]
    WrongDweller {
        index:   usize,
        from:    Coord,
        claimed: DwellerId,
        actual:  DwellerId,
    },

    #[error("event {index}: {dweller} has already stopped")]
    AlreadyStopped { index: usize, dweller: DwellerId },

    #[error("event {index}: {dweller} reported stuck but {free} is free")]
    FalseStuck { index: usize, dweller: DwellerId, free: Coord },

    #[error("event {index}: {dweller} ended its turns after only {moves} moves")]
    EarlyEnd { index: usize, dweller: DwellerId, moves: u32 },

    #[error("event {index}: {dweller} moved past its budget")]
    OverBudget { index: usize, dweller: DwellerId },

    #[error("event {index}: {to} is not a diagonal neighbour of {from}")]
    NotCandidate { index: usize, from: Coord, to: Coord },

    #[error("event {index}: {to} is already occupied")]
    Occupied { index: usize, to: Coord },

    #[error("event {index}: {dweller} skipped free candidate {skipped}")]
    SkippedCandidate { index: usize, dweller: DwellerId, skipped: Coord },

    #[error("{dweller} never reported a terminal event")]
    Unfinished { dweller: DwellerId },

    #[error("{dweller} stopped after {moves} moves without being stuck")]
    Incomplete { dweller: DwellerId, moves: u32 },

    #[error("replay ended with {got} dwellers, started with {expected}")]
    Lost { expected: usize, got: usize },
}

/// Counts gathered while replaying a valid log.
#[derive(Copy, Clone, PartialEq, Eq, Debug, Default)]
pub struct ReplaySummary {
    pub dwellers:  usize,
    pub stuck:     usize,
    pub exhausted: usize,
    pub moves:     usize,
}

#[derive(Copy, Clone, Debug)]
struct Tracked {
    id:      DwellerId,
    moves:   u32,
    stopped: bool,
    stuck:   bool,
}

/// Replay `log` from `start`; see the module docs for the rules.
pub fn validate_replay(start: &Layout, log: &EventLog) -> Result<ReplaySummary, ReplayError> {
    let mut board: [Option<Tracked>; CELL_COUNT] = [None; CELL_COUNT];
    let starts = start.occupied_cells();
    for (i, c) in starts.iter().enumerate() {
        board[c.index()] = Some(Tracked {
            id:      DwellerId(i as u32),
            moves:   0,
            stopped: false,
            stuck:   false,
        });
    }

    let mut summary = ReplaySummary { dwellers: starts.len(), ..Default::default() };

    for (index, event) in log.iter().enumerate() {
        let from = event.from;
        let Some(mut dweller) = board[from.index()] else {
            return Err(ReplayError::NoDweller { index, from });
        };
        if dweller.id != event.dweller {
            return Err(ReplayError::WrongDweller {
                index,
                from,
                claimed: event.dweller,
                actual:  dweller.id,
            });
        }
        if dweller.stopped {
            return Err(ReplayError::AlreadyStopped { index, dweller: dweller.id });
        }

        let candidates = candidate_moves(from);
        let occupied = |c: Coord| board[c.index()].is_some();

        match event.to {
            MoveTarget::Stuck => {
                if let Some(&free) = candidates.iter().find(|&&c| !occupied(c)) {
                    return Err(ReplayError::FalseStuck { index, dweller: dweller.id, free });
                }
                dweller.stopped = true;
                dweller.stuck = true;
                summary.stuck += 1;
                board[from.index()] = Some(dweller);
            }

            MoveTarget::EndOfTurns => {
                if dweller.moves != MOVE_BUDGET {
                    return Err(ReplayError::EarlyEnd { index, dweller: dweller.id, moves: dweller.moves });
                }
                dweller.stopped = true;
                summary.exhausted += 1;
                board[from.index()] = Some(dweller);
            }

            MoveTarget::Cell(to) => {
                let Some(rank) = candidates.iter().position(|&c| c == to) else {
                    return Err(ReplayError::NotCandidate { index, from, to });
                };
                if occupied(to) {
                    return Err(ReplayError::Occupied { index, to });
                }
                if let Some(&skipped) = candidates[..rank].iter().find(|&&c| !occupied(c)) {
                    return Err(ReplayError::SkippedCandidate { index, dweller: dweller.id, skipped });
                }
                if dweller.moves >= MOVE_BUDGET {
                    return Err(ReplayError::OverBudget { index, dweller: dweller.id });
                }
                dweller.moves += 1;
                summary.moves += 1;
                board[from.index()] = None;
                board[to.index()] = Some(dweller);
            }
        }
    }

    let mut found = 0;
    for dweller in board.iter().flatten() {
        found += 1;
        if !dweller.stopped {
            return Err(ReplayError::Unfinished { dweller: dweller.id });
        }
        if !dweller.stuck && dweller.moves != MOVE_BUDGET {
            return Err(ReplayError::Incomplete { dweller: dweller.id, moves: dweller.moves });
        }
    }
    if found != starts.len() {
        return Err(ReplayError::Lost { expected: starts.len(), got: found });
    }

    Ok(summary)
}

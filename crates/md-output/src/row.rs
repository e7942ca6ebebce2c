//! Plain data row types written by output backends.

use md_core::{DwellerSummary, MoveEvent, MoveTarget};

/// One event of the log.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EventRow {
    /// Position in the log (arrival order).
    pub seq:      u64,
    pub dweller:  u32,
    pub from_row: u8,
    pub from_col: u8,
    /// `move`, `stuck` or `end_of_turns`.
    pub kind:     &'static str,
    /// Destination for ordinary moves; `None` for terminal events.
    pub to_row:   Option<u8>,
    pub to_col:   Option<u8>,
}

impl EventRow {
    pub fn new(seq: u64, event: &MoveEvent) -> Self {
        let (to_row, to_col) = match event.to {
            MoveTarget::Cell(to) => (Some(to.row), Some(to.col)),
            _ => (None, None),
        };
        Self {
            seq,
            dweller:  event.dweller.0,
            from_row: event.from.row,
            from_col: event.from.col,
            kind:     event.to.as_str(),
            to_row,
            to_col,
        }
    }
}

/// How one dweller's run went.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DwellerRow {
    pub dweller:   u32,
    pub start_row: u8,
    pub start_col: u8,
    pub final_row: u8,
    pub final_col: u8,
    pub moves:     u32,
    /// `stuck`, `exhausted` or `unfinished`.
    pub outcome:   &'static str,
}

impl From<&DwellerSummary> for DwellerRow {
    fn from(s: &DwellerSummary) -> Self {
        Self {
            dweller:   s.dweller.0,
            start_row: s.start.row,
            start_col: s.start.col,
            final_row: s.position.row,
            final_col: s.position.col,
            moves:     s.moves,
            outcome:   s.outcome.as_str(),
        }
    }
}

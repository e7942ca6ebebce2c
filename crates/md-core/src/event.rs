//! Move events and the ordered event log produced by a simulation run.
//!
//! An event is an ordered pair `(from, to)`.  `to` is a tagged
//! [`MoveTarget`] rather than a magic out-of-range coordinate, so the two
//! terminal events can never be confused with a real cell.

use std::fmt;

use crate::{Coord, DwellerId};

/// Where a move event goes.
#[derive(Copy, Clone, PartialEq, Eq, Hash, Debug)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum MoveTarget {
    /// Ordinary move into a previously empty cell.
    Cell(Coord),
    /// All four candidates were occupied; the dweller stops for good.
    Stuck,
    /// The dweller completed its full move budget.
    EndOfTurns,
}

impl MoveTarget {
    #[inline]
    pub fn is_terminal(self) -> bool {
        !matches!(self, MoveTarget::Cell(_))
    }

    /// Label used in text and CSV output.
    pub fn as_str(self) -> &'static str {
        match self {
            MoveTarget::Cell(_)    => "move",
            MoveTarget::Stuck      => "stuck",
            MoveTarget::EndOfTurns => "end_of_turns",
        }
    }
}

impl fmt::Display for MoveTarget {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MoveTarget::Cell(c) => write!(f, "{c}"),
            other => f.write_str(other.as_str()),
        }
    }
}

/// One entry of the event log.
#[derive(Copy, Clone, PartialEq, Eq, Hash, Debug)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct MoveEvent {
    pub dweller: DwellerId,
    pub from:    Coord,
    pub to:      MoveTarget,
}

impl MoveEvent {
    pub fn moved(dweller: DwellerId, from: Coord, to: Coord) -> Self {
        Self { dweller, from, to: MoveTarget::Cell(to) }
    }

    pub fn stuck(dweller: DwellerId, at: Coord) -> Self {
        Self { dweller, from: at, to: MoveTarget::Stuck }
    }

    pub fn end_of_turns(dweller: DwellerId, at: Coord) -> Self {
        Self { dweller, from: at, to: MoveTarget::EndOfTurns }
    }

    /// The `(from, to)` pair without the dweller id.
    #[inline]
    pub fn pair(&self) -> (Coord, MoveTarget) {
        (self.from, self.to)
    }
}

impl fmt::Display for MoveEvent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {} -> {}", self.dweller, self.from, self.to)
    }
}

// ── Outcome / summary ────────────────────────────────────────────────────────

/// How a dweller's run ended, as seen in the log.
#[derive(Copy, Clone, PartialEq, Eq, Hash, Debug)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Outcome {
    Stuck,
    Exhausted,
    /// No terminal event in the log (only possible for a failed run).
    Unfinished,
}

impl Outcome {
    pub fn as_str(self) -> &'static str {
        match self {
            Outcome::Stuck      => "stuck",
            Outcome::Exhausted  => "exhausted",
            Outcome::Unfinished => "unfinished",
        }
    }
}

impl fmt::Display for Outcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Per-dweller digest of the log.
#[derive(Copy, Clone, PartialEq, Eq, Debug)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct DwellerSummary {
    pub dweller:  DwellerId,
    /// `from` of the dweller's first event.
    pub start:    Coord,
    /// Position after the last ordinary move.
    pub position: Coord,
    pub moves:    u32,
    pub outcome:  Outcome,
}

// ── EventLog ──────────────────────────────────────────────────────────────────

/// Append-only, arrival-ordered sequence of [`MoveEvent`]s.
#[derive(Clone, PartialEq, Eq, Debug, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct EventLog {
    events: Vec<MoveEvent>,
}

impl EventLog {
    pub fn new() -> Self {
        Self::default()
    }

    #[inline]
    pub fn push(&mut self, event: MoveEvent) {
        self.events.push(event);
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.events.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.events.is_empty()
    }

    pub fn events(&self) -> &[MoveEvent] {
        &self.events
    }

    pub fn iter(&self) -> std::slice::Iter<'_, MoveEvent> {
        self.events.iter()
    }

    pub fn into_vec(self) -> Vec<MoveEvent> {
        self.events
    }

    /// The events of one dweller, in the order that dweller emitted them.
    pub fn events_for(&self, dweller: DwellerId) -> Vec<MoveEvent> {
        self.events.iter().filter(|e| e.dweller == dweller).copied().collect()
    }

    /// Number of stuck + end-of-turns events.
    pub fn terminal_count(&self) -> usize {
        self.events.iter().filter(|e| e.to.is_terminal()).count()
    }

    /// One summary per dweller appearing in the log, ordered by id.
    pub fn summaries(&self) -> Vec<DwellerSummary> {
        let mut out: Vec<Option<DwellerSummary>> = Vec::new();
        for e in &self.events {
            let i = e.dweller.index();
            if out.len() <= i {
                out.resize(i + 1, None);
            }
            let s = out[i].get_or_insert(DwellerSummary {
                dweller:  e.dweller,
                start:    e.from,
                position: e.from,
                moves:    0,
                outcome:  Outcome::Unfinished,
            });
            match e.to {
                MoveTarget::Cell(to) => {
                    s.position = to;
                    s.moves += 1;
                }
                MoveTarget::Stuck      => s.outcome = Outcome::Stuck,
                MoveTarget::EndOfTurns => s.outcome = Outcome::Exhausted,
            }
        }
        out.into_iter().flatten().collect()
    }
}

impl From<Vec<MoveEvent>> for EventLog {
    fn from(events: Vec<MoveEvent>) -> Self {
        Self { events }
    }
}

impl<'a> IntoIterator for &'a EventLog {
    type Item = &'a MoveEvent;
    type IntoIter = std::slice::Iter<'a, MoveEvent>;

    fn into_iter(self) -> Self::IntoIter {
        self.events.iter()
    }
}

impl IntoIterator for EventLog {
    type Item = MoveEvent;
    type IntoIter = std::vec::IntoIter<MoveEvent>;

    fn into_iter(self) -> Self::IntoIter {
        self.events.into_iter()
    }
}

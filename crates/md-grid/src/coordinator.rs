//! Deadlock-free acquisition of multi-cell lock sets.
//!
//! Every dweller attempt locks five cells at once: its own position and its
//! four candidates.  Two dwellers locking overlapping sets in different
//! orders could deadlock, so acquisition is funnelled through a
//! [`LockCoordinator`].
//!
//! | Coordinator            | Protocol                                           |
//! |------------------------|----------------------------------------------------|
//! | [`GatedCoordinator`]   | one global gate held for the acquisition step only, then ascending order |
//! | [`OrderedCoordinator`] | ascending order, no gate                            |

use std::fmt;
use std::str::FromStr;
use std::sync::{Mutex, PoisonError};

use md_core::Coord;

use crate::{Grid, GridResult, LockSet};

/// Grants exclusive access to a set of cells as one step.
///
/// Implementations must never let two acquisitions form a wait cycle.  The
/// returned [`LockSet`] is released by the caller once its move attempt is
/// over; the coordinator holds nothing beyond the acquisition itself.
pub trait LockCoordinator: Send + Sync {
    fn acquire<'g>(&self, grid: &'g Grid, cells: &[Coord]) -> GridResult<LockSet<'g>>;

    /// Short label for logs.
    fn name(&self) -> &'static str;
}

impl<C: LockCoordinator + ?Sized> LockCoordinator for Box<C> {
    fn acquire<'g>(&self, grid: &'g Grid, cells: &[Coord]) -> GridResult<LockSet<'g>> {
        (**self).acquire(grid, cells)
    }

    fn name(&self) -> &'static str {
        (**self).name()
    }
}

// ── GatedCoordinator ──────────────────────────────────────────────────────────

/// Serialises all lock-set acquisitions behind one gate.
///
/// A dweller takes the gate, locks its cells in ascending order, and drops
/// the gate before doing anything else.  Only one acquisition is ever in
/// flight, so no cycle can form; other dwellers may take the gate while the
/// first still holds its cells and executes its move.
#[derive(Default)]
pub struct GatedCoordinator {
    gate: Mutex<()>,
}

impl GatedCoordinator {
    pub fn new() -> Self {
        Self::default()
    }
}

impl LockCoordinator for GatedCoordinator {
    fn acquire<'g>(&self, grid: &'g Grid, cells: &[Coord]) -> GridResult<LockSet<'g>> {
        // The gate guards no data, so a poisoned gate is still usable.
        let _gate = self.gate.lock().unwrap_or_else(PoisonError::into_inner);
        grid.lock_ordered(cells)
    }

    fn name(&self) -> &'static str {
        "gated"
    }
}

// ── OrderedCoordinator ────────────────────────────────────────────────────────

/// Canonical lock ordering without a gate.
///
/// Every acquirer locks in ascending coordinate order, so a waiter always
/// waits on a holder of a strictly greater cell and cycles are impossible.
/// Acquisitions of disjoint sets proceed in parallel.
#[derive(Default, Clone, Copy)]
pub struct OrderedCoordinator;

impl LockCoordinator for OrderedCoordinator {
    fn acquire<'g>(&self, grid: &'g Grid, cells: &[Coord]) -> GridResult<LockSet<'g>> {
        grid.lock_ordered(cells)
    }

    fn name(&self) -> &'static str {
        "ordered"
    }
}

// ── LockStrategy ──────────────────────────────────────────────────────────────

/// Runtime choice between the two coordinators.
#[derive(Copy, Clone, PartialEq, Eq, Hash, Debug, Default)]
pub enum LockStrategy {
    #[default]
    Gated,
    Ordered,
}

impl LockStrategy {
    pub const ALL: [LockStrategy; 2] = [LockStrategy::Gated, LockStrategy::Ordered];

    pub fn coordinator(self) -> Box<dyn LockCoordinator> {
        match self {
            LockStrategy::Gated   => Box::new(GatedCoordinator::new()),
            LockStrategy::Ordered => Box::new(OrderedCoordinator),
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            LockStrategy::Gated   => "gated",
            LockStrategy::Ordered => "ordered",
        }
    }
}

impl fmt::Display for LockStrategy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for LockStrategy {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "gated"   => Ok(LockStrategy::Gated),
            "ordered" => Ok(LockStrategy::Ordered),
            other     => Err(format!("unknown lock strategy {other:?} (expected gated or ordered)")),
        }
    }
}

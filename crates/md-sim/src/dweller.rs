//! The per-dweller worker and its state machine.

use std::sync::mpsc::Sender;

use md_core::{Coord, DwellerId, MOVE_BUDGET, MoveEvent};
use md_grid::{Grid, LockCoordinator, candidate_moves, lock_footprint};
use tracing::{debug, trace};

use crate::{SimError, SimResult};

/// Where a dweller is in its lifecycle.
#[derive(Copy, Clone, PartialEq, Eq, Hash, Debug, Default)]
pub enum DwellerState {
    #[default]
    Active,
    /// No candidate was free on some attempt.  Terminal.
    Stuck,
    /// Completed all `MOVE_BUDGET` moves.  Terminal.
    Exhausted,
}

impl DwellerState {
    #[inline]
    pub fn is_terminal(self) -> bool {
        !matches!(self, DwellerState::Active)
    }
}

/// One concurrent unit of the simulation, bound to a starting cell.
///
/// ```text
///            move ok, moves < 100
///              ┌──────────┐
///              ▼          │
///  start ──► Active ──────┘
///              │ no free candidate        ──► Stuck
///              │ move ok, moves == 100    ──► Exhausted
/// ```
///
/// Each attempt emits exactly one event; reaching the budget emits one more
/// (end-of-turns).  The last event of every dweller is terminal.
#[derive(Clone, Debug)]
pub struct Dweller {
    id:              DwellerId,
    start:           Coord,
    position:        Coord,
    moves_completed: u32,
    state:           DwellerState,
}

impl Dweller {
    pub fn new(id: DwellerId, start: Coord) -> Self {
        Self {
            id,
            start,
            position:        start,
            moves_completed: 0,
            state:           DwellerState::Active,
        }
    }

    pub fn id(&self) -> DwellerId {
        self.id
    }

    pub fn start(&self) -> Coord {
        self.start
    }

    pub fn position(&self) -> Coord {
        self.position
    }

    pub fn moves_completed(&self) -> u32 {
        self.moves_completed
    }

    pub fn state(&self) -> DwellerState {
        self.state
    }

    /// Attempt until a terminal state is reached.  Returns the finished
    /// dweller.
    pub fn run<C>(mut self, grid: &Grid, coordinator: &C, events: &Sender<MoveEvent>) -> SimResult<Self>
    where
        C: LockCoordinator + ?Sized,
    {
        while !self.state.is_terminal() {
            self.attempt(grid, coordinator, events)?;
        }
        debug!(
            dweller = %self.id,
            start = %self.start,
            position = %self.position,
            moves = self.moves_completed,
            state = ?self.state,
            "dweller finished"
        );
        Ok(self)
    }

    /// One move attempt.
    ///
    /// Locks the current cell and all four candidates, takes the first empty
    /// candidate in priority order, and emits the resulting event while the
    /// locks are still held.  Emitting before release keeps the collector's
    /// arrival order consistent with the order cells actually changed.
    pub fn attempt<C>(
        &mut self,
        grid:        &Grid,
        coordinator: &C,
        events:      &Sender<MoveEvent>,
    ) -> SimResult<DwellerState>
    where
        C: LockCoordinator + ?Sized,
    {
        if self.state.is_terminal() {
            return Ok(self.state);
        }

        let from = self.position;
        let mut locks = coordinator.acquire(grid, &lock_footprint(from))?;

        let mut destination = None;
        for to in candidate_moves(from) {
            if !locks.is_occupied(to)? {
                destination = Some(to);
                break;
            }
        }

        let Some(to) = destination else {
            self.emit(events, MoveEvent::stuck(self.id, from))?;
            locks.release();
            self.state = DwellerState::Stuck;
            return Ok(self.state);
        };

        locks.move_dweller(from, to)?;
        self.emit(events, MoveEvent::moved(self.id, from, to))?;
        locks.release();

        trace!(dweller = %self.id, %from, %to, "moved");
        self.position = to;
        self.moves_completed += 1;

        if self.moves_completed >= MOVE_BUDGET {
            self.emit(events, MoveEvent::end_of_turns(self.id, self.position))?;
            self.state = DwellerState::Exhausted;
        }
        Ok(self.state)
    }

    fn emit(&self, events: &Sender<MoveEvent>, event: MoveEvent) -> SimResult<()> {
        events
            .send(event)
            .map_err(|_| SimError::CollectorClosed(self.id))
    }
}

//! The shared 4×4 grid.

use std::sync::{Mutex, MutexGuard};

use md_core::{CELL_COUNT, Coord, Layout};

use crate::{GridError, GridResult, LockSet};

/// One grid position and whether a dweller currently stands on it.
#[derive(Copy, Clone, PartialEq, Eq, Debug)]
pub struct Cell {
    pub coord:    Coord,
    pub occupied: bool,
}

/// Fixed toroidal grid with one mutex per cell.
///
/// `Grid` performs no coordination of its own.  Multi-cell access goes
/// through a [`LockCoordinator`](crate::LockCoordinator); the grid only
/// guarantees that whatever set of cells is requested gets locked in
/// ascending coordinate order.
pub struct Grid {
    cells: [Mutex<Cell>; CELL_COUNT],
}

impl Grid {
    pub fn from_layout(layout: &Layout) -> Self {
        Self {
            cells: std::array::from_fn(|i| {
                let coord = Coord::from_index(i);
                Mutex::new(Cell { coord, occupied: layout.is_occupied(coord) })
            }),
        }
    }

    /// Lock a single cell.  Crate-private: outside callers only ever see
    /// cells through a `LockSet`.
    pub(crate) fn lock_cell(&self, coord: Coord) -> GridResult<MutexGuard<'_, Cell>> {
        self.cells[coord.index()]
            .lock()
            .map_err(|_| GridError::Poisoned(coord))
    }

    /// Lock every cell in `coords`, sorted ascending and de-duplicated.
    ///
    /// Ordered acquisition alone rules out circular waits.  Coordinators may
    /// wrap this with extra serialisation but must not bypass it.
    pub fn lock_ordered(&self, coords: &[Coord]) -> GridResult<LockSet<'_>> {
        let mut coords = coords.to_vec();
        coords.sort_unstable();
        coords.dedup();

        let mut guards = Vec::with_capacity(coords.len());
        for c in coords {
            guards.push(self.lock_cell(c)?);
        }
        Ok(LockSet::new(guards))
    }

    /// Occupancy of every cell, each read under its own lock.
    ///
    /// Cells are locked one at a time, so while workers are running the
    /// result need not correspond to any single instant.
    pub fn snapshot(&self) -> GridResult<Layout> {
        let mut layout = Layout::empty();
        for c in Coord::all() {
            layout.set(c, self.lock_cell(c)?.occupied);
        }
        Ok(layout)
    }
}

//! A set of held cell locks.

use std::sync::MutexGuard;

use md_core::Coord;

use crate::{Cell, GridError, GridResult, InvalidMoveReason};

/// Guards for a group of cells, kept sorted by coordinate.
///
/// Occupancy is only reachable through a `LockSet`, so every read and write
/// of a cell happens with that cell's lock held.  Dropping the set (or
/// calling [`release`](Self::release)) unlocks exactly the cells it holds.
pub struct LockSet<'g> {
    guards: Vec<MutexGuard<'g, Cell>>,
}

impl<'g> LockSet<'g> {
    /// `guards` must already be in ascending coordinate order.
    pub(crate) fn new(guards: Vec<MutexGuard<'g, Cell>>) -> Self {
        debug_assert!(guards.windows(2).all(|w| w[0].coord < w[1].coord));
        Self { guards }
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.guards.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.guards.is_empty()
    }

    /// Held coordinates, ascending.
    pub fn coords(&self) -> impl Iterator<Item = Coord> + '_ {
        self.guards.iter().map(|g| g.coord)
    }

    pub fn holds(&self, coord: Coord) -> bool {
        self.position(coord).is_ok()
    }

    pub fn is_occupied(&self, coord: Coord) -> GridResult<bool> {
        let i = self.position(coord)?;
        Ok(self.guards[i].occupied)
    }

    /// Move a dweller from `from` to `to`.
    ///
    /// Succeeds only if `from` is occupied and `to` is empty; both cells must
    /// be held by this set.
    pub fn move_dweller(&mut self, from: Coord, to: Coord) -> GridResult<()> {
        let src = self.position(from)?;
        let dst = self.position(to)?;

        let reason = if !self.guards[src].occupied {
            Some(InvalidMoveReason::SourceEmpty)
        } else if self.guards[dst].occupied {
            Some(InvalidMoveReason::DestinationOccupied)
        } else {
            None
        };
        if let Some(reason) = reason {
            return Err(GridError::InvalidMove { from, to, reason });
        }

        self.guards[src].occupied = false;
        self.guards[dst].occupied = true;
        Ok(())
    }

    /// Unlock every held cell.
    pub fn release(self) {
        drop(self);
    }

    fn position(&self, coord: Coord) -> GridResult<usize> {
        self.guards
            .binary_search_by(|g| g.coord.cmp(&coord))
            .map_err(|_| GridError::NotLocked(coord))
    }
}

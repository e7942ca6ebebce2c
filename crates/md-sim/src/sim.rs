//! The `Mall` runner: spawns workers and the collector, joins them.

use std::thread;

use md_core::{DwellerId, EventLog, Layout};
use md_grid::{GatedCoordinator, Grid, LockCoordinator};
use tracing::{info, warn};

use crate::collector::{EventCollector, event_channel};
use crate::{Dweller, NoopObserver, SimError, SimObserver, SimResult};

/// One simulation setup: a starting layout and a lock coordinator.
///
/// `Mall` owns no mutable state between runs.  Each [`run`](Self::run)
/// builds a fresh [`Grid`], so the same `Mall` can be run repeatedly.
///
/// Create via [`MallBuilder`][crate::MallBuilder] or [`Mall::new`].
pub struct Mall<C: LockCoordinator> {
    pub layout:      Layout,
    pub coordinator: C,
}

impl<C: LockCoordinator> Mall<C> {
    pub fn new(layout: Layout, coordinator: C) -> Self {
        Self { layout, coordinator }
    }

    /// Run the simulation to completion and return the event log.
    ///
    /// Blocks until every dweller has reported a terminal event and the
    /// collector has drained the channel.  If any worker fails, the others
    /// still run to completion; the first failure is returned after all
    /// threads have been joined.
    pub fn run<O: SimObserver + Send>(&self, observer: &mut O) -> SimResult<EventLog> {
        let starts = self.layout.occupied_cells();
        info!(
            dwellers = starts.len(),
            strategy = self.coordinator.name(),
            "mall opening"
        );
        observer.on_sim_start(&self.layout, starts.len());

        let grid = Grid::from_layout(&self.layout);
        let (tx, rx) = event_channel();

        let log = thread::scope(|s| -> SimResult<EventLog> {
            let grid = &grid;
            let coordinator = &self.coordinator;

            let collector_observer = &mut *observer;
            let collector = thread::Builder::new()
                .name("event-collector".to_owned())
                .spawn_scoped(s, move || EventCollector::new(rx, collector_observer).drain())?;

            let mut workers = Vec::with_capacity(starts.len());
            for (i, &start) in starts.iter().enumerate() {
                let id = DwellerId(i as u32);
                let tx = tx.clone();
                let handle = thread::Builder::new()
                    .name(format!("dweller-{i}"))
                    .spawn_scoped(s, move || Dweller::new(id, start).run(grid, coordinator, &tx))?;
                workers.push((id, handle));
            }
            // The collector stops once the last worker's sender is gone.
            drop(tx);

            let mut first_err = None;
            for (id, handle) in workers {
                let result = handle
                    .join()
                    .map_err(|_| SimError::WorkerPanicked(id))
                    .and_then(|r| r);
                if let Err(e) = result {
                    warn!(dweller = %id, error = %e, "worker failed");
                    first_err.get_or_insert(e);
                }
            }

            let log = collector.join().map_err(|_| SimError::CollectorPanicked)?;
            match first_err {
                Some(e) => Err(e),
                None    => Ok(log),
            }
        })?;

        let remaining = grid.snapshot()?.occupied_count();
        if remaining != starts.len() {
            return Err(SimError::DwellerCountChanged {
                expected: starts.len(),
                got:      remaining,
            });
        }

        info!(events = log.len(), "mall closed");
        observer.on_sim_end(&log);
        Ok(log)
    }
}

/// Run `layout` with the default gated coordinator and no observer.
pub fn play_mall(layout: &Layout) -> SimResult<EventLog> {
    Mall::new(*layout, GatedCoordinator::new()).run(&mut NoopObserver)
}

//! Run many independent simulations.

use md_core::{EventLog, Layout};
use md_grid::LockCoordinator;

use crate::{Mall, NoopObserver, SimResult};

/// Run every layout once, each with its own freshly made coordinator.
///
/// Results come back in input order.  With the `parallel` Cargo feature the
/// runs are spread over Rayon's thread pool; each run still spawns its own
/// worker threads.
pub fn run_batch<C, F>(layouts: &[Layout], make_coordinator: F) -> Vec<SimResult<EventLog>>
where
    C: LockCoordinator,
    F: Fn() -> C + Sync,
{
    let run_one = |layout: &Layout| Mall::new(*layout, make_coordinator()).run(&mut NoopObserver);

    #[cfg(not(feature = "parallel"))]
    {
        layouts.iter().map(run_one).collect()
    }

    #[cfg(feature = "parallel")]
    {
        use rayon::prelude::*;

        layouts.par_iter().map(run_one).collect()
    }
}

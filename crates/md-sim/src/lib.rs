//! `md-sim` — the concurrent mall dwellers simulation.
//!
//! # Run model
//!
//! ```text
//! play_mall(layout):
//!   ① Spawn   — one worker thread per occupied cell, plus one collector.
//!   ② Attempt — each worker, up to MOVE_BUDGET times:
//!                 acquire {position} ∪ candidates via the LockCoordinator
//!                 move to the first empty candidate, emit (from, to)
//!                 or emit (position, Stuck) and stop
//!                 release
//!               after the 100th move, emit (position, EndOfTurns) and stop.
//!   ③ Collect — the collector appends events in arrival order until
//!               every worker has hung up.
//!   ④ Join    — all workers and the collector are joined; the log is returned.
//! ```
//!
//! Arrival order is nondeterministic across runs, but every log is a valid
//! serialisation of the moves; [`validate_replay`] checks exactly that.
//!
//! # Cargo features
//!
//! | Feature    | Effect                                                    |
//! |------------|-----------------------------------------------------------|
//! | `parallel` | [`run_batch`] runs simulations on Rayon's thread pool.    |
//! | `serde`    | Serde derives on the `md-core` data types.                |
//!
//! # Quick-start
//!
//! ```rust,ignore
//! use md_core::Layout;
//! use md_sim::{MallBuilder, NoopObserver, validate_replay};
//!
//! let layout: Layout = "X-X-\n-X--\nX-X-\n----".parse()?;
//! let mall = MallBuilder::new().layout(layout).build()?;
//! let log = mall.run(&mut NoopObserver)?;
//! validate_replay(&layout, &log)?;
//! ```

pub mod batch;
pub mod builder;
pub mod collector;
pub mod dweller;
pub mod error;
pub mod observer;
pub mod replay;
pub mod sim;

#[cfg(test)]
mod tests;

pub use batch::run_batch;
pub use builder::MallBuilder;
pub use collector::EventCollector;
pub use dweller::{Dweller, DwellerState};
pub use error::{SimError, SimResult};
pub use observer::{NoopObserver, SimObserver};
pub use replay::{ReplayError, ReplaySummary, validate_replay};
pub use sim::{Mall, play_mall};

//! `md-core` — foundational types for the mall dwellers simulation.
//!
//! This crate is a dependency of every other `md-*` crate.  It has no `md-*`
//! dependencies and minimal external ones (only `rand` and `thiserror`, plus
//! optional `serde`).
//!
//! # What lives here
//!
//! | Module          | Contents                                                |
//! |-----------------|---------------------------------------------------------|
//! | [`coord`]       | `Coord`, `GRID_SIZE`, `CELL_COUNT`, `DIAGONAL_OFFSETS`, `MOVE_BUDGET` |
//! | [`ids`]         | `DwellerId`                                             |
//! | [`layout`]      | `Layout` — the initial 4×4 occupancy matrix             |
//! | [`event`]       | `MoveEvent`, `MoveTarget`, `EventLog`, `DwellerSummary` |
//! | [`rng`]         | `SimRng` for random layouts                             |
//! | [`error`]       | `CoreError`, `CoreResult`                               |
//!
//! # Feature flags
//!
//! | Flag    | Effect                                                     |
//! |---------|------------------------------------------------------------|
//! | `serde` | Adds `Serialize`/`Deserialize` to all public data types.   |

pub mod coord;
pub mod error;
pub mod event;
pub mod ids;
pub mod layout;
pub mod rng;


// ── Re-exports ────────────────────────────────────────────────────────────────

pub use coord::{CELL_COUNT, Coord, DIAGONAL_OFFSETS, GRID_SIZE, MOVE_BUDGET};
pub use error::{CoreError, CoreResult};
pub use event::{DwellerSummary, EventLog, MoveEvent, MoveTarget, Outcome};
pub use ids::DwellerId;
pub use layout::Layout;
pub use rng::SimRng;

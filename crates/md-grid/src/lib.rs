//! `md-grid` — shared grid state and the locking discipline around it.
//!
//! # Crate layout
//!
//! | Module          | Contents                                                   |
//! |-----------------|------------------------------------------------------------|
//! | [`grid`]        | `Grid` — one `Mutex<Cell>` per coordinate                   |
//! | [`resolver`]    | `candidate_moves` — the four diagonal destinations          |
//! | [`lockset`]     | `LockSet` — held cell guards; `is_occupied` / `move_dweller` |
//! | [`coordinator`] | `LockCoordinator` trait, `GatedCoordinator`, `OrderedCoordinator` |
//! | [`error`]       | `GridError`, `GridResult<T>`                               |
//!
//! # Locking model
//!
//! A cell's occupancy flag lives inside that cell's mutex, so it can only be
//! read or written through a [`LockSet`] that holds the guard.  Lock sets
//! are obtained from a [`LockCoordinator`], which always acquires cells in
//! ascending row-major order.  [`GatedCoordinator`] additionally serialises
//! whole acquisitions behind a single gate; [`OrderedCoordinator`] relies on
//! the ordering alone.  Either way the wait graph is cycle-free.

pub mod coordinator;
pub mod error;
pub mod grid;
pub mod lockset;
pub mod resolver;


pub use coordinator::{GatedCoordinator, LockCoordinator, LockStrategy, OrderedCoordinator};
pub use error::{GridError, GridResult, InvalidMoveReason};
pub use grid::{Cell, Grid};
pub use lockset::LockSet;
pub use resolver::{candidate_moves, lock_footprint};

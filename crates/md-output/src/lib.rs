//! `md-output` — event log writers for the mall dwellers simulation.
//!
//! | Backend     | Files created                     |
//! |-------------|-----------------------------------|
//! | CSV         | `events.csv`, `dwellers.csv`      |
//!
//! Backends implement [`OutputWriter`] and are driven by
//! [`EventOutputObserver`], which implements `md_sim::SimObserver`.
//!
//! # Usage
//!
//! ```rust,ignore
//! use md_output::{CsvWriter, EventOutputObserver};
//!
//! let writer = CsvWriter::new(Path::new("./output"))?;
//! let mut obs = EventOutputObserver::new(writer);
//! mall.run(&mut obs)?;
//! if let Some(e) = obs.take_error() {
//!     eprintln!("output error: {e}");
//! }
//! ```

pub mod csv;
pub mod error;
pub mod observer;
pub mod row;
pub mod writer;


pub use csv::CsvWriter;
pub use error::{OutputError, OutputResult};
pub use observer::EventOutputObserver;
pub use row::{DwellerRow, EventRow};
pub use writer::OutputWriter;

//! The `OutputWriter` trait implemented by backend writers.

use crate::{DwellerRow, EventRow, OutputResult};

/// Sink for event and per-dweller rows.
///
/// Errors are stored by [`EventOutputObserver`](crate::EventOutputObserver)
/// and retrieved with its `take_error`.
pub trait OutputWriter {
    /// Write a batch of event rows, in log order.
    fn write_events(&mut self, rows: &[EventRow]) -> OutputResult<()>;

    /// Write the per-dweller summary rows.
    fn write_dwellers(&mut self, rows: &[DwellerRow]) -> OutputResult<()>;

    /// Flush and close all underlying file handles.
    ///
    /// Idempotent; safe to call more than once.
    fn finish(&mut self) -> OutputResult<()>;
}

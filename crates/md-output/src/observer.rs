//! `EventOutputObserver<W>` — bridges `SimObserver` to an `OutputWriter`.

use md_core::{EventLog, MoveEvent};
use md_sim::SimObserver;

use crate::row::{DwellerRow, EventRow};
use crate::writer::OutputWriter;
use crate::{OutputError, OutputResult};

/// A [`SimObserver`] that streams every event to an [`OutputWriter`] as it
/// arrives and writes per-dweller summaries when the run ends.
///
/// Errors from the writer are stored internally because `SimObserver`
/// methods have no return value.  After `mall.run()` returns, check for
/// errors with [`take_error`][Self::take_error].
pub struct EventOutputObserver<W: OutputWriter> {
    writer:     W,
    next_seq:   u64,
    last_error: Option<OutputError>,
}

impl<W: OutputWriter> EventOutputObserver<W> {
    pub fn new(writer: W) -> Self {
        Self {
            writer,
            next_seq:   0,
            last_error: None,
        }
    }

    /// Take the stored write error (if any) after the run returns.
    ///
    /// Returns `None` if all writes succeeded.
    pub fn take_error(&mut self) -> Option<OutputError> {
        self.last_error.take()
    }

    /// Unwrap the inner writer (e.g. to inspect files after the run).
    pub fn into_writer(self) -> W {
        self.writer
    }

    fn store_err(&mut self, result: OutputResult<()>) {
        if let Err(e) = result {
            // Keep only the first error.
            if self.last_error.is_none() {
                self.last_error = Some(e);
            }
        }
    }
}

impl<W: OutputWriter> SimObserver for EventOutputObserver<W> {
    fn on_event(&mut self, event: &MoveEvent) {
        let row = EventRow::new(self.next_seq, event);
        self.next_seq += 1;
        let result = self.writer.write_events(&[row]);
        self.store_err(result);
    }

    fn on_sim_end(&mut self, log: &EventLog) {
        let rows: Vec<DwellerRow> = log.summaries().iter().map(DwellerRow::from).collect();
        if !rows.is_empty() {
            let result = self.writer.write_dwellers(&rows);
            self.store_err(result);
        }
        let result = self.writer.finish();
        self.store_err(result);
    }
}

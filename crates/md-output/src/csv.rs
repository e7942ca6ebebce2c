//! CSV output backend.
//!
//! Creates two files in the configured output directory:
//! - `events.csv`
//! - `dwellers.csv`

use std::fs::File;
use std::path::Path;

use csv::Writer;

use crate::writer::OutputWriter;
use crate::{DwellerRow, EventRow, OutputResult};

fn opt(v: Option<u8>) -> String {
    v.map(|n| n.to_string()).unwrap_or_default()
}

/// Writes the event log and dweller summaries to two CSV files.
pub struct CsvWriter {
    events:   Writer<File>,
    dwellers: Writer<File>,
    finished: bool,
}

impl CsvWriter {
    /// Create `dir` if needed, open (or truncate) the two CSV files, and
    /// write the header rows.
    pub fn new(dir: &Path) -> OutputResult<Self> {
        std::fs::create_dir_all(dir)?;

        let mut events = Writer::from_path(dir.join("events.csv"))?;
        events.write_record(["seq", "dweller", "from_row", "from_col", "kind", "to_row", "to_col"])?;

        let mut dwellers = Writer::from_path(dir.join("dwellers.csv"))?;
        dwellers.write_record([
            "dweller", "start_row", "start_col", "final_row", "final_col", "moves", "outcome",
        ])?;

        Ok(Self {
            events,
            dwellers,
            finished: false,
        })
    }
}

impl OutputWriter for CsvWriter {
    fn write_events(&mut self, rows: &[EventRow]) -> OutputResult<()> {
        for row in rows {
            self.events.write_record(&[
                row.seq.to_string(),
                row.dweller.to_string(),
                row.from_row.to_string(),
                row.from_col.to_string(),
                row.kind.to_owned(),
                opt(row.to_row),
                opt(row.to_col),
            ])?;
        }
        Ok(())
    }

    fn write_dwellers(&mut self, rows: &[DwellerRow]) -> OutputResult<()> {
        for row in rows {
            self.dwellers.write_record(&[
                row.dweller.to_string(),
                row.start_row.to_string(),
                row.start_col.to_string(),
                row.final_row.to_string(),
                row.final_col.to_string(),
                row.moves.to_string(),
                row.outcome.to_owned(),
            ])?;
        }
        Ok(())
    }

    fn finish(&mut self) -> OutputResult<()> {
        if self.finished {
            return Ok(());
        }
        self.finished = true;
        self.events.flush()?;
        self.dwellers.flush()?;
        Ok(())
    }
}

//! The four migration procedures
//!
//! Each procedure consumes one cursor to completion and drives one output
//! sink, aborting on the first error. The shared pieces live here: the
//! every-hundredth-record progress logger and the JSON-line writer.

pub mod backfill;
pub mod merge;
pub mod reviews;
pub mod sample;

use std::io::Write;

use serde::Serialize;
use tracing::info;

use crate::error::Result;

/// Interval between progress log lines
const PROGRESS_INTERVAL: u64 = 100;

/// Counts emitted records and logs every hundredth
pub(crate) struct Progress {
    label: &'static str,
    count: u64,
}

impl Progress {
    pub(crate) fn new(label: &'static str) -> Self {
        Self { label, count: 0 }
    }

    /// Record one emitted record
    pub(crate) fn tick(&mut self) {
        self.count += 1;
        if self.count % PROGRESS_INTERVAL == 0 {
            info!("{}: {} records", self.label, self.count);
        }
    }

    pub(crate) fn count(&self) -> u64 {
        self.count
    }
}

/// Serialize `record` as one JSON line on `out`
pub(crate) fn write_json_line<W: Write, T: Serialize>(out: &mut W, record: &T) -> Result<()> {
    serde_json::to_writer(&mut *out, record)?;
    out.write_all(b"\n")?;
    Ok(())
}

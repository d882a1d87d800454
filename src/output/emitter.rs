//! Delimited record emitter
//!
//! Serializes precinct records into the fixed 27-column `;`-delimited
//! schema. The separator is never escaped; the source data is assumed not
//! to contain it, which is a documented limitation rather than something to
//! silently repair.

use crate::extract::PrecinctRecord;
use crate::schema::{COLUMNS, FIELD_SEPARATOR};
use crate::Result;
use std::io::Write;

/// Writes the header line and precinct records to an append-only sink.
///
/// Each line is formatted in memory and handed to the sink as a single
/// write, so a record is never interleaved mid-line even if the sink is
/// shared.
pub struct RecordEmitter<W: Write> {
    sink: W,
    header_written: bool,
}

impl<W: Write> RecordEmitter<W> {
    pub fn new(sink: W) -> Self {
        Self {
            sink,
            header_written: false,
        }
    }

    /// Writes the fixed 27-column header line. Idempotent: the header goes
    /// out exactly once no matter how often this is called.
    pub fn write_header(&mut self) -> Result<()> {
        if self.header_written {
            return Ok(());
        }
        let mut line = COLUMNS.join(&FIELD_SEPARATOR.to_string());
        line.push('\n');
        self.sink.write_all(line.as_bytes())?;
        self.header_written = true;
        Ok(())
    }

    /// Writes one record as `region;precinct;v1;...;v25`
    pub fn write_record(&mut self, record: &PrecinctRecord) -> Result<()> {
        let mut line = String::with_capacity(
            record.region.len() + record.precinct.len() + record.metrics.len() * 8,
        );
        line.push_str(&record.region);
        line.push(FIELD_SEPARATOR);
        line.push_str(&record.precinct);
        for value in &record.metrics {
            line.push(FIELD_SEPARATOR);
            line.push_str(&value.to_string());
        }
        line.push('\n');
        self.sink.write_all(line.as_bytes())?;
        Ok(())
    }

    /// Flushes the underlying sink
    pub fn flush(&mut self) -> Result<()> {
        self.sink.flush()?;
        Ok(())
    }

    /// Consumes the emitter and returns the sink
    pub fn into_inner(self) -> W {
        self.sink
    }
}

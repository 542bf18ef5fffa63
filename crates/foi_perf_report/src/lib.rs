//! CSV report writer for university FOI statistics.

use foi_perf::{ReportRow, RowSink, HEADERS};
use std::io::Write;

/// Streams report rows as CSV, flushing after every record so partial output
/// survives a failed run.
pub struct CsvReport<W: Write> {
    writer: csv::Writer<W>,
}

impl<W: Write> CsvReport<W> {
    pub fn new(out: W) -> Self {
        let writer = csv::WriterBuilder::new()
            .has_headers(false)
            .terminator(csv::Terminator::CRLF)
            .from_writer(out);
        Self { writer }
    }

    /// Flush and hand back the underlying writer.
    pub fn into_inner(self) -> Result<W, ReportError> {
        self.writer
            .into_inner()
            .map_err(|e| ReportError::Io(e.into_error()))
    }

    fn write_record<I, T>(&mut self, record: I) -> Result<(), ReportError>
    where
        I: IntoIterator<Item = T>,
        T: AsRef<[u8]>,
    {
        self.writer.write_record(record).map_err(ReportError::Csv)?;
        self.writer.flush().map_err(ReportError::Io)
    }
}

impl<W: Write> RowSink for CsvReport<W> {
    type Error = ReportError;

    fn write_header(&mut self) -> Result<(), ReportError> {
        self.write_record(HEADERS)
    }

    fn write_row(&mut self, row: &ReportRow) -> Result<(), ReportError> {
        self.write_record(row.to_record())
    }
}

#[derive(Debug)]
pub enum ReportError {
    Io(std::io::Error),
    Csv(csv::Error),
}

impl std::fmt::Display for ReportError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ReportError::Io(e) => write!(f, "io: {e}"),
            ReportError::Csv(e) => write!(f, "csv: {e}"),
        }
    }
}

impl std::error::Error for ReportError {}

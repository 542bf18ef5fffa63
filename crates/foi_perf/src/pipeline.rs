//! Directory -> filter -> per-body fetch -> flatten -> sink.

use crate::directory::{universities, DirectoryError};
use crate::report::{FlattenError, ReportRow, RowSink};
use crate::wdtk::{FetchError, Fetcher};
use thiserror::Error;
use tracing::info;

#[derive(Error, Debug)]
pub enum RunError {
    #[error("fetch: {0}")]
    Fetch(#[from] FetchError),
    #[error("directory: {0}")]
    Directory(#[from] DirectoryError),
    #[error("flatten: {0}")]
    Flatten(#[from] FlattenError),
    #[error("output: {0}")]
    Sink(#[source] Box<dyn std::error::Error + Send + Sync>),
}

impl RunError {
    fn sink<E: std::error::Error + Send + Sync + 'static>(e: E) -> Self {
        RunError::Sink(Box::new(e))
    }
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct RunSummary {
    /// Universities matched in the directory.
    pub matched: u64,
    pub rows: u64,
    pub requests: u64,
}

/// Write the header, then one row per university as soon as its statistics
/// arrive. Stops at the first error; rows already written stay written.
pub async fn run<S: RowSink>(fetcher: &Fetcher, sink: &mut S) -> Result<RunSummary, RunError> {
    sink.write_header().map_err(RunError::sink)?;

    let directory = fetcher.directory_csv().await?;
    let mut matched = 0u64;
    let mut rows = 0u64;
    for org in universities(&directory) {
        let org = org?;
        matched += 1;
        info!(name = %org.name, code = %org.code, "matched university");
        let info = fetcher.body_info(&org.code).await?;
        let row = ReportRow::flatten(&org, &info)?;
        sink.write_row(&row).map_err(RunError::sink)?;
        rows += 1;
    }

    let summary = RunSummary {
        matched,
        rows,
        requests: fetcher.request_count(),
    };
    info!(
        matched = summary.matched,
        rows = summary.rows,
        requests = summary.requests,
        "report complete"
    );
    Ok(summary)
}

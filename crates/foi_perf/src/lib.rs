//! foi_perf — academic FOI conformance from the WhatDoTheyKnow API.
//!
//! Fetches the directory of FOI-subject bodies, keeps the universities, pulls
//! each one's request statistics and flattens them into report rows.
//! Read-only; unauthenticated; strictly one request at a time.

pub mod directory;
pub mod pipeline;
pub mod report;
pub mod wdtk;

pub use directory::{universities, DirectoryError, Organisation};
pub use pipeline::{run, RunError, RunSummary};
pub use report::{FlattenError, ReportRow, RowSink, FIELDS, HEADERS};
pub use wdtk::{DetailInfo, FetchConfig, FetchError, Fetcher};

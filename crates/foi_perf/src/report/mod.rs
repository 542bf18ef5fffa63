//! Report rows (CSV is written by the foi_perf_report crate).

use crate::directory::Organisation;
use crate::wdtk::DetailInfo;
use serde_json::{Number, Value};
use thiserror::Error;

/// `info` keys read for each body, in column order.
pub const FIELDS: [&str; 5] = [
    "requests_count",
    "requests_successful_count",
    "requests_not_held_count",
    "requests_overdue_count",
    "requests_visible_classified_count",
];

/// Columns 2-6 correspond to `FIELDS`.
pub const HEADERS: [&str; 7] = [
    "Name",
    "Total",
    "Successful",
    "NotHeld",
    "Overdue",
    "Count",
    "Code",
];

#[derive(Error, Debug, PartialEq)]
pub enum FlattenError {
    #[error("{code}: info has no `{field}`")]
    MissingField { code: String, field: &'static str },
    #[error("{code}: `{field}` is not a number: {value}")]
    NotNumeric {
        code: String,
        field: &'static str,
        value: String,
    },
}

/// One university's statistics, flanked by its name and code.
#[derive(Clone, Debug, PartialEq)]
pub struct ReportRow {
    pub name: String,
    pub total: Number,
    pub successful: Number,
    pub not_held: Number,
    pub overdue: Number,
    pub count: Number,
    pub code: String,
}

impl ReportRow {
    pub fn flatten(org: &Organisation, info: &DetailInfo) -> Result<Self, FlattenError> {
        let [total, successful, not_held, overdue, count] = FIELDS;
        Ok(Self {
            name: org.name.clone(),
            total: number(org, info, total)?,
            successful: number(org, info, successful)?,
            not_held: number(org, info, not_held)?,
            overdue: number(org, info, overdue)?,
            count: number(org, info, count)?,
            code: org.code.clone(),
        })
    }

    /// Cells in `HEADERS` order.
    pub fn to_record(&self) -> [String; 7] {
        [
            self.name.clone(),
            self.total.to_string(),
            self.successful.to_string(),
            self.not_held.to_string(),
            self.overdue.to_string(),
            self.count.to_string(),
            self.code.clone(),
        ]
    }
}

fn number(
    org: &Organisation,
    info: &DetailInfo,
    field: &'static str,
) -> Result<Number, FlattenError> {
    match info.get(field) {
        Some(Value::Number(n)) => Ok(n.clone()),
        Some(other) => Err(FlattenError::NotNumeric {
            code: org.code.clone(),
            field,
            value: other.to_string(),
        }),
        None => Err(FlattenError::MissingField {
            code: org.code.clone(),
            field,
        }),
    }
}

/// Destination for the report: a header, then rows in pipeline order.
pub trait RowSink {
    type Error: std::error::Error + Send + Sync + 'static;

    fn write_header(&mut self) -> Result<(), Self::Error>;

    fn write_row(&mut self, row: &ReportRow) -> Result<(), Self::Error>;
}

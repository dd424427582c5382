//! Error taxonomy for the analysis pipeline
//!
//! Row-level parse failures carry the row index, column name, and offending
//! value so the caller can locate the bad input. Correlator precondition and
//! window range violations are fatal to the call that raised them.

use chrono::NaiveDateTime;
use thiserror::Error;

/// Errors raised by the analysis pipeline
#[derive(Error, Debug, Clone, PartialEq)]
pub enum AnalysisError {
    /// A field could not be parsed or failed schema validation
    #[error("row {row}: cannot accept {column} value {value:?}: {reason}")]
    Parse {
        row: usize,
        column: &'static str,
        value: String,
        reason: String,
    },

    /// Input to the as-of correlator was not sorted ascending by its time field
    #[error("{input} input is not sorted ascending by time (violation at row {row})")]
    Precondition { input: &'static str, row: usize },

    /// Window lower bound is after the upper bound
    #[error("window start {start} is after window end {end}")]
    InvalidRange {
        start: NaiveDateTime,
        end: NaiveDateTime,
    },

    /// Mass/downtime ratio requested over a zero duration
    #[error("row {row}: event duration is zero, mass/downtime ratio is undefined")]
    ZeroDuration { row: usize },
}

pub type Result<T> = std::result::Result<T, AnalysisError>;

//! Error types for gymcal.

use chrono::{NaiveDate, NaiveDateTime};
use thiserror::Error;

/// Errors that can occur while building or writing a schedule.
#[derive(Error, Debug)]
pub enum GymcalError {
    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Invalid date range: end date {end} is before start date {start}")]
    InvalidRange { start: NaiveDate, end: NaiveDate },

    #[error("Local time {0} does not exist in timezone {1}")]
    NonexistentLocalTime(NaiveDateTime, String),

    #[error("ICS generation error: {0}")]
    IcsGenerate(String),

    #[error("ICS parse error: {0}")]
    IcsParse(String),

    #[error("Recurrence error: {0}")]
    Recurrence(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Result type alias for gymcal operations.
pub type GymcalResult<T> = Result<T, GymcalError>;

//! Core error types for korder-habits.
//!
//! All engine failures are deterministic given their inputs: either the
//! supplied data is malformed (validation) or a caller holds a stale
//! reference (not found). There is no transient/retryable class.

use chrono::NaiveDate;
use thiserror::Error;

use crate::habit::Weekday;

/// Core error type for korder-habits.
#[derive(Error, Debug)]
pub enum CoreError {
    /// Validation errors
    #[error("Validation error: {0}")]
    Validation(#[from] ValidationError),

    /// Stale-reference errors
    #[error("Not found: {0}")]
    NotFound(#[from] NotFoundError),

    /// Serialization/deserialization errors from the store adapter
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Validation errors.
///
/// Malformed input is rejected rather than silently normalized.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ValidationError {
    /// Cycle range is inverted
    #[error("Invalid cycle range: start_date ({start}) must not be after end_date ({end})")]
    InvalidDateRange { start: NaiveDate, end: NaiveDate },

    /// Cycle has no scheduled weekdays
    #[error("Cycle '{cycle_id}' has an empty weekday set")]
    EmptyWeekdays { cycle_id: String },

    /// Date falls outside the cycle's inclusive range
    #[error("Date {date} is outside cycle range {start}..{end}")]
    OutOfCycleRange {
        date: NaiveDate,
        start: NaiveDate,
        end: NaiveDate,
    },

    /// Date falls on a weekday the cycle does not schedule
    #[error("Date {date} falls on {weekday}, which is not in the cycle's weekday set")]
    UnscheduledWeekday { date: NaiveDate, weekday: Weekday },

    /// Weekday name in a stored document is not one of monday..sunday
    #[error("Unknown weekday name: '{value}'")]
    UnknownWeekday { value: String },

    /// Calendar date string could not be parsed
    #[error("Invalid calendar date: '{value}'")]
    InvalidDate { value: String },
}

/// Stale-reference errors.
///
/// A missing cycle or habit in the supplied collections indicates a caller
/// bug, not a data problem; surfaced, never retried.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum NotFoundError {
    /// Referenced cycle absent from the supplied collection
    #[error("Cycle '{cycle_id}' not found")]
    CycleNotFound { cycle_id: String },

    /// Referenced habit absent from the supplied collection
    #[error("Habit '{habit_id}' not found")]
    HabitNotFound { habit_id: String },
}

/// Result type alias for CoreError
pub type Result<T, E = CoreError> = std::result::Result<T, E>;

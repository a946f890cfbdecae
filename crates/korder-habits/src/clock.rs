//! UTC calendar-date helpers.
//!
//! Every day-boundary computation in this crate happens in a single fixed
//! reference frame (UTC). Stored timestamps are collapsed to a calendar date
//! exactly once, here, so a record written at 23:30 UTC and one written at
//! 00:10 UTC the same day compare equal. There is no clock singleton and no
//! override hook: "today" is always a `NaiveDate` supplied by the caller and
//! threaded through every engine call within one logical operation.

use chrono::{DateTime, NaiveDate, NaiveTime, Utc};

use crate::error::ValidationError;

/// Collapse a stored timestamp to its UTC calendar date, discarding
/// time-of-day.
pub fn calendar_date(ts: DateTime<Utc>) -> NaiveDate {
    ts.date_naive()
}

/// True iff two timestamps fall on the same UTC calendar day.
pub fn same_calendar_day(a: DateTime<Utc>, b: DateTime<Utc>) -> bool {
    calendar_date(a) == calendar_date(b)
}

/// Midnight UTC for a calendar date, for writing back to stores that keep
/// full timestamps.
pub fn midnight_utc(date: NaiveDate) -> DateTime<Utc> {
    date.and_time(NaiveTime::MIN).and_utc()
}

/// Parse an ISO 8601 calendar date (`YYYY-MM-DD`).
pub fn parse_calendar_date(value: &str) -> Result<NaiveDate, ValidationError> {
    value
        .parse::<NaiveDate>()
        .map_err(|_| ValidationError::InvalidDate {
            value: value.to_string(),
        })
}

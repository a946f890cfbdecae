//! Weekday names with a fixed UTC lookup, replacing locale-dependent
//! formatting. The lowercase names match the stored document enum.

use std::fmt;
use std::str::FromStr;

use chrono::{Datelike, NaiveDate};
use serde::{Deserialize, Serialize};

use crate::error::ValidationError;

/// Day of the week a cycle can schedule.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Weekday {
    Monday,
    Tuesday,
    Wednesday,
    Thursday,
    Friday,
    Saturday,
    Sunday,
}

/// Fixed name table indexed by days-from-monday.
const NAMES: [&str; 7] = [
    "monday",
    "tuesday",
    "wednesday",
    "thursday",
    "friday",
    "saturday",
    "sunday",
];

const ALL: [Weekday; 7] = [
    Weekday::Monday,
    Weekday::Tuesday,
    Weekday::Wednesday,
    Weekday::Thursday,
    Weekday::Friday,
    Weekday::Saturday,
    Weekday::Sunday,
];

impl Weekday {
    /// The weekday of a calendar date.
    pub fn of(date: NaiveDate) -> Self {
        ALL[date.weekday().num_days_from_monday() as usize]
    }

    /// Lowercase name as stored in habit documents.
    pub fn name(&self) -> &'static str {
        NAMES[*self as usize]
    }
}

impl From<chrono::Weekday> for Weekday {
    fn from(day: chrono::Weekday) -> Self {
        ALL[day.num_days_from_monday() as usize]
    }
}

impl FromStr for Weekday {
    type Err = ValidationError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        NAMES
            .iter()
            .position(|name| *name == value)
            .map(|i| ALL[i])
            .ok_or_else(|| ValidationError::UnknownWeekday {
                value: value.to_string(),
            })
    }
}

impl fmt::Display for Weekday {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

//! Habit data model.
//!
//! The normalized shapes every store revision is adapted into before the
//! engine sees them: a definition owning zero or more cycles, each cycle a
//! contiguous date range plus a weekly recurrence pattern, each check-in a
//! per-day completion record belonging to one cycle. All dates are calendar
//! dates compared in UTC.

mod weekday;

pub use weekday::Weekday;

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

use crate::error::ValidationError;

/// A habit as the user defined it.
///
/// Immutable once created except for title/description edits. Title
/// uniqueness per user is the store collaborator's concern, not enforced
/// here.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HabitDefinition {
    /// Habit ID
    pub id: String,

    /// Owning user
    pub user_id: String,

    /// Title, unique per user
    pub title: String,

    /// Optional free-text description
    pub description: Option<String>,

    /// Creation timestamp
    pub created_at: DateTime<Utc>,
}

/// A contiguous date range plus the weekdays the habit is due on.
///
/// A definition may hold overlapping or disjoint cycles (a habit paused and
/// resumed with different weekdays); resolution order lives in the engine.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HabitCycle {
    /// Cycle ID
    pub id: String,

    /// Owning habit
    pub habit_id: String,

    /// First scheduled day, inclusive
    pub start_date: NaiveDate,

    /// Last scheduled day, inclusive
    pub end_date: NaiveDate,

    /// Scheduled weekdays, non-empty
    pub weekdays: Vec<Weekday>,
}

impl HabitCycle {
    /// Check the cycle invariants: `start_date <= end_date` and a non-empty
    /// weekday set.
    pub fn validate(&self) -> Result<(), ValidationError> {
        if self.start_date > self.end_date {
            return Err(ValidationError::InvalidDateRange {
                start: self.start_date,
                end: self.end_date,
            });
        }
        if self.weekdays.is_empty() {
            return Err(ValidationError::EmptyWeekdays {
                cycle_id: self.id.clone(),
            });
        }
        Ok(())
    }

    /// True iff `date` falls within `[start_date, end_date]` inclusive.
    pub fn contains(&self, date: NaiveDate) -> bool {
        self.start_date <= date && date <= self.end_date
    }

    /// True iff `date` is within range and its weekday is scheduled.
    pub fn is_scheduled_on(&self, date: NaiveDate) -> bool {
        self.contains(date) && self.weekdays.contains(&Weekday::of(date))
    }
}

/// A per-day record of whether a habit's due occurrence was completed.
///
/// At most one exists per (cycle, calendar date) pair; the engine's upsert
/// enforces this, not a store constraint.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CheckIn {
    /// Owning cycle
    pub cycle_id: String,

    /// The day being checked, no time-of-day component
    pub date: NaiveDate,

    /// Whether the occurrence was completed
    pub checked: bool,

    /// Why it was missed; only meaningful when `checked` is false
    pub missed_note: Option<String>,
}

/// A habit definition bundled with its cycles and check-ins.
///
/// The unit the caller loads from the store and hands to the engine. The
/// engine issues no queries of its own.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HabitRecord {
    pub definition: HabitDefinition,
    pub cycles: Vec<HabitCycle>,
    pub check_ins: Vec<CheckIn>,
}

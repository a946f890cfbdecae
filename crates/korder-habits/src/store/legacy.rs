//! Legacy schema normalization.
//!
//! Before the habit/cycle/check-in split, a habit document carried its
//! date range, weekdays, and check-ins inline. The oldest generation
//! recorded completion as a `status` string instead of a `checked` flag.
//! Splitting such a document mints one cycle and lifts the embedded
//! check-ins onto it, which is the same transformation the production
//! migration performed at the store level.

use chrono::{DateTime, Utc};
use serde::Deserialize;
use uuid::Uuid;

use crate::clock;
use crate::error::Result;
use crate::habit::{CheckIn, HabitCycle, HabitDefinition, HabitRecord};

/// Habit document in either embedded generation.
///
/// Field aliases absorb the drift between generations: the oldest wrote
/// `name`/`checkins`, the later one `title`/`checkIns`.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LegacyHabitDoc {
    #[serde(rename = "_id")]
    pub id: String,
    #[serde(default)]
    pub user_id: Option<String>,
    #[serde(alias = "name")]
    pub title: String,
    #[serde(default)]
    pub description: Option<String>,
    pub start_date: DateTime<Utc>,
    pub end_date: DateTime<Utc>,
    #[serde(default)]
    pub weekdays: Vec<String>,
    #[serde(rename = "checkIns", alias = "checkins", default)]
    pub check_ins: Vec<LegacyCheckinDoc>,
    pub created_at: DateTime<Utc>,
}

/// Embedded check-in in either legacy generation.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LegacyCheckinDoc {
    pub date: DateTime<Utc>,
    /// Later embedded generation
    #[serde(default)]
    pub checked: Option<bool>,
    /// Oldest generation: "done" or "missed"
    #[serde(default)]
    pub status: Option<String>,
    #[serde(default)]
    pub missed_note: Option<String>,
}

impl LegacyCheckinDoc {
    /// Completion flag across generations: an explicit `checked` wins, then
    /// the `status` string ("done" means done), and a bare `{date}` entry
    /// was only ever written for a completed day.
    fn resolved_checked(&self) -> bool {
        match (self.checked, self.status.as_deref()) {
            (Some(checked), _) => checked,
            (None, Some(status)) => status == "done",
            (None, None) => true,
        }
    }
}

impl LegacyHabitDoc {
    /// Parse a legacy habit from its stored JSON form.
    pub fn from_json(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }

    /// Split into the current model: the definition, one minted cycle, and
    /// the lifted check-ins.
    pub fn split(self) -> Result<HabitRecord> {
        let cycle_id = Uuid::new_v4().to_string();

        let cycle = HabitCycle {
            id: cycle_id.clone(),
            habit_id: self.id.clone(),
            start_date: clock::calendar_date(self.start_date),
            end_date: clock::calendar_date(self.end_date),
            weekdays: self
                .weekdays
                .iter()
                .map(|name| Ok(name.parse()?))
                .collect::<Result<Vec<_>>>()?,
        };
        cycle.validate()?;

        let check_ins = self
            .check_ins
            .iter()
            .map(|doc| {
                let checked = doc.resolved_checked();
                CheckIn {
                    cycle_id: cycle_id.clone(),
                    date: clock::calendar_date(doc.date),
                    checked,
                    missed_note: if checked { None } else { doc.missed_note.clone() },
                }
            })
            .collect();

        Ok(HabitRecord {
            definition: HabitDefinition {
                id: self.id,
                // The oldest generation predates per-user ownership.
                user_id: self.user_id.unwrap_or_default(),
                title: self.title,
                description: self.description,
                created_at: self.created_at,
            },
            cycles: vec![cycle],
            check_ins,
        })
    }
}

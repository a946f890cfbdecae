//! Persistence-shape adapter.
//!
//! The backing store keeps habits as JSON documents with camelCase keys and
//! full timestamps; three generations of the schema exist side by side.
//! This module normalizes the current split shape (habit + cycles +
//! check-ins as separate documents) into the engine model, collapsing every
//! timestamp to its UTC calendar date exactly once on the way in. The
//! legacy embedded shapes live in [`legacy`]; the engine itself is never
//! schema-aware.

pub mod cleanup;
pub mod legacy;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::clock;
use crate::error::Result;
use crate::habit::{CheckIn, HabitCycle, HabitDefinition, HabitRecord, Weekday};

/// Stored habit document (current schema).
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HabitDoc {
    #[serde(rename = "_id")]
    pub id: String,
    pub user_id: String,
    pub title: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    pub created_at: DateTime<Utc>,
}

/// Stored habit cycle document (current schema).
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HabitCycleDoc {
    #[serde(rename = "_id")]
    pub id: String,
    pub habit_id: String,
    /// Full timestamp in the store; only the UTC calendar date is meaningful
    pub start_date: DateTime<Utc>,
    pub end_date: DateTime<Utc>,
    pub weekdays: Vec<String>,
}

/// Stored check-in document (current schema).
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HabitCheckinDoc {
    pub habit_cycle_id: String,
    /// Full timestamp in the store; only the UTC calendar date is meaningful
    pub date: DateTime<Utc>,
    #[serde(default = "checked_default")]
    pub checked: bool,
    #[serde(default)]
    pub missed_note: Option<String>,
}

fn checked_default() -> bool {
    true
}

/// One habit's documents as loaded from the store.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HabitDocumentSet {
    pub habit: HabitDoc,
    pub cycles: Vec<HabitCycleDoc>,
    pub check_ins: Vec<HabitCheckinDoc>,
}

impl HabitDocumentSet {
    /// Parse a document set from its stored JSON form.
    pub fn from_json(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }

    /// Normalize into the engine model.
    ///
    /// Weekday names and cycle invariants are checked here; malformed
    /// stored data is rejected at the boundary.
    pub fn into_record(self) -> Result<HabitRecord> {
        let definition = HabitDefinition {
            id: self.habit.id,
            user_id: self.habit.user_id,
            title: self.habit.title,
            description: self.habit.description,
            created_at: self.habit.created_at,
        };

        let mut cycles = Vec::with_capacity(self.cycles.len());
        for doc in self.cycles {
            let cycle = HabitCycle {
                id: doc.id,
                habit_id: doc.habit_id,
                start_date: clock::calendar_date(doc.start_date),
                end_date: clock::calendar_date(doc.end_date),
                weekdays: parse_weekdays(&doc.weekdays)?,
            };
            cycle.validate()?;
            cycles.push(cycle);
        }

        let check_ins = self
            .check_ins
            .into_iter()
            .map(|doc| CheckIn {
                cycle_id: doc.habit_cycle_id,
                date: clock::calendar_date(doc.date),
                checked: doc.checked,
                missed_note: doc.missed_note,
            })
            .collect();

        Ok(HabitRecord {
            definition,
            cycles,
            check_ins,
        })
    }

    /// Project a model record back into stored documents.
    ///
    /// Calendar dates become midnight-UTC timestamps, so a round trip
    /// preserves `(date, checked, missed_note)` exactly.
    pub fn from_record(record: &HabitRecord) -> Self {
        Self {
            habit: HabitDoc {
                id: record.definition.id.clone(),
                user_id: record.definition.user_id.clone(),
                title: record.definition.title.clone(),
                description: record.definition.description.clone(),
                created_at: record.definition.created_at,
            },
            cycles: record
                .cycles
                .iter()
                .map(|cycle| HabitCycleDoc {
                    id: cycle.id.clone(),
                    habit_id: cycle.habit_id.clone(),
                    start_date: clock::midnight_utc(cycle.start_date),
                    end_date: clock::midnight_utc(cycle.end_date),
                    weekdays: cycle.weekdays.iter().map(|w| w.name().to_string()).collect(),
                })
                .collect(),
            check_ins: record
                .check_ins
                .iter()
                .map(|ci| HabitCheckinDoc {
                    habit_cycle_id: ci.cycle_id.clone(),
                    date: clock::midnight_utc(ci.date),
                    checked: ci.checked,
                    missed_note: ci.missed_note.clone(),
                })
                .collect(),
        }
    }
}

fn parse_weekdays(names: &[String]) -> Result<Vec<Weekday>> {
    names
        .iter()
        .map(|name| Ok(name.parse::<Weekday>()?))
        .collect()
}

//! Dashboard classification over a set of habits.
//!
//! Feeds the stats and day-planner surfaces: which habits have not started
//! yet, which have run their course, which carry missed days, and what is
//! due on a given calendar day.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use super::{CheckInStatus, HabitScheduleEngine};
use crate::error::Result;
use crate::habit::HabitRecord;

/// Identity of a habit inside a classification bucket.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HabitSummary {
    pub habit_id: String,
    pub title: String,
}

/// A habit with at least one missed date, carrying the flattened list.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MissedHabit {
    pub habit_id: String,
    pub title: String,
    /// Missed dates across all cycles, ascending, deduplicated
    pub dates: Vec<NaiveDate>,
}

/// Independent classification buckets as of a reference day.
///
/// Not a partition: a habit whose last cycle ended with unchecked days is
/// both `completed` and `missed`.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct HabitClassification {
    /// Earliest cycle start is strictly after the reference day
    pub upcoming: Vec<HabitSummary>,
    /// Latest cycle end is strictly before the reference day
    pub completed: Vec<HabitSummary>,
    /// At least one missed date across any cycle
    pub missed: Vec<MissedHabit>,
}

/// One habit due on a queried day, with its check-in status.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DayListEntry {
    pub habit_id: String,
    pub title: String,
    pub cycle_id: String,
    pub status: CheckInStatus,
}

impl HabitScheduleEngine {
    /// Partition habits into upcoming/completed/missed buckets as of
    /// `today`.
    ///
    /// Missed dates are computed per cycle over the cycle's full history up
    /// to `today`, then flattened per habit. Buckets are independent
    /// classifications, so one habit may appear in more than one.
    pub fn classify_habits(
        &self,
        records: &[HabitRecord],
        today: NaiveDate,
    ) -> Result<HabitClassification> {
        let mut classification = HabitClassification::default();

        for record in records {
            let summary = HabitSummary {
                habit_id: record.definition.id.clone(),
                title: record.definition.title.clone(),
            };

            if let Some(earliest) = record.cycles.iter().map(|c| c.start_date).min() {
                if earliest > today {
                    classification.upcoming.push(summary.clone());
                }
            }
            if let Some(latest) = record.cycles.iter().map(|c| c.end_date).max() {
                if latest < today {
                    classification.completed.push(summary.clone());
                }
            }

            let mut dates: Vec<NaiveDate> = Vec::new();
            for cycle in &record.cycles {
                let missed = self.compute_missed_dates(
                    cycle,
                    &record.check_ins,
                    cycle.start_date,
                    today,
                    today,
                )?;
                dates.extend(missed);
            }
            dates.sort_unstable();
            dates.dedup();

            if !dates.is_empty() {
                classification.missed.push(MissedHabit {
                    habit_id: summary.habit_id,
                    title: summary.title,
                    dates,
                });
            }
        }

        Ok(classification)
    }

    /// The habits due on `date`, each with its check-in status.
    ///
    /// A habit appears iff its resolved cycle schedules that day.
    pub fn day_list(&self, records: &[HabitRecord], date: NaiveDate) -> Vec<DayListEntry> {
        records
            .iter()
            .filter_map(|record| {
                let cycle = self
                    .resolve_cycle_for_date(&record.cycles, date)
                    .filter(|cycle| cycle.is_scheduled_on(date))?;
                Some(DayListEntry {
                    habit_id: record.definition.id.clone(),
                    title: record.definition.title.clone(),
                    cycle_id: cycle.id.clone(),
                    status: self.checkin_status(cycle, &record.check_ins, date),
                })
            })
            .collect()
    }
}

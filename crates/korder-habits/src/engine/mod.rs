//! Habit schedule engine.
//!
//! Given a habit's cycles and recorded check-ins, answers whether the habit
//! is scheduled on a day, what its check-in status for that day is, and
//! which scheduled days in a range count as missed. Every operation is a
//! pure function of its inputs plus a caller-supplied "today" snapshot; the
//! engine performs no I/O and never reads a clock.

mod classify;

pub use classify::{DayListEntry, HabitClassification, HabitSummary, MissedHabit};

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::error::{NotFoundError, Result, ValidationError};
use crate::habit::{CheckIn, HabitCycle, HabitRecord, Weekday};

/// Check-in status of a habit for a single calendar day.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CheckInStatus {
    /// No check-in recorded for the day
    NotRecorded,
    /// Recorded as done
    Done,
    /// Recorded as not done, with the optional reason
    Missed(Option<String>),
}

/// Stateless schedule computation over habit cycles and check-ins.
///
/// The caller loads the relevant records, invokes the engine, and persists
/// any mutated check-ins afterward. Storage-level races (two concurrent
/// check-in writes for the same day) are the store's concern; the engine
/// assumes the collection it was handed is already deduplicated.
#[derive(Debug, Clone, Copy, Default)]
pub struct HabitScheduleEngine;

impl HabitScheduleEngine {
    pub fn new() -> Self {
        Self
    }

    /// Resolve the active cycle for a calendar date.
    ///
    /// A cycle whose `[start, end]` range contains the date wins; when
    /// several contain it (overlapping cycles), the one with the latest
    /// start date wins. When none contains it, falls back to the most
    /// recently started cycle with `start_date <= date` -- the "extend the
    /// most recent cycle" policy used by in-place edit flows.
    pub fn resolve_cycle_for_date<'a>(
        &self,
        cycles: &'a [HabitCycle],
        date: NaiveDate,
    ) -> Option<&'a HabitCycle> {
        cycles
            .iter()
            .filter(|cycle| cycle.contains(date))
            .max_by_key(|cycle| cycle.start_date)
            .or_else(|| {
                cycles
                    .iter()
                    .filter(|cycle| cycle.start_date <= date)
                    .max_by_key(|cycle| cycle.start_date)
            })
    }

    /// Check-in status for a (cycle, date) pair.
    ///
    /// Matches by exact calendar date; the store adapter has already
    /// collapsed any stored time-of-day.
    pub fn checkin_status(
        &self,
        cycle: &HabitCycle,
        check_ins: &[CheckIn],
        date: NaiveDate,
    ) -> CheckInStatus {
        match Self::find(cycle, check_ins, date) {
            None => CheckInStatus::NotRecorded,
            Some(ci) if ci.checked => CheckInStatus::Done,
            Some(ci) => CheckInStatus::Missed(ci.missed_note.clone()),
        }
    }

    /// Record or update the check-in for a (cycle, date) pair.
    ///
    /// Mutates an existing check-in in place or appends a new one, keeping
    /// at most one per day. A `checked = true` record never carries a
    /// missed note: the note is cleared unconditionally. Idempotent.
    ///
    /// The date must be a scheduled day of the cycle; out-of-range and
    /// off-weekday dates are rejected with a validation error.
    pub fn upsert_checkin(
        &self,
        cycle: &HabitCycle,
        check_ins: &mut Vec<CheckIn>,
        date: NaiveDate,
        checked: bool,
        note: Option<String>,
    ) -> Result<CheckIn> {
        cycle.validate()?;
        if !cycle.contains(date) {
            return Err(ValidationError::OutOfCycleRange {
                date,
                start: cycle.start_date,
                end: cycle.end_date,
            }
            .into());
        }
        let weekday = Weekday::of(date);
        if !cycle.weekdays.contains(&weekday) {
            return Err(ValidationError::UnscheduledWeekday { date, weekday }.into());
        }

        let note = if checked { None } else { note };

        if let Some(existing) = check_ins
            .iter_mut()
            .find(|ci| ci.cycle_id == cycle.id && ci.date == date)
        {
            existing.checked = checked;
            existing.missed_note = note;
            return Ok(existing.clone());
        }

        let created = CheckIn {
            cycle_id: cycle.id.clone(),
            date,
            checked,
            missed_note: note,
        };
        check_ins.push(created.clone());
        Ok(created)
    }

    /// Scheduled dates in `[from, through]` with no satisfying check-in.
    ///
    /// The scan is clamped to `[max(from, cycle.start), min(through,
    /// cycle.end, today)]`, so it is always finite and never reaches past
    /// the reference day. A check-in with `checked = false` counts as
    /// missed, the same as no check-in at all.
    ///
    /// Returns a lazy, restartable iterator in ascending order; clone it to
    /// restart.
    pub fn compute_missed_dates<'a>(
        &self,
        cycle: &'a HabitCycle,
        check_ins: &'a [CheckIn],
        from: NaiveDate,
        through: NaiveDate,
        today: NaiveDate,
    ) -> Result<MissedDates<'a>, ValidationError> {
        cycle.validate()?;

        let first = from.max(cycle.start_date);
        let last = through.min(cycle.end_date).min(today);

        Ok(MissedDates {
            cycle,
            check_ins,
            next: if first <= last { Some(first) } else { None },
            last,
        })
    }

    /// All check-ins belonging to one cycle of a record, ascending by date.
    ///
    /// Fails with a stale-reference error when the cycle id is not part of
    /// the record.
    pub fn check_ins_for_cycle<'a>(
        &self,
        record: &'a HabitRecord,
        cycle_id: &str,
    ) -> Result<Vec<&'a CheckIn>, NotFoundError> {
        if !record.cycles.iter().any(|cycle| cycle.id == cycle_id) {
            return Err(NotFoundError::CycleNotFound {
                cycle_id: cycle_id.to_string(),
            });
        }
        let mut found: Vec<&CheckIn> = record
            .check_ins
            .iter()
            .filter(|ci| ci.cycle_id == cycle_id)
            .collect();
        found.sort_by_key(|ci| ci.date);
        Ok(found)
    }

    fn find<'a>(cycle: &HabitCycle, check_ins: &'a [CheckIn], date: NaiveDate) -> Option<&'a CheckIn> {
        check_ins
            .iter()
            .find(|ci| ci.cycle_id == cycle.id && ci.date == date)
    }
}

/// Lazy ascending sequence of missed dates.
///
/// Finite by construction (the bounds are clamped before it is built) and
/// restartable via `Clone`.
#[derive(Debug, Clone)]
pub struct MissedDates<'a> {
    cycle: &'a HabitCycle,
    check_ins: &'a [CheckIn],
    next: Option<NaiveDate>,
    last: NaiveDate,
}

impl Iterator for MissedDates<'_> {
    type Item = NaiveDate;

    fn next(&mut self) -> Option<NaiveDate> {
        while let Some(date) = self.next {
            self.next = match date.succ_opt() {
                Some(succ) if succ <= self.last => Some(succ),
                _ => None,
            };
            if self.cycle.is_scheduled_on(date) && !self.satisfied(date) {
                return Some(date);
            }
        }
        None
    }
}

impl MissedDates<'_> {
    fn satisfied(&self, date: NaiveDate) -> bool {
        self.check_ins
            .iter()
            .any(|ci| ci.cycle_id == self.cycle.id && ci.date == date && ci.checked)
    }
}

//! Integration tests for the habit schedule engine.
//!
//! Exercises the full workflow from stored documents through normalization,
//! check-in updates, missed-date computation, and dashboard classification,
//! against a single consistent "today".

use chrono::NaiveDate;
use korder_habits::store::{cleanup, legacy::LegacyHabitDoc};
use korder_habits::{
    CheckIn, CheckInStatus, HabitCycle, HabitDefinition, HabitDocumentSet, HabitRecord,
    HabitScheduleEngine, Weekday,
};
use proptest::prelude::*;

fn date(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap()
}

fn january_cycle(weekdays: &[Weekday]) -> HabitCycle {
    HabitCycle {
        id: "cycle-1".to_string(),
        habit_id: "habit-1".to_string(),
        start_date: date(2024, 1, 1),
        end_date: date(2024, 1, 31),
        weekdays: weekdays.to_vec(),
    }
}

#[test]
fn test_missed_dates_end_to_end() {
    // Cycle Jan 1 - Jan 31 2024, due Mondays and Thursdays. Jan 1 was done,
    // Jan 4 was explicitly missed with a note; nothing else was recorded.
    let engine = HabitScheduleEngine::new();
    let cycle = january_cycle(&[Weekday::Monday, Weekday::Thursday]);
    let mut check_ins = Vec::new();

    engine
        .upsert_checkin(&cycle, &mut check_ins, date(2024, 1, 1), true, None)
        .unwrap();
    engine
        .upsert_checkin(&cycle, &mut check_ins, date(2024, 1, 4), false, Some("sick".into()))
        .unwrap();

    let missed: Vec<String> = engine
        .compute_missed_dates(&cycle, &check_ins, date(2024, 1, 1), date(2024, 1, 15), date(2024, 1, 20))
        .unwrap()
        .map(|d| d.to_string())
        .collect();

    // The explicit miss counts, as do the unrecorded Mondays/Thursdays.
    assert_eq!(
        missed,
        vec!["2024-01-04", "2024-01-08", "2024-01-11", "2024-01-15"]
    );
}

#[test]
fn test_stored_documents_through_classification() {
    // A completed habit loaded in the current split schema, with one missed
    // Monday, lands in both the completed and missed buckets.
    let json = r#"{
        "habit": {
            "_id": "habit-1",
            "userId": "user-1",
            "title": "Meditate",
            "createdAt": "2023-12-20T09:30:00Z"
        },
        "cycles": [{
            "_id": "cycle-1",
            "habitId": "habit-1",
            "startDate": "2024-01-01T00:00:00Z",
            "endDate": "2024-01-14T00:00:00Z",
            "weekdays": ["monday"]
        }],
        "checkIns": [
            { "habitCycleId": "cycle-1", "date": "2024-01-01T22:45:00Z" }
        ]
    }"#;

    let record = HabitDocumentSet::from_json(json)
        .unwrap()
        .into_record()
        .unwrap();

    let engine = HabitScheduleEngine::new();
    let classification = engine
        .classify_habits(std::slice::from_ref(&record), date(2024, 2, 1))
        .unwrap();

    assert_eq!(classification.completed.len(), 1);
    assert_eq!(classification.missed.len(), 1);
    assert_eq!(classification.missed[0].dates, vec![date(2024, 1, 8)]);
    assert!(classification.upcoming.is_empty());
}

#[test]
fn test_legacy_habit_checks_in_like_a_current_one() {
    // A pre-split document is normalized, then the usual daily check flow
    // runs against the minted cycle.
    let json = r#"{
        "_id": "habit-9",
        "title": "Read",
        "startDate": "2024-01-01T00:00:00Z",
        "endDate": "2024-01-31T00:00:00Z",
        "weekdays": ["monday"],
        "checkIns": [{ "date": "2024-01-01T06:00:00Z" }],
        "createdAt": "2023-12-01T00:00:00Z"
    }"#;

    let mut record = LegacyHabitDoc::from_json(json).unwrap().split().unwrap();
    let engine = HabitScheduleEngine::new();
    let cycle = record.cycles[0].clone();

    assert_eq!(
        engine.checkin_status(&cycle, &record.check_ins, date(2024, 1, 1)),
        CheckInStatus::Done
    );

    engine
        .upsert_checkin(&cycle, &mut record.check_ins, date(2024, 1, 8), true, None)
        .unwrap();

    let missed: Vec<NaiveDate> = engine
        .compute_missed_dates(&cycle, &record.check_ins, date(2024, 1, 1), date(2024, 1, 31), date(2024, 1, 16))
        .unwrap()
        .collect();
    assert_eq!(missed, vec![date(2024, 1, 15)]);
}

#[test]
fn test_cleanup_then_day_list() {
    // Bad data from an earlier revision: a Tuesday check-in on a
    // Monday-only cycle. After the purge the day list is consistent.
    let engine = HabitScheduleEngine::new();
    let cycle = january_cycle(&[Weekday::Monday]);
    let mut check_ins = vec![
        CheckIn {
            cycle_id: "cycle-1".to_string(),
            date: date(2024, 1, 2),
            checked: true,
            missed_note: None,
        },
        CheckIn {
            cycle_id: "cycle-1".to_string(),
            date: date(2024, 1, 8),
            checked: true,
            missed_note: None,
        },
    ];

    assert_eq!(cleanup::remove_out_of_schedule(&cycle, &mut check_ins), 1);

    let record = HabitRecord {
        definition: HabitDefinition {
            id: "habit-1".to_string(),
            user_id: "user-1".to_string(),
            title: "Meditate".to_string(),
            description: None,
            created_at: chrono::DateTime::UNIX_EPOCH,
        },
        cycles: vec![cycle],
        check_ins,
    };

    let entries = engine.day_list(std::slice::from_ref(&record), date(2024, 1, 8));
    assert_eq!(entries.len(), 1);
    assert_eq!(entries[0].status, CheckInStatus::Done);

    // The purged Tuesday no longer surfaces anywhere.
    assert!(engine.day_list(std::slice::from_ref(&record), date(2024, 1, 2)).is_empty());
}

proptest! {
    // Upserting the same (date, checked, note) twice is a no-op the second
    // time: one record, identical fields.
    #[test]
    fn prop_upsert_is_idempotent(day in 0u32..31, checked in any::<bool>(), note in proptest::option::of("[a-z]{1,12}")) {
        let engine = HabitScheduleEngine::new();
        let cycle = january_cycle(&[
            Weekday::Monday,
            Weekday::Tuesday,
            Weekday::Wednesday,
            Weekday::Thursday,
            Weekday::Friday,
            Weekday::Saturday,
            Weekday::Sunday,
        ]);
        let target = date(2024, 1, 1) + chrono::Days::new(day as u64);
        let mut check_ins = Vec::new();

        let first = engine
            .upsert_checkin(&cycle, &mut check_ins, target, checked, note.clone())
            .unwrap();
        let second = engine
            .upsert_checkin(&cycle, &mut check_ins, target, checked, note)
            .unwrap();

        prop_assert_eq!(check_ins.len(), 1);
        prop_assert_eq!(&first, &second);
        if checked {
            prop_assert_eq!(first.missed_note, None);
        }
    }
}

//! Integration tests for the habit store.
//!
//! This test file verifies:
//! - Persistence through the SQLite key-value store
//! - Cascade delete across reloads
//! - best_streak >= streak under arbitrary operation sequences
//! - Settings and identity sharing the same store

use chrono::{Duration, NaiveDate, Weekday};
use habitual_core::calendar;
use habitual_core::storage::keys;
use habitual_core::{
    AppSettings, EntitlementGate, HabitSpec, HabitStore, IdentityProfile, KvStore, LogStatus, MemoryKv, SqliteKv,
};
use proptest::prelude::*;

fn d(s: &str) -> NaiveDate {
    calendar::parse_date(s).unwrap()
}

#[test]
fn test_sqlite_store_survives_reopen() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("habitual.db");
    let today = d("2026-10-17");

    let id = {
        let mut store = HabitStore::load(SqliteKv::open_at(&path).unwrap());
        let spec = HabitSpec::builder("Meditate")
            .icon("brain")
            .color("purple")
            .unit("session")
            .identity_area(Some("mindful"))
            .build()
            .unwrap();
        let id = store.add_habit(spec).unwrap().id;
        store.log_day_as_of(&id, d("2026-10-16"), LogStatus::Done, today).unwrap();
        store.increment_habit_on(&id, today).unwrap();
        assert!(store.take_warnings().is_empty());
        id
    };

    let store = HabitStore::load(SqliteKv::open_at(&path).unwrap());
    let habit = store.habit(&id).unwrap();
    assert_eq!(habit.title, "Meditate");
    assert_eq!(habit.streak, 2);
    assert_eq!(habit.best_streak, 2);
    assert_eq!(habit.identity_area_id.as_deref(), Some("mindful"));
    assert_eq!(store.logs_for_habit(&id).len(), 2);
}

#[test]
fn test_delete_cascade_persists() {
    let kv = MemoryKv::new();
    let today = d("2026-10-17");
    let (keep, gone) = {
        let mut store = HabitStore::new(&kv);
        let keep = store.add_habit(HabitSpec::quick("Keep").unwrap()).unwrap().id;
        let gone = store.add_habit(HabitSpec::quick("Gone").unwrap()).unwrap().id;
        for offset in 0..5 {
            let day = today - Duration::days(offset);
            store.log_day_as_of(&keep, day, LogStatus::Done, today).unwrap();
            store.log_day_as_of(&gone, day, LogStatus::Done, today).unwrap();
        }
        store.delete_habit(&gone).unwrap();
        assert!(store.logs_for_habit(&gone).is_empty());
        (keep, gone)
    };

    let store = HabitStore::load(&kv);
    assert!(store.habit(&gone).is_none());
    assert!(store.logs_for_habit(&gone).is_empty());
    assert_eq!(store.logs_for_habit(&keep).len(), 5);
}

#[test]
fn test_free_tier_gate_with_store_count() {
    let mut store = HabitStore::new(MemoryKv::new());
    let mut gate = EntitlementGate::default();
    for i in 0..10 {
        assert!(gate.can_create_habit(store.habits().len()));
        store.add_habit(HabitSpec::quick(&format!("Habit {i}")).unwrap()).unwrap();
    }
    assert!(!gate.can_create_habit(store.habits().len()));
    gate.grant_premium();
    assert!(gate.can_create_habit(store.habits().len()));
}

#[test]
fn test_weekly_summary_and_heatmap_from_store() {
    let mut store = HabitStore::new(MemoryKv::new());
    let today = d("2026-10-17");
    let a = store.add_habit(HabitSpec::quick("A").unwrap()).unwrap().id;
    let b = store
        .add_habit(HabitSpec::builder("B").frequency("Weekly on Mon, Wed").build().unwrap())
        .unwrap()
        .id;
    store.log_day_as_of(&a, d("2026-10-12"), LogStatus::Done, today).unwrap();
    store.log_day_as_of(&a, d("2026-10-13"), LogStatus::Done, today).unwrap();
    store.log_day_as_of(&b, d("2026-10-12"), LogStatus::Done, today).unwrap();

    let summary = store.weekly_summary(Weekday::Mon, today);
    assert_eq!(summary.week_start, "2026-10-12");
    assert_eq!(summary.days[0].completed, 2);
    assert_eq!(summary.days[0].total, 2);
    // Tuesday: B is not scheduled
    assert_eq!(summary.days[1].total, 1);
    assert_eq!(summary.target, 7 + 2);

    let map = store.heatmap(None, today, 2, Weekday::Mon).unwrap();
    assert_eq!(map.get_cell("2026-10-12").unwrap().count, 2);
    let only_b = store.heatmap(Some(&b), today, 2, Weekday::Mon).unwrap();
    assert_eq!(only_b.total_done, 1);
}

#[test]
fn test_settings_and_identity_share_kv() {
    let dir = tempfile::tempdir().unwrap();
    let kv = SqliteKv::open_at(&dir.path().join("habitual.db")).unwrap();

    let mut settings = AppSettings::load(&kv);
    settings.set_by_key(&kv, keys::WEEK_START_DAY, "Sunday").unwrap();

    let mut profile = IdentityProfile::default();
    profile.select(["athlete", "reader"]);
    habitual_core::store::save_identity(&kv, &profile).unwrap();

    assert_eq!(kv.get(keys::WEEK_START_DAY).unwrap().as_deref(), Some("Sunday"));
    assert_eq!(AppSettings::load(&kv).week_start_day, Weekday::Sun);
    assert_eq!(habitual_core::store::load_identity(&kv), profile);
}

#[derive(Debug, Clone)]
enum Op {
    Increment(usize, i64),
    Decrement(usize, i64),
    Log(usize, i64, bool),
    Clear(usize, i64),
}

fn op() -> impl Strategy<Value = Op> {
    prop_oneof![
        (0..3usize, 0..10i64).prop_map(|(h, day)| Op::Increment(h, day)),
        (0..3usize, 0..10i64).prop_map(|(h, day)| Op::Decrement(h, day)),
        (0..3usize, 0..10i64, any::<bool>()).prop_map(|(h, day, done)| Op::Log(h, day, done)),
        (0..3usize, 0..10i64).prop_map(|(h, day)| Op::Clear(h, day)),
    ]
}

proptest! {
    #[test]
    fn best_streak_never_below_streak(ops in proptest::collection::vec(op(), 1..60)) {
        let mut store = HabitStore::new(MemoryKv::new());
        let ids: Vec<String> = (1..=3)
            .map(|goal| {
                let spec = HabitSpec::builder(&format!("H{goal}")).goal(goal).build().unwrap();
                store.add_habit(spec).unwrap().id
            })
            .collect();
        let base = d("2026-10-01");

        for op in ops {
            match op {
                Op::Increment(h, day) => {
                    store.increment_habit_on(&ids[h], base + Duration::days(day)).unwrap();
                }
                Op::Decrement(h, day) => {
                    store.decrement_habit_on(&ids[h], base + Duration::days(day)).unwrap();
                }
                Op::Log(h, day, done) => {
                    let status = if done { LogStatus::Done } else { LogStatus::Missed };
                    let date = base + Duration::days(day);
                    store.log_day_as_of(&ids[h], date, status, base + Duration::days(9)).unwrap();
                }
                Op::Clear(h, day) => {
                    let date = base + Duration::days(day);
                    store.clear_log_as_of(&ids[h], date, base + Duration::days(9)).unwrap();
                }
            }
            for habit in store.habits() {
                prop_assert!(habit.best_streak >= habit.streak);
            }
            let mut seen = std::collections::HashSet::new();
            for log in store.logs() {
                prop_assert!(seen.insert((log.habit_id.clone(), log.date.clone())));
            }
        }
    }
}

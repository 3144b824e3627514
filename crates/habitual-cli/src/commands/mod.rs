pub mod config;
pub mod entitlement;
pub mod freq;
pub mod habit;
pub mod identity;
pub mod settings;
pub mod stats;

use chrono::NaiveDate;
use habitual_core::{calendar, HabitStore, KvStore, SqliteKv};

pub type CliResult = Result<(), Box<dyn std::error::Error>>;

/// Open the on-disk store, rolled over to today. Warnings from the
/// roll-over write are reported before the store is handed out.
pub fn open_store() -> Result<HabitStore<SqliteKv>, Box<dyn std::error::Error>> {
    Ok(open_reported(SqliteKv::open()?))
}

fn open_reported<K: KvStore>(kv: K) -> HabitStore<K> {
    let mut store = HabitStore::open(kv);
    report_warnings(&mut store);
    store
}

/// Print queued persistence warnings to stderr. Returns how many were printed.
pub fn report_warnings<K: KvStore>(store: &mut HabitStore<K>) -> usize {
    let warnings = store.take_warnings();
    for warning in &warnings {
        eprintln!("Warning: {warning}");
    }
    warnings.len()
}

/// `--date` argument, defaulting to today.
pub fn date_or_today(date: Option<&str>) -> Result<NaiveDate, Box<dyn std::error::Error>> {
    match date {
        Some(d) => Ok(calendar::parse_date(d)?),
        None => Ok(calendar::today_date()),
    }
}

pub fn print_json<T: serde::Serialize + ?Sized>(value: &T) -> CliResult {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}

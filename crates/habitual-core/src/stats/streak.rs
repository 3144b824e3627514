//! Streak computation over a habit's logs.
//!
//! A streak is the run of consecutive `done` days ending today, or ending
//! yesterday while today has no log yet. A `missed` log or a day without a
//! log ends the run; there are no rest days.

use chrono::NaiveDate;
use std::collections::HashMap;

use crate::calendar;
use crate::habit::{HabitLog, LogStatus};

/// Index logs by calendar day. Unparseable dates are skipped.
pub(crate) fn index_by_day<'a, I>(logs: I) -> HashMap<NaiveDate, LogStatus>
where
    I: IntoIterator<Item = &'a HabitLog>,
{
    logs.into_iter()
        .filter_map(|log| {
            calendar::parse_date(&log.date)
                .ok()
                .map(|date| (date, log.status))
        })
        .collect()
}

/// Current streak as of `today`.
pub fn current_streak<'a, I>(logs: I, today: NaiveDate) -> u32
where
    I: IntoIterator<Item = &'a HabitLog>,
{
    let by_day = index_by_day(logs);

    let mut day = match by_day.get(&today) {
        Some(LogStatus::Missed) => return 0,
        Some(LogStatus::Done) => Some(today),
        // Today is still open.
        None => today.pred_opt(),
    };

    let mut streak = 0;
    while let Some(d) = day {
        if by_day.get(&d) != Some(&LogStatus::Done) {
            break;
        }
        streak += 1;
        day = d.pred_opt();
    }
    streak
}

/// Longest run of consecutive `done` days anywhere in the history.
pub fn longest_run<'a, I>(logs: I) -> u32
where
    I: IntoIterator<Item = &'a HabitLog>,
{
    let mut done: Vec<NaiveDate> = index_by_day(logs)
        .into_iter()
        .filter(|(_, status)| *status == LogStatus::Done)
        .map(|(date, _)| date)
        .collect();
    done.sort();

    let mut best = 0;
    let mut run = 0;
    let mut prev: Option<NaiveDate> = None;
    for date in done {
        run = match prev {
            Some(p) if p.succ_opt() == Some(date) => run + 1,
            _ => 1,
        };
        best = best.max(run);
        prev = Some(date);
    }
    best
}

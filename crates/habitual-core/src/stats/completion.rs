//! Daily and weekly completion aggregates across all habits.

use chrono::{NaiveDate, Weekday};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;

use crate::calendar;
use crate::frequency::Frequency;
use crate::habit::{Habit, HabitLog, LogStatus};

/// How many habits were completed on one day.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DailyCompletion {
    pub date: String,
    pub completed: u32,
    /// Habits scheduled that day, plus any done off-schedule.
    pub total: u32,
    pub ratio: f64,
}

impl DailyCompletion {
    pub fn is_perfect(&self) -> bool {
        self.total > 0 && self.completed == self.total
    }
}

/// One habit's progress within a week.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HabitWeek {
    pub habit_id: String,
    pub title: String,
    pub done: u32,
    pub target: u32,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WeeklySummary {
    pub week_start: String,
    pub days: Vec<DailyCompletion>,
    pub habits: Vec<HabitWeek>,
    pub completed: u32,
    pub target: u32,
}

fn done_set(logs: &[HabitLog]) -> HashSet<(&str, &str)> {
    logs.iter()
        .filter(|l| l.status == LogStatus::Done)
        .map(|l| (l.habit_id.as_str(), l.date.as_str()))
        .collect()
}

fn completion_for(habits: &[Habit], done: &HashSet<(&str, &str)>, date: NaiveDate) -> DailyCompletion {
    let key = calendar::format_date(date);
    let mut completed = 0;
    let mut total = 0;
    for habit in habits {
        let is_done = done.contains(&(habit.id.as_str(), key.as_str()));
        if is_done || Frequency::parse(&habit.frequency).is_scheduled_on(date) {
            total += 1;
        }
        if is_done {
            completed += 1;
        }
    }
    let ratio = if total == 0 {
        0.0
    } else {
        completed as f64 / total as f64
    };
    DailyCompletion {
        date: key,
        completed,
        total,
        ratio,
    }
}

pub fn daily_completion(habits: &[Habit], logs: &[HabitLog], date: NaiveDate) -> DailyCompletion {
    completion_for(habits, &done_set(logs), date)
}

/// Summary of the week containing `today`, starting on `week_start_day`.
pub fn weekly_summary(
    habits: &[Habit],
    logs: &[HabitLog],
    week_start_day: Weekday,
    today: NaiveDate,
) -> WeeklySummary {
    let done = done_set(logs);
    let start = calendar::week_start_on(week_start_day, today);
    let dates = calendar::week_dates(start);
    let keys: Vec<String> = dates.iter().map(|d| calendar::format_date(*d)).collect();

    let days = dates.iter().map(|d| completion_for(habits, &done, *d)).collect();

    let per_habit: Vec<HabitWeek> = habits
        .iter()
        .map(|habit| HabitWeek {
            habit_id: habit.id.clone(),
            title: habit.title.clone(),
            done: keys
                .iter()
                .filter(|k| done.contains(&(habit.id.as_str(), k.as_str())))
                .count() as u32,
            target: Frequency::parse(&habit.frequency).weekly_target(),
        })
        .collect();

    WeeklySummary {
        week_start: calendar::format_date(start),
        days,
        completed: per_habit.iter().map(|h| h.done.min(h.target)).sum(),
        target: per_habit.iter().map(|h| h.target).sum(),
        habits: per_habit,
    }
}

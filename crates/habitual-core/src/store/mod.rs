//! The habit store.
//!
//! Owns the habits and their daily logs, writes them through to a
//! [`KvStore`] after every mutation and keeps the derived streak fields up to
//! date. Memory is authoritative: a failed write is queued as a
//! [`PersistenceWarning`] and never rolls the mutation back.

mod settings;

pub use settings::{load_identity, save_identity, AppSettings, ThemeMode};

use chrono::{NaiveDate, Utc, Weekday};
use serde::de::DeserializeOwned;
use serde::Serialize;
use std::collections::HashSet;
use uuid::Uuid;

use crate::calendar;
use crate::error::{CoreError, PersistenceWarning, Result, ValidationError};
use crate::habit::{Habit, HabitLog, HabitPatch, HabitSpec, LogStatus};
use crate::stats::{self, DailyCompletion, Heatmap, WeeklySummary};
use crate::storage::{keys, KvStore};

pub struct HabitStore<K: KvStore> {
    kv: K,
    habits: Vec<Habit>,
    logs: Vec<HabitLog>,
    warnings: Vec<PersistenceWarning>,
}

impl<K: KvStore> HabitStore<K> {
    /// An empty store. Nothing is read from `kv`.
    pub fn new(kv: K) -> Self {
        Self {
            kv,
            habits: Vec::new(),
            logs: Vec::new(),
            warnings: Vec::new(),
        }
    }

    /// Load habits and logs from `kv`.
    ///
    /// Missing or malformed values load as empty collections. Logs for
    /// unknown habits are dropped, as are all but the last log per day.
    pub fn load(kv: K) -> Self {
        let habits: Vec<Habit> = read_collection(&kv, keys::HABITS);
        let raw_logs: Vec<HabitLog> = read_collection(&kv, keys::LOGS);

        let known: HashSet<&str> = habits.iter().map(|h| h.id.as_str()).collect();
        let mut seen: HashSet<(String, String)> = HashSet::new();
        let mut logs: Vec<HabitLog> = Vec::with_capacity(raw_logs.len());
        for log in raw_logs.into_iter().rev() {
            if !known.contains(log.habit_id.as_str()) {
                tracing::debug!(log_id = %log.id, habit_id = %log.habit_id, "dropping orphaned log");
                continue;
            }
            if seen.insert((log.habit_id.clone(), log.date.clone())) {
                logs.push(log);
            }
        }
        logs.reverse();

        Self {
            kv,
            habits,
            logs,
            warnings: Vec::new(),
        }
    }

    /// Load, then roll derived state over to today.
    pub fn open(kv: K) -> Self {
        let mut store = Self::load(kv);
        store.roll_over(calendar::today_date());
        store
    }

    pub fn kv(&self) -> &K {
        &self.kv
    }

    pub fn habits(&self) -> &[Habit] {
        &self.habits
    }

    pub fn habit(&self, id: &str) -> Option<&Habit> {
        self.habits.iter().find(|h| h.id == id)
    }

    pub fn logs(&self) -> &[HabitLog] {
        &self.logs
    }

    /// All logs of one habit in date order. Empty for unknown ids.
    pub fn logs_for_habit(&self, habit_id: &str) -> Vec<&HabitLog> {
        let mut logs: Vec<&HabitLog> = self.logs.iter().filter(|l| l.habit_id == habit_id).collect();
        logs.sort_by(|a, b| a.date.cmp(&b.date));
        logs
    }

    pub fn log_on(&self, habit_id: &str, date: NaiveDate) -> Option<&HabitLog> {
        let key = calendar::format_date(date);
        self.logs.iter().find(|l| l.habit_id == habit_id && l.date == key)
    }

    /// Warnings queued since the last call.
    pub fn take_warnings(&mut self) -> Vec<PersistenceWarning> {
        std::mem::take(&mut self.warnings)
    }

    pub fn warnings(&self) -> &[PersistenceWarning] {
        &self.warnings
    }

    // ── Mutations ────────────────────────────────────────────────────

    pub fn add_habit(&mut self, spec: HabitSpec) -> Result<Habit> {
        let title = spec.title.trim();
        if title.is_empty() {
            return Err(ValidationError::EmptyTitle.into());
        }
        if spec.goal == 0 {
            return Err(ValidationError::NonPositiveGoal(0).into());
        }

        let habit = Habit {
            id: Uuid::new_v4().to_string(),
            title: title.to_string(),
            icon: spec.icon,
            icon_color: spec.icon_color,
            goal: spec.goal,
            unit: spec.unit,
            frequency: spec.frequency,
            current: 0,
            streak: 0,
            best_streak: 0,
            identity_area_id: spec.identity_area_id,
            progress_date: None,
            created_at: Some(Utc::now()),
        };
        tracing::debug!(habit_id = %habit.id, title = %habit.title, "habit added");
        self.habits.push(habit.clone());
        self.persist_habits();
        Ok(habit)
    }

    pub fn update_habit(&mut self, id: &str, patch: &HabitPatch) -> Result<Habit> {
        self.update_habit_on(id, patch, calendar::today_date())
    }

    /// Edit a habit. A goal change re-evaluates today's log.
    pub fn update_habit_on(&mut self, id: &str, patch: &HabitPatch, today: NaiveDate) -> Result<Habit> {
        let idx = self.index_of(id)?;
        let was_complete = self.counter_complete(idx, today);
        let old_goal = self.habits[idx].goal;
        patch.apply(&mut self.habits[idx])?;

        let logs_changed = if self.habits[idx].goal != old_goal {
            self.mark_today_done(idx, today) || self.reopen_today(idx, today, was_complete)
        } else {
            false
        };
        self.recompute_streak(idx, today);
        self.persist_habits();
        if logs_changed {
            self.persist_logs();
        }
        Ok(self.habits[idx].clone())
    }

    pub fn increment_habit(&mut self, id: &str) -> Result<Habit> {
        self.increment_habit_on(id, calendar::today_date())
    }

    /// Count one completion toward `today`'s goal.
    ///
    /// Going past the goal is allowed. Reaching it marks the day done.
    pub fn increment_habit_on(&mut self, id: &str, today: NaiveDate) -> Result<Habit> {
        let idx = self.index_of(id)?;
        self.reset_progress_if_stale(idx, today);

        let habit = &mut self.habits[idx];
        habit.current = habit.current.saturating_add(1);
        tracing::debug!(habit_id = %habit.id, current = habit.current, goal = habit.goal, "habit incremented");

        let logs_changed = self.mark_today_done(idx, today);
        self.recompute_streak(idx, today);
        self.persist_habits();
        if logs_changed {
            self.persist_logs();
        }
        Ok(self.habits[idx].clone())
    }

    pub fn decrement_habit(&mut self, id: &str) -> Result<Habit> {
        self.decrement_habit_on(id, calendar::today_date())
    }

    /// Undo one completion. Dropping the counter below the goal reopens the
    /// day; a `done` logged by hand is left alone.
    pub fn decrement_habit_on(&mut self, id: &str, today: NaiveDate) -> Result<Habit> {
        let idx = self.index_of(id)?;
        self.reset_progress_if_stale(idx, today);
        let was_complete = self.counter_complete(idx, today);

        let habit = &mut self.habits[idx];
        habit.current = habit.current.saturating_sub(1);

        let logs_changed = self.reopen_today(idx, today, was_complete);
        self.recompute_streak(idx, today);
        self.persist_habits();
        if logs_changed {
            self.persist_logs();
        }
        Ok(self.habits[idx].clone())
    }

    pub fn log_day(&mut self, habit_id: &str, date: NaiveDate, status: LogStatus) -> Result<HabitLog> {
        self.log_day_as_of(habit_id, date, status, calendar::today_date())
    }

    /// Upsert the log for `date`, e.g. when backfilling history.
    pub fn log_day_as_of(
        &mut self,
        habit_id: &str,
        date: NaiveDate,
        status: LogStatus,
        today: NaiveDate,
    ) -> Result<HabitLog> {
        let idx = self.index_of(habit_id)?;
        let log = self.upsert_log(habit_id, &calendar::format_date(date), status);
        self.recompute_streak(idx, today);
        self.persist_logs();
        self.persist_habits();
        Ok(log)
    }

    /// Remove the log for `date`. Returns whether one existed.
    pub fn clear_log(&mut self, habit_id: &str, date: NaiveDate) -> Result<bool> {
        self.clear_log_as_of(habit_id, date, calendar::today_date())
    }

    pub fn clear_log_as_of(&mut self, habit_id: &str, date: NaiveDate, today: NaiveDate) -> Result<bool> {
        let idx = self.index_of(habit_id)?;
        let removed = self.remove_log(habit_id, &calendar::format_date(date));
        if removed {
            self.recompute_streak(idx, today);
            self.persist_logs();
            self.persist_habits();
        }
        Ok(removed)
    }

    /// Delete a habit and every log that references it.
    pub fn delete_habit(&mut self, id: &str) -> Result<Habit> {
        let idx = self.index_of(id)?;
        let habit = self.habits.remove(idx);
        let before = self.logs.len();
        self.logs.retain(|l| l.habit_id != habit.id);
        tracing::debug!(habit_id = %habit.id, logs_removed = before - self.logs.len(), "habit deleted");
        self.persist_habits();
        self.persist_logs();
        Ok(habit)
    }

    /// Reset `current` for habits whose progress belongs to another day and
    /// recompute every streak as of `today`.
    pub fn roll_over(&mut self, today: NaiveDate) {
        let before: Vec<(u32, u32, u32)> = self
            .habits
            .iter()
            .map(|h| (h.current, h.streak, h.best_streak))
            .collect();

        for idx in 0..self.habits.len() {
            let habit = &mut self.habits[idx];
            if habit.current_on(today) == 0 {
                habit.current = 0;
            }
            self.recompute_streak(idx, today);
        }

        let changed = self
            .habits
            .iter()
            .zip(before)
            .any(|(h, b)| (h.current, h.streak, h.best_streak) != b);
        if changed {
            self.persist_habits();
        }
    }

    // ── Derived views ────────────────────────────────────────────────

    pub fn daily_completion(&self, date: NaiveDate) -> DailyCompletion {
        stats::daily_completion(&self.habits, &self.logs, date)
    }

    pub fn weekly_summary(&self, week_start_day: Weekday, today: NaiveDate) -> WeeklySummary {
        stats::weekly_summary(&self.habits, &self.logs, week_start_day, today)
    }

    /// Heatmap over all habits, or one habit when `habit_id` is given.
    pub fn heatmap(
        &self,
        habit_id: Option<&str>,
        end: NaiveDate,
        weeks: u32,
        week_start_day: Weekday,
    ) -> Result<Heatmap> {
        match habit_id {
            Some(id) => {
                self.index_of(id)?;
                Ok(stats::build_heatmap(
                    self.logs.iter().filter(|l| l.habit_id == id),
                    end,
                    weeks,
                    week_start_day,
                ))
            }
            None => Ok(stats::build_heatmap(&self.logs, end, weeks, week_start_day)),
        }
    }

    // ── Internal ─────────────────────────────────────────────────────

    fn index_of(&self, id: &str) -> Result<usize> {
        self.habits
            .iter()
            .position(|h| h.id == id)
            .ok_or_else(|| CoreError::habit_not_found(id))
    }

    fn reset_progress_if_stale(&mut self, idx: usize, today: NaiveDate) {
        let habit = &mut self.habits[idx];
        let key = calendar::format_date(today);
        if habit.progress_date.as_deref() != Some(key.as_str()) {
            habit.current = 0;
            habit.progress_date = Some(key);
        }
    }

    fn counter_complete(&self, idx: usize, today: NaiveDate) -> bool {
        let habit = &self.habits[idx];
        habit.current_on(today) >= habit.goal
    }

    /// Upsert today's `done` once the counter reaches the goal. Never removes
    /// a log. Returns whether the logs changed.
    fn mark_today_done(&mut self, idx: usize, today: NaiveDate) -> bool {
        if !self.counter_complete(idx, today) {
            return false;
        }
        let id = self.habits[idx].id.clone();
        if self.log_on(&id, today).map(|l| l.status) == Some(LogStatus::Done) {
            return false;
        }
        self.upsert_log(&id, &calendar::format_date(today), LogStatus::Done);
        true
    }

    /// Remove today's `done` only when the counter was at the goal before the
    /// change and is below it now. Returns whether the logs changed.
    fn reopen_today(&mut self, idx: usize, today: NaiveDate, was_complete: bool) -> bool {
        if !was_complete || self.counter_complete(idx, today) {
            return false;
        }
        let id = self.habits[idx].id.clone();
        if self.log_on(&id, today).map(|l| l.status) != Some(LogStatus::Done) {
            return false;
        }
        self.remove_log(&id, &calendar::format_date(today))
    }

    fn upsert_log(&mut self, habit_id: &str, date: &str, status: LogStatus) -> HabitLog {
        if let Some(log) = self
            .logs
            .iter_mut()
            .find(|l| l.habit_id == habit_id && l.date == date)
        {
            log.status = status;
            return log.clone();
        }
        let log = HabitLog {
            id: Uuid::new_v4().to_string(),
            habit_id: habit_id.to_string(),
            date: date.to_string(),
            status,
        };
        self.logs.push(log.clone());
        log
    }

    fn remove_log(&mut self, habit_id: &str, date: &str) -> bool {
        let before = self.logs.len();
        self.logs.retain(|l| !(l.habit_id == habit_id && l.date == date));
        self.logs.len() != before
    }

    fn recompute_streak(&mut self, idx: usize, today: NaiveDate) {
        let id = &self.habits[idx].id;
        let streak = stats::current_streak(self.logs.iter().filter(|l| l.habit_id == *id), today);
        let habit = &mut self.habits[idx];
        habit.streak = streak;
        habit.best_streak = habit.best_streak.max(streak);
    }

    fn persist_habits(&mut self) {
        let result = write_collection(&self.kv, keys::HABITS, &self.habits);
        self.record(keys::HABITS, result);
    }

    fn persist_logs(&mut self) {
        let result = write_collection(&self.kv, keys::LOGS, &self.logs);
        self.record(keys::LOGS, result);
    }

    fn record(&mut self, key: &str, result: std::result::Result<(), String>) {
        if let Err(message) = result {
            tracing::warn!(key, error = %message, "persistence failed; keeping in-memory state");
            self.warnings.push(PersistenceWarning {
                key: key.to_string(),
                message,
            });
        }
    }
}

fn read_collection<K: KvStore, T: DeserializeOwned>(kv: &K, key: &str) -> Vec<T> {
    match kv.get(key) {
        Ok(Some(raw)) => serde_json::from_str(&raw).unwrap_or_else(|e| {
            tracing::warn!(key, error = %e, "malformed persisted value; using empty collection");
            Vec::new()
        }),
        Ok(None) => Vec::new(),
        Err(e) => {
            tracing::warn!(key, error = %e, "could not read persisted value; using empty collection");
            Vec::new()
        }
    }
}

fn write_collection<K: KvStore, T: Serialize>(kv: &K, key: &str, items: &[T]) -> std::result::Result<(), String> {
    let json = serde_json::to_string(items).map_err(|e| e.to_string())?;
    kv.set(key, &json).map_err(|e| e.to_string())
}

//! # Habitual Core Library
//!
//! This library provides the core business logic for the Habitual habit
//! tracker. All operations are available through the standalone CLI binary;
//! any GUI is a thin layer over the same library.
//!
//! ## Architecture
//!
//! - **Habit Store**: the habits and their per-day logs, written through to a
//!   key-value collaborator after every mutation, with streaks kept current
//! - **Storage**: the [`KvStore`] seam (SQLite and in-memory backends) and
//!   TOML-based configuration
//! - **Frequency codec**: structured cadence <-> display string
//! - **Stats**: streaks, daily/weekly completion and the completion heatmap
//!
//! ## Key Components
//!
//! - [`HabitStore`]: authoritative habit/log collection
//! - [`SqliteKv`]: key-value persistence
//! - [`Config`]: application configuration management
//! - [`EntitlementGate`]: free/premium feature gating

pub mod calendar;
pub mod entitlement;
pub mod error;
pub mod frequency;
pub mod habit;
pub mod identity;
pub mod stats;
pub mod storage;
pub mod store;

pub use entitlement::{EntitlementGate, Feature, FREE_HABIT_LIMIT};
pub use error::{ConfigError, CoreError, PersistenceError, PersistenceWarning, ValidationError};
pub use frequency::{DayToken, Frequency, FrequencyDraft, Period};
pub use habit::{Habit, HabitIcon, HabitLog, HabitPatch, HabitSpec, HabitSpecBuilder, IconColor, LogStatus};
pub use identity::{AreaCategory, IdentityArea, IdentityProfile, IDENTITY_AREAS};
pub use stats::{DailyCompletion, Heatmap, HeatmapCell, WeeklySummary};
pub use storage::{Config, KvStore, MemoryKv, SqliteKv};
pub use store::{AppSettings, HabitStore, ThemeMode};

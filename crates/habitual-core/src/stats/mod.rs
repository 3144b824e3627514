//! Derived statistics over habits and their logs: streaks, completion
//! aggregates and the completion heatmap.

pub mod completion;
pub mod heatmap;
pub mod streak;

pub use completion::{daily_completion, weekly_summary, DailyCompletion, HabitWeek, WeeklySummary};
pub use heatmap::{build_heatmap, Heatmap, HeatmapCell, MAX_WEEKS};
pub use streak::{current_streak, longest_run};

use clap::Subcommand;
use habitual_core::stats::{longest_run, MAX_WEEKS};
use habitual_core::{calendar, AppSettings, Config, Feature, ValidationError};

use super::{date_or_today, open_store, print_json, CliResult};

#[derive(Subcommand)]
pub enum StatsAction {
    /// Completion across all habits for one day
    Today {
        /// Date as YYYY-MM-DD (default: today)
        #[arg(long)]
        date: Option<String>,
    },
    /// Per-day and per-habit completion for the current week
    Week {
        /// Any date inside the week (default: today)
        #[arg(long)]
        date: Option<String>,
    },
    /// Completion heatmap (premium)
    Heatmap {
        /// Restrict to one habit
        #[arg(long)]
        habit: Option<String>,
        /// Number of weeks, at most 520 (default: stats.heatmap_weeks)
        #[arg(long)]
        weeks: Option<u32>,
        /// Output JSON instead of a grid
        #[arg(long)]
        json: bool,
    },
    /// Current, best and longest streaks per habit
    Streaks,
}

pub fn run(action: StatsAction) -> CliResult {
    let store = open_store()?;
    let settings = AppSettings::load(store.kv());

    match action {
        StatsAction::Today { date } => {
            let date = date_or_today(date.as_deref())?;
            print_json(&store.daily_completion(date))?;
        }
        StatsAction::Week { date } => {
            let date = date_or_today(date.as_deref())?;
            print_json(&store.weekly_summary(settings.week_start_day, date))?;
        }
        StatsAction::Heatmap { habit, weeks, json } => {
            let config = Config::load_or_default();
            if config.entitlement_gate().is_feature_locked(Feature::Heatmap) {
                return Err("the heatmap is a premium feature".into());
            }
            let weeks = weeks.unwrap_or(config.stats.heatmap_weeks);
            if weeks > MAX_WEEKS {
                return Err(ValidationError::InvalidValue {
                    field: "weeks".into(),
                    message: format!("{weeks} is more than the maximum of {MAX_WEEKS}"),
                }
                .into());
            }
            let map = store.heatmap(
                habit.as_deref(),
                calendar::today_date(),
                weeks,
                settings.week_start_day,
            )?;
            if json {
                print_json(&map)?;
            } else {
                print!("{}", map.render_ascii());
                println!(
                    "{} completions on {} active days",
                    map.total_done,
                    map.active_days()
                );
            }
        }
        StatsAction::Streaks => {
            let rows: Vec<_> = store
                .habits()
                .iter()
                .map(|habit| {
                    serde_json::json!({
                        "id": habit.id,
                        "title": habit.title,
                        "streak": habit.streak,
                        "best_streak": habit.best_streak,
                        "longest_run": longest_run(store.logs_for_habit(&habit.id)),
                    })
                })
                .collect();
            print_json(&rows)?;
        }
    }
    Ok(())
}

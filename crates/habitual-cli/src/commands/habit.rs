//! Habit management commands for CLI.

use clap::Subcommand;
use habitual_core::frequency::{self, DayToken, Frequency, FrequencyDraft, Period};
use habitual_core::{calendar, Config, Feature, HabitIcon, HabitPatch, HabitSpec, IconColor, LogStatus};

use super::{date_or_today, open_store, print_json, report_warnings, CliResult};

#[derive(Subcommand)]
pub enum HabitAction {
    /// Create a new habit
    Add {
        /// Habit title
        title: String,
        /// Icon name (e.g. book, run, brain)
        #[arg(long, default_value = "check")]
        icon: String,
        /// Icon color (e.g. blue, green, purple)
        #[arg(long, default_value = "blue")]
        color: String,
        /// Completions needed per day (default: 1)
        #[arg(long, default_value = "1", allow_negative_numbers = true)]
        goal: i64,
        /// Display unit
        #[arg(long, default_value = "times")]
        unit: String,
        /// Frequency string: Daily, Weekly, Weekdays, Weekends or a custom cadence
        #[arg(long, conflicts_with_all = ["every", "period", "days"])]
        frequency: Option<String>,
        /// Custom cadence: repeat every N periods
        #[arg(long)]
        every: Option<String>,
        /// Custom cadence period: days or weeks
        #[arg(long)]
        period: Option<String>,
        /// Custom cadence weekdays, comma-separated (e.g. Mon,Wed,Fri)
        #[arg(long)]
        days: Option<String>,
        /// Identity area ID
        #[arg(long)]
        area: Option<String>,
    },
    /// List habits
    List {
        /// Output JSON instead of a table
        #[arg(long)]
        json: bool,
    },
    /// Show a habit and its logs
    Show {
        /// Habit ID
        id: String,
    },
    /// Edit a habit
    Edit {
        /// Habit ID
        id: String,
        #[arg(long)]
        title: Option<String>,
        #[arg(long)]
        icon: Option<String>,
        #[arg(long)]
        color: Option<String>,
        #[arg(long, allow_negative_numbers = true)]
        goal: Option<i64>,
        #[arg(long)]
        unit: Option<String>,
        #[arg(long)]
        frequency: Option<String>,
        /// Identity area ID
        #[arg(long, conflicts_with = "clear_area")]
        area: Option<String>,
        /// Remove the identity area
        #[arg(long)]
        clear_area: bool,
    },
    /// Count one completion toward today's goal
    Inc {
        /// Habit ID
        id: String,
    },
    /// Undo one completion from today
    Undo {
        /// Habit ID
        id: String,
    },
    /// Record a day as done or missed
    Log {
        /// Habit ID
        id: String,
        /// Date as YYYY-MM-DD (default: today)
        #[arg(long)]
        date: Option<String>,
        /// done or missed
        #[arg(long, default_value = "done")]
        status: String,
    },
    /// Remove the log for a day
    Clear {
        /// Habit ID
        id: String,
        /// Date as YYYY-MM-DD
        date: String,
    },
    /// Delete a habit and its history
    Delete {
        /// Habit ID
        id: String,
    },
    /// List a habit's logs in date order
    Logs {
        /// Habit ID
        id: String,
    },
}

fn is_custom(frequency: &str) -> bool {
    matches!(Frequency::parse(frequency), Frequency::Custom(_))
}

fn builder_frequency(
    every: Option<String>,
    period: Option<String>,
    days: Option<String>,
) -> Result<Option<String>, Box<dyn std::error::Error>> {
    if every.is_none() && period.is_none() && days.is_none() {
        return Ok(None);
    }
    let period = match period.as_deref().map(str::trim) {
        None | Some("weeks") | Some("week") => Period::Weeks,
        Some("days") | Some("day") => Period::Days,
        Some(other) => return Err(format!("unknown period '{other}', expected days or weeks").into()),
    };
    let days = match days {
        Some(list) => list
            .split(',')
            .map(|d| DayToken::parse(d).ok_or_else(|| format!("unknown day '{}'", d.trim())))
            .collect::<Result<Vec<_>, _>>()?,
        None => Vec::new(),
    };
    let draft = FrequencyDraft::new(every.unwrap_or_else(|| "1".to_string()), period, days);
    Ok(Some(frequency::encode(&draft)))
}

pub fn run(action: HabitAction) -> CliResult {
    let mut store = open_store()?;
    let gate = Config::load_or_default().entitlement_gate();

    match action {
        HabitAction::Add {
            title,
            icon,
            color,
            goal,
            unit,
            frequency,
            every,
            period,
            days,
            area,
        } => {
            if !gate.can_create_habit(store.habits().len()) {
                return Err(format!(
                    "free plan is limited to {} habits; upgrade to premium to add more",
                    gate.free_habit_limit()
                )
                .into());
            }
            let frequency = match builder_frequency(every, period, days)? {
                Some(encoded) => encoded,
                None => frequency.unwrap_or_else(|| "Daily".to_string()),
            };
            if is_custom(&frequency) && gate.is_feature_locked(Feature::CustomFrequency) {
                return Err("custom frequencies are a premium feature".into());
            }

            let spec = HabitSpec::builder(&title)
                .icon(&icon)
                .color(&color)
                .goal(goal)
                .unit(&unit)
                .frequency(&frequency)
                .identity_area(area.as_deref())
                .build()?;
            let habit = store.add_habit(spec)?;
            report_warnings(&mut store);
            println!("Habit created: {}", habit.id);
            print_json(&habit)?;
        }
        HabitAction::List { json } => {
            let habits = store.habits();
            if json {
                print_json(habits)?;
            } else if habits.is_empty() {
                println!("No habits yet.");
            } else {
                let today = calendar::today_date();
                for habit in habits {
                    println!(
                        "{}  {:<24} {:>3}/{:<3} {:<10} streak {:>3} (best {})",
                        habit.id,
                        habit.title,
                        habit.current_on(today),
                        habit.goal,
                        habit.frequency,
                        habit.streak,
                        habit.best_streak
                    );
                }
            }
        }
        HabitAction::Show { id } => {
            let habit = store
                .habit(&id)
                .ok_or_else(|| habitual_core::CoreError::habit_not_found(&id))?;
            print_json(&serde_json::json!({
                "habit": habit,
                "logs": store.logs_for_habit(&id),
            }))?;
        }
        HabitAction::Edit {
            id,
            title,
            icon,
            color,
            goal,
            unit,
            frequency,
            area,
            clear_area,
        } => {
            if let Some(f) = frequency.as_deref() {
                if is_custom(f) && gate.is_feature_locked(Feature::CustomFrequency) {
                    return Err("custom frequencies are a premium feature".into());
                }
            }
            let patch = HabitPatch {
                title,
                icon: icon.map(|i| i.parse::<HabitIcon>()).transpose()?,
                icon_color: color.map(|c| c.parse::<IconColor>()).transpose()?,
                goal,
                unit,
                frequency,
                identity_area_id: if clear_area { Some(None) } else { area.map(Some) },
            };
            let habit = store.update_habit(&id, &patch)?;
            report_warnings(&mut store);
            print_json(&habit)?;
        }
        HabitAction::Inc { id } => {
            let habit = store.increment_habit(&id)?;
            report_warnings(&mut store);
            println!(
                "{}: {}/{} {} (streak {})",
                habit.title, habit.current, habit.goal, habit.unit, habit.streak
            );
        }
        HabitAction::Undo { id } => {
            let habit = store.decrement_habit(&id)?;
            report_warnings(&mut store);
            println!(
                "{}: {}/{} {} (streak {})",
                habit.title, habit.current, habit.goal, habit.unit, habit.streak
            );
        }
        HabitAction::Log { id, date, status } => {
            let date = date_or_today(date.as_deref())?;
            let status: LogStatus = status.parse()?;
            let log = store.log_day(&id, date, status)?;
            report_warnings(&mut store);
            print_json(&log)?;
        }
        HabitAction::Clear { id, date } => {
            let date = calendar::parse_date(&date)?;
            let removed = store.clear_log(&id, date)?;
            report_warnings(&mut store);
            if removed {
                println!("Log cleared");
            } else {
                println!("No log for {}", calendar::format_date(date));
            }
        }
        HabitAction::Delete { id } => {
            let habit = store.delete_habit(&id)?;
            report_warnings(&mut store);
            println!("Habit deleted: {}", habit.id);
        }
        HabitAction::Logs { id } => {
            print_json(&store.logs_for_habit(&id))?;
        }
    }
    Ok(())
}

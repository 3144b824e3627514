//! Completion heatmap.
//!
//! A calendar grid of `weeks` columns by 7 rows ending with the week that
//! contains `end`. Each cell counts `done` logs on its date and carries an
//! intensity level from 0 to 4 relative to the busiest day in the grid.
//! The grid spans between 1 and [`MAX_WEEKS`] weeks.

use chrono::{Datelike, Duration, NaiveDate, Weekday};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

use crate::calendar;
use crate::frequency::DayToken;
use crate::habit::{HabitLog, LogStatus};

pub const MAX_LEVEL: u8 = 4;

/// Widest grid `build_heatmap` will produce (ten years).
pub const MAX_WEEKS: u32 = 520;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HeatmapCell {
    pub date: String,
    pub weekday: DayToken,
    pub count: u32,
    pub level: u8,
    /// After the heatmap's end date.
    pub future: bool,
}

impl HeatmapCell {
    /// Get the character for ASCII heatmap visualization.
    pub fn heat_char(&self) -> char {
        if self.future {
            return ' ';
        }
        match self.level {
            0 => '·',
            1 => '░',
            2 => '▒',
            3 => '▓',
            _ => '█',
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Heatmap {
    pub start: String,
    pub end: String,
    pub weeks: u32,
    /// Week-major: cells `[w * 7 .. w * 7 + 7]` are week `w`.
    pub cells: Vec<HeatmapCell>,
    pub max_count: u32,
    pub total_done: u32,
}

impl Heatmap {
    pub fn get_cell(&self, date: &str) -> Option<&HeatmapCell> {
        self.cells.iter().find(|c| c.date == date)
    }

    pub fn week(&self, index: usize) -> Option<&[HeatmapCell]> {
        self.cells.chunks(7).nth(index)
    }

    /// Days with at least one completion.
    pub fn active_days(&self) -> usize {
        self.cells.iter().filter(|c| c.count > 0).count()
    }

    /// Render as ASCII: one row per weekday, one column per week.
    pub fn render_ascii(&self) -> String {
        let mut output = String::new();
        output.push_str(&format!("Completions {} .. {}\n", self.start, self.end));

        if self.total_done == 0 {
            output.push_str("No completions in this range.\n");
        }

        for row in 0..7 {
            let Some(first) = self.cells.get(row) else {
                break;
            };
            output.push_str(&format!("{:<4}", first.weekday.as_str()));
            for week in self.cells.chunks(7) {
                if let Some(cell) = week.get(row) {
                    output.push(cell.heat_char());
                    output.push(' ');
                }
            }
            output.push('\n');
        }
        output.push_str("Legend: · none ░ ▒ ▓ █ most\n");
        output
    }
}

fn level_for(count: u32, max_count: u32) -> u8 {
    if count == 0 || max_count == 0 {
        return 0;
    }
    let scaled = (count as u64 * MAX_LEVEL as u64).div_ceil(max_count as u64);
    scaled.clamp(1, MAX_LEVEL as u64) as u8
}

/// Build a heatmap from `logs`. Pass one habit's logs for a per-habit map.
pub fn build_heatmap<'a, I>(logs: I, end: NaiveDate, weeks: u32, week_start_day: Weekday) -> Heatmap
where
    I: IntoIterator<Item = &'a HabitLog>,
{
    let weeks = weeks.clamp(1, MAX_WEEKS);
    let last_week_start = calendar::week_start_on(week_start_day, end);
    let start = last_week_start - Duration::weeks(weeks as i64 - 1);

    let mut counts: HashMap<NaiveDate, u32> = HashMap::new();
    for log in logs {
        if log.status != LogStatus::Done {
            continue;
        }
        if let Ok(date) = calendar::parse_date(&log.date) {
            *counts.entry(date).or_default() += 1;
        }
    }

    let dates: Vec<NaiveDate> = (0..weeks as i64 * 7).map(|i| start + Duration::days(i)).collect();
    let max_count = dates
        .iter()
        .filter(|d| **d <= end)
        .filter_map(|d| counts.get(d).copied())
        .max()
        .unwrap_or(0);

    let mut total_done = 0;
    let cells = dates
        .into_iter()
        .map(|date| {
            let future = date > end;
            let count = if future {
                0
            } else {
                counts.get(&date).copied().unwrap_or(0)
            };
            total_done += count;
            HeatmapCell {
                date: calendar::format_date(date),
                weekday: DayToken::from_weekday(date.weekday()),
                count,
                level: level_for(count, max_count),
                future,
            }
        })
        .collect();

    Heatmap {
        start: calendar::format_date(start),
        end: calendar::format_date(end),
        weeks,
        cells,
        max_count,
        total_done,
    }
}

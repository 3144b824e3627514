//! Calendar helpers: local dates, week boundaries and weekday names.
//!
//! All persisted dates are calendar days in the canonical `YYYY-MM-DD` form.

use chrono::{Datelike, Duration, Local, NaiveDate, Weekday};

use crate::error::ValidationError;

const DATE_FORMAT: &str = "%Y-%m-%d";

/// Today's local calendar date.
pub fn today_date() -> NaiveDate {
    Local::now().date_naive()
}

/// Today's local calendar date as `YYYY-MM-DD`.
pub fn today() -> String {
    format_date(today_date())
}

pub fn format_date(date: NaiveDate) -> String {
    date.format(DATE_FORMAT).to_string()
}

/// Parse a strict `YYYY-MM-DD` date.
pub fn parse_date(s: &str) -> Result<NaiveDate, ValidationError> {
    NaiveDate::parse_from_str(s.trim(), DATE_FORMAT)
        .map_err(|_| ValidationError::InvalidDate(s.to_string()))
}

/// Parse a weekday from its full English name or three-letter abbreviation.
pub fn parse_weekday(s: &str) -> Option<Weekday> {
    match s.trim().to_ascii_lowercase().as_str() {
        "monday" | "mon" => Some(Weekday::Mon),
        "tuesday" | "tue" => Some(Weekday::Tue),
        "wednesday" | "wed" => Some(Weekday::Wed),
        "thursday" | "thu" => Some(Weekday::Thu),
        "friday" | "fri" => Some(Weekday::Fri),
        "saturday" | "sat" => Some(Weekday::Sat),
        "sunday" | "sun" => Some(Weekday::Sun),
        _ => None,
    }
}

/// Full English weekday name, as stored under `week_start_day`.
pub fn weekday_name(day: Weekday) -> &'static str {
    match day {
        Weekday::Mon => "Monday",
        Weekday::Tue => "Tuesday",
        Weekday::Wed => "Wednesday",
        Weekday::Thu => "Thursday",
        Weekday::Fri => "Friday",
        Weekday::Sat => "Saturday",
        Weekday::Sun => "Sunday",
    }
}

/// Most recent `start_day` on or before `reference`.
///
/// Indices are Sunday-based; `(ref - start + 7) % 7` days are subtracted.
pub fn week_start_on(start_day: Weekday, reference: NaiveDate) -> NaiveDate {
    let ref_idx = reference.weekday().num_days_from_sunday() as i64;
    let start_idx = start_day.num_days_from_sunday() as i64;
    let back = (ref_idx - start_idx + 7) % 7;
    reference - Duration::days(back)
}

/// `YYYY-MM-DD` of the week start for `reference`, or for today when `None`.
pub fn week_start(start_day: Weekday, reference: Option<NaiveDate>) -> String {
    format_date(week_start_on(start_day, reference.unwrap_or_else(today_date)))
}

/// The seven consecutive dates beginning at `start`.
pub fn week_dates(start: NaiveDate) -> [NaiveDate; 7] {
    std::array::from_fn(|i| start + Duration::days(i as i64))
}

//! Frequency strings: the builder's structured cadence and its display form.
//!
//! A habit stores its cadence as a human-readable string. The fixed tokens
//! are `Daily`, `Weekly`, `Weekdays` and `Weekends`; the guided builder
//! produces everything else through [`encode`]. [`decode`] is best-effort and
//! only recognises the `Every ...` and `Weekly on ...` shapes, so `"Daily"`
//! decodes to the weekly default rather than back to one day.

use chrono::{Datelike, NaiveDate, Weekday};
use serde::{Deserialize, Serialize};

/// Weekday abbreviation, declared in canonical display order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum DayToken {
    Mon,
    Tue,
    Wed,
    Thu,
    Fri,
    Sat,
    Sun,
}

impl DayToken {
    pub const ALL: [DayToken; 7] = [
        DayToken::Mon,
        DayToken::Tue,
        DayToken::Wed,
        DayToken::Thu,
        DayToken::Fri,
        DayToken::Sat,
        DayToken::Sun,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            DayToken::Mon => "Mon",
            DayToken::Tue => "Tue",
            DayToken::Wed => "Wed",
            DayToken::Thu => "Thu",
            DayToken::Fri => "Fri",
            DayToken::Sat => "Sat",
            DayToken::Sun => "Sun",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        DayToken::ALL.into_iter().find(|d| d.as_str() == s.trim())
    }

    pub fn weekday(&self) -> Weekday {
        match self {
            DayToken::Mon => Weekday::Mon,
            DayToken::Tue => Weekday::Tue,
            DayToken::Wed => Weekday::Wed,
            DayToken::Thu => Weekday::Thu,
            DayToken::Fri => Weekday::Fri,
            DayToken::Sat => Weekday::Sat,
            DayToken::Sun => Weekday::Sun,
        }
    }

    pub fn from_weekday(day: Weekday) -> Self {
        match day {
            Weekday::Mon => DayToken::Mon,
            Weekday::Tue => DayToken::Tue,
            Weekday::Wed => DayToken::Wed,
            Weekday::Thu => DayToken::Thu,
            Weekday::Fri => DayToken::Fri,
            Weekday::Sat => DayToken::Sat,
            Weekday::Sun => DayToken::Sun,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Period {
    Days,
    Weeks,
}

/// Builder-side cadence. `interval` is kept as the raw text the user typed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FrequencyDraft {
    pub interval: String,
    pub period: Period,
    pub days: Vec<DayToken>,
}

impl Default for FrequencyDraft {
    fn default() -> Self {
        Self {
            interval: "1".to_string(),
            period: Period::Weeks,
            days: Vec::new(),
        }
    }
}

impl FrequencyDraft {
    pub fn new(interval: impl Into<String>, period: Period, days: Vec<DayToken>) -> Self {
        Self {
            interval: interval.into(),
            period,
            days,
        }
    }

    /// Interval as a number; non-numeric or zero input is 1.
    pub fn interval_value(&self) -> u32 {
        match self.interval.trim().parse::<u32>() {
            Ok(0) | Err(_) => 1,
            Ok(n) => n,
        }
    }
}

fn join_days(days: &[DayToken]) -> String {
    let mut sorted = days.to_vec();
    sorted.sort();
    sorted.dedup();
    sorted
        .iter()
        .map(DayToken::as_str)
        .collect::<Vec<_>>()
        .join(", ")
}

fn parse_days(list: &str) -> Vec<DayToken> {
    list.split(',').filter_map(DayToken::parse).collect()
}

/// Encode a draft into its canonical display string.
pub fn encode(draft: &FrequencyDraft) -> String {
    let n = draft.interval_value();
    match draft.period {
        Period::Days if n == 1 => "Daily".to_string(),
        Period::Days => format!("Every {n} days"),
        Period::Weeks if draft.days.is_empty() => {
            if n == 1 {
                "Weekly".to_string()
            } else {
                format!("Every {n} weeks")
            }
        }
        Period::Weeks => {
            let days = join_days(&draft.days);
            if n == 1 {
                format!("Weekly on {days}")
            } else {
                format!("Every {n} weeks on {days}")
            }
        }
    }
}

/// Best-effort inverse of [`encode`].
pub fn decode(s: &str) -> FrequencyDraft {
    if let Some(rest) = s.strip_prefix("Every ") {
        let (head, days) = match rest.split_once(" on ") {
            Some((head, list)) => (head, parse_days(list)),
            None => (rest, Vec::new()),
        };
        let mut parts = head.split_whitespace();
        let interval = parts.next().unwrap_or("1").to_string();
        let period = match parts.next() {
            Some(p) if p.starts_with("day") => Period::Days,
            _ => Period::Weeks,
        };
        return FrequencyDraft {
            interval,
            period,
            days,
        };
    }

    if let Some(list) = s.strip_prefix("Weekly on ") {
        return FrequencyDraft {
            interval: "1".to_string(),
            period: Period::Weeks,
            days: parse_days(list),
        };
    }

    FrequencyDraft::default()
}

/// Classification of a stored frequency string.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Frequency {
    Daily,
    Weekly,
    Weekdays,
    Weekends,
    Custom(String),
}

impl Frequency {
    pub fn parse(s: &str) -> Self {
        match s {
            "Daily" => Frequency::Daily,
            "Weekly" => Frequency::Weekly,
            "Weekdays" => Frequency::Weekdays,
            "Weekends" => Frequency::Weekends,
            other => Frequency::Custom(other.to_string()),
        }
    }

    pub fn as_str(&self) -> &str {
        match self {
            Frequency::Daily => "Daily",
            Frequency::Weekly => "Weekly",
            Frequency::Weekdays => "Weekdays",
            Frequency::Weekends => "Weekends",
            Frequency::Custom(s) => s,
        }
    }

    /// Whether a completion on `date` is expected.
    ///
    /// Cadences without pinned weekdays accept any day.
    pub fn is_scheduled_on(&self, date: NaiveDate) -> bool {
        let day = DayToken::from_weekday(date.weekday());
        match self {
            Frequency::Daily | Frequency::Weekly => true,
            Frequency::Weekdays => day < DayToken::Sat,
            Frequency::Weekends => day >= DayToken::Sat,
            Frequency::Custom(s) => {
                let draft = decode(s);
                draft.period == Period::Days || draft.days.is_empty() || draft.days.contains(&day)
            }
        }
    }

    /// Expected completions in one week.
    pub fn weekly_target(&self) -> u32 {
        match self {
            Frequency::Daily => 7,
            Frequency::Weekly => 1,
            Frequency::Weekdays => 5,
            Frequency::Weekends => 2,
            Frequency::Custom(s) => {
                let draft = decode(s);
                match draft.period {
                    Period::Days => 7u32.div_ceil(draft.interval_value()),
                    Period::Weeks if draft.days.is_empty() => 1,
                    Period::Weeks => {
                        let mut days = draft.days.clone();
                        days.sort();
                        days.dedup();
                        days.len() as u32
                    }
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;
    use DayToken::*;

    #[test]
    fn encode_day_cadences() {
        assert_eq!(encode(&FrequencyDraft::new("1", Period::Days, vec![])), "Daily");
        assert_eq!(encode(&FrequencyDraft::new("3", Period::Days, vec![])), "Every 3 days");
    }

    #[test]
    fn encode_week_cadences() {
        assert_eq!(encode(&FrequencyDraft::new("1", Period::Weeks, vec![])), "Weekly");
        assert_eq!(encode(&FrequencyDraft::new("2", Period::Weeks, vec![])), "Every 2 weeks");
        assert_eq!(
            encode(&FrequencyDraft::new("1", Period::Weeks, vec![Fri, Mon, Wed])),
            "Weekly on Mon, Wed, Fri"
        );
        assert_eq!(
            encode(&FrequencyDraft::new("2", Period::Weeks, vec![Sun, Tue])),
            "Every 2 weeks on Tue, Sun"
        );
    }

    #[test]
    fn bad_interval_defaults_to_one() {
        assert_eq!(encode(&FrequencyDraft::new("abc", Period::Days, vec![])), "Daily");
        assert_eq!(encode(&FrequencyDraft::new("0", Period::Weeks, vec![])), "Weekly");
        assert_eq!(encode(&FrequencyDraft::new("", Period::Weeks, vec![Mon])), "Weekly on Mon");
    }

    #[test]
    fn decode_every_forms() {
        assert_eq!(decode("Every 3 days"), FrequencyDraft::new("3", Period::Days, vec![]));
        assert_eq!(
            decode("Every 2 weeks on Tue, Sun"),
            FrequencyDraft::new("2", Period::Weeks, vec![Tue, Sun])
        );
        assert_eq!(
            decode("Weekly on Mon, Thu"),
            FrequencyDraft::new("1", Period::Weeks, vec![Mon, Thu])
        );
    }

    #[test]
    fn decode_falls_back_to_weekly_default() {
        for s in ["Daily", "Weekly", "Weekdays", "", "whenever"] {
            assert_eq!(decode(s), FrequencyDraft::default(), "input {s:?}");
        }
    }

    #[test]
    fn daily_does_not_roundtrip() {
        let daily = FrequencyDraft::new("1", Period::Days, vec![]);
        assert_eq!(encode(&daily), "Daily");
        assert_ne!(decode("Daily"), daily);
    }

    #[test]
    fn decode_drops_unknown_days() {
        assert_eq!(decode("Weekly on Mon, Funday").days, vec![Mon]);
    }

    #[test]
    fn scheduled_days() {
        let sat = NaiveDate::from_ymd_opt(2026, 10, 17).unwrap();
        let mon = NaiveDate::from_ymd_opt(2026, 10, 12).unwrap();
        assert!(Frequency::Weekends.is_scheduled_on(sat));
        assert!(!Frequency::Weekends.is_scheduled_on(mon));
        assert!(Frequency::Weekdays.is_scheduled_on(mon));
        assert!(!Frequency::Weekdays.is_scheduled_on(sat));
        let custom = Frequency::parse("Weekly on Mon, Wed");
        assert!(custom.is_scheduled_on(mon));
        assert!(!custom.is_scheduled_on(sat));
    }

    #[test]
    fn weekly_targets() {
        assert_eq!(Frequency::Daily.weekly_target(), 7);
        assert_eq!(Frequency::Weekdays.weekly_target(), 5);
        assert_eq!(Frequency::parse("Every 2 days").weekly_target(), 4);
        assert_eq!(Frequency::parse("Every 3 weeks on Mon, Fri").weekly_target(), 2);
        assert_eq!(Frequency::parse("Every 2 weeks").weekly_target(), 1);
    }

    #[test]
    fn weekly_without_days_roundtrips() {
        for n in [1u32, 4] {
            let draft = FrequencyDraft::new(n.to_string(), Period::Weeks, Vec::new());
            assert_eq!(decode(&encode(&draft)), draft);
        }
    }

    fn day_subset() -> impl Strategy<Value = Vec<DayToken>> {
        proptest::sample::subsequence(DayToken::ALL.to_vec(), 0..=7).prop_shuffle()
    }

    proptest! {
        #[test]
        fn weekly_roundtrips_for_any_day_subset(n in 1u32..500, days in day_subset()) {
            let draft = FrequencyDraft::new(n.to_string(), Period::Weeks, days.clone());
            let mut sorted = days;
            sorted.sort();
            prop_assert_eq!(
                decode(&encode(&draft)),
                FrequencyDraft::new(n.to_string(), Period::Weeks, sorted)
            );
        }
    }
}

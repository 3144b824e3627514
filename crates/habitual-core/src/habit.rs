//! Habit and log records.
//!
//! Records serialize with camelCase field names, matching the JSON stored
//! under the `habits` and `logs` keys.

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use std::str::FromStr;

use crate::calendar;
use crate::error::ValidationError;
use crate::identity;

macro_rules! closed_enum {
    (
        $(#[$meta:meta])*
        $name:ident, $err:ident { $($variant:ident => $text:literal),+ $(,)? }
    ) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
        pub enum $name {
            $(#[serde(rename = $text)] $variant),+
        }

        impl $name {
            pub const ALL: &'static [$name] = &[$($name::$variant),+];

            pub fn as_str(&self) -> &'static str {
                match self {
                    $($name::$variant => $text),+
                }
            }
        }

        impl FromStr for $name {
            type Err = ValidationError;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                let needle = s.trim().to_ascii_lowercase();
                $name::ALL
                    .iter()
                    .copied()
                    .find(|v| v.as_str() == needle)
                    .ok_or_else(|| ValidationError::$err(s.to_string()))
            }
        }

        impl std::fmt::Display for $name {
            fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
                f.write_str(self.as_str())
            }
        }
    };
}

closed_enum! {
    /// Icon shown next to a habit.
    HabitIcon, UnknownIcon {
        Check => "check",
        Run => "run",
        Dumbbell => "dumbbell",
        Bike => "bike",
        Book => "book",
        Pen => "pen",
        Brain => "brain",
        Leaf => "leaf",
        Droplet => "droplet",
        Apple => "apple",
        Moon => "moon",
        Sun => "sun",
        Heart => "heart",
        Music => "music",
        Code => "code",
        Wallet => "wallet",
        Users => "users",
        Briefcase => "briefcase",
        Bed => "bed",
        Sparkles => "sparkles",
    }
}

closed_enum! {
    /// Accent color for a habit's icon.
    IconColor, UnknownColor {
        Red => "red",
        Orange => "orange",
        Amber => "amber",
        Green => "green",
        Teal => "teal",
        Blue => "blue",
        Indigo => "indigo",
        Purple => "purple",
        Pink => "pink",
        Gray => "gray",
    }
}

impl IconColor {
    pub fn hex(&self) -> &'static str {
        match self {
            IconColor::Red => "#ef4444",
            IconColor::Orange => "#f97316",
            IconColor::Amber => "#f59e0b",
            IconColor::Green => "#22c55e",
            IconColor::Teal => "#14b8a6",
            IconColor::Blue => "#3b82f6",
            IconColor::Indigo => "#6366f1",
            IconColor::Purple => "#a855f7",
            IconColor::Pink => "#ec4899",
            IconColor::Gray => "#6b7280",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LogStatus {
    Done,
    Missed,
}

impl FromStr for LogStatus {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "done" => Ok(LogStatus::Done),
            "missed" => Ok(LogStatus::Missed),
            _ => Err(ValidationError::InvalidValue {
                field: "status".into(),
                message: format!("expected 'done' or 'missed', got '{s}'"),
            }),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Habit {
    pub id: String,
    pub title: String,
    pub icon: HabitIcon,
    pub icon_color: IconColor,
    pub goal: u32,
    pub unit: String,
    pub frequency: String,
    #[serde(default)]
    pub current: u32,
    #[serde(default)]
    pub streak: u32,
    #[serde(default)]
    pub best_streak: u32,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub identity_area_id: Option<String>,
    /// Day that `current` counts toward.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub progress_date: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created_at: Option<DateTime<Utc>>,
}

impl Habit {
    pub fn is_complete(&self) -> bool {
        self.current >= self.goal
    }

    /// `current` as of `date`: progress recorded for another day counts as 0.
    pub fn current_on(&self, date: NaiveDate) -> u32 {
        match &self.progress_date {
            Some(d) if *d == calendar::format_date(date) => self.current,
            _ => 0,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HabitLog {
    pub id: String,
    pub habit_id: String,
    pub date: String,
    pub status: LogStatus,
}

/// Validated input for creating a habit.
///
/// Built through [`HabitSpec::new`] / [`HabitSpecBuilder`], which check the
/// title, goal, icon, color and identity area before the store sees them.
#[derive(Debug, Clone, PartialEq)]
pub struct HabitSpec {
    pub title: String,
    pub icon: HabitIcon,
    pub icon_color: IconColor,
    pub goal: u32,
    pub unit: String,
    pub frequency: String,
    pub identity_area_id: Option<String>,
}

impl HabitSpec {
    /// Quick-add defaults: one completion per day.
    pub fn quick(title: &str) -> Result<Self, ValidationError> {
        HabitSpecBuilder::new(title).build()
    }

    pub fn builder(title: &str) -> HabitSpecBuilder {
        HabitSpecBuilder::new(title)
    }
}

/// Builder taking the loosely-typed values a form produces.
#[derive(Debug, Clone)]
pub struct HabitSpecBuilder {
    title: String,
    icon: String,
    icon_color: String,
    goal: i64,
    unit: String,
    frequency: String,
    identity_area_id: Option<String>,
}

impl HabitSpecBuilder {
    pub fn new(title: &str) -> Self {
        Self {
            title: title.to_string(),
            icon: HabitIcon::Check.as_str().to_string(),
            icon_color: IconColor::Blue.as_str().to_string(),
            goal: 1,
            unit: "times".to_string(),
            frequency: "Daily".to_string(),
            identity_area_id: None,
        }
    }

    pub fn icon(mut self, icon: &str) -> Self {
        self.icon = icon.to_string();
        self
    }

    pub fn color(mut self, color: &str) -> Self {
        self.icon_color = color.to_string();
        self
    }

    pub fn goal(mut self, goal: i64) -> Self {
        self.goal = goal;
        self
    }

    pub fn unit(mut self, unit: &str) -> Self {
        self.unit = unit.to_string();
        self
    }

    pub fn frequency(mut self, frequency: &str) -> Self {
        self.frequency = frequency.to_string();
        self
    }

    pub fn identity_area(mut self, id: Option<&str>) -> Self {
        self.identity_area_id = id.map(str::to_string);
        self
    }

    pub fn build(self) -> Result<HabitSpec, ValidationError> {
        Ok(HabitSpec {
            title: validate_title(&self.title)?,
            icon: self.icon.parse()?,
            icon_color: self.icon_color.parse()?,
            goal: validate_goal(self.goal)?,
            unit: self.unit.trim().to_string(),
            frequency: validate_frequency(&self.frequency)?,
            identity_area_id: validate_identity_area(self.identity_area_id.as_deref())?,
        })
    }
}

/// Partial edit of a habit. `None` leaves a field unchanged.
#[derive(Debug, Clone, Default)]
pub struct HabitPatch {
    pub title: Option<String>,
    pub icon: Option<HabitIcon>,
    pub icon_color: Option<IconColor>,
    pub goal: Option<i64>,
    pub unit: Option<String>,
    pub frequency: Option<String>,
    /// `Some(None)` clears the identity area.
    pub identity_area_id: Option<Option<String>>,
}

impl HabitPatch {
    pub(crate) fn apply(&self, habit: &mut Habit) -> Result<(), ValidationError> {
        // Validate everything before touching the habit.
        let title = self.title.as_deref().map(validate_title).transpose()?;
        let goal = self.goal.map(validate_goal).transpose()?;
        let frequency = self.frequency.as_deref().map(validate_frequency).transpose()?;
        let area = match &self.identity_area_id {
            Some(area) => Some(validate_identity_area(area.as_deref())?),
            None => None,
        };

        if let Some(title) = title {
            habit.title = title;
        }
        if let Some(icon) = self.icon {
            habit.icon = icon;
        }
        if let Some(color) = self.icon_color {
            habit.icon_color = color;
        }
        if let Some(goal) = goal {
            habit.goal = goal;
        }
        if let Some(unit) = &self.unit {
            habit.unit = unit.trim().to_string();
        }
        if let Some(frequency) = frequency {
            habit.frequency = frequency;
        }
        if let Some(area) = area {
            habit.identity_area_id = area;
        }
        Ok(())
    }
}

fn validate_title(title: &str) -> Result<String, ValidationError> {
    let title = title.trim();
    if title.is_empty() {
        return Err(ValidationError::EmptyTitle);
    }
    Ok(title.to_string())
}

fn validate_goal(goal: i64) -> Result<u32, ValidationError> {
    if goal <= 0 {
        return Err(ValidationError::NonPositiveGoal(goal));
    }
    u32::try_from(goal).map_err(|_| ValidationError::InvalidValue {
        field: "goal".into(),
        message: format!("{goal} is too large"),
    })
}

fn validate_frequency(frequency: &str) -> Result<String, ValidationError> {
    let frequency = frequency.trim();
    if frequency.is_empty() {
        return Err(ValidationError::InvalidValue {
            field: "frequency".into(),
            message: "must not be empty".into(),
        });
    }
    Ok(frequency.to_string())
}

fn validate_identity_area(id: Option<&str>) -> Result<Option<String>, ValidationError> {
    match id {
        None => Ok(None),
        Some(id) if identity::find_area(id).is_some() => Ok(Some(id.to_string())),
        Some(id) => Err(ValidationError::UnknownIdentityArea(id.to_string())),
    }
}

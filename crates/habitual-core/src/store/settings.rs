//! App-level preferences stored as plain literals beside the habit data,
//! plus the identity profile.

use chrono::Weekday;
use serde::{Deserialize, Serialize};
use std::str::FromStr;

use crate::calendar;
use crate::error::{CoreError, PersistenceError, ValidationError};
use crate::identity::IdentityProfile;
use crate::storage::{keys, KvStore};

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ThemeMode {
    #[default]
    Dark,
    Light,
}

impl ThemeMode {
    pub fn as_str(&self) -> &'static str {
        match self {
            ThemeMode::Dark => "dark",
            ThemeMode::Light => "light",
        }
    }
}

impl FromStr for ThemeMode {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim() {
            "dark" => Ok(ThemeMode::Dark),
            "light" => Ok(ThemeMode::Light),
            other => Err(ValidationError::InvalidValue {
                field: keys::THEME_MODE.into(),
                message: format!("expected 'dark' or 'light', got '{other}'"),
            }),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AppSettings {
    pub theme_mode: ThemeMode,
    pub week_start_day: Weekday,
    pub onboarding_completed: bool,
}

impl Default for AppSettings {
    fn default() -> Self {
        Self {
            theme_mode: ThemeMode::Dark,
            week_start_day: Weekday::Mon,
            onboarding_completed: false,
        }
    }
}

fn read_literal<K: KvStore>(kv: &K, key: &str) -> Option<String> {
    kv.get(key).unwrap_or_else(|e| {
        tracing::warn!(key, error = %e, "could not read setting; using default");
        None
    })
}

impl AppSettings {
    /// Read all settings. Missing or unrecognised values fall back to defaults.
    pub fn load<K: KvStore>(kv: &K) -> Self {
        let defaults = Self::default();
        Self {
            theme_mode: read_literal(kv, keys::THEME_MODE)
                .and_then(|v| v.parse().ok())
                .unwrap_or(defaults.theme_mode),
            week_start_day: read_literal(kv, keys::WEEK_START_DAY)
                .and_then(|v| calendar::parse_weekday(&v))
                .unwrap_or(defaults.week_start_day),
            onboarding_completed: read_literal(kv, keys::ONBOARDING_COMPLETED).as_deref() == Some("true"),
        }
    }

    pub fn set_theme_mode<K: KvStore>(&mut self, kv: &K, mode: ThemeMode) -> Result<(), PersistenceError> {
        kv.set(keys::THEME_MODE, mode.as_str())?;
        self.theme_mode = mode;
        Ok(())
    }

    pub fn set_week_start_day<K: KvStore>(&mut self, kv: &K, day: Weekday) -> Result<(), PersistenceError> {
        kv.set(keys::WEEK_START_DAY, calendar::weekday_name(day))?;
        self.week_start_day = day;
        Ok(())
    }

    pub fn complete_onboarding<K: KvStore>(&mut self, kv: &K) -> Result<(), PersistenceError> {
        kv.set(keys::ONBOARDING_COMPLETED, "true")?;
        self.onboarding_completed = true;
        Ok(())
    }

    /// Set a setting from its storage key and literal value.
    pub fn set_by_key<K: KvStore>(&mut self, kv: &K, key: &str, value: &str) -> Result<(), CoreError> {
        match key {
            keys::THEME_MODE => self.set_theme_mode(kv, value.parse()?)?,
            keys::WEEK_START_DAY => {
                let day = calendar::parse_weekday(value).ok_or_else(|| ValidationError::InvalidValue {
                    field: key.into(),
                    message: format!("'{value}' is not a weekday"),
                })?;
                self.set_week_start_day(kv, day)?;
            }
            keys::ONBOARDING_COMPLETED => match value.trim() {
                "true" => self.complete_onboarding(kv)?,
                _ => {
                    return Err(ValidationError::InvalidValue {
                        field: key.into(),
                        message: "onboarding can only be marked complete".into(),
                    }
                    .into())
                }
            },
            other => {
                return Err(ValidationError::InvalidValue {
                    field: "key".into(),
                    message: format!("unknown setting '{other}'"),
                }
                .into())
            }
        }
        Ok(())
    }

    pub fn to_json(&self) -> serde_json::Value {
        serde_json::json!({
            "theme_mode": self.theme_mode.as_str(),
            "week_start_day": calendar::weekday_name(self.week_start_day),
            "onboarding_completed": self.onboarding_completed,
        })
    }
}

/// Read the identity profile; malformed JSON loads as the default.
pub fn load_identity<K: KvStore>(kv: &K) -> IdentityProfile {
    match read_literal(kv, keys::IDENTITY) {
        Some(raw) => serde_json::from_str(&raw).unwrap_or_else(|e| {
            tracing::warn!(key = keys::IDENTITY, error = %e, "malformed identity profile; using default");
            IdentityProfile::default()
        }),
        None => IdentityProfile::default(),
    }
}

pub fn save_identity<K: KvStore>(kv: &K, profile: &IdentityProfile) -> Result<(), CoreError> {
    let json = serde_json::to_string(profile)?;
    kv.set(keys::IDENTITY, &json)?;
    Ok(())
}

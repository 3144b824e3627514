//! TOML-based application configuration.
//!
//! Stores preferences that belong to this installation rather than to the
//! habit data:
//! - Entitlement state for the session (premium flag, free-tier limit)
//! - Statistics display defaults
//!
//! Configuration is stored at `~/.config/habitual/config.toml`.

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

use super::data_dir;
use crate::entitlement::{EntitlementGate, FREE_HABIT_LIMIT};
use crate::error::ConfigError;
use crate::stats::MAX_WEEKS;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EntitlementConfig {
    #[serde(default)]
    pub premium: bool,
    #[serde(default = "default_free_habit_limit")]
    pub free_habit_limit: usize,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StatsConfig {
    /// Columns in the completion heatmap.
    #[serde(default = "default_heatmap_weeks")]
    pub heatmap_weeks: u32,
}

/// Application configuration.
///
/// Serialized to/from TOML at `~/.config/habitual/config.toml`.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub entitlement: EntitlementConfig,
    #[serde(default)]
    pub stats: StatsConfig,
}

fn default_free_habit_limit() -> usize {
    FREE_HABIT_LIMIT
}
fn default_heatmap_weeks() -> u32 {
    12
}

impl Default for EntitlementConfig {
    fn default() -> Self {
        Self {
            premium: false,
            free_habit_limit: default_free_habit_limit(),
        }
    }
}

impl Default for StatsConfig {
    fn default() -> Self {
        Self {
            heatmap_weeks: default_heatmap_weeks(),
        }
    }
}

impl Config {
    fn get_json_value_by_path<'a>(
        root: &'a serde_json::Value,
        key: &str,
    ) -> Option<&'a serde_json::Value> {
        if key.is_empty() {
            return None;
        }

        let mut current = root;
        for part in key.split('.') {
            current = current.get(part)?;
        }
        Some(current)
    }

    fn set_json_value_by_path(
        root: &mut serde_json::Value,
        key: &str,
        value: &str,
    ) -> Result<(), ConfigError> {
        let unknown = || ConfigError::UnknownKey(key.to_string());
        let invalid = |message: String| ConfigError::InvalidValue {
            key: key.to_string(),
            message,
        };

        let mut parts = key.split('.').peekable();
        if key.is_empty() {
            return Err(unknown());
        }

        let mut current = root;
        while let Some(part) = parts.next() {
            if parts.peek().is_none() {
                let obj = current.as_object_mut().ok_or_else(unknown)?;
                let existing = obj.get(part).ok_or_else(unknown)?;

                let new_value = match existing {
                    serde_json::Value::Bool(_) => serde_json::Value::Bool(
                        value
                            .parse::<bool>()
                            .map_err(|_| invalid(format!("cannot parse '{value}' as bool")))?,
                    ),
                    serde_json::Value::Number(_) => value
                        .parse::<u64>()
                        .map(|n| serde_json::Value::Number(n.into()))
                        .map_err(|_| invalid(format!("cannot parse '{value}' as number")))?,
                    serde_json::Value::Object(_) | serde_json::Value::Array(_) => {
                        serde_json::from_str(value).map_err(|e| invalid(e.to_string()))?
                    }
                    _ => serde_json::Value::String(value.into()),
                };

                obj.insert(part.to_string(), new_value);
                return Ok(());
            }

            current = current.get_mut(part).ok_or_else(unknown)?;
        }

        Err(unknown())
    }

    fn path() -> Result<PathBuf, ConfigError> {
        Ok(data_dir()?.join("config.toml"))
    }

    /// Load from disk or return default.
    ///
    /// # Errors
    ///
    /// Returns an error if the config file exists but cannot be parsed,
    /// or if the default config cannot be written to disk.
    pub fn load() -> Result<Self, ConfigError> {
        Self::load_from(&Self::path()?)
    }

    pub fn load_from(path: &Path) -> Result<Self, ConfigError> {
        match std::fs::read_to_string(path) {
            Ok(content) => toml::from_str(&content).map_err(|e| ConfigError::LoadFailed {
                path: path.to_path_buf(),
                message: e.to_string(),
            }),
            Err(_) => {
                let cfg = Self::default();
                cfg.save_to(path)?;
                Ok(cfg)
            }
        }
    }

    /// Persist to disk.
    ///
    /// # Errors
    ///
    /// Returns an error if the config cannot be serialized or written to disk.
    pub fn save(&self) -> Result<(), ConfigError> {
        self.save_to(&Self::path()?)
    }

    pub fn save_to(&self, path: &Path) -> Result<(), ConfigError> {
        let save_failed = |message: String| ConfigError::SaveFailed {
            path: path.to_path_buf(),
            message,
        };
        let content = toml::to_string_pretty(self).map_err(|e| save_failed(e.to_string()))?;
        std::fs::write(path, content).map_err(|e| save_failed(e.to_string()))?;
        Ok(())
    }

    /// Get a config value as string by dot-separated key.
    pub fn get(&self, key: &str) -> Option<String> {
        let json = serde_json::to_value(self).ok()?;
        let val = Self::get_json_value_by_path(&json, key)?;
        match val {
            serde_json::Value::String(s) => Some(s.clone()),
            other => Some(other.to_string()),
        }
    }

    /// Set a config value by key without saving.
    ///
    /// # Errors
    ///
    /// Returns an error if the key is unknown or the value cannot be parsed.
    pub fn apply(&mut self, key: &str, value: &str) -> Result<(), ConfigError> {
        let invalid = |message: String| ConfigError::InvalidValue {
            key: key.to_string(),
            message,
        };
        let mut json = serde_json::to_value(&*self).map_err(|e| invalid(e.to_string()))?;
        Self::set_json_value_by_path(&mut json, key, value)?;
        let updated: Config = serde_json::from_value(json).map_err(|e| invalid(e.to_string()))?;
        if !(1..=MAX_WEEKS).contains(&updated.stats.heatmap_weeks) {
            return Err(invalid(format!("heatmap_weeks must be between 1 and {MAX_WEEKS}")));
        }
        *self = updated;
        Ok(())
    }

    /// Set a config value by key and save. Returns error if key is unknown.
    pub fn set(&mut self, key: &str, value: &str) -> Result<(), ConfigError> {
        self.apply(key, value)?;
        self.save()
    }

    /// Entitlement gate for this session.
    pub fn entitlement_gate(&self) -> EntitlementGate {
        EntitlementGate::new(self.entitlement.premium).with_limit(self.entitlement.free_habit_limit)
    }

    /// Load from disk, returning default on error.
    /// This is a convenience method that never fails.
    pub fn load_or_default() -> Self {
        Self::load().unwrap_or_default()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config_roundtrip() {
        let cfg = Config::default();
        let toml_str = toml::to_string_pretty(&cfg).unwrap();
        let parsed: Config = toml::from_str(&toml_str).unwrap();
        assert!(!parsed.entitlement.premium);
        assert_eq!(parsed.entitlement.free_habit_limit, 10);
        assert_eq!(parsed.stats.heatmap_weeks, 12);
    }

    #[test]
    fn partial_file_fills_defaults() {
        let parsed: Config = toml::from_str("[entitlement]\npremium = true\n").unwrap();
        assert!(parsed.entitlement.premium);
        assert_eq!(parsed.entitlement.free_habit_limit, 10);
        assert_eq!(parsed.stats.heatmap_weeks, 12);
    }

    #[test]
    fn get_supports_dot_path_keys() {
        let cfg = Config::default();
        assert_eq!(cfg.get("entitlement.premium").as_deref(), Some("false"));
        assert_eq!(cfg.get("stats.heatmap_weeks").as_deref(), Some("12"));
        assert!(cfg.get("stats.missing_key").is_none());
        assert!(cfg.get("").is_none());
    }

    #[test]
    fn apply_updates_bool_and_number() {
        let mut cfg = Config::default();
        cfg.apply("entitlement.premium", "true").unwrap();
        cfg.apply("stats.heatmap_weeks", "26").unwrap();
        assert!(cfg.entitlement.premium);
        assert_eq!(cfg.stats.heatmap_weeks, 26);
    }

    #[test]
    fn apply_rejects_unknown_key() {
        let mut cfg = Config::default();
        assert!(matches!(
            cfg.apply("stats.nonexistent_key", "1"),
            Err(ConfigError::UnknownKey(_))
        ));
    }

    #[test]
    fn apply_rejects_out_of_range_heatmap_weeks() {
        let mut cfg = Config::default();
        assert!(matches!(
            cfg.apply("stats.heatmap_weeks", "20000000"),
            Err(ConfigError::InvalidValue { .. })
        ));
        assert!(cfg.apply("stats.heatmap_weeks", "0").is_err());
        assert_eq!(cfg.stats.heatmap_weeks, 12);
        cfg.apply("stats.heatmap_weeks", "520").unwrap();
        assert_eq!(cfg.stats.heatmap_weeks, 520);
    }

    #[test]
    fn apply_rejects_invalid_type() {
        let mut cfg = Config::default();
        assert!(matches!(
            cfg.apply("entitlement.premium", "not_a_bool"),
            Err(ConfigError::InvalidValue { .. })
        ));
        assert!(!cfg.entitlement.premium);
    }

    #[test]
    fn entitlement_gate_reflects_config() {
        let mut cfg = Config::default();
        cfg.entitlement.free_habit_limit = 2;
        let gate = cfg.entitlement_gate();
        assert!(gate.can_create_habit(1));
        assert!(!gate.can_create_habit(2));
        cfg.entitlement.premium = true;
        assert!(cfg.entitlement_gate().can_create_habit(2));
    }

    #[test]
    fn load_from_missing_file_writes_default() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        let cfg = Config::load_from(&path).unwrap();
        assert_eq!(cfg.stats.heatmap_weeks, 12);
        assert!(path.exists());
    }

    #[test]
    fn load_from_invalid_file_fails() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        std::fs::write(&path, "entitlement = 3").unwrap();
        assert!(matches!(Config::load_from(&path), Err(ConfigError::LoadFailed { .. })));
    }
}

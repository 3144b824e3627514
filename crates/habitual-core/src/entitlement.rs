//! Free/premium feature gating.
//!
//! Pure predicates over a premium flag and the free-tier habit limit. The
//! flag is session state; the purchase flow that would set it lives outside
//! this crate.

use serde::{Deserialize, Serialize};
use std::str::FromStr;

/// Habits a free user may keep.
pub const FREE_HABIT_LIMIT: usize = 10;

/// Gateable features.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Feature {
    BasicTracking,
    Streaks,
    UnlimitedHabits,
    AdvancedStats,
    Heatmap,
    CustomFrequency,
    IdentityInsights,
    DataExport,
}

impl Feature {
    pub const PREMIUM: [Feature; 6] = [
        Feature::UnlimitedHabits,
        Feature::AdvancedStats,
        Feature::Heatmap,
        Feature::CustomFrequency,
        Feature::IdentityInsights,
        Feature::DataExport,
    ];

    pub fn is_premium(&self) -> bool {
        Self::PREMIUM.contains(self)
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Feature::BasicTracking => "basic_tracking",
            Feature::Streaks => "streaks",
            Feature::UnlimitedHabits => "unlimited_habits",
            Feature::AdvancedStats => "advanced_stats",
            Feature::Heatmap => "heatmap",
            Feature::CustomFrequency => "custom_frequency",
            Feature::IdentityInsights => "identity_insights",
            Feature::DataExport => "data_export",
        }
    }
}

impl FromStr for Feature {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().replace('-', "_").as_str() {
            "basic_tracking" => Ok(Feature::BasicTracking),
            "streaks" => Ok(Feature::Streaks),
            "unlimited_habits" => Ok(Feature::UnlimitedHabits),
            "advanced_stats" => Ok(Feature::AdvancedStats),
            "heatmap" => Ok(Feature::Heatmap),
            "custom_frequency" => Ok(Feature::CustomFrequency),
            "identity_insights" => Ok(Feature::IdentityInsights),
            "data_export" => Ok(Feature::DataExport),
            _ => Err(format!("unknown feature: {s}")),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EntitlementGate {
    premium: bool,
    free_habit_limit: usize,
}

impl Default for EntitlementGate {
    fn default() -> Self {
        Self::new(false)
    }
}

impl EntitlementGate {
    pub fn new(premium: bool) -> Self {
        Self {
            premium,
            free_habit_limit: FREE_HABIT_LIMIT,
        }
    }

    pub fn with_limit(mut self, free_habit_limit: usize) -> Self {
        self.free_habit_limit = free_habit_limit;
        self
    }

    pub fn is_premium(&self) -> bool {
        self.premium
    }

    pub fn free_habit_limit(&self) -> usize {
        self.free_habit_limit
    }

    pub fn grant_premium(&mut self) {
        self.premium = true;
    }

    pub fn revoke_premium(&mut self) {
        self.premium = false;
    }

    pub fn can_create_habit(&self, current_count: usize) -> bool {
        self.premium || current_count < self.free_habit_limit
    }

    pub fn is_feature_locked(&self, feature: Feature) -> bool {
        !self.premium && feature.is_premium()
    }

    /// Premium features still locked for this session.
    pub fn locked_features(&self) -> Vec<Feature> {
        Feature::PREMIUM
            .into_iter()
            .filter(|f| self.is_feature_locked(*f))
            .collect()
    }
}

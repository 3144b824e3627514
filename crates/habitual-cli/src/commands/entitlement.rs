use clap::Subcommand;
use habitual_core::{Config, Feature};

use super::{open_store, print_json, CliResult};

#[derive(Subcommand)]
pub enum EntitlementAction {
    /// Show plan, habit allowance and locked features
    Status,
    /// Check whether a feature is available
    Check {
        /// Feature name, e.g. heatmap or custom-frequency
        feature: String,
    },
}

pub fn run(action: EntitlementAction) -> CliResult {
    let gate = Config::load()?.entitlement_gate();

    match action {
        EntitlementAction::Status => {
            let store = open_store()?;
            let count = store.habits().len();
            let locked: Vec<&str> = gate.locked_features().iter().map(Feature::as_str).collect();
            print_json(&serde_json::json!({
                "premium": gate.is_premium(),
                "habits": count,
                "free_habit_limit": gate.free_habit_limit(),
                "can_create_habit": gate.can_create_habit(count),
                "locked_features": locked,
            }))?;
        }
        EntitlementAction::Check { feature } => {
            let feature: Feature = feature.parse()?;
            if gate.is_feature_locked(feature) {
                println!("{}: locked (premium)", feature.as_str());
            } else {
                println!("{}: available", feature.as_str());
            }
        }
    }
    Ok(())
}

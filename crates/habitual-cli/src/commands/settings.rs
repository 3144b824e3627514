use clap::Subcommand;
use habitual_core::AppSettings;

use super::{open_store, print_json, CliResult};

#[derive(Subcommand)]
pub enum SettingsAction {
    /// Show one setting, or all of them
    Get {
        /// theme_mode, week_start_day or onboarding_completed
        key: Option<String>,
    },
    /// Change a setting
    Set {
        /// Setting key
        key: String,
        /// New value
        value: String,
    },
}

pub fn run(action: SettingsAction) -> CliResult {
    let store = open_store()?;
    let mut settings = AppSettings::load(store.kv());

    match action {
        SettingsAction::Get { key: None } => print_json(&settings.to_json())?,
        SettingsAction::Get { key: Some(key) } => match settings.to_json().get(&key) {
            Some(serde_json::Value::String(s)) => println!("{s}"),
            Some(other) => println!("{other}"),
            None => return Err(format!("unknown setting: {key}").into()),
        },
        SettingsAction::Set { key, value } => {
            settings.set_by_key(store.kv(), &key, &value)?;
            println!("ok");
        }
    }
    Ok(())
}

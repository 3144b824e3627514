use clap::Subcommand;
use habitual_core::identity::areas_by_category;
use habitual_core::store::{load_identity, save_identity};
use habitual_core::{Config, Feature};

use super::{open_store, print_json, CliResult};

#[derive(Subcommand)]
pub enum IdentityAction {
    /// List the identity area catalog
    Areas,
    /// Show the selected areas and statement
    Show,
    /// Replace the selected areas
    Select {
        /// Area IDs (unknown IDs are ignored)
        ids: Vec<String>,
    },
    /// Set the identity statement
    Statement {
        /// e.g. "I am someone who moves every day"
        text: String,
    },
}

pub fn run(action: IdentityAction) -> CliResult {
    let store = open_store()?;
    let kv = store.kv();

    match action {
        IdentityAction::Areas => {
            for (category, areas) in areas_by_category() {
                println!("{category:?}");
                for area in areas {
                    println!("  {:<14} {:<16} {} {}", area.id, area.label, area.icon, area.color);
                }
            }
        }
        IdentityAction::Show => {
            let profile = load_identity(kv);
            let gate = Config::load_or_default().entitlement_gate();
            let mut out = serde_json::json!({
                "identityStatement": profile.identity_statement,
                "areas": profile.selected_areas(),
            });
            if !gate.is_feature_locked(Feature::IdentityInsights) {
                let habit_counts: serde_json::Map<_, _> = profile
                    .selected_area_ids
                    .iter()
                    .map(|id| {
                        let count = store
                            .habits()
                            .iter()
                            .filter(|h| h.identity_area_id.as_deref() == Some(id.as_str()))
                            .count();
                        (id.clone(), serde_json::json!(count))
                    })
                    .collect();
                out["habitsPerArea"] = serde_json::Value::Object(habit_counts);
            }
            print_json(&out)?;
        }
        IdentityAction::Select { ids } => {
            let mut profile = load_identity(kv);
            profile.select(&ids);
            let dropped = ids.len() - profile.selected_area_ids.len();
            if dropped > 0 {
                eprintln!("Ignored {dropped} unknown or repeated area ID(s)");
            }
            save_identity(kv, &profile)?;
            print_json(&profile)?;
        }
        IdentityAction::Statement { text } => {
            let mut profile = load_identity(kv);
            profile.identity_statement = text.trim().to_string();
            save_identity(kv, &profile)?;
            println!("ok");
        }
    }
    Ok(())
}

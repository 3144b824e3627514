//! Identity areas: the fixed catalog of self-images a habit can reinforce,
//! and the user's selection persisted under the `identity` key.

use serde::{Deserialize, Serialize};

use crate::habit::{HabitIcon, IconColor};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AreaCategory {
    Health,
    Mind,
    Growth,
    Relationships,
    Finance,
    Career,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct IdentityArea {
    pub id: &'static str,
    pub label: &'static str,
    pub icon: HabitIcon,
    pub color: IconColor,
    pub category: AreaCategory,
}

const fn area(
    id: &'static str,
    label: &'static str,
    icon: HabitIcon,
    color: IconColor,
    category: AreaCategory,
) -> IdentityArea {
    IdentityArea {
        id,
        label,
        icon,
        color,
        category,
    }
}

pub const IDENTITY_AREAS: &[IdentityArea] = &[
    area("athlete", "Athlete", HabitIcon::Run, IconColor::Orange, AreaCategory::Health),
    area("healthy_eater", "Healthy Eater", HabitIcon::Apple, IconColor::Green, AreaCategory::Health),
    area("early_riser", "Early Riser", HabitIcon::Sun, IconColor::Amber, AreaCategory::Health),
    area("well_rested", "Well Rested", HabitIcon::Bed, IconColor::Indigo, AreaCategory::Health),
    area("mindful", "Mindful", HabitIcon::Brain, IconColor::Purple, AreaCategory::Mind),
    area("calm", "Calm", HabitIcon::Leaf, IconColor::Teal, AreaCategory::Mind),
    area("reader", "Reader", HabitIcon::Book, IconColor::Blue, AreaCategory::Growth),
    area("writer", "Writer", HabitIcon::Pen, IconColor::Gray, AreaCategory::Growth),
    area("musician", "Musician", HabitIcon::Music, IconColor::Pink, AreaCategory::Growth),
    area("friend", "Good Friend", HabitIcon::Users, IconColor::Pink, AreaCategory::Relationships),
    area("partner", "Loving Partner", HabitIcon::Heart, IconColor::Red, AreaCategory::Relationships),
    area("saver", "Saver", HabitIcon::Wallet, IconColor::Green, AreaCategory::Finance),
    area("builder", "Builder", HabitIcon::Code, IconColor::Indigo, AreaCategory::Career),
    area("professional", "Professional", HabitIcon::Briefcase, IconColor::Blue, AreaCategory::Career),
];

pub fn find_area(id: &str) -> Option<&'static IdentityArea> {
    IDENTITY_AREAS.iter().find(|a| a.id == id)
}

/// Catalog grouped by category, in category order.
pub fn areas_by_category() -> Vec<(AreaCategory, Vec<&'static IdentityArea>)> {
    let mut groups: Vec<(AreaCategory, Vec<&'static IdentityArea>)> = Vec::new();
    let mut sorted: Vec<&'static IdentityArea> = IDENTITY_AREAS.iter().collect();
    sorted.sort_by_key(|a| a.category);
    for area in sorted {
        match groups.last_mut() {
            Some((cat, items)) if *cat == area.category => items.push(area),
            _ => groups.push((area.category, vec![area])),
        }
    }
    groups
}

/// Stored as JSON under the `identity` key.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct IdentityProfile {
    #[serde(default)]
    pub selected_area_ids: Vec<String>,
    #[serde(default)]
    pub identity_statement: String,
}

impl IdentityProfile {
    /// Replace the selection. Unknown or repeated ids are dropped.
    pub fn select<I, S>(&mut self, ids: I)
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        self.selected_area_ids.clear();
        for id in ids {
            let id = id.as_ref().trim();
            if find_area(id).is_some() && !self.selected_area_ids.iter().any(|s| s == id) {
                self.selected_area_ids.push(id.to_string());
            }
        }
    }

    pub fn selected_areas(&self) -> Vec<&'static IdentityArea> {
        self.selected_area_ids
            .iter()
            .filter_map(|id| find_area(id))
            .collect()
    }
}

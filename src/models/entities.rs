use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};

/// Clinical entity categories reported by the extractor
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum EntityCategory {
    Diseases,
    Chemicals,
    #[serde(rename = "Physiological_Processes")]
    PhysiologicalProcesses,
    #[serde(rename = "Body_Parts")]
    BodyParts,
}

impl EntityCategory {
    pub const ALL: [EntityCategory; 4] = [
        EntityCategory::Diseases,
        EntityCategory::Chemicals,
        EntityCategory::PhysiologicalProcesses,
        EntityCategory::BodyParts,
    ];

    /// Name used for this category in JSON documents
    pub fn name(&self) -> &'static str {
        match self {
            EntityCategory::Diseases => "Diseases",
            EntityCategory::Chemicals => "Chemicals",
            EntityCategory::PhysiologicalProcesses => "Physiological_Processes",
            EntityCategory::BodyParts => "Body_Parts",
        }
    }
}

/// Categorized entity strings; no string repeats within a category
///
/// Order of first insertion is preserved.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct EntityBag {
    #[serde(rename = "Diseases", default)]
    diseases: Vec<String>,
    #[serde(rename = "Chemicals", default)]
    chemicals: Vec<String>,
    #[serde(rename = "Physiological_Processes", default)]
    physiological_processes: Vec<String>,
    #[serde(rename = "Body_Parts", default)]
    body_parts: Vec<String>,
}

impl EntityBag {
    /// Bag with every category empty
    pub fn empty() -> Self {
        Self::default()
    }

    /// Insert a surface string, ignoring exact duplicates. Returns true if added.
    pub fn insert(&mut self, category: EntityCategory, entity: impl Into<String>) -> bool {
        let entity = entity.into();
        let list = self.list_mut(category);
        if list.contains(&entity) {
            return false;
        }
        list.push(entity);
        true
    }

    pub fn get(&self, category: EntityCategory) -> &[String] {
        match category {
            EntityCategory::Diseases => &self.diseases,
            EntityCategory::Chemicals => &self.chemicals,
            EntityCategory::PhysiologicalProcesses => &self.physiological_processes,
            EntityCategory::BodyParts => &self.body_parts,
        }
    }

    fn list_mut(&mut self, category: EntityCategory) -> &mut Vec<String> {
        match category {
            EntityCategory::Diseases => &mut self.diseases,
            EntityCategory::Chemicals => &mut self.chemicals,
            EntityCategory::PhysiologicalProcesses => &mut self.physiological_processes,
            EntityCategory::BodyParts => &mut self.body_parts,
        }
    }

    /// Iterate categories with their entities, in fixed category order
    pub fn iter(&self) -> impl Iterator<Item = (EntityCategory, &[String])> {
        EntityCategory::ALL.into_iter().map(|c| (c, self.get(c)))
    }

    pub fn is_empty(&self) -> bool {
        self.iter().all(|(_, list)| list.is_empty())
    }

    pub fn total(&self) -> usize {
        self.iter().map(|(_, list)| list.len()).sum()
    }

    /// Rebuild a bag from possibly-duplicated raw lists, enforcing the no-duplicate invariant
    pub fn from_raw(raw: EntityBag) -> Self {
        let mut bag = EntityBag::empty();
        for (category, list) in raw.iter() {
            for entity in list {
                let trimmed = entity.trim();
                if !trimmed.is_empty() {
                    bag.insert(category, trimmed);
                }
            }
        }
        bag
    }
}

/// Union of every entity string across categories, cross-category duplicates collapsed
pub fn keywords(bag: &EntityBag) -> BTreeSet<String> {
    bag.iter()
        .flat_map(|(_, list)| list.iter().cloned())
        .collect()
}

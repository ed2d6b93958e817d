use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Enhancement levels per equipment name, shared by every holder of that item.
/// Persisted as a plain `{ name: level }` map.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct EnhancementLedger {
    levels: BTreeMap<String, u32>,
}

impl EnhancementLedger {
    pub fn new() -> Self {
        Self::default()
    }

    /// Current level of `item` (0 when never enhanced).
    pub fn level(&self, item: &str) -> u32 {
        self.levels.get(item).copied().unwrap_or(0)
    }

    /// Raise `item` by one level, returning the new level.
    pub fn increment(&mut self, item: &str) -> u32 {
        let level = self.levels.entry(item.to_string()).or_insert(0);
        *level += 1;
        *level
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, u32)> {
        self.levels.iter().map(|(name, level)| (name.as_str(), *level))
    }

    pub fn is_empty(&self) -> bool {
        self.levels.is_empty()
    }
}

/// Outcome of a successful enhancement.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EnhanceReceipt {
    pub item: String,
    pub new_level: u32,
    pub cost: u64,
    pub team_gold_left: u64,
}

/// Label prepended to an item name; unenhanced items get none.
pub fn enhancement_prefix(level: u32) -> String {
    if level == 0 {
        String::new()
    } else {
        format!("+{} ", level)
    }
}

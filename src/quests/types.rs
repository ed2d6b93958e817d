use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum QuestKind {
    /// Defeat N monsters; counted as battles are won.
    DefeatCount,
    /// Get any party member to a level.
    ReachLevel,
    /// Hold N inventory items across the party.
    CollectEquipment,
}

impl QuestKind {
    pub const ALL: [QuestKind; 3] = [
        QuestKind::DefeatCount,
        QuestKind::ReachLevel,
        QuestKind::CollectEquipment,
    ];

    pub fn describe(&self, target: u32) -> String {
        match self {
            QuestKind::DefeatCount => format!("Defeat {} monsters", target),
            QuestKind::ReachLevel => format!("Reach level {}", target),
            QuestKind::CollectEquipment => format!("Collect {} pieces of equipment", target),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct QuestReward {
    pub exp: u64,
    pub gold: u64,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Quest {
    pub id: String,
    pub kind: QuestKind,
    pub description: String,
    pub target: u32,
    pub progress: u32,
    pub completed: bool,
    pub rewarded: bool,
    pub reward: QuestReward,
}

impl Quest {
    pub fn is_claimable(&self) -> bool {
        self.completed && !self.rewarded
    }
}

/// The daily batch plus the date it was generated on.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct QuestBoard {
    #[serde(default)]
    pub last_generated: Option<NaiveDate>,
    #[serde(default)]
    pub quests: Vec<Quest>,
}

impl QuestBoard {
    pub fn get(&self, id: &str) -> Option<&Quest> {
        self.quests.iter().find(|q| q.id == id)
    }

    pub fn get_mut(&mut self, id: &str) -> Option<&mut Quest> {
        self.quests.iter_mut().find(|q| q.id == id)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClaimReceipt {
    pub quest_id: String,
    pub gold: u64,
    /// Exp granted to each member.
    pub exp_each: u64,
    /// Names of members who gained at least one level.
    pub leveled_up: Vec<String>,
}

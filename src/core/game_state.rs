use crate::character::{party_max_level, Character};
use crate::core::constants::STARTING_TEAM_GOLD;
use crate::core::error::GameError;
use crate::enhancement::EnhancementLedger;
use crate::quests::QuestBoard;
use crate::quiz::Track;

/// Starter roster for a new save: (name, portrait, starting item).
const STARTERS: [(&str, &str, &str); 2] = [
    ("Beginner", "portraits/beginner.png", "Wooden Sword"),
    ("Rookie Programmer", "portraits/rookie.png", "Apprentice Staff"),
];

/// Everything one save owns: the party and the team-wide economy.
///
/// Each field is persisted under its own key (see `persistence::SaveManager`).
#[derive(Debug, Clone, PartialEq)]
pub struct GameState {
    pub save_name: String,
    pub members: Vec<Character>,
    pub team_gold: u64,
    pub enhancements: EnhancementLedger,
    pub quests: QuestBoard,
    pub track: Track,
}

impl GameState {
    /// Fresh save seeded with the starter party and starting gold.
    pub fn new(save_name: impl Into<String>) -> Self {
        Self {
            save_name: save_name.into(),
            members: starter_party(),
            team_gold: STARTING_TEAM_GOLD,
            enhancements: EnhancementLedger::new(),
            quests: QuestBoard::default(),
            track: Track::default(),
        }
    }

    pub fn member(&self, index: usize) -> Result<&Character, GameError> {
        self.members.get(index).ok_or(GameError::UnknownMember(index))
    }

    pub fn member_mut(&mut self, index: usize) -> Result<&mut Character, GameError> {
        self.members
            .get_mut(index)
            .ok_or(GameError::UnknownMember(index))
    }

    pub fn max_level(&self) -> u32 {
        party_max_level(&self.members)
    }

    /// Whether any member carries `item`, equipped or in the bag.
    pub fn holds(&self, item: &str) -> bool {
        self.members
            .iter()
            .any(|m| m.owns(item) || m.equipped.contains(item))
    }

    /// Inventory entries across the whole party.
    pub fn total_inventory(&self) -> usize {
        self.members.iter().map(|m| m.inventory.len()).sum()
    }

    /// Debit team gold, refusing without change when short.
    pub fn spend_gold(&mut self, amount: u64) -> Result<u64, GameError> {
        if self.team_gold < amount {
            return Err(GameError::insufficient_gold(amount, self.team_gold));
        }
        self.team_gold -= amount;
        Ok(self.team_gold)
    }
}

pub fn starter_party() -> Vec<Character> {
    STARTERS
        .iter()
        .map(|(name, portrait, item)| Character::new(*name, *portrait).with_item(*item))
        .collect()
}

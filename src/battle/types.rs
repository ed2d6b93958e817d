use crate::catalog::MonsterDef;
use serde::{Deserialize, Serialize};

/// The encounter's monster. Lives only as long as its battle.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Monster {
    pub name: String,
    pub level: u32,
    pub health: u32,
    pub max_health: u32,
    pub attack: u32,
    pub defense: u32,
    pub exp: u64,
    pub gold: u64,
    pub image: String,
}

impl Monster {
    /// Instance with fixed stats; `health` starts full.
    pub fn from_def(name: &str, def: &MonsterDef, health: u32, attack: u32, defense: u32) -> Self {
        Self {
            name: name.to_string(),
            level: def.level,
            health,
            max_health: health,
            attack,
            defense,
            exp: def.exp,
            gold: def.gold,
            image: def.image.clone(),
        }
    }

    pub fn is_alive(&self) -> bool {
        self.health > 0
    }

    /// Returns the damage actually dealt.
    pub fn take_damage(&mut self, amount: u32) -> u32 {
        let dealt = amount.min(self.health);
        self.health -= dealt;
        dealt
    }
}

/// Who fights: one chosen member, or the whole party sharing damage and rewards.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BattleMode {
    Single { member: usize },
    Team,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BattlePhase {
    /// Encounter generated, nobody chosen yet.
    AwaitingStart,
    /// A question is (or is about to be) on screen.
    QuestionActive,
    /// Escape failed; player picks continue or flee again.
    FleeFailed,
    /// Every relevant member is at 0 HP; revive or leave.
    PartyDowned,
    Victory,
    Defeat,
    Fled,
}

impl BattlePhase {
    pub fn name(&self) -> &'static str {
        match self {
            BattlePhase::AwaitingStart => "awaiting start",
            BattlePhase::QuestionActive => "answering a question",
            BattlePhase::FleeFailed => "recovering from a failed escape",
            BattlePhase::PartyDowned => "the party is downed",
            BattlePhase::Victory => "the battle is won",
            BattlePhase::Defeat => "the battle is lost",
            BattlePhase::Fled => "the party has fled",
        }
    }

    pub fn is_over(&self) -> bool {
        matches!(
            self,
            BattlePhase::Victory | BattlePhase::Defeat | BattlePhase::Fled
        )
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ItemDrop {
    pub item: String,
    pub recipient: String,
}

/// What a won battle paid out.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct VictoryPayout {
    /// Exp granted to each recipient.
    pub exp_each: u64,
    pub gold: u64,
    pub recipients: Vec<String>,
    /// (name, new level) for everyone who levelled.
    pub level_ups: Vec<(String, u32)>,
    pub drop: Option<ItemDrop>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TurnOutcome {
    MonsterHit {
        damage: u32,
        remaining: u32,
    },
    MonsterDefeated {
        damage: u32,
        payout: VictoryPayout,
    },
    PartyHit {
        /// (name, damage taken) per member hit.
        hits: Vec<(String, u32)>,
        party_downed: bool,
    },
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FleeOutcome {
    Escaped,
    Failed { member: String, damage: u32 },
}

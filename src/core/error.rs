//! Error types shared by every subsystem.
//!
//! Rule refusals are `GameError`; failures of the durable store are
//! `StorageError`. A refused operation never leaves a partial mutation behind.

use crate::character::EquipmentSlot;
use crate::quiz::Track;
use thiserror::Error;

/// Failure of the durable key-value store.
#[derive(Debug, Error)]
pub enum StorageError {
    #[error("storage I/O failed: {0}")]
    Io(#[from] std::io::Error),

    #[error("could not encode or decode {key}: {source}")]
    Serde {
        key: String,
        #[source]
        source: serde_json::Error,
    },

    #[error("storage location unavailable: {0}")]
    Unavailable(String),

    #[error("invalid storage key: {0:?}")]
    InvalidKey(String),
}

/// Refusal or failure of a game operation.
#[derive(Debug, Error)]
pub enum GameError {
    #[error("not enough gold: need {needed}, have {available}")]
    InsufficientGold { needed: u64, available: u64 },

    #[error("{item} is not in the inventory")]
    ItemNotOwned { item: String },

    #[error("unknown item: {0}")]
    UnknownItem(String),

    #[error("nothing equipped in the {0} slot")]
    SlotEmpty(EquipmentSlot),

    #[error("no party member at index {0}")]
    UnknownMember(usize),

    #[error("{name} is already at full health")]
    AlreadyFullHealth { name: String },

    #[error("quest reward already claimed")]
    QuestAlreadyRewarded,

    #[error("quest is not completed yet")]
    QuestNotCompleted,

    #[error("unknown quest: {0}")]
    UnknownQuest(String),

    #[error("no {track} questions for level {level} or the fallback level")]
    NoQuestionAvailable { track: Track, level: u32 },

    #[error("no monsters live in levels {min}-{max}")]
    NoMonsterForMap { min: u32, max: u32 },

    #[error("unknown map: {0}")]
    UnknownMap(String),

    #[error("{what} unavailable: {reason}")]
    DataUnavailable { what: String, reason: String },

    #[error("{action} is not allowed while {phase}")]
    InvalidBattleAction {
        action: &'static str,
        phase: &'static str,
    },

    #[error(transparent)]
    Storage(#[from] StorageError),
}

impl GameError {
    pub fn insufficient_gold(needed: u64, available: u64) -> Self {
        Self::InsufficientGold { needed, available }
    }

    pub fn not_owned(item: impl Into<String>) -> Self {
        Self::ItemNotOwned { item: item.into() }
    }

    pub fn data_unavailable(what: impl Into<String>, reason: impl ToString) -> Self {
        Self::DataUnavailable {
            what: what.into(),
            reason: reason.to_string(),
        }
    }

    /// True for refusals the caller recovers from locally (gold, ownership, claims).
    pub fn is_refusal(&self) -> bool {
        !matches!(self, GameError::Storage(_) | GameError::DataUnavailable { .. })
    }
}

//! Events the engine emits for the presentation layer.
//!
//! The engine never plays audio or switches screens itself; it queues
//! events and whoever drives it drains them.

use std::collections::VecDeque;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Scene {
    SaveSelect,
    MapSelect,
    Battle,
    Shop,
    Quests,
    Equipment,
    Enhancement,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NotificationLevel {
    Info,
    Warning,
    Error,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BattleOutcome {
    Victory,
    Fled,
    /// Party downed and the player left without reviving.
    Defeat,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GameEvent {
    /// Catalogs finished loading; `failures` parts fell back to empty.
    DataLoaded { failures: usize },
    BattleCompleted { outcome: BattleOutcome },
    SceneChanged(Scene),
    Notification {
        level: NotificationLevel,
        message: String,
    },
    CorrectAnswer,
    WrongAnswer,
    Victory,
    PurchaseSuccess { item: String },
    LevelUp { name: String, level: u32 },
    ItemDropped { item: String, recipient: String },
}

impl GameEvent {
    pub fn info(message: impl Into<String>) -> Self {
        Self::Notification {
            level: NotificationLevel::Info,
            message: message.into(),
        }
    }

    pub fn error(message: impl Into<String>) -> Self {
        Self::Notification {
            level: NotificationLevel::Error,
            message: message.into(),
        }
    }
}

/// FIFO of pending events.
#[derive(Debug, Default)]
pub struct EventQueue {
    events: VecDeque<GameEvent>,
}

impl EventQueue {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, event: GameEvent) {
        self.events.push_back(event);
    }

    pub fn extend(&mut self, events: impl IntoIterator<Item = GameEvent>) {
        self.events.extend(events);
    }

    /// Take every pending event, oldest first.
    pub fn drain(&mut self) -> Vec<GameEvent> {
        self.events.drain(..).collect()
    }

    pub fn len(&self) -> usize {
        self.events.len()
    }

    pub fn is_empty(&self) -> bool {
        self.events.is_empty()
    }
}

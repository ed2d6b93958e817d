//! QuizQuest - quiz-gated RPG engine
//!
//! Battles are won by answering programming questions. This library holds the
//! rules (battle, progression, equipment, economy, quests) and their
//! persistence; the binary is a thin terminal front end.

pub mod battle;
pub mod build_info;
pub mod catalog;
pub mod character;
pub mod core;
pub mod enhancement;
pub mod equipment;
pub mod persistence;
pub mod quests;
pub mod quiz;
pub mod shop;
pub mod utils;

pub use crate::core::error::{GameError, StorageError};
pub use crate::core::game::Game;
pub use crate::core::game_state::GameState;

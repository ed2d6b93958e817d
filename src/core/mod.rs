//! Core game state, configuration and the engine facade.

pub mod config;
pub mod constants;
pub mod error;
pub mod events;
pub mod game;
pub mod game_state;

pub use config::GameConfig;
pub use error::{GameError, StorageError};
pub use events::{BattleOutcome, EventQueue, GameEvent, NotificationLevel, Scene};
pub use game::Game;
pub use game_state::GameState;

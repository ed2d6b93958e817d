//! Save storage: the key-value backends and the per-save key layout.

pub mod save_manager;
pub mod store;

pub use save_manager::{SaveKey, SaveManager};
pub use store::{FileStore, KeyValueStore, MemoryStore};

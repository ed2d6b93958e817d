use super::store::KeyValueStore;
use crate::character::Character;
use crate::core::constants::STARTING_TEAM_GOLD;
use crate::core::error::StorageError;
use crate::core::game_state::{starter_party, GameState};
use crate::enhancement::EnhancementLedger;
use crate::quests::QuestBoard;
use crate::quiz::Track;
use serde::de::DeserializeOwned;
use serde::Serialize;

/// The independently persisted parts of a save.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SaveKey {
    Party,
    TeamGold,
    Enhancements,
    Language,
    Quests,
}

impl SaveKey {
    pub const ALL: [SaveKey; 5] = [
        SaveKey::Party,
        SaveKey::TeamGold,
        SaveKey::Enhancements,
        SaveKey::Language,
        SaveKey::Quests,
    ];

    pub fn prefix(&self) -> &'static str {
        match self {
            SaveKey::Party => "party",
            SaveKey::TeamGold => "teamgold",
            SaveKey::Enhancements => "enhanced",
            SaveKey::Language => "language",
            SaveKey::Quests => "quests",
        }
    }

    /// Store key for this part of `save_name`, e.g. `party-slot1`.
    pub fn for_save(&self, save_name: &str) -> String {
        format!("{}-{}", self.prefix(), save_name)
    }
}

/// Loads and stores [`GameState`] as one key per part.
///
/// A missing key seeds that part's default; an unreadable one is logged and
/// replaced by its default as well.
pub struct SaveManager<S: KeyValueStore> {
    store: S,
}

impl<S: KeyValueStore> SaveManager<S> {
    pub fn new(store: S) -> Self {
        Self { store }
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    fn read<T: DeserializeOwned>(
        &self,
        key: SaveKey,
        save_name: &str,
        default: impl FnOnce() -> T,
    ) -> Result<T, StorageError> {
        let name = key.for_save(save_name);
        let Some(json) = self.store.get(&name)? else {
            return Ok(default());
        };
        match serde_json::from_str(&json) {
            Ok(value) => Ok(value),
            Err(e) => {
                tracing::warn!(key = %name, "corrupt save entry, using default: {}", e);
                Ok(default())
            }
        }
    }

    fn write<T: Serialize>(
        &mut self,
        key: SaveKey,
        save_name: &str,
        value: &T,
    ) -> Result<(), StorageError> {
        let name = key.for_save(save_name);
        let json = serde_json::to_string(value).map_err(|source| StorageError::Serde {
            key: name.clone(),
            source,
        })?;
        self.store.set(&name, &json)
    }

    pub fn load(&self, save_name: &str) -> Result<GameState, StorageError> {
        let members: Vec<Character> = self.read(SaveKey::Party, save_name, starter_party)?;
        let team_gold = self.read(SaveKey::TeamGold, save_name, || STARTING_TEAM_GOLD)?;
        let enhancements = self.read(SaveKey::Enhancements, save_name, EnhancementLedger::new)?;
        let track = self.read(SaveKey::Language, save_name, Track::default)?;
        let quests = self.read(SaveKey::Quests, save_name, QuestBoard::default)?;
        tracing::info!(save = save_name, members = members.len(), "save loaded");
        Ok(GameState {
            save_name: save_name.to_string(),
            members,
            team_gold,
            enhancements,
            quests,
            track,
        })
    }

    /// Persist one part of the state.
    pub fn save_key(&mut self, state: &GameState, key: SaveKey) -> Result<(), StorageError> {
        let save = state.save_name.as_str();
        match key {
            SaveKey::Party => self.write(key, save, &state.members),
            SaveKey::TeamGold => self.write(key, save, &state.team_gold),
            SaveKey::Enhancements => self.write(key, save, &state.enhancements),
            SaveKey::Language => self.write(key, save, &state.track),
            SaveKey::Quests => self.write(key, save, &state.quests),
        }
    }

    pub fn save(&mut self, state: &GameState) -> Result<(), StorageError> {
        for key in SaveKey::ALL {
            self.save_key(state, key)?;
        }
        tracing::debug!(save = %state.save_name, "save written");
        Ok(())
    }

    pub fn exists(&self, save_name: &str) -> Result<bool, StorageError> {
        Ok(self.store.get(&SaveKey::Party.for_save(save_name))?.is_some())
    }

    /// Save names that have a stored party, sorted.
    pub fn list_saves(&self) -> Result<Vec<String>, StorageError> {
        let prefix = format!("{}-", SaveKey::Party.prefix());
        let mut saves: Vec<String> = self
            .store
            .keys()?
            .into_iter()
            .filter_map(|key| key.strip_prefix(&prefix).map(str::to_string))
            .filter(|name| !name.is_empty())
            .collect();
        saves.sort();
        Ok(saves)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::persistence::MemoryStore;

    #[test]
    fn test_missing_keys_seed_defaults() {
        let manager = SaveManager::new(MemoryStore::new());
        let state = manager.load("fresh").unwrap();
        assert_eq!(state, GameState::new("fresh"));
    }

    #[test]
    fn test_keys_are_namespaced() {
        let mut manager = SaveManager::new(MemoryStore::new());
        manager.save(&GameState::new("slot1")).unwrap();
        let keys = manager.store().keys().unwrap();
        assert_eq!(
            keys,
            vec![
                "enhanced-slot1",
                "language-slot1",
                "party-slot1",
                "quests-slot1",
                "teamgold-slot1"
            ]
        );
        assert_eq!(
            manager.store().get("teamgold-slot1").unwrap().as_deref(),
            Some("100")
        );
    }

    #[test]
    fn test_parts_load_independently() {
        let mut store = MemoryStore::new();
        store.set("teamgold-x", "777").unwrap();
        store.set("language-x", "\"cpp\"").unwrap();
        store.set("party-x", "not json").unwrap();
        let manager = SaveManager::new(store);
        let state = manager.load("x").unwrap();
        assert_eq!(state.team_gold, 777);
        assert_eq!(state.track, Track::Cpp);
        assert_eq!(state.members, starter_party());
    }

    #[test]
    fn test_list_saves() {
        let mut manager = SaveManager::new(MemoryStore::new());
        manager.save(&GameState::new("beta")).unwrap();
        manager.save(&GameState::new("alpha")).unwrap();
        assert_eq!(manager.list_saves().unwrap(), vec!["alpha", "beta"]);
        assert!(manager.exists("alpha").unwrap());
        assert!(!manager.exists("gamma").unwrap());
    }
}

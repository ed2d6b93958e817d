//! Runtime settings, stored at ~/.quizquest/config.json.

use crate::core::constants::{AUTOSAVE_INTERVAL_SECONDS, PACING_DELAY_MS, QUESTION_TIME_LIMIT_SECS};
use crate::core::error::StorageError;
use crate::utils::persistence::{load_json_or_default, quizquest_dir, save_json};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::time::Duration;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GameConfig {
    /// Directory holding equipment.json, monsters.json and questions/.
    pub catalog_dir: PathBuf,

    /// Seconds a player has to answer before the turn counts as wrong
    pub question_time_limit_secs: u64,

    /// Pause between battle steps so results can be read
    pub pacing_delay_ms: u64,

    pub autosave_interval_secs: u64,

    /// Skip persisting on the autosave interval when false
    pub auto_save: bool,

    pub music_volume: f32,
    pub sfx_volume: f32,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            catalog_dir: PathBuf::from("data"),
            question_time_limit_secs: QUESTION_TIME_LIMIT_SECS,
            pacing_delay_ms: PACING_DELAY_MS,
            autosave_interval_secs: AUTOSAVE_INTERVAL_SECONDS,
            auto_save: true,
            music_volume: 0.5,
            sfx_volume: 0.7,
        }
    }
}

impl GameConfig {
    pub fn default_path() -> Result<PathBuf, StorageError> {
        Ok(quizquest_dir()?.join("config.json"))
    }

    /// Missing or unreadable config yields defaults.
    pub fn load_from(path: &Path) -> Self {
        let mut config: Self = load_json_or_default(path);
        config.music_volume = config.music_volume.clamp(0.0, 1.0);
        config.sfx_volume = config.sfx_volume.clamp(0.0, 1.0);
        config
    }

    pub fn save_to(&self, path: &Path) -> Result<(), StorageError> {
        save_json(path, self)
    }

    pub fn question_time_limit(&self) -> Duration {
        Duration::from_secs(self.question_time_limit_secs)
    }

    pub fn pacing_delay(&self) -> Duration {
        Duration::from_millis(self.pacing_delay_ms)
    }

    pub fn autosave_interval(&self) -> Duration {
        Duration::from_secs(self.autosave_interval_secs)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = GameConfig::default();
        assert_eq!(config.question_time_limit(), Duration::from_secs(30));
        assert_eq!(config.pacing_delay(), Duration::from_millis(1000));
        assert!(config.auto_save);
    }

    #[test]
    fn test_partial_file_fills_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.json");
        std::fs::write(&path, r#"{"question_time_limit_secs": 10, "sfx_volume": 4.0}"#).unwrap();
        let config = GameConfig::load_from(&path);
        assert_eq!(config.question_time_limit_secs, 10);
        assert_eq!(config.sfx_volume, 1.0);
        assert_eq!(config.autosave_interval_secs, 300);
    }

    #[test]
    fn test_save_roundtrip() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.json");
        let config = GameConfig {
            pacing_delay_ms: 0,
            ..Default::default()
        };
        config.save_to(&path).unwrap();
        assert_eq!(GameConfig::load_from(&path), config);
    }
}

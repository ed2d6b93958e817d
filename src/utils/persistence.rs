//! JSON file helpers for the ~/.quizquest/ directory.

use crate::core::error::StorageError;
use serde::de::DeserializeOwned;
use serde::Serialize;
use std::fs;
use std::path::{Path, PathBuf};

/// Get the ~/.quizquest/ directory path, creating it if needed.
pub fn quizquest_dir() -> Result<PathBuf, StorageError> {
    let home_dir = dirs::home_dir()
        .ok_or_else(|| StorageError::Unavailable("could not determine home directory".into()))?;
    let dir = home_dir.join(".quizquest");
    fs::create_dir_all(&dir)?;
    Ok(dir)
}

/// Load a JSON file, returning `T::default()` if missing or invalid.
pub fn load_json_or_default<T: Default + DeserializeOwned>(path: &Path) -> T {
    match fs::read_to_string(path) {
        Ok(json) => serde_json::from_str(&json).unwrap_or_else(|e| {
            tracing::warn!(path = %path.display(), "ignoring unreadable file: {}", e);
            T::default()
        }),
        Err(_) => T::default(),
    }
}

/// Save a value as pretty-printed JSON, creating parent directories.
pub fn save_json<T: Serialize>(path: &Path, data: &T) -> Result<(), StorageError> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)?;
    }
    let json = serde_json::to_string_pretty(data).map_err(|source| StorageError::Serde {
        key: path.display().to_string(),
        source,
    })?;
    fs::write(path, json)?;
    Ok(())
}

//! Reads catalog JSON from a content directory.
//!
//! Layout:
//!   <dir>/equipment.json
//!   <dir>/monsters.json
//!   <dir>/questions/<track>.json
//!
//! Loading never aborts. A part that fails to load is replaced by an empty
//! collection and reported in [`CatalogLoad::failures`].

use super::maps::default_maps;
use super::types::Catalog;
use crate::core::error::GameError;
use crate::quiz::{LevelPool, QuestionBank, Track};
use serde::de::DeserializeOwned;
use std::fs;
use std::path::{Path, PathBuf};

pub struct CatalogLoad {
    pub catalog: Catalog,
    pub failures: Vec<GameError>,
}

pub fn question_file(dir: &Path, track: Track) -> PathBuf {
    dir.join("questions").join(format!("{}.json", track.key()))
}

fn read_json<T: DeserializeOwned>(path: &Path, what: &str) -> Result<T, GameError> {
    let json = fs::read_to_string(path)
        .map_err(|e| GameError::data_unavailable(what, format!("{}: {}", path.display(), e)))?;
    serde_json::from_str(&json)
        .map_err(|e| GameError::data_unavailable(what, format!("{}: {}", path.display(), e)))
}

fn load_part<T: DeserializeOwned + Default>(
    path: &Path,
    what: &str,
    failures: &mut Vec<GameError>,
) -> T {
    match read_json(path, what) {
        Ok(value) => value,
        Err(err) => {
            tracing::error!("{}", err);
            failures.push(err);
            T::default()
        }
    }
}

pub fn load_catalog(dir: &Path) -> CatalogLoad {
    let mut failures = Vec::new();

    let equipment = load_part(&dir.join("equipment.json"), "equipment catalog", &mut failures);
    let monsters = load_part(&dir.join("monsters.json"), "monster catalog", &mut failures);

    let mut questions = QuestionBank::new();
    for track in Track::ALL {
        let what = format!("{} question bank", track.display_name());
        let pool: LevelPool = load_part(&question_file(dir, track), &what, &mut failures);
        if pool.is_empty() {
            tracing::warn!(%track, "question bank is empty");
        } else {
            tracing::info!(
                %track,
                levels = pool.len(),
                questions = pool.values().map(Vec::len).sum::<usize>(),
                "question bank loaded"
            );
        }
        questions.insert_track(track, pool);
    }

    let catalog = Catalog {
        equipment,
        monsters,
        maps: default_maps(),
        questions,
    };
    tracing::info!(
        equipment = catalog.equipment.len(),
        monsters = catalog.monsters.len(),
        failures = failures.len(),
        "catalog loaded"
    );
    CatalogLoad { catalog, failures }
}

use crate::core::constants::DEFAULT_CHOICE_KEYS;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;

/// Programming-language question pool selected for a save.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Track {
    Python,
    Cpp,
}

impl Track {
    pub const ALL: [Track; 2] = [Track::Python, Track::Cpp];

    /// Key used in save data and question file names.
    pub fn key(&self) -> &'static str {
        match self {
            Track::Python => "python",
            Track::Cpp => "cpp",
        }
    }

    pub fn display_name(&self) -> &'static str {
        match self {
            Track::Python => "Python",
            Track::Cpp => "C++",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "python" | "py" => Some(Track::Python),
            "cpp" | "c++" => Some(Track::Cpp),
            _ => None,
        }
    }
}

impl Default for Track {
    fn default() -> Self {
        Track::Python
    }
}

impl fmt::Display for Track {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.key())
    }
}

/// One quiz question. `options` is either empty or holds exactly four entries.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Question {
    /// Prompt text; may embed a ``` fenced code block.
    pub question: String,
    #[serde(default)]
    pub options: Vec<String>,
    /// Canonical answer key, e.g. "B".
    pub answer: String,
}

/// A selectable answer: the key submitted for adjudication and its label.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Choice {
    pub key: String,
    pub label: String,
}

impl Question {
    /// Answer choices. An option's key is its first character ("B. list" -> "B");
    /// questions without options offer bare A-D keys.
    pub fn choices(&self) -> Vec<Choice> {
        if self.options.is_empty() {
            return DEFAULT_CHOICE_KEYS
                .iter()
                .map(|key| Choice {
                    key: key.to_string(),
                    label: key.to_string(),
                })
                .collect();
        }
        self.options
            .iter()
            .map(|option| Choice {
                key: option.chars().next().map(String::from).unwrap_or_default(),
                label: option.clone(),
            })
            .collect()
    }
}

/// Piece of a formatted prompt.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PromptSegment {
    Text(String),
    Code(String),
}

/// Questions for one track, keyed by numeric level.
pub type LevelPool = BTreeMap<u32, Vec<Question>>;

/// Every loaded track. A missing track behaves like an empty one.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct QuestionBank {
    pub tracks: BTreeMap<Track, LevelPool>,
}

impl QuestionBank {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert_track(&mut self, track: Track, pool: LevelPool) {
        self.tracks.insert(track, pool);
    }

    pub fn pool(&self, track: Track, level: u32) -> &[Question] {
        self.tracks
            .get(&track)
            .and_then(|levels| levels.get(&level))
            .map(Vec::as_slice)
            .unwrap_or(&[])
    }

    pub fn question_count(&self, track: Track) -> usize {
        self.tracks
            .get(&track)
            .map(|levels| levels.values().map(Vec::len).sum())
            .unwrap_or(0)
    }
}

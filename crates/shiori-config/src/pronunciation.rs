use std::path::PathBuf;

use serde::{Deserialize, Serialize};
use shiori_core::dictionary::DictionaryKind;

/// A pronunciation dictionary and how to treat its markup
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq, Eq)]
pub struct SourceConfig {
    /// Dictionary file, or a directory whose first dictionary file is used
    pub path: PathBuf,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub kind: DictionaryKind,
}

impl SourceConfig {
    pub fn new(path: impl Into<PathBuf>, kind: DictionaryKind) -> Self {
        Self {
            path: path.into(),
            name: None,
            kind,
        }
    }

    pub fn named(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }
}

#[derive(Serialize, Deserialize, Clone, Debug, Default)]
#[serde(default)]
pub struct PronunciationConfig {
    /// Audio dictionaries in priority order
    #[serde(default)]
    pub audio: Vec<SourceConfig>,
    /// Dictionary with tonal markup for pitch extraction
    #[serde(default)]
    pub pitch: Option<SourceConfig>,
}

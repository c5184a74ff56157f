use std::collections::HashMap;
use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

/// File extensions scanned for in dictionary directories
pub const DICTIONARY_EXTENSIONS: &[&str] = &["txt"];

fn default_enabled() -> bool {
    true
}

fn default_use_fallback() -> bool {
    false
}

fn default_cache_handles() -> bool {
    true
}

fn default_max_fallback_entries() -> usize {
    3
}

#[derive(Serialize, Deserialize, Clone, Debug)]
#[serde(default)]
pub struct DictionaryConfig {
    #[serde(default = "default_enabled")]
    pub enabled: bool,
    /// Dictionary files or directories holding them, highest priority first
    #[serde(default)]
    pub primary: Vec<PathBuf>,
    /// Only consulted when nothing in `primary` has an entry
    #[serde(default)]
    pub secondary: Vec<PathBuf>,
    #[serde(default)]
    pub tertiary: Vec<PathBuf>,
    /// File name -> display name, e.g. `"DJS.txt": "大辞泉 第二版"`
    #[serde(default)]
    pub display_names: HashMap<String, String>,
    /// Offer the generic lexicon when no tier has an entry
    #[serde(default = "default_use_fallback")]
    pub use_fallback: bool,
    #[serde(default)]
    pub fallback_lexicon: Option<PathBuf>,
    #[serde(default = "default_max_fallback_entries")]
    pub max_fallback_entries: usize,
    /// Keep dictionaries open between words
    #[serde(default = "default_cache_handles")]
    pub cache_handles: bool,
}

impl Default for DictionaryConfig {
    fn default() -> Self {
        Self {
            enabled: default_enabled(),
            primary: vec![],
            secondary: vec![],
            tertiary: vec![],
            display_names: HashMap::new(),
            use_fallback: default_use_fallback(),
            fallback_lexicon: None,
            max_fallback_entries: default_max_fallback_entries(),
            cache_handles: default_cache_handles(),
        }
    }
}

impl DictionaryConfig {
    /// Tier names paired with their configured paths, in priority order
    pub fn tier_paths(&self) -> [(&'static str, &[PathBuf]); 3] {
        [
            ("primary", self.primary.as_slice()),
            ("secondary", self.secondary.as_slice()),
            ("tertiary", self.tertiary.as_slice()),
        ]
    }
}

/// Dictionary files named by `dir_or_file`: the file itself, or the supported
/// files directly inside the directory, sorted by name.
///
/// A path that does not exist is logged and kept, so opening it later reports
/// the dictionary as unavailable.
pub fn collect_dictionary_paths(dir_or_file: &Path) -> Vec<PathBuf> {
    if !dir_or_file.exists() {
        tracing::warn!("Dictionary path does not exist: {}", dir_or_file.display());
        return vec![dir_or_file.to_path_buf()];
    }

    if dir_or_file.is_file() {
        return if has_dictionary_extension(dir_or_file) {
            vec![dir_or_file.to_path_buf()]
        } else {
            tracing::warn!("Not a dictionary file: {}", dir_or_file.display());
            vec![]
        };
    }

    if !dir_or_file.is_dir() {
        return vec![];
    }

    let entries = match fs::read_dir(dir_or_file) {
        Ok(entries) => entries,
        Err(e) => {
            tracing::warn!("Failed to scan {}: {}", dir_or_file.display(), e);
            return vec![];
        }
    };

    let mut paths: Vec<PathBuf> = entries
        .flatten()
        .map(|entry| entry.path())
        .filter(|path| path.is_file() && has_dictionary_extension(path))
        .collect();
    paths.sort();
    paths
}

fn has_dictionary_extension(path: &Path) -> bool {
    path.extension()
        .and_then(|e| e.to_str())
        .is_some_and(|ext| {
            DICTIONARY_EXTENSIONS
                .iter()
                .any(|known| known.eq_ignore_ascii_case(ext))
        })
}

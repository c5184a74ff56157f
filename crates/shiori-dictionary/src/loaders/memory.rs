use std::collections::HashMap;
use std::path::{Path, PathBuf};

use shiori_core::dictionary::{Dictionary, DictionaryLoader, DictionaryMetadata, LoadError};

use crate::entry::{EntryTable, normalize_resource_path};

/// Dictionary held entirely in memory
#[derive(Debug, Clone, Default)]
pub struct MemoryDictionary {
    title: String,
    entries: EntryTable,
    resources: HashMap<String, Vec<u8>>,
}

impl MemoryDictionary {
    pub fn new(title: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            ..Self::default()
        }
    }

    pub fn with_entry(mut self, key: &str, body: impl Into<String>) -> Self {
        self.insert_entry(key, body);
        self
    }

    pub fn with_resource(mut self, path: &str, data: impl Into<Vec<u8>>) -> Self {
        self.insert_resource(path, data);
        self
    }

    pub fn insert_entry(&mut self, key: &str, body: impl Into<String>) {
        self.entries.insert(key, body);
    }

    /// Resource paths are matched case-insensitively, like MDD keys
    pub fn insert_resource(&mut self, path: &str, data: impl Into<Vec<u8>>) {
        match normalize_resource_path(path) {
            Some(key) => {
                self.resources.insert(key.to_lowercase(), data.into());
            }
            None => tracing::warn!("Ignoring resource with invalid path: {}", path),
        }
    }
}

impl Dictionary for MemoryDictionary {
    fn lookup(&self, key: &str) -> Option<String> {
        self.entries.get(key)
    }

    fn fetch_embedded(&self, resource_path: &str) -> Option<Vec<u8>> {
        let key = normalize_resource_path(resource_path)?.to_lowercase();
        self.resources.get(&key).cloned()
    }

    fn metadata(&self) -> DictionaryMetadata {
        DictionaryMetadata {
            title: self.title.clone(),
            format: "memory".to_string(),
            entry_count: self.entries.len(),
            resource_count: self.resources.len(),
        }
    }
}

/// Serves pre-built in-memory dictionaries by path
#[derive(Default)]
pub struct MemoryLoader {
    dictionaries: HashMap<PathBuf, MemoryDictionary>,
}

impl MemoryLoader {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_dictionary(mut self, path: impl Into<PathBuf>, dictionary: MemoryDictionary) -> Self {
        self.insert(path, dictionary);
        self
    }

    pub fn insert(&mut self, path: impl Into<PathBuf>, dictionary: MemoryDictionary) {
        self.dictionaries.insert(path.into(), dictionary);
    }
}

impl DictionaryLoader for MemoryLoader {
    fn load_from_file(&self, path: &Path) -> Result<Box<dyn Dictionary>, LoadError> {
        self.dictionaries
            .get(path)
            .map(|d| Box::new(d.clone()) as Box<dyn Dictionary>)
            .ok_or_else(|| LoadError::FileNotFound(path.display().to_string()))
    }

    fn supported_formats(&self) -> Vec<String> {
        vec!["memory".to_string()]
    }
}

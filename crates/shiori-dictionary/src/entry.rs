use std::collections::HashMap;

use shiori_core::preprocess::{DefaultPreprocessor, Preprocessor};

/// Entry body that redirects to another key
pub const LINK_PREFIX: &str = "@@@LINK=";

/// Longest redirect chain followed before giving up
pub const MAX_LINK_DEPTH: usize = 5;

/// Redirect target if the whole entry is a `@@@LINK=` line
pub fn link_target(body: &str) -> Option<&str> {
    body.trim().strip_prefix(LINK_PREFIX).map(str::trim)
}

/// Key -> entry bodies, keys folded for width and case.
///
/// One key may carry several bodies (homographs); a lookup joins them.
#[derive(Debug, Clone, Default)]
pub struct EntryTable {
    entries: HashMap<String, Vec<String>>,
}

impl EntryTable {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, key: &str, body: impl Into<String>) {
        self.entries
            .entry(DefaultPreprocessor.fold_key(key))
            .or_default()
            .push(body.into());
    }

    /// Number of distinct keys
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Entry for `key` with redirects resolved, `None` when nothing non-empty remains
    pub fn get(&self, key: &str) -> Option<String> {
        self.resolve(&DefaultPreprocessor.fold_key(key), 0)
    }

    fn resolve(&self, folded: &str, depth: usize) -> Option<String> {
        let bodies = self.entries.get(folded)?;
        let mut parts = Vec::with_capacity(bodies.len());

        for body in bodies {
            match link_target(body) {
                Some(target) if depth < MAX_LINK_DEPTH => {
                    let target = DefaultPreprocessor.fold_key(target);
                    if let Some(resolved) = self.resolve(&target, depth + 1) {
                        parts.push(resolved);
                    }
                }
                Some(_) => tracing::debug!("Redirect chain from '{}' too deep", folded),
                None => parts.push(body.clone()),
            }
        }

        let joined = parts.join("\n");
        (!joined.trim().is_empty()).then_some(joined)
    }
}

/// Canonical relative path of an embedded resource.
///
/// Accepts `sound://` and `file://` links and backslash separators; rejects
/// anything escaping the dictionary root.
pub fn normalize_resource_path(path: &str) -> Option<String> {
    let path = path.trim();
    let path = path
        .strip_prefix("sound://")
        .or_else(|| path.strip_prefix("file://"))
        .unwrap_or(path)
        .replace('\\', "/");

    let parts: Vec<&str> = path
        .split('/')
        .filter(|part| !part.is_empty() && *part != ".")
        .collect();

    if parts.is_empty() || parts.contains(&"..") {
        return None;
    }

    Some(parts.join("/"))
}

use std::collections::{HashMap, HashSet};
use std::path::PathBuf;

use shiori_core::dictionary::{Dictionary, DictionaryLoader, DictionarySource};

/// Whether opened handles outlive a single lookup
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum HandlePolicy {
    /// Keep every handle until [`HandleCache::close_all`] or drop
    #[default]
    Cached,
    /// Open per lookup, release when the lookup returns
    Scoped,
}

/// Opened dictionary handles, keyed by configured path.
///
/// Append-only: a handle is added the first time its path is used and never
/// replaced. With [`HandlePolicy::Cached`] a path that failed to open is not
/// tried again until [`close_all`](Self::close_all). Not synchronized; one
/// cache belongs to one resolver.
pub struct HandleCache {
    loader: Box<dyn DictionaryLoader>,
    policy: HandlePolicy,
    handles: HashMap<PathBuf, Box<dyn Dictionary>>,
    failed: HashSet<PathBuf>,
}

impl HandleCache {
    pub fn new(loader: Box<dyn DictionaryLoader>, policy: HandlePolicy) -> Self {
        Self {
            loader,
            policy,
            handles: HashMap::new(),
            failed: HashSet::new(),
        }
    }

    pub fn policy(&self) -> HandlePolicy {
        self.policy
    }

    /// Number of handles currently held open
    pub fn len(&self) -> usize {
        self.handles.len()
    }

    pub fn is_empty(&self) -> bool {
        self.handles.is_empty()
    }

    /// Run `f` against the dictionary behind `source`.
    ///
    /// Returns `None` when the container cannot be opened; the condition is
    /// logged here and never raised.
    pub fn with_dictionary<R>(
        &mut self,
        source: &DictionarySource,
        f: impl FnOnce(&dyn Dictionary) -> R,
    ) -> Option<R> {
        match self.policy {
            HandlePolicy::Scoped => {
                let dictionary = self.open(source)?;
                let result = f(dictionary.as_ref());
                drop(dictionary);
                Some(result)
            }
            HandlePolicy::Cached => {
                if self.failed.contains(&source.path) {
                    return None;
                }
                if !self.handles.contains_key(&source.path) {
                    let dictionary = self.open(source)?;
                    self.handles.insert(source.path.clone(), dictionary);
                }
                self.handles.get(&source.path).map(|d| f(d.as_ref()))
            }
        }
    }

    /// Release every cached handle, returning how many were open.
    ///
    /// Paths that failed to open are retried after this.
    pub fn close_all(&mut self) -> usize {
        let count = self.handles.len();
        self.handles.clear();
        self.failed.clear();
        if count > 0 {
            tracing::debug!("Closed {} dictionary handles", count);
        }
        count
    }

    fn open(&mut self, source: &DictionarySource) -> Option<Box<dyn Dictionary>> {
        match self.loader.load_from_file(&source.path) {
            Ok(dictionary) => {
                let meta = dictionary.metadata();
                tracing::debug!(
                    "Opened {} ({} entries, {})",
                    source.name,
                    meta.entry_count,
                    meta.format
                );
                Some(dictionary)
            }
            Err(e) => {
                if self.failed.insert(source.path.clone()) {
                    tracing::warn!("Dictionary {} unavailable: {}", source.name, e);
                } else {
                    tracing::debug!("Dictionary {} still unavailable: {}", source.name, e);
                }
                None
            }
        }
    }
}

impl Drop for HandleCache {
    fn drop(&mut self) {
        self.close_all();
    }
}

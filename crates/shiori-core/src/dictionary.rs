use std::path::{Path, PathBuf};
use std::sync::Arc;

use serde::{Deserialize, Serialize};

/// Read-only access to one opened dictionary container
pub trait Dictionary: Send + Sync {
    /// Raw entry stored under `key`.
    ///
    /// Width/case folding of the key is the container's job; callers pass the
    /// candidate form as-is.
    fn lookup(&self, key: &str) -> Option<String>;

    /// Embedded resource (stylesheet, image, audio) referenced by an entry
    fn fetch_embedded(&self, resource_path: &str) -> Option<Vec<u8>>;

    /// Get dictionary metadata
    fn metadata(&self) -> DictionaryMetadata;
}

/// Open dictionary containers from files
pub trait DictionaryLoader: Send + Sync {
    /// Open the container stored at `path`
    fn load_from_file(&self, path: &Path) -> Result<Box<dyn Dictionary>, LoadError>;

    /// Supported file formats
    fn supported_formats(&self) -> Vec<String>;
}

/// Lets several handle caches share one loader
impl<L: DictionaryLoader + ?Sized> DictionaryLoader for Arc<L> {
    fn load_from_file(&self, path: &Path) -> Result<Box<dyn Dictionary>, LoadError> {
        (**self).load_from_file(path)
    }

    fn supported_formats(&self) -> Vec<String> {
        (**self).supported_formats()
    }
}

#[derive(Debug, Clone)]
pub struct DictionaryMetadata {
    pub title: String,
    pub format: String,
    pub entry_count: usize,
    pub resource_count: usize,
}

/// Markup convention a dictionary follows.
///
/// Decides which pipelines may use the dictionary: gloss dictionaries feed the
/// tiered resolver, pitch-tagged ones the pitch-group extractor, and anything
/// with audio the audio selector.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DictionaryKind {
    /// Plain definitions, no pronunciation data
    #[default]
    Glossary,
    /// Newer accent dictionaries: audio links, incomplete tonal markup
    AudioOnly,
    /// Older accent dictionaries: `tune-0/1/2` tonal classes plus audio links
    PitchTagged,
    /// Monolingual dictionaries carrying both definitions and audio
    Hybrid,
}

impl DictionaryKind {
    pub fn supports_pitch(&self) -> bool {
        matches!(self, DictionaryKind::PitchTagged)
    }

    pub fn supports_audio(&self) -> bool {
        matches!(
            self,
            DictionaryKind::AudioOnly | DictionaryKind::PitchTagged | DictionaryKind::Hybrid
        )
    }

    pub fn supports_gloss(&self) -> bool {
        matches!(self, DictionaryKind::Glossary | DictionaryKind::Hybrid)
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            DictionaryKind::Glossary => "glossary",
            DictionaryKind::AudioOnly => "audio-only",
            DictionaryKind::PitchTagged => "pitch-tagged",
            DictionaryKind::Hybrid => "hybrid",
        }
    }
}

/// One configured dictionary: where it lives and what to call it
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DictionarySource {
    pub path: PathBuf,
    pub name: String,
    #[serde(default)]
    pub kind: DictionaryKind,
}

impl DictionarySource {
    pub fn new(path: impl Into<PathBuf>, name: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            name: name.into(),
            kind: DictionaryKind::default(),
        }
    }

    pub fn with_kind(mut self, kind: DictionaryKind) -> Self {
        self.kind = kind;
        self
    }

    /// Source named after its file stem
    pub fn from_path(path: impl Into<PathBuf>) -> Self {
        let path = path.into();
        let name = path
            .file_stem()
            .map(|s| s.to_string_lossy().into_owned())
            .unwrap_or_else(|| path.display().to_string());
        Self::new(path, name)
    }
}

/// Priority group of dictionaries queried together
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct DictionaryTier {
    pub name: String,
    pub sources: Vec<DictionarySource>,
}

impl DictionaryTier {
    pub fn new(name: impl Into<String>, sources: Vec<DictionarySource>) -> Self {
        Self {
            name: name.into(),
            sources,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.sources.is_empty()
    }
}

#[derive(Debug, thiserror::Error)]
pub enum LoadError {
    #[error("File not found: {0}")]
    FileNotFound(String),

    #[error("Invalid format: {0}")]
    InvalidFormat(String),

    #[error("Parse error: {0}")]
    ParseError(String),

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),
}

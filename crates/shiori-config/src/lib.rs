use std::env;
use std::fs::File;
use std::io::BufReader;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use shiori_core::dictionary::{DictionaryKind, DictionarySource, DictionaryTier};

use self::dictionary::{DictionaryConfig, collect_dictionary_paths};
use self::pronunciation::{PronunciationConfig, SourceConfig};

pub mod dictionary;
pub mod pronunciation;

#[derive(Serialize, Deserialize, Clone, Debug, Default)]
#[serde(default)]
pub struct Config {
    pub dictionary: DictionaryConfig,
    pub pronunciation: PronunciationConfig,
}

impl Config {
    /// Build from environment variables, reading `.env` first if present
    pub fn new() -> Self {
        if let Ok(path) = dotenvy::dotenv() {
            tracing::debug!("Loaded environment from {}", path.display());
        }

        let paths = |var: &str| -> Vec<PathBuf> {
            env::var_os(var)
                .map(|value| env::split_paths(&value).collect())
                .unwrap_or_default()
        };

        let flag = |var: &str, default: bool| -> bool {
            env::var(var)
                .ok()
                .and_then(|v| v.trim().parse().ok())
                .unwrap_or(default)
        };

        let mut audio = Vec::new();
        let mut pitch = None;
        if let Some(path) = env::var_os("SHIORI_NHK_NEW") {
            audio.push(SourceConfig::new(path, DictionaryKind::AudioOnly).named("NHK新版"));
        }
        if let Some(path) = env::var_os("SHIORI_NHK_OLD") {
            let old = SourceConfig::new(path, DictionaryKind::PitchTagged).named("NHK旧版");
            pitch = Some(old.clone());
            audio.push(old);
        }
        if let Some(path) = env::var_os("SHIORI_DJS") {
            audio.push(SourceConfig::new(path, DictionaryKind::Hybrid).named("大辞泉"));
        }

        Config {
            dictionary: DictionaryConfig {
                primary: paths("SHIORI_PRIMARY_DICTS"),
                secondary: paths("SHIORI_SECONDARY_DICTS"),
                tertiary: paths("SHIORI_TERTIARY_DICTS"),
                use_fallback: flag("SHIORI_USE_FALLBACK", false),
                fallback_lexicon: env::var_os("SHIORI_FALLBACK_LEXICON").map(PathBuf::from),
                cache_handles: flag("SHIORI_CACHE_HANDLES", true),
                ..DictionaryConfig::default()
            },
            pronunciation: PronunciationConfig { audio, pitch },
        }
    }

    /// Load a JSON config file
    pub fn from_file(path: &Path) -> anyhow::Result<Self> {
        tracing::info!("Loading config from {}", path.display());
        let file = File::open(path)?;
        let reader = BufReader::new(file);
        let config = serde_json::from_reader(reader)?;
        Ok(config)
    }

    /// Gloss tiers with directories expanded; empty tiers are dropped
    pub fn tiers(&self) -> Vec<DictionaryTier> {
        if !self.dictionary.enabled {
            return vec![];
        }

        self.dictionary
            .tier_paths()
            .into_iter()
            .map(|(name, paths)| {
                let sources = paths
                    .iter()
                    .flat_map(|p| collect_dictionary_paths(p))
                    .map(|path| self.source_for(path, None, DictionaryKind::Glossary))
                    .collect();
                DictionaryTier::new(name, sources)
            })
            .filter(|tier| !tier.is_empty())
            .collect()
    }

    /// Audio dictionaries in priority order
    pub fn audio_sources(&self) -> Vec<DictionarySource> {
        self.pronunciation
            .audio
            .iter()
            .filter_map(|source| self.resolve_source(source))
            .collect()
    }

    pub fn pitch_source(&self) -> Option<DictionarySource> {
        self.pronunciation
            .pitch
            .as_ref()
            .and_then(|source| self.resolve_source(source))
    }

    /// Human-readable problems with configured paths
    pub fn validate(&self) -> Vec<String> {
        let mut errors = Vec::new();

        for (name, paths) in self.dictionary.tier_paths() {
            for path in paths {
                if !path.exists() {
                    errors.push(format!(
                        "{} dictionary path does not exist: {}",
                        name,
                        path.display()
                    ));
                }
            }
        }

        let pronunciation = self
            .pronunciation
            .audio
            .iter()
            .chain(self.pronunciation.pitch.iter());
        for source in pronunciation {
            if !source.path.exists() {
                errors.push(format!(
                    "Pronunciation dictionary does not exist: {}",
                    source.path.display()
                ));
            }
        }

        if self.dictionary.use_fallback {
            match &self.dictionary.fallback_lexicon {
                Some(path) if !path.exists() => errors.push(format!(
                    "Fallback lexicon does not exist: {}",
                    path.display()
                )),
                Some(_) => {}
                None => errors.push("Fallback enabled but no lexicon configured".to_string()),
            }
        }

        errors
    }

    fn resolve_source(&self, source: &SourceConfig) -> Option<DictionarySource> {
        let path = collect_dictionary_paths(&source.path).into_iter().next()?;
        Some(self.source_for(path, source.name.as_deref(), source.kind))
    }

    /// Display name precedence: the file-name map, an explicit name, the file stem
    fn source_for(
        &self,
        path: PathBuf,
        name: Option<&str>,
        kind: DictionaryKind,
    ) -> DictionarySource {
        let mapped = path
            .file_name()
            .and_then(|f| f.to_str())
            .and_then(|f| self.dictionary.display_names.get(f))
            .cloned();

        let source = DictionarySource::from_path(path);
        let name = mapped
            .or_else(|| name.map(str::to_string))
            .unwrap_or_else(|| source.name.clone());

        DictionarySource { name, ..source }.with_kind(kind)
    }
}

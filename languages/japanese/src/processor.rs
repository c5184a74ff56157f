use std::sync::Arc;

use shiori_config::Config;
use shiori_core::dictionary::{DictionaryLoader, DictionarySource, DictionaryTier};
use shiori_core::error::ResolveError;
use shiori_core::language::{Analyzer, NoAnalyzer};
use shiori_core::types::{AudioResult, PitchCandidate, QueryWord};
use shiori_dictionary::{HandleCache, HandlePolicy, SourceLoader};

use crate::analyzer::LexiconAnalyzer;
use crate::audio::AudioSelector;
use crate::candidates::CandidateForms;
use crate::disambiguator::disambiguate;
use crate::dictionary::JMdict;
use crate::gloss::MergedGloss;
use crate::loader::JMdictLoader;
use crate::pitch_accent::PitchPattern;
use crate::pitch_groups::{PitchGroupExtractor, lookup_pitch};
use crate::resolver::TieredGlossResolver;

/// Display name of the fallback lexicon in glosses
pub const FALLBACK_DICTIONARY: &str = "JMDict";

/// Everything found for one word
#[derive(Debug, Clone)]
pub struct LookupReport {
    pub word: QueryWord,
    pub forms: CandidateForms,
    pub gloss: MergedGloss,
    /// Gloss came from the fallback lexicon
    pub from_fallback: bool,
    /// Form that produced the gloss, the surface when nothing did
    pub used_form: String,
    pub pitch_candidates: Vec<PitchCandidate>,
    pub pronunciation: Option<PitchCandidate>,
    pub pitch_pattern: Option<PitchPattern>,
    pub audio: Option<AudioResult>,
}

impl LookupReport {
    pub fn gloss_html(&self) -> String {
        self.gloss.to_html()
    }

    pub fn found(&self) -> bool {
        !self.gloss.is_empty() || self.pronunciation.is_some() || self.audio.is_some()
    }
}

struct Fallback {
    lexicon: Arc<JMdict>,
    max_entries: usize,
}

/// Gloss, pronunciation and audio lookups sharing one set of candidate forms.
///
/// Meant for one word at a time: dictionary handles are cached between calls
/// and the caches are not synchronized.
pub struct WordLookup {
    gloss: TieredGlossResolver,
    pronunciation_cache: HandleCache,
    pitch_source: Option<DictionarySource>,
    extractor: PitchGroupExtractor,
    audio: AudioSelector,
    analyzer: Box<dyn Analyzer>,
    fallback: Option<Fallback>,
}

impl WordLookup {
    pub fn builder() -> WordLookupBuilder {
        WordLookupBuilder::default()
    }

    /// Source-file dictionaries as configured; loads the fallback lexicon
    /// when it is enabled
    pub fn from_config(config: &Config) -> Result<Self, ResolveError> {
        let policy = if config.dictionary.cache_handles {
            HandlePolicy::Cached
        } else {
            HandlePolicy::Scoped
        };

        let mut builder = WordLookup::builder()
            .tiers(config.tiers())
            .audio_sources(config.audio_sources())
            .handle_policy(policy);

        if let Some(source) = config.pitch_source() {
            builder = builder.pitch_source(source);
        }

        if config.dictionary.use_fallback {
            match &config.dictionary.fallback_lexicon {
                Some(path) => match JMdictLoader::load_from_file(path) {
                    Ok(lexicon) => {
                        let lexicon = Arc::new(lexicon);
                        builder = builder
                            .analyzer(LexiconAnalyzer::new(Arc::clone(&lexicon)))
                            .fallback(lexicon, config.dictionary.max_fallback_entries);
                    }
                    Err(e) => tracing::warn!("Fallback lexicon unavailable: {}", e),
                },
                None => tracing::warn!("Fallback enabled but no lexicon configured"),
            }
        }

        builder.build(Arc::new(SourceLoader))
    }

    pub fn lookup(&mut self, word: &QueryWord) -> LookupReport {
        tracing::debug!("Looking up {}", word.surface);

        let lemma = self.analyzer.lemma(&word.surface);
        if let Some(lemma) = lemma.as_deref().filter(|l| *l != word.surface) {
            tracing::debug!("Lemma of {} is {}", word.surface, lemma);
        }
        let forms = CandidateForms::generate(word, lemma.as_deref());

        let mut gloss = self.gloss.resolve(&forms);
        let mut from_fallback = false;
        if gloss.is_empty() {
            if let Some(fallback) = &self.fallback {
                let found = forms.iter().find_map(|form| {
                    fallback
                        .lexicon
                        .render_entries(form, fallback.max_entries)
                        .map(|html| (form, html))
                });
                if let Some((form, html)) = found {
                    tracing::debug!("Falling back to {} for {}", FALLBACK_DICTIONARY, form);
                    gloss = MergedGloss::single(FALLBACK_DICTIONARY, form, html);
                    from_fallback = true;
                }
            }
        }
        if gloss.is_empty() {
            tracing::debug!("No gloss for {}", word.surface);
        }
        let used_form = gloss.used_form().unwrap_or(word.surface.as_str()).to_string();

        let pitch_candidates = match &self.pitch_source {
            Some(source) => lookup_pitch(&mut self.pronunciation_cache, &self.extractor, source, &forms),
            None => Vec::new(),
        };

        let citation = match &word.forced_reading {
            Some(reading) => Some(reading.clone()),
            None if pitch_candidates.len() > 1 => self.analyzer.citation_reading(&word.surface),
            None => None,
        };
        let pronunciation = disambiguate(&pitch_candidates, citation.as_deref()).cloned();
        let pitch_pattern = pronunciation.as_ref().map(PitchPattern::from_candidate);
        if let (Some(chosen), Some(pattern)) = (&pronunciation, &pitch_pattern) {
            tracing::debug!(
                "Pronunciation {} {} ({})",
                chosen.plain_reading(),
                chosen.marker(),
                pattern.type_name()
            );
        }

        let audio = self.audio.select(&mut self.pronunciation_cache, &forms);

        LookupReport {
            word: word.clone(),
            forms,
            gloss,
            from_fallback,
            used_form,
            pitch_candidates,
            pronunciation,
            pitch_pattern,
            audio,
        }
    }

    /// Look words up one after another, reusing dictionary handles
    pub fn lookup_all(&mut self, words: &[QueryWord]) -> Vec<LookupReport> {
        words.iter().map(|word| self.lookup(word)).collect()
    }

    /// Release every cached dictionary handle
    pub fn close(&mut self) -> usize {
        self.gloss.close() + self.pronunciation_cache.close_all()
    }
}

#[derive(Default)]
pub struct WordLookupBuilder {
    tiers: Vec<DictionaryTier>,
    pitch_source: Option<DictionarySource>,
    audio_sources: Vec<DictionarySource>,
    analyzer: Option<Box<dyn Analyzer>>,
    fallback: Option<Fallback>,
    policy: HandlePolicy,
    extractor: Option<PitchGroupExtractor>,
}

impl WordLookupBuilder {
    pub fn tiers(mut self, tiers: Vec<DictionaryTier>) -> Self {
        self.tiers = tiers;
        self
    }

    pub fn tier(mut self, tier: DictionaryTier) -> Self {
        self.tiers.push(tier);
        self
    }

    pub fn pitch_source(mut self, source: DictionarySource) -> Self {
        self.pitch_source = Some(source);
        self
    }

    pub fn audio_sources(mut self, sources: Vec<DictionarySource>) -> Self {
        self.audio_sources = sources;
        self
    }

    pub fn analyzer(mut self, analyzer: impl Analyzer + 'static) -> Self {
        self.analyzer = Some(Box::new(analyzer));
        self
    }

    pub fn fallback(mut self, lexicon: Arc<JMdict>, max_entries: usize) -> Self {
        self.fallback = Some(Fallback {
            lexicon,
            max_entries,
        });
        self
    }

    pub fn handle_policy(mut self, policy: HandlePolicy) -> Self {
        self.policy = policy;
        self
    }

    pub fn extractor(mut self, extractor: PitchGroupExtractor) -> Self {
        self.extractor = Some(extractor);
        self
    }

    /// Fails only when there is nothing at all to look words up in
    pub fn build(self, loader: Arc<dyn DictionaryLoader>) -> Result<WordLookup, ResolveError> {
        let tiers: Vec<DictionaryTier> = self.tiers.into_iter().filter(|t| !t.is_empty()).collect();

        if tiers.is_empty()
            && self.pitch_source.is_none()
            && self.audio_sources.is_empty()
            && self.fallback.is_none()
        {
            return Err(ResolveError::NoDictionariesConfigured);
        }

        tracing::info!(
            "Word lookup ready: {} gloss tiers, {} audio sources, pitch from {}",
            tiers.len(),
            self.audio_sources.len(),
            self.pitch_source
                .as_ref()
                .map_or("nowhere", |s| s.name.as_str())
        );

        Ok(WordLookup {
            gloss: TieredGlossResolver::new(
                tiers,
                HandleCache::new(Box::new(Arc::clone(&loader)), self.policy),
            ),
            pronunciation_cache: HandleCache::new(Box::new(loader), self.policy),
            pitch_source: self.pitch_source,
            extractor: self.extractor.unwrap_or_default(),
            audio: AudioSelector::new(self.audio_sources),
            analyzer: self.analyzer.unwrap_or_else(|| Box::new(NoAnalyzer)),
            fallback: self.fallback,
        })
    }
}

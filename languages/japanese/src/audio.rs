use shiori_core::dictionary::{Dictionary, DictionarySource};
use shiori_core::types::AudioResult;
use shiori_dictionary::HandleCache;

use crate::candidates::CandidateForms;
use crate::markup::{audio_mime_type, audio_references};

/// Picks word audio from the first dictionary in priority order that has
/// any; audio is never combined across dictionaries
#[derive(Debug, Clone, Default)]
pub struct AudioSelector {
    sources: Vec<DictionarySource>,
}

impl AudioSelector {
    pub fn new(sources: Vec<DictionarySource>) -> Self {
        let (sources, skipped): (Vec<_>, Vec<_>) = sources
            .into_iter()
            .partition(|source| source.kind.supports_audio());
        for source in skipped {
            tracing::warn!(
                "{} is a {} dictionary and carries no audio",
                source.name,
                source.kind.as_str()
            );
        }
        Self { sources }
    }

    pub fn sources(&self) -> &[DictionarySource] {
        &self.sources
    }

    pub fn select(&self, cache: &mut HandleCache, forms: &CandidateForms) -> Option<AudioResult> {
        self.sources.iter().find_map(|source| {
            let found = cache
                .with_dictionary(source, |dictionary| first_audio(dictionary, forms, &source.name))
                .flatten();
            if let Some(audio) = &found {
                tracing::debug!("Audio from {} ({})", audio.source, audio.mime_type);
            }
            found
        })
    }
}

fn first_audio(dictionary: &dyn Dictionary, forms: &CandidateForms, name: &str) -> Option<AudioResult> {
    for form in forms.iter() {
        let Some(raw) = dictionary.lookup(form) else {
            continue;
        };

        let refs = match audio_references(&raw) {
            Ok(refs) => refs,
            Err(e) => {
                tracing::warn!("Malformed entry {} in {}: {}", form, name, e);
                continue;
            }
        };

        for path in refs {
            let Some(mime_type) = audio_mime_type(&path) else {
                continue;
            };
            match dictionary.fetch_embedded(&path) {
                Some(data) => {
                    return Some(AudioResult {
                        data,
                        mime_type: mime_type.to_string(),
                        source: name.to_string(),
                    });
                }
                None => tracing::debug!("{} links missing audio {}", name, path),
            }
        }
    }

    None
}

use shiori_core::dictionary::{Dictionary, DictionarySource, DictionaryTier};
use shiori_core::error::EntryError;
use shiori_core::types::{GlossFragment, GlossHit};
use shiori_dictionary::HandleCache;

use crate::candidates::CandidateForms;
use crate::gloss::MergedGloss;
use crate::markup::prepare_fragment;

/// Looks a word up tier by tier, stopping at the first tier with any entry.
///
/// Owns the handle cache its dictionaries are opened through; with
/// [`HandlePolicy::Cached`](shiori_dictionary::HandlePolicy) handles stay
/// open until [`close`](Self::close) or drop.
pub struct TieredGlossResolver {
    tiers: Vec<DictionaryTier>,
    cache: HandleCache,
}

impl TieredGlossResolver {
    pub fn new(tiers: Vec<DictionaryTier>, cache: HandleCache) -> Self {
        Self { tiers, cache }
    }

    pub fn tiers(&self) -> &[DictionaryTier] {
        &self.tiers
    }

    pub fn has_dictionaries(&self) -> bool {
        self.tiers.iter().any(|tier| !tier.is_empty())
    }

    /// Hits of the first tier where any dictionary has an entry.
    ///
    /// Each dictionary contributes at most one hit: the first candidate form
    /// it has a non-empty entry for. Later tiers are not opened once a tier
    /// has a hit.
    pub fn resolve_hits(&mut self, forms: &CandidateForms) -> Vec<GlossHit> {
        for tier in &self.tiers {
            let hits: Vec<GlossHit> = tier
                .sources
                .iter()
                .filter(|source| source.kind.supports_gloss())
                .filter_map(|source| lookup_source(&mut self.cache, source, forms))
                .collect();

            if !hits.is_empty() {
                tracing::debug!("Tier {} answered with {} entries", tier.name, hits.len());
                return hits;
            }
        }

        Vec::new()
    }

    /// Merged gloss for `forms`; empty when no tier has an entry
    pub fn resolve(&mut self, forms: &CandidateForms) -> MergedGloss {
        MergedGloss::merge(self.resolve_hits(forms))
    }

    /// Release cached handles, returning how many were open
    pub fn close(&mut self) -> usize {
        self.cache.close_all()
    }
}

/// First usable entry `source` has for any of `forms`
fn lookup_source(
    cache: &mut HandleCache,
    source: &DictionarySource,
    forms: &CandidateForms,
) -> Option<GlossHit> {
    let found = cache
        .with_dictionary(source, |dictionary| first_entry(dictionary, forms))
        .flatten()?;

    let (index, form, fragment) = found;
    match fragment {
        Ok(fragment) => {
            if index > 0 {
                tracing::debug!("{} matched variant form {}", source.name, form);
            } else {
                tracing::debug!("{} matched {}", source.name, form);
            }
            Some(GlossHit {
                dictionary: source.name.clone(),
                used_form: form,
                fragment,
            })
        }
        Err(e) => {
            tracing::warn!("Dropping entry {} from {}: {}", form, source.name, e);
            None
        }
    }
}

fn first_entry(
    dictionary: &dyn Dictionary,
    forms: &CandidateForms,
) -> Option<(usize, String, Result<GlossFragment, EntryError>)> {
    forms.iter().enumerate().find_map(|(index, form)| {
        let raw = dictionary.lookup(form)?;
        if raw.trim().is_empty() {
            return None;
        }
        Some((index, form.to_string(), prepare_fragment(&raw, dictionary)))
    })
}

use shiori_core::types::QueryWord;

use crate::kana::{
    LONG_VOWEL_MARK, continuative_variant, expand_long_vowels, is_all_katakana,
    katakana_to_hiragana,
};

/// Ordered, duplicate-free spellings to try against a dictionary.
///
/// Order: forced reading, then either the forced lookup form alone or
/// lemma, surface, continuative variants, hiragana folds of katakana forms,
/// long-vowel expansions of the rest.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CandidateForms {
    forms: Vec<String>,
}

impl CandidateForms {
    /// `lemma` comes from an analyzer; this type never computes one itself
    pub fn generate(word: &QueryWord, lemma: Option<&str>) -> Self {
        let mut forms = Self::default();

        if let Some(reading) = &word.forced_reading {
            forms.push(reading);
        }

        if let Some(form) = &word.forced_lookup_form {
            forms.push(form);
            return forms;
        }

        if let Some(lemma) = lemma {
            forms.push(lemma);
        }
        forms.push(&word.surface);

        let base: Vec<String> = forms.forms.clone();

        for form in &base {
            if let Some(variant) = continuative_variant(form) {
                forms.push(&variant);
            }
        }

        let spelled = forms.forms.clone();

        for form in base.iter().filter(|f| is_all_katakana(f)) {
            forms.push(&katakana_to_hiragana(form));
        }

        for form in spelled
            .iter()
            .filter(|f| !is_all_katakana(f) && f.contains(LONG_VOWEL_MARK))
        {
            forms.push(&expand_long_vowels(form));
        }

        forms
    }

    fn push(&mut self, form: &str) {
        let form = form.trim();
        if !form.is_empty() && !self.forms.iter().any(|f| f == form) {
            self.forms.push(form.to_string());
        }
    }

    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.forms.iter().map(String::as_str)
    }

    pub fn as_slice(&self) -> &[String] {
        &self.forms
    }

    pub fn len(&self) -> usize {
        self.forms.len()
    }

    pub fn is_empty(&self) -> bool {
        self.forms.is_empty()
    }
}

use shiori_core::preprocess::strip_markup;
use shiori_core::types::PitchCandidate;
use unicode_normalization::UnicodeNormalization;

use crate::kana::hiragana_to_katakana;

/// Comparable form of a reading: visible text, NFKC, katakana, upper case
pub fn normalize_reading(reading: &str) -> String {
    let plain: String = strip_markup(reading).nfkc().collect();
    hiragana_to_katakana(plain.trim()).to_uppercase()
}

/// Pick the candidate matching the analyzer's citation reading.
///
/// - zero or one candidates: the first, if any
/// - no usable citation reading: the last candidate, since dictionaries list
///   archaic readings before the common one
/// - otherwise an exact normalized match, else the most similar reading, the
///   earliest winning ties
pub fn disambiguate<'a>(
    candidates: &'a [PitchCandidate],
    citation_reading: Option<&str>,
) -> Option<&'a PitchCandidate> {
    if candidates.len() <= 1 {
        return candidates.first();
    }

    let target = citation_reading
        .map(normalize_reading)
        .filter(|r| !r.is_empty());
    let Some(target) = target else {
        return candidates.last();
    };

    let normalized: Vec<String> = candidates
        .iter()
        .map(|c| normalize_reading(&c.reading))
        .collect();

    if let Some(index) = normalized.iter().position(|r| *r == target) {
        return candidates.get(index);
    }

    let mut best: Option<(usize, f64)> = None;
    for (index, reading) in normalized.iter().enumerate() {
        let score = strsim::normalized_levenshtein(reading, &target);
        if best.is_none_or(|(_, best_score)| score > best_score) {
            best = Some((index, score));
        }
    }

    best.and_then(|(index, _)| candidates.get(index))
}

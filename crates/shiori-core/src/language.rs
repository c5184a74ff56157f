/// Morphological analysis collaborator.
///
/// Implementations must not fail loudly: an analyzer that cannot answer
/// returns `None`, and callers fall back to their own policy.
pub trait Analyzer: Send + Sync {
    /// Citation reading (katakana) of the word's dictionary form
    fn citation_reading(&self, word: &str) -> Option<String>;

    /// Dictionary form of the word, if the analyzer knows it
    fn lemma(&self, _word: &str) -> Option<String> {
        None
    }
}

/// Analyzer that never answers
#[derive(Debug, Clone, Copy, Default)]
pub struct NoAnalyzer;

impl Analyzer for NoAnalyzer {
    fn citation_reading(&self, _word: &str) -> Option<String> {
        None
    }
}

/// Optional trait for languages with conjugation/declension
pub trait Deconjugator: Send + Sync {
    /// Convert conjugated form to dictionary form(s)
    fn deconjugate(&self, word: &str) -> Vec<DeconjugationResult>;
}

#[derive(Debug, Clone)]
pub struct DeconjugationResult {
    pub base_form: String,
    pub conjugation_type: String,
    pub confidence: f32,
}

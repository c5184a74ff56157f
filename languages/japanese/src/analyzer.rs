use std::sync::Arc;

use shiori_core::language::{Analyzer, Deconjugator};

use crate::deconjugator::JapaneseDeconjugator;
use crate::dictionary::JMdict;
use crate::kana::hiragana_to_katakana;

/// Analyzer backed by the fallback lexicon and rule deconjugation.
///
/// The lemma is the word itself when the lexicon has it, else the most
/// confident deconjugated form the lexicon has. The citation reading is the
/// first kana spelling of the lemma's first entry.
pub struct LexiconAnalyzer {
    lexicon: Arc<JMdict>,
    deconjugator: JapaneseDeconjugator,
}

impl LexiconAnalyzer {
    pub fn new(lexicon: Arc<JMdict>) -> Self {
        Self {
            lexicon,
            deconjugator: JapaneseDeconjugator::new(),
        }
    }
}

impl Analyzer for LexiconAnalyzer {
    fn citation_reading(&self, word: &str) -> Option<String> {
        let lemma = self.lemma(word)?;
        let entry = self.lexicon.lookup_exact(&lemma).into_iter().next()?;
        entry.readings.first().map(|r| hiragana_to_katakana(r))
    }

    fn lemma(&self, word: &str) -> Option<String> {
        if self.lexicon.contains(word) {
            return Some(word.to_string());
        }

        self.deconjugator
            .deconjugate(word)
            .into_iter()
            .map(|r| r.base_form)
            .find(|base| self.lexicon.contains(base))
    }
}

//! Japanese word lookup: glosses merged from tiered dictionaries, pitch
//! accent picked from tonal markup, and word audio.

pub mod analyzer;
pub mod audio;
pub mod candidates;
pub mod deconjugator;
pub mod dictionary;
pub mod disambiguator;
pub mod gloss;
pub mod kana;
pub mod loader;
pub mod markup;
pub mod pitch_accent;
pub mod pitch_groups;
pub mod processor;
pub mod resolver;

pub use analyzer::LexiconAnalyzer;
pub use audio::AudioSelector;
pub use candidates::CandidateForms;
pub use deconjugator::JapaneseDeconjugator;
pub use dictionary::{JMdict, JMdictEntry};
pub use disambiguator::disambiguate;
pub use gloss::{GlossEntry, MergedGloss};
pub use loader::JMdictLoader;
pub use pitch_accent::{PatternType, PitchPattern};
pub use pitch_groups::PitchGroupExtractor;
pub use processor::{LookupReport, WordLookup, WordLookupBuilder};
pub use resolver::TieredGlossResolver;

#[cfg(test)]
mod tests;

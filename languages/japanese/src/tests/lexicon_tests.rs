use std::path::Path;
use std::sync::Arc;

use shiori_core::dictionary::LoadError;
use shiori_core::language::{Analyzer, Deconjugator};

use crate::analyzer::LexiconAnalyzer;
use crate::deconjugator::JapaneseDeconjugator;
use crate::dictionary::JMdict;
use crate::loader::JMdictLoader;

pub(crate) const LEXICON_JSON: &str = r#"{
  "version": "3.6.1",
  "words": [
    {
      "id": "1",
      "kanji": [{"common": true, "text": "精霊"}],
      "kana": [{"common": true, "text": "せいれい"}, {"text": "しょうりょう"}],
      "sense": [{"partOfSpeech": ["n"], "gloss": [{"lang": "eng", "text": "spirit"}, {"lang": "eng", "text": "soul"}]}]
    },
    {
      "id": "2",
      "kanji": [{"text": "食べる"}],
      "kana": [{"text": "たべる"}],
      "sense": [{"partOfSpeech": ["v1", "vt"], "gloss": [{"lang": "eng", "text": "to eat"}]}]
    },
    {
      "id": "3",
      "kana": [{"text": "ピン"}],
      "sense": [{"gloss": [{"lang": "ger", "text": "Nadel"}]}]
    }
  ]
}"#;

pub(crate) fn lexicon() -> JMdict {
    JMdict::from_json(LEXICON_JSON).unwrap()
}

#[test]
fn test_lexicon_keeps_english_entries() {
    let lexicon = lexicon();

    assert_eq!(lexicon.entry_count(), 2);
    assert!(lexicon.contains("精霊"));
    assert!(lexicon.contains("しょうりょう"));
    assert!(!lexicon.contains("ピン"));

    let entry = lexicon.lookup_exact("たべる")[0];
    assert_eq!(entry.headword(), "食べる");
    assert_eq!(entry.pos, vec!["v1", "vt"]);
}

#[test]
fn test_render_entries() {
    let lexicon = lexicon();

    assert_eq!(
        lexicon.render_entries("精霊", 3).as_deref(),
        Some("<div class='entry'><b>せいれい, しょうりょう</b>: spirit; soul</div>")
    );
    assert_eq!(lexicon.render_entries("精霊", 0), None);
    assert_eq!(lexicon.render_entries("政権", 3), None);
}

#[test]
fn test_merge_replaces_by_id() {
    let update = JMdict::from_json(
        r#"{"words": [{"id": "2", "kanji": [{"text": "食べる"}], "kana": [{"text": "たべる"}],
            "sense": [{"gloss": [{"lang": "eng", "text": "to consume"}]}]}]}"#,
    )
    .unwrap();

    let merged = lexicon().merge(update);

    assert_eq!(merged.entry_count(), 2);
    assert_eq!(merged.lookup_exact("食べる")[0].meanings, vec!["to consume"]);
    assert_eq!(merged.lookup_exact("精霊")[0].meanings, vec!["spirit", "soul"]);
}

#[test]
fn test_invalid_json_is_a_parse_error() {
    assert!(matches!(JMdict::from_json("{"), Err(LoadError::ParseError(_))));
}

#[test]
fn test_missing_lexicon_file() {
    let result = JMdictLoader::load_from_file(Path::new("/nonexistent/jmdict.json"));
    assert!(matches!(result, Err(LoadError::FileNotFound(_))));
    assert_eq!(JMdictLoader::load_all(&[Path::new("/nonexistent/jmdict.json")]).entry_count(), 0);
}

#[test]
fn test_lexicon_file_round_trip() {
    let dir = std::env::temp_dir().join(format!("shiori-lexicon-{}", std::process::id()));
    std::fs::create_dir_all(&dir).unwrap();
    let path = dir.join("jmdict.json");
    std::fs::write(&path, LEXICON_JSON).unwrap();

    let lexicon = JMdictLoader::load_from_file(&path).unwrap();
    assert_eq!(lexicon.entry_count(), 2);

    std::fs::remove_dir_all(&dir).unwrap();
}

#[test]
fn test_deconjugation() {
    let deconjugator = JapaneseDeconjugator::new();
    let bases = |word: &str| -> Vec<String> {
        deconjugator
            .deconjugate(word)
            .into_iter()
            .map(|r| r.base_form)
            .collect()
    };

    assert!(bases("食べた").contains(&"食べる".to_string()));
    assert!(bases("書いて").contains(&"書く".to_string()));
    assert!(bases("読みます").contains(&"読む".to_string()));
    assert!(bases("高くない").contains(&"高い".to_string()));
    assert_eq!(bases("して")[0], "する");
    assert!(bases("精霊").is_empty());
}

#[test]
fn test_continuous_forms() {
    let results = JapaneseDeconjugator::new().deconjugate("食べている");
    let eat = results.iter().find(|r| r.base_form == "食べる").unwrap();

    assert!(eat.conjugation_type.ends_with("continuous"));
    assert!(eat.confidence < 0.8);
}

#[test]
fn test_results_are_sorted_and_unique() {
    let results = JapaneseDeconjugator::new().deconjugate("待った");

    assert!(results.windows(2).all(|w| w[0].confidence >= w[1].confidence));
    let mut bases: Vec<&str> = results.iter().map(|r| r.base_form.as_str()).collect();
    let count = bases.len();
    bases.sort_unstable();
    bases.dedup();
    assert_eq!(bases.len(), count);
}

#[test]
fn test_lexicon_analyzer() {
    let analyzer = LexiconAnalyzer::new(Arc::new(lexicon()));

    assert_eq!(analyzer.lemma("精霊").as_deref(), Some("精霊"));
    assert_eq!(analyzer.lemma("食べた").as_deref(), Some("食べる"));
    assert_eq!(analyzer.lemma("ピン"), None);
    assert_eq!(analyzer.citation_reading("精霊").as_deref(), Some("セイレイ"));
    assert_eq!(analyzer.citation_reading("食べた").as_deref(), Some("タベル"));
    assert_eq!(analyzer.citation_reading("政権"), None);
}

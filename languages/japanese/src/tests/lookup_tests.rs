use std::path::PathBuf;
use std::sync::Arc;

use shiori_core::dictionary::{DictionaryKind, DictionarySource, DictionaryTier};
use shiori_core::error::ResolveError;
use shiori_core::language::Analyzer;
use shiori_core::types::QueryWord;
use shiori_dictionary::{HandlePolicy, MemoryDictionary, MemoryLoader};

use super::lexicon_tests::lexicon;
use super::{RecordingLoader, init_tracing, seirei_pitch_entry};
use crate::analyzer::LexiconAnalyzer;
use crate::pitch_accent::PatternType;
use crate::processor::WordLookup;

/// Analyzer answering one fixed citation reading
struct FixedReading(&'static str);

impl Analyzer for FixedReading {
    fn citation_reading(&self, _word: &str) -> Option<String> {
        Some(self.0.to_string())
    }
}

fn nhk_old() -> DictionarySource {
    DictionarySource::new("nhk_old", "NHK旧版").with_kind(DictionaryKind::PitchTagged)
}

fn djs_tier() -> DictionaryTier {
    DictionaryTier::new("primary", vec![DictionarySource::new("djs", "大辞泉")])
}

fn loader() -> MemoryLoader {
    MemoryLoader::new()
        .with_dictionary(
            "djs",
            MemoryDictionary::new("DJS")
                .with_entry(
                    "精霊",
                    r#"<link rel="stylesheet" href="djs.css"><div class="word">せい‐れい【精霊】</div>"#,
                )
                .with_entry("食べる", "<div>たべる【食べる】</div>")
                .with_resource("djs.css", ".word{font-weight:bold}"),
        )
        .with_dictionary(
            "nhk_old",
            MemoryDictionary::new("NHK")
                .with_entry("精霊", seirei_pitch_entry())
                .with_resource("seirei_1.mp3", b"ID3-1".to_vec())
                .with_resource("seirei_3.mp3", b"ID3-3".to_vec()),
        )
}

#[test]
fn test_nothing_configured_is_an_error() {
    let result = WordLookup::builder().build(Arc::new(MemoryLoader::new()));
    assert_eq!(result.err(), Some(ResolveError::NoDictionariesConfigured));

    let result = WordLookup::builder()
        .tier(DictionaryTier::new("primary", Vec::new()))
        .build(Arc::new(MemoryLoader::new()));
    assert_eq!(result.err(), Some(ResolveError::NoDictionariesConfigured));
}

#[test]
fn test_full_lookup_with_citation_reading() {
    init_tracing();
    let mut lookup = WordLookup::builder()
        .tier(djs_tier())
        .pitch_source(nhk_old())
        .audio_sources(vec![nhk_old()])
        .analyzer(FixedReading("セイレイ"))
        .build(Arc::new(loader()))
        .unwrap();

    let report = lookup.lookup(&QueryWord::new("精霊"));

    assert!(report.found());
    assert!(!report.from_fallback);
    assert_eq!(report.used_form, "精霊");
    assert!(report.gloss_html().contains(
        r#"<style>.yomitan-glossary [data-dictionary="大辞泉"] .word{font-weight:bold}</style>"#
    ));

    assert_eq!(report.pitch_candidates.len(), 3);
    let chosen = report.pronunciation.as_ref().unwrap();
    assert_eq!(chosen.plain_reading(), "セイレイ");
    assert_eq!(chosen.marker(), "[0]");
    assert_eq!(report.pitch_pattern.as_ref().unwrap().pattern_type, PatternType::Heiban);

    let audio = report.audio.as_ref().unwrap();
    assert_eq!(audio.source, "NHK旧版");
    assert_eq!(audio.mime_type, "audio/mpeg");
    assert_eq!(audio.data, b"ID3-1".to_vec());
}

#[test]
fn test_without_analyzer_the_last_reading_is_chosen() {
    let mut lookup = WordLookup::builder()
        .pitch_source(nhk_old())
        .build(Arc::new(loader()))
        .unwrap();

    let report = lookup.lookup(&QueryWord::new("精霊"));

    assert!(report.gloss.is_empty());
    assert_eq!(report.gloss_html(), "");
    assert_eq!(report.pronunciation.unwrap().plain_reading(), "セイレイ");
}

#[test]
fn test_forced_reading_drives_disambiguation() {
    let mut lookup = WordLookup::builder()
        .pitch_source(nhk_old())
        .analyzer(FixedReading("セイレイ"))
        .build(Arc::new(loader()))
        .unwrap();

    let word = QueryWord::new("精霊").with_reading("しょうりょう");
    let report = lookup.lookup(&word);

    let chosen = report.pronunciation.unwrap();
    assert_eq!(chosen.plain_reading(), "ショーリョー");
    assert_eq!(chosen.drop, 3);
    assert_eq!(chosen.marker(), "[3]");
    assert_eq!(report.pitch_pattern.unwrap().pattern_type, PatternType::Nakadaka);
}

#[test]
fn test_fallback_lexicon_fills_in() {
    let mut lookup = WordLookup::builder()
        .tier(DictionaryTier::new(
            "primary",
            vec![DictionarySource::new("empty", "空")],
        ))
        .fallback(Arc::new(lexicon()), 3)
        .build(Arc::new(MemoryLoader::new().with_dictionary("empty", MemoryDictionary::new("空"))))
        .unwrap();

    let report = lookup.lookup(&QueryWord::new("精霊"));

    assert!(report.from_fallback);
    assert_eq!(report.used_form, "精霊");
    assert_eq!(
        report.gloss_html(),
        concat!(
            r#"<div style="text-align: left;" class="yomitan-glossary"><ol>"#,
            r#"<li data-dictionary="JMDict"><i>(JMDict)</i> <span>"#,
            "<div class='entry'><b>せいれい, しょうりょう</b>: spirit; soul</div>",
            r#"</span></li></ol></div>"#,
        )
    );
}

#[test]
fn test_fallback_is_not_used_when_a_tier_answers() {
    let mut lookup = WordLookup::builder()
        .tier(djs_tier())
        .fallback(Arc::new(lexicon()), 3)
        .build(Arc::new(loader()))
        .unwrap();

    let report = lookup.lookup(&QueryWord::new("精霊"));
    assert!(!report.from_fallback);
    assert_eq!(report.gloss.dictionaries(), vec!["大辞泉"]);
}

#[test]
fn test_lexicon_analyzer_supplies_the_lemma() {
    let lexicon = Arc::new(lexicon());
    let mut lookup = WordLookup::builder()
        .tier(djs_tier())
        .analyzer(LexiconAnalyzer::new(Arc::clone(&lexicon)))
        .build(Arc::new(loader()))
        .unwrap();

    let report = lookup.lookup(&QueryWord::new("食べた"));

    assert_eq!(report.forms.as_slice(), &["食べる".to_string(), "食べた".to_string()]);
    assert_eq!(report.used_form, "食べる");
}

#[test]
fn test_unknown_word_finds_nothing() {
    let mut lookup = WordLookup::builder()
        .tier(djs_tier())
        .pitch_source(nhk_old())
        .audio_sources(vec![nhk_old()])
        .build(Arc::new(loader()))
        .unwrap();

    let report = lookup.lookup(&QueryWord::new("政権"));

    assert!(!report.found());
    assert_eq!(report.used_form, "政権");
    assert!(report.pitch_candidates.is_empty());
    assert_eq!(report.pronunciation, None);
    assert_eq!(report.audio, None);
}

#[test]
fn test_handles_are_reused_across_words() {
    let (loader, opened) = RecordingLoader::new(loader());
    let mut lookup = WordLookup::builder()
        .tier(djs_tier())
        .pitch_source(nhk_old())
        .audio_sources(vec![nhk_old()])
        .handle_policy(HandlePolicy::Cached)
        .build(Arc::new(loader))
        .unwrap();

    let words = QueryWord::parse_list("精霊, 政権\n食べる").unwrap();
    let reports = lookup.lookup_all(&words);

    assert_eq!(reports.len(), 3);
    assert_eq!(
        *opened.lock().unwrap(),
        vec![PathBuf::from("djs"), PathBuf::from("nhk_old")]
    );
    assert_eq!(lookup.close(), 2);
}

use shiori_core::error::EntryError;
use shiori_dictionary::MemoryDictionary;

use crate::markup::{audio_mime_type, audio_references, prepare_fragment};

#[test]
fn test_linked_stylesheet_is_extracted() {
    let dictionary = MemoryDictionary::new("DJS").with_resource("djs.css", ".word{font-weight:bold}");
    let fragment = prepare_fragment(
        r#"<link rel="stylesheet" type="text/css" href="djs.css"><div class="word">精霊</div>"#,
        &dictionary,
    )
    .unwrap();

    assert_eq!(fragment.html, r#"<div class="word">精霊</div>"#);
    assert_eq!(fragment.css, ".word{font-weight:bold}");
}

#[test]
fn test_missing_stylesheet_leaves_no_css() {
    let dictionary = MemoryDictionary::new("DJS");
    let fragment = prepare_fragment(
        r#"<link rel="stylesheet" href="gone.css"><p>精霊</p>"#,
        &dictionary,
    )
    .unwrap();

    assert_eq!(fragment.html, "<p>精霊</p>");
    assert_eq!(fragment.css, "");
}

#[test]
fn test_embedded_images_become_data_uris() {
    let dictionary = MemoryDictionary::new("DJS").with_resource("images/a.png", b"PNG".to_vec());
    let fragment = prepare_fragment(
        r#"<p><img src="images/a.png" alt="x"></p><img src="missing.png">"#,
        &dictionary,
    )
    .unwrap();

    assert_eq!(
        fragment.html,
        r#"<p><img src="data:image/png;base64,UE5H" alt="x"></p><img src="missing.png">"#
    );
}

#[test]
fn test_plain_entries_are_unchanged() {
    let dictionary = MemoryDictionary::new("DJS");
    let html = "<div>せい‐れい【精霊】<br>死者の霊魂。&amp; more</div>";
    let fragment = prepare_fragment(html, &dictionary).unwrap();
    assert_eq!(fragment.html, html);
}

#[test]
fn test_malformed_entry_is_an_error() {
    let dictionary = MemoryDictionary::new("DJS");
    let result = prepare_fragment("<p>精霊</p><!-- never closed", &dictionary);
    assert!(matches!(result, Err(EntryError::Markup { .. })));
}

#[test]
fn test_audio_references_in_document_order() {
    let refs = audio_references(concat!(
        r#"<a href="sound://audio/seirei.mp3">▶</a>"#,
        r#"<a href="https://example.com/x.mp3">web</a>"#,
        r#"<audio src="b.aac"></audio>"#,
        r#"<a href="sound://audio/seirei.mp3">again</a>"#,
        r#"<a href="sound://notes.txt">text</a>"#,
    ))
    .unwrap();

    assert_eq!(refs, vec!["sound://audio/seirei.mp3", "b.aac"]);
}

#[test]
fn test_audio_mime_types() {
    assert_eq!(audio_mime_type("sound://a/B.MP3"), Some("audio/mpeg"));
    assert_eq!(audio_mime_type("x.aac"), Some("audio/aac"));
    assert_eq!(audio_mime_type("x.m4a"), Some("audio/mp4"));
    assert_eq!(audio_mime_type("x.wav"), Some("audio/wav"));
    assert_eq!(audio_mime_type("x.opus"), Some("audio/ogg"));
    assert_eq!(audio_mime_type("x.png"), None);
    assert_eq!(audio_mime_type("noextension"), None);
}

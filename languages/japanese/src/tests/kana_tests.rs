use crate::kana::{
    continuative_variant, expand_long_vowels, hiragana_to_katakana, is_all_katakana,
    katakana_to_hiragana, mora_count,
};
use crate::pitch_accent::{PatternType, PitchPattern};

#[test]
fn test_kana_conversion() {
    assert_eq!(katakana_to_hiragana("ピン"), "ぴん");
    assert_eq!(hiragana_to_katakana("せいれい"), "セイレイ");
    assert_eq!(katakana_to_hiragana("精霊ー"), "精霊ー");
}

#[test]
fn test_all_katakana() {
    assert!(is_all_katakana("ピン"));
    assert!(is_all_katakana("コーヒー"));
    assert!(is_all_katakana("ジョン・スミス"));
    assert!(!is_all_katakana("ピンク色"));
    assert!(!is_all_katakana("ー"));
    assert!(!is_all_katakana(""));
}

#[test]
fn test_long_vowels() {
    assert_eq!(expand_long_vowels("すごーい"), "すごうい");
    assert_eq!(expand_long_vowels("かわいー"), "かわいい");
    assert_eq!(expand_long_vowels("ねーさん"), "ねいさん");
    assert_eq!(expand_long_vowels("ショーリョー"), "ショウリョウ");
    assert_eq!(expand_long_vowels("ーあ"), "ーあ");
}

#[test]
fn test_continuative_variant() {
    assert_eq!(continuative_variant("取り扱う").as_deref(), Some("取り扱い"));
    assert_eq!(continuative_variant("書き抜く").as_deref(), Some("書き抜き"));
    assert_eq!(continuative_variant("食べる"), None);
    assert_eq!(continuative_variant("精霊"), None);
    assert_eq!(continuative_variant(""), None);
}

#[test]
fn test_mora_count_skips_small_kana() {
    assert_eq!(mora_count("ショーリョー"), 4);
    assert_eq!(mora_count("セイレイ"), 4);
    assert_eq!(mora_count("きゃく"), 2);
}

#[test]
fn test_pattern_types() {
    assert_eq!(
        PitchPattern::from_drop_position(0, "セイレイ").pattern_type,
        PatternType::Heiban
    );
    assert_eq!(
        PitchPattern::from_drop_position(1, "ホン").pattern_type,
        PatternType::Atamadaka
    );
    assert_eq!(
        PitchPattern::from_drop_position(2, "ハナ").pattern_type,
        PatternType::Odaka
    );

    let pattern = PitchPattern::from_drop_position(3, "ショーリョー");
    assert_eq!(pattern.pattern_type, PatternType::Nakadaka);
    assert_eq!(pattern.type_name(), "中高型");
    assert_eq!(pattern.to_notation(), "[3]");
    assert_eq!(PatternType::Heiban.to_string(), "平板式");
}

#[test]
fn test_pattern_type_reads_the_offset_in_characters() {
    // キョ is two characters but one mora
    assert_eq!(
        PitchPattern::from_drop_position(2, "キョウ").pattern_type,
        PatternType::Atamadaka
    );
    assert_eq!(
        PitchPattern::from_drop_position(3, "キョウ").pattern_type,
        PatternType::Odaka
    );
    assert_eq!(
        PitchPattern::from_drop_position(4, "ショーリョー").pattern_type,
        PatternType::Nakadaka
    );
}

//! Kana classification and the small rewrites candidate forms are built from.

/// Distance between a hiragana code point and its katakana counterpart
const KANA_OFFSET: u32 = 0x60;

pub const LONG_VOWEL_MARK: char = 'ー';

const SMALL_KANA: &[char] = &[
    'ぁ', 'ぃ', 'ぅ', 'ぇ', 'ぉ', 'ゃ', 'ゅ', 'ょ', 'ゎ', 'ァ', 'ィ', 'ゥ', 'ェ', 'ォ', 'ヵ', 'ヶ', 'ャ',
    'ュ', 'ョ', 'ヮ',
];

/// u-row endings and the i-row kana a continuative stem ends in
const U_TO_I_ROW: &[(char, char)] = &[
    ('く', 'き'),
    ('ぐ', 'ぎ'),
    ('す', 'し'),
    ('つ', 'ち'),
    ('ぬ', 'に'),
    ('ぶ', 'び'),
    ('む', 'み'),
    ('る', 'り'),
    ('う', 'い'),
];

pub fn is_hiragana(c: char) -> bool {
    ('\u{3041}'..='\u{3096}').contains(&c)
}

pub fn is_katakana(c: char) -> bool {
    ('\u{30A1}'..='\u{30F6}').contains(&c)
}

pub fn is_kanji(c: char) -> bool {
    ('\u{4E00}'..='\u{9FFF}').contains(&c)
        || ('\u{3400}'..='\u{4DBF}').contains(&c)
        || c == '々'
}

/// True when every character is katakana, the long-vowel mark or a middle dot,
/// and at least one is a real katakana letter
pub fn is_all_katakana(text: &str) -> bool {
    let mut has_letter = false;
    for c in text.chars() {
        match c {
            _ if is_katakana(c) => has_letter = true,
            LONG_VOWEL_MARK | '・' => {}
            _ => return false,
        }
    }
    has_letter
}

pub fn katakana_to_hiragana(text: &str) -> String {
    text.chars()
        .map(|c| {
            if is_katakana(c) {
                char::from_u32(c as u32 - KANA_OFFSET).unwrap_or(c)
            } else {
                c
            }
        })
        .collect()
}

pub fn hiragana_to_katakana(text: &str) -> String {
    text.chars()
        .map(|c| {
            if is_hiragana(c) {
                char::from_u32(c as u32 + KANA_OFFSET).unwrap_or(c)
            } else {
                c
            }
        })
        .collect()
}

/// Vowel row of a kana, as the hiragana vowel itself
fn vowel_of(c: char) -> Option<char> {
    let hira = if is_katakana(c) {
        char::from_u32(c as u32 - KANA_OFFSET)?
    } else {
        c
    };

    const ROWS: &[(char, &str)] = &[
        ('あ', "ぁあかがさざただなはばぱまゃやらゎわ"),
        ('い', "ぃいきぎしじちぢにひびぴみりゐ"),
        ('う', "ぅうくぐすずっつづぬふぶぷむゅゆるゔ"),
        ('え', "ぇえけげせぜてでねへべぺめれゑ"),
        ('お', "ぉおこごそぞとどのほぼぽもょよろを"),
    ];

    ROWS.iter()
        .find(|(_, members)| members.contains(hira))
        .map(|(vowel, _)| *vowel)
}

/// Vowel a long-vowel mark stands for after a kana of the given row.
///
/// e-row lengthens with い and o-row with う, as in せんせい and おとうさん.
fn long_vowel_for(row: char) -> char {
    match row {
        'え' => 'い',
        'お' => 'う',
        other => other,
    }
}

/// Replace each long-vowel mark by the vowel its predecessor implies.
///
/// Marks after a katakana letter become katakana vowels; marks with no kana
/// before them are left alone.
pub fn expand_long_vowels(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    let mut previous: Option<char> = None;

    for c in text.chars() {
        if c == LONG_VOWEL_MARK {
            let expanded = previous
                .and_then(|p| vowel_of(p).map(|row| (p, long_vowel_for(row))))
                .map(|(p, vowel)| {
                    if is_katakana(p) {
                        hiragana_to_katakana(&vowel.to_string())
                    } else {
                        vowel.to_string()
                    }
                });
            match expanded {
                Some(vowel) => {
                    out.push_str(&vowel);
                    previous = vowel.chars().next();
                }
                None => {
                    out.push(c);
                    previous = Some(c);
                }
            }
        } else {
            out.push(c);
            previous = Some(c);
        }
    }

    out
}

/// Continuative spelling of a compound verb, the way dictionaries cite the
/// noun: `引き抜く` -> `引き抜き`, `見送る` -> `見送り`.
///
/// The stem before the ending must hold at least two kanji.
pub fn continuative_variant(form: &str) -> Option<String> {
    let last = form.chars().last()?;
    let (_, i_row) = U_TO_I_ROW.iter().find(|(u, _)| *u == last)?;

    let stem = &form[..form.len() - last.len_utf8()];
    if stem.chars().filter(|c| is_kanji(*c)).count() < 2 {
        return None;
    }

    Some(format!("{}{}", stem, i_row))
}

/// Number of morae in a plain kana reading; small kana join the preceding mora
pub fn mora_count(reading: &str) -> usize {
    reading
        .chars()
        .filter(|c| !c.is_whitespace() && !SMALL_KANA.contains(c))
        .count()
}

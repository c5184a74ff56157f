use shiori_core::language::{DeconjugationResult, Deconjugator};

/// Suffix rewrite: `stem + suffix` may be the conjugation of `stem + base`
struct Rule {
    suffix: &'static str,
    base: &'static str,
    kind: &'static str,
    confidence: f32,
}

const fn rule(suffix: &'static str, base: &'static str, kind: &'static str, confidence: f32) -> Rule {
    Rule {
        suffix,
        base,
        kind,
        confidence,
    }
}

const RULES: &[Rule] = &[
    // て-form
    rule("いて", "く", "godan verb, te-form", 0.7),
    rule("いで", "ぐ", "godan verb, te-form", 0.7),
    rule("して", "す", "godan verb, te-form", 0.7),
    rule("って", "う", "godan verb, te-form", 0.6),
    rule("って", "つ", "godan verb, te-form", 0.6),
    rule("って", "る", "godan verb, te-form", 0.6),
    rule("んで", "む", "godan verb, te-form", 0.6),
    rule("んで", "ぶ", "godan verb, te-form", 0.6),
    rule("んで", "ぬ", "godan verb, te-form", 0.6),
    rule("て", "る", "ichidan verb, te-form", 0.8),
    // た-form
    rule("いた", "く", "godan verb, past", 0.7),
    rule("いだ", "ぐ", "godan verb, past", 0.7),
    rule("した", "す", "godan verb, past", 0.7),
    rule("った", "う", "godan verb, past", 0.6),
    rule("った", "つ", "godan verb, past", 0.6),
    rule("った", "る", "godan verb, past", 0.6),
    rule("んだ", "む", "godan verb, past", 0.6),
    rule("んだ", "ぶ", "godan verb, past", 0.6),
    rule("んだ", "ぬ", "godan verb, past", 0.6),
    rule("た", "る", "ichidan verb, past", 0.8),
    // ます-form
    rule("ます", "る", "ichidan verb, masu-form", 0.8),
    rule("きます", "く", "godan verb, masu-form", 0.8),
    rule("ぎます", "ぐ", "godan verb, masu-form", 0.8),
    rule("します", "す", "godan verb, masu-form", 0.8),
    rule("ちます", "つ", "godan verb, masu-form", 0.8),
    rule("にます", "ぬ", "godan verb, masu-form", 0.8),
    rule("びます", "ぶ", "godan verb, masu-form", 0.8),
    rule("みます", "む", "godan verb, masu-form", 0.8),
    rule("ります", "る", "godan verb, masu-form", 0.8),
    rule("います", "う", "godan verb, masu-form", 0.8),
    rule("ました", "る", "ichidan verb, polite past", 0.8),
    rule("きました", "く", "godan verb, polite past", 0.8),
    rule("みました", "む", "godan verb, polite past", 0.8),
    rule("りました", "る", "godan verb, polite past", 0.8),
    // ない-form
    rule("かない", "く", "godan verb, negative", 0.8),
    rule("がない", "ぐ", "godan verb, negative", 0.8),
    rule("さない", "す", "godan verb, negative", 0.8),
    rule("たない", "つ", "godan verb, negative", 0.8),
    rule("なない", "ぬ", "godan verb, negative", 0.8),
    rule("ばない", "ぶ", "godan verb, negative", 0.8),
    rule("まない", "む", "godan verb, negative", 0.8),
    rule("らない", "る", "godan verb, negative", 0.8),
    rule("わない", "う", "godan verb, negative", 0.8),
    rule("ない", "る", "ichidan verb, negative", 0.8),
    // i-adjectives
    rule("くない", "い", "i-adjective, negative", 0.8),
    rule("かった", "い", "i-adjective, past", 0.8),
    rule("くて", "い", "i-adjective, te-form", 0.8),
];

/// Whole-word forms of する and 来る
const IRREGULAR: &[(&[&str], &str, &str)] = &[
    (&["して", "した", "します", "しない"], "する", "irregular verb する"),
    (
        &["来て", "きて", "来た", "きた", "来ます", "きます", "来ない", "こない"],
        "来る",
        "irregular verb 来る",
    ),
];

/// Rule-based deconjugation of common verb and adjective endings.
///
/// Over-generates on purpose; callers keep the base forms their lexicon has.
#[derive(Debug, Clone, Copy, Default)]
pub struct JapaneseDeconjugator;

impl JapaneseDeconjugator {
    pub fn new() -> Self {
        Self
    }
}

impl Deconjugator for JapaneseDeconjugator {
    /// Possible base forms, most confident first
    fn deconjugate(&self, word: &str) -> Vec<DeconjugationResult> {
        let mut results = Vec::new();

        for (forms, base, kind) in IRREGULAR {
            if forms.contains(&word) {
                results.push(DeconjugationResult {
                    base_form: base.to_string(),
                    conjugation_type: kind.to_string(),
                    confidence: 1.0,
                });
            }
        }

        for rule in RULES {
            let Some(stem) = word.strip_suffix(rule.suffix) else {
                continue;
            };
            if stem.is_empty() {
                continue;
            }
            results.push(DeconjugationResult {
                base_form: format!("{}{}", stem, rule.base),
                conjugation_type: rule.kind.to_string(),
                confidence: rule.confidence,
            });
        }

        // ている / でいる: continuous of the て-form
        if let Some(te_form) = word.strip_suffix("いる") {
            if te_form.ends_with('て') || te_form.ends_with('で') {
                results.extend(self.deconjugate(te_form).into_iter().map(|mut r| {
                    r.conjugation_type = format!("{}, continuous", r.conjugation_type);
                    r.confidence *= 0.9;
                    r
                }));
            }
        }

        results.sort_by(|a, b| b.confidence.total_cmp(&a.confidence));
        let mut seen = Vec::new();
        results.retain(|r| {
            if seen.contains(&r.base_form) {
                false
            } else {
                seen.push(r.base_form.clone());
                true
            }
        });

        results
    }
}

use std::fmt;

use shiori_core::error::EntryError;
use shiori_core::types::GlossHit;

/// Class on the element every merged gloss is wrapped in
pub const GLOSSARY_CLASS: &str = "yomitan-glossary";

/// At-rules whose blocks hold ordinary style rules
const NESTED_AT_RULES: &[&str] = &["@media", "@supports", "@container", "@layer"];

/// One dictionary's part of a merged gloss, styles already scoped
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GlossEntry {
    pub dictionary: String,
    pub used_form: String,
    pub html: String,
    pub css: String,
}

/// Glossary assembled from the hits of one tier, in declaration order
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MergedGloss {
    entries: Vec<GlossEntry>,
}

impl MergedGloss {
    /// Scope each hit's stylesheet to its own list item.
    ///
    /// A hit whose stylesheet cannot be scoped is dropped; the rest are kept.
    pub fn merge(hits: Vec<GlossHit>) -> Self {
        let entries = hits
            .into_iter()
            .filter_map(|hit| match namespace_css(&hit.fragment.css, &hit.dictionary) {
                Ok(css) => Some(GlossEntry {
                    dictionary: hit.dictionary,
                    used_form: hit.used_form,
                    html: hit.fragment.html,
                    css,
                }),
                Err(e) => {
                    tracing::warn!("Dropping entry from {}: {}", hit.dictionary, e);
                    None
                }
            })
            .collect();

        Self { entries }
    }

    /// Gloss made of one unstyled entry, e.g. from the fallback lexicon
    pub fn single(dictionary: impl Into<String>, used_form: impl Into<String>, html: impl Into<String>) -> Self {
        Self {
            entries: vec![GlossEntry {
                dictionary: dictionary.into(),
                used_form: used_form.into(),
                html: html.into(),
                css: String::new(),
            }],
        }
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn entries(&self) -> &[GlossEntry] {
        &self.entries
    }

    pub fn dictionaries(&self) -> Vec<&str> {
        self.entries.iter().map(|e| e.dictionary.as_str()).collect()
    }

    /// Form that produced the first entry
    pub fn used_form(&self) -> Option<&str> {
        self.entries.first().map(|e| e.used_form.as_str())
    }

    /// Embeddable HTML; empty when nothing was found
    pub fn to_html(&self) -> String {
        if self.entries.is_empty() {
            return String::new();
        }

        let mut items = String::new();
        for entry in &self.entries {
            let name = quick_xml::escape::escape(entry.dictionary.as_str());
            items.push_str(&format!(
                "<li data-dictionary=\"{name}\"><i>({name})</i> <span>{}</span></li>",
                entry.html
            ));
            if !entry.css.is_empty() {
                items.push_str(&format!("<style>{}</style>", entry.css));
            }
        }

        format!(
            "<div style=\"text-align: left;\" class=\"{}\"><ol>{}</ol></div>",
            GLOSSARY_CLASS, items
        )
    }
}

impl fmt::Display for MergedGloss {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_html())
    }
}

/// Selector prefix limiting rules to one dictionary's list item
pub fn namespace_prefix(dictionary: &str) -> String {
    let escaped = dictionary.replace('\\', "\\\\").replace('"', "\\\"");
    format!(".{} [data-dictionary=\"{}\"]", GLOSSARY_CLASS, escaped)
}

/// Prefix every selector in `css` with [`namespace_prefix`].
///
/// Declaration blocks are copied unchanged. Rules inside `@media`-like blocks
/// are scoped too; other at-rules pass through. Comments between rules are
/// dropped.
pub fn namespace_css(css: &str, dictionary: &str) -> Result<String, EntryError> {
    let prefix = namespace_prefix(dictionary);
    let mut rules = Vec::new();
    scope_rules(css, 0, &prefix, &mut rules)?;
    Ok(rules.join("\n"))
}

fn scope_rules(css: &str, base: usize, prefix: &str, out: &mut Vec<String>) -> Result<(), EntryError> {
    let mut scanner = Scanner::new(css);

    while let Some(item) = scanner.next_item().map_err(|pos| EntryError::UnbalancedStylesheet(base + pos))? {
        match item {
            Item::Statement(text) => out.push(text.to_string()),
            Item::Block { prelude, body, body_start } => {
                if prelude.starts_with('@') {
                    let keyword = prelude
                        .split(|c: char| c.is_whitespace() || c == '(')
                        .next()
                        .unwrap_or_default()
                        .to_ascii_lowercase();
                    if NESTED_AT_RULES.contains(&keyword.as_str()) {
                        let mut inner = Vec::new();
                        scope_rules(body, base + body_start, prefix, &mut inner)?;
                        out.push(format!("{}{{\n{}\n}}", prelude, inner.join("\n")));
                    } else {
                        out.push(format!("{}{{{}}}", prelude, body));
                    }
                } else {
                    let selectors = split_selectors(prelude);
                    if selectors.is_empty() {
                        continue;
                    }
                    let scoped = selectors
                        .into_iter()
                        .map(|s| format!("{} {}", prefix, s))
                        .collect::<Vec<_>>()
                        .join(", ");
                    out.push(format!("{}{{{}}}", scoped, body));
                }
            }
        }
    }

    Ok(())
}

/// Split a selector list on top-level commas
fn split_selectors(prelude: &str) -> Vec<&str> {
    let mut selectors = Vec::new();
    let mut depth = 0usize;
    let mut start = 0;

    for (i, c) in prelude.char_indices() {
        match c {
            '(' | '[' => depth += 1,
            ')' | ']' => depth = depth.saturating_sub(1),
            ',' if depth == 0 => {
                selectors.push(prelude[start..i].trim());
                start = i + 1;
            }
            _ => {}
        }
    }
    selectors.push(prelude[start..].trim());
    selectors.retain(|s| !s.is_empty());
    selectors
}

enum Item<'a> {
    /// `@import ...;` and similar block-less rules
    Statement(&'a str),
    Block {
        prelude: &'a str,
        body: &'a str,
        body_start: usize,
    },
}

/// Top-level tokenizer that only tracks braces, strings and comments
struct Scanner<'a> {
    css: &'a str,
    pos: usize,
}

impl<'a> Scanner<'a> {
    fn new(css: &'a str) -> Self {
        Self { css, pos: 0 }
    }

    /// Next rule, `Ok(None)` at the end, `Err(byte offset)` on unbalanced braces
    fn next_item(&mut self) -> Result<Option<Item<'a>>, usize> {
        let bytes = self.css.as_bytes();
        let mut start = None;

        while self.pos < bytes.len() {
            match bytes[self.pos] {
                b'/' if bytes.get(self.pos + 1) == Some(&b'*') => {
                    self.pos = self.skip_comment(self.pos);
                }
                b'"' | b'\'' => {
                    start.get_or_insert(self.pos);
                    self.pos = self.skip_string(self.pos);
                }
                b';' => {
                    let begin = start.take().unwrap_or(self.pos);
                    self.pos += 1;
                    let text = self.css[begin..self.pos].trim();
                    // stray declarations outside any block are dropped
                    if text.starts_with('@') {
                        return Ok(Some(Item::Statement(text)));
                    }
                }
                b'{' => {
                    let body_start = self.pos + 1;
                    let body_end = self.find_block_end(body_start)?;
                    let prelude = self.css[start.unwrap_or(self.pos)..self.pos].trim();
                    self.pos = body_end + 1;
                    return Ok(Some(Item::Block {
                        prelude,
                        body: &self.css[body_start..body_end],
                        body_start,
                    }));
                }
                b'}' => return Err(self.pos),
                b if b.is_ascii_whitespace() => self.pos += 1,
                _ => {
                    start.get_or_insert(self.pos);
                    self.pos += 1;
                }
            }
        }

        Ok(None)
    }

    /// Offset of the `}` matching the block opened just before `from`
    fn find_block_end(&self, from: usize) -> Result<usize, usize> {
        let bytes = self.css.as_bytes();
        let mut depth = 1usize;
        let mut i = from;

        while i < bytes.len() {
            match bytes[i] {
                b'/' if bytes.get(i + 1) == Some(&b'*') => {
                    i = self.skip_comment(i);
                    continue;
                }
                b'"' | b'\'' => {
                    i = self.skip_string(i);
                    continue;
                }
                b'{' => depth += 1,
                b'}' => {
                    depth -= 1;
                    if depth == 0 {
                        return Ok(i);
                    }
                }
                _ => {}
            }
            i += 1;
        }

        Err(self.css.len())
    }

    fn skip_comment(&self, from: usize) -> usize {
        self.css[from + 2..]
            .find("*/")
            .map_or(self.css.len(), |end| from + 2 + end + 2)
    }

    fn skip_string(&self, from: usize) -> usize {
        let bytes = self.css.as_bytes();
        let quote = bytes[from];
        let mut i = from + 1;
        while i < bytes.len() {
            match bytes[i] {
                b'\\' => i += 2,
                b if b == quote => return i + 1,
                _ => i += 1,
            }
        }
        bytes.len()
    }
}

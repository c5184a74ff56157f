use std::collections::{HashMap, HashSet};

use serde::Deserialize;
use shiori_core::dictionary::LoadError;

/// JMdict dictionary entry
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct JMdictEntry {
    pub id: String,
    pub kanji: Vec<String>,
    pub readings: Vec<String>,
    pub meanings: Vec<String>,
    pub pos: Vec<String>,
}

impl JMdictEntry {
    pub fn headword(&self) -> &str {
        self.kanji
            .first()
            .or_else(|| self.readings.first())
            .map(String::as_str)
            .unwrap_or_default()
    }

    /// `<div class='entry'><b>かな</b>: gloss; gloss</div>`
    fn render(&self) -> String {
        let label = if self.readings.is_empty() {
            self.kanji.join(", ")
        } else {
            self.readings.join(", ")
        };
        format!(
            "<div class='entry'><b>{}</b>: {}</div>",
            quick_xml::escape::escape(label.as_str()),
            quick_xml::escape::escape(self.meanings.join("; ").as_str())
        )
    }
}

// JSON structures for parsing jmdict-simplified format
#[derive(Debug, Deserialize)]
struct JMdictJson {
    words: Vec<JMdictJsonEntry>,
}

#[derive(Debug, Deserialize)]
struct JMdictJsonEntry {
    id: String,
    #[serde(default)]
    kanji: Vec<TextElement>,
    #[serde(default)]
    kana: Vec<TextElement>,
    sense: Vec<Sense>,
}

#[derive(Debug, Deserialize)]
struct TextElement {
    text: String,
}

#[derive(Debug, Deserialize)]
struct Sense {
    #[serde(rename = "partOfSpeech", default)]
    part_of_speech: Vec<String>,
    gloss: Vec<Gloss>,
}

#[derive(Debug, Deserialize)]
struct Gloss {
    lang: String,
    text: String,
}

/// Generic bilingual lexicon, used when no configured dictionary has an entry
#[derive(Debug, Clone, Default)]
pub struct JMdict {
    entries: Vec<JMdictEntry>,
    kanji_index: HashMap<String, Vec<usize>>,
    reading_index: HashMap<String, Vec<usize>>,
}

impl JMdict {
    pub fn new() -> Self {
        Self::default()
    }

    /// Load JMdict from JSON string (jmdict-simplified format)
    pub fn from_json(json_str: &str) -> Result<Self, LoadError> {
        let data: JMdictJson =
            serde_json::from_str(json_str).map_err(|e| LoadError::ParseError(e.to_string()))?;

        let mut dict = Self::new();
        for json_entry in data.words {
            let mut meanings = Vec::new();
            let mut pos = Vec::new();

            for sense in &json_entry.sense {
                // Only use English glosses
                meanings.extend(
                    sense
                        .gloss
                        .iter()
                        .filter(|g| g.lang == "eng")
                        .map(|g| g.text.clone()),
                );
                pos.extend(sense.part_of_speech.iter().cloned());
            }

            // Skip entries with no English meanings
            if meanings.is_empty() {
                continue;
            }

            dict.push(JMdictEntry {
                id: json_entry.id,
                kanji: json_entry.kanji.into_iter().map(|k| k.text).collect(),
                readings: json_entry.kana.into_iter().map(|k| k.text).collect(),
                meanings,
                pos,
            });
        }

        Ok(dict)
    }

    fn push(&mut self, entry: JMdictEntry) {
        let index = self.entries.len();
        for k in &entry.kanji {
            self.kanji_index.entry(k.clone()).or_default().push(index);
        }
        for r in &entry.readings {
            self.reading_index.entry(r.clone()).or_default().push(index);
        }
        self.entries.push(entry);
    }

    /// Get the number of entries in the dictionary
    pub fn entry_count(&self) -> usize {
        self.entries.len()
    }

    /// Merge another dictionary into this one.
    ///
    /// Entries from `other` replace entries with the same ID.
    pub fn merge(self, other: JMdict) -> Self {
        let replaced: HashSet<&str> = other.entries.iter().map(|e| e.id.as_str()).collect();

        let mut merged = Self::new();
        for entry in self.entries.iter().filter(|e| !replaced.contains(e.id.as_str())) {
            merged.push(entry.clone());
        }
        for entry in other.entries {
            merged.push(entry);
        }
        merged
    }

    /// Entries whose kanji or kana spelling is exactly `query`, in load order
    pub fn lookup_exact(&self, query: &str) -> Vec<&JMdictEntry> {
        let mut indices: Vec<usize> = self
            .kanji_index
            .get(query)
            .into_iter()
            .chain(self.reading_index.get(query))
            .flatten()
            .copied()
            .collect();

        indices.sort_unstable();
        indices.dedup();

        indices
            .into_iter()
            .filter_map(|i| self.entries.get(i))
            .collect()
    }

    pub fn contains(&self, query: &str) -> bool {
        self.kanji_index.contains_key(query) || self.reading_index.contains_key(query)
    }

    /// Entry list for the fallback glossary, at most `max_entries` long
    pub fn render_entries(&self, query: &str, max_entries: usize) -> Option<String> {
        let parts: Vec<String> = self
            .lookup_exact(query)
            .into_iter()
            .take(max_entries)
            .map(JMdictEntry::render)
            .collect();

        (!parts.is_empty()).then(|| parts.join("\n"))
    }
}

use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::ParseWordError;
use crate::preprocess::strip_markup;

/// A word submitted for resolution, with optional caller overrides
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct QueryWord {
    pub surface: String,
    /// Reading to look up and to disambiguate with, e.g. `せいれい`
    pub forced_reading: Option<String>,
    /// Form to look up instead of anything derived from the surface
    pub forced_lookup_form: Option<String>,
}

impl QueryWord {
    pub fn new(surface: impl Into<String>) -> Self {
        Self {
            surface: surface.into(),
            forced_reading: None,
            forced_lookup_form: None,
        }
    }

    pub fn with_reading(mut self, reading: impl Into<String>) -> Self {
        self.forced_reading = Some(reading.into());
        self
    }

    pub fn with_lookup_form(mut self, form: impl Into<String>) -> Self {
        self.forced_lookup_form = Some(form.into());
        self
    }

    /// Parse a word list: entries separated by newlines, commas or tabs
    pub fn parse_list(text: &str) -> Result<Vec<QueryWord>, ParseWordError> {
        text.split(['\n', ',', '\t'])
            .map(str::trim)
            .filter(|w| !w.is_empty())
            .map(str::parse)
            .collect()
    }
}

/// `精霊`, `精霊(せいれい)`, `食べた[食べる]`, `食べた(たべた)[食べる]`
impl FromStr for QueryWord {
    type Err = ParseWordError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let mut rest = s.trim().to_string();

        let forced_lookup_form = take_bracketed(&mut rest, &[('[', ']'), ('［', '］')])?;
        let forced_reading = take_bracketed(&mut rest, &[('(', ')'), ('（', '）')])?;

        let surface = rest.trim();
        if surface.is_empty() {
            return Err(ParseWordError::EmptyWord);
        }

        Ok(Self {
            surface: surface.to_string(),
            forced_reading,
            forced_lookup_form,
        })
    }
}

fn take_bracketed(
    text: &mut String,
    pairs: &[(char, char)],
) -> Result<Option<String>, ParseWordError> {
    for &(open, close) in pairs {
        let Some(start) = text.find(open) else {
            continue;
        };
        let inner_start = start + open.len_utf8();
        let Some(len) = text[inner_start..].find(close) else {
            return Err(ParseWordError::UnclosedBracket {
                bracket: open,
                input: text.clone(),
            });
        };
        let inner_end = inner_start + len;
        let inner = text[inner_start..inner_end].trim().to_string();
        text.replace_range(start..inner_end + close.len_utf8(), "");
        return Ok((!inner.is_empty()).then_some(inner));
    }
    Ok(None)
}

/// Raw HTML and stylesheet one dictionary returned for one form
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct GlossFragment {
    pub html: String,
    pub css: String,
}

/// A dictionary's single contribution to a gloss
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GlossHit {
    /// Display name of the dictionary
    pub dictionary: String,
    /// Candidate form that produced the entry
    pub used_form: String,
    pub fragment: GlossFragment,
}

/// One reading group extracted from tonal markup
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PitchCandidate {
    /// Reading with overline spans on high morae
    pub reading: String,
    /// Character offset at which the pitch falls, 0 for none
    pub drop: u32,
    /// Display name of the dictionary it came from
    pub source: String,
}

impl PitchCandidate {
    pub fn new(reading: impl Into<String>, drop: u32, source: impl Into<String>) -> Self {
        Self {
            reading: reading.into(),
            drop,
            source: source.into(),
        }
    }

    pub fn plain_reading(&self) -> String {
        strip_markup(&self.reading)
    }

    /// Bracketed pitch-position marker, e.g. `[0]`
    pub fn marker(&self) -> String {
        format!("[{}]", self.drop)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AudioResult {
    pub data: Vec<u8>,
    pub mime_type: String,
    pub source: String,
}

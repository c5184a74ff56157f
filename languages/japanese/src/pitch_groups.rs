//! Reading groups from accent-dictionary markup.
//!
//! Tonal classes: `tune-0` low, `tune-1` high, `tune-2` high with the fall
//! right after it. An entry lists several readings back to back. A `<p>`
//! holds one reading, and inside it everything after the first `<br>` is the
//! same reading with particles attached, which is skipped. Outside paragraphs
//! groups are split heuristically: a low or high run that begins once the
//! group has [`MIN_GROUP_CHARS`] characters starts a new group.

use std::collections::HashSet;

use quick_xml::events::Event;
use shiori_core::dictionary::DictionarySource;
use shiori_core::error::EntryError;
use shiori_core::types::PitchCandidate;
use shiori_dictionary::HandleCache;

use crate::candidates::CandidateForms;
use crate::markup::{Tag, html_reader, markup_error};

/// Group length after which the boundary heuristic applies
pub const MIN_GROUP_CHARS: usize = 2;

pub const OVERLINE_OPEN: &str = r#"<span style="text-decoration: overline;">"#;
pub const OVERLINE_CLOSE: &str = "</span>";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Tone {
    Low,
    High,
    Falling,
}

impl Tone {
    fn from_tag(tag: &Tag) -> Option<Self> {
        if tag.has_class("tune-0") {
            Some(Tone::Low)
        } else if tag.has_class("tune-1") {
            Some(Tone::High)
        } else if tag.has_class("tune-2") {
            Some(Tone::Falling)
        } else {
            None
        }
    }
}

#[derive(Debug, Default)]
struct Group {
    reading: String,
    chars: usize,
    /// Character offset just past the last falling run
    drop: u32,
}

impl Group {
    fn append(&mut self, tone: Tone, text: &str) {
        match tone {
            Tone::Low => self.reading.push_str(text),
            Tone::High | Tone::Falling => {
                self.reading.push_str(OVERLINE_OPEN);
                self.reading.push_str(text);
                self.reading.push_str(OVERLINE_CLOSE);
            }
        }

        self.chars += text.chars().count();
        if tone == Tone::Falling {
            self.drop = self.chars as u32;
        }
    }
}

/// Splits tonal markup into pitch candidates
#[derive(Debug, Clone)]
pub struct PitchGroupExtractor {
    min_group_chars: usize,
}

impl Default for PitchGroupExtractor {
    fn default() -> Self {
        Self {
            min_group_chars: MIN_GROUP_CHARS,
        }
    }
}

impl PitchGroupExtractor {
    pub fn with_min_group_chars(min_group_chars: usize) -> Self {
        Self { min_group_chars }
    }

    /// Candidates in document order, duplicates removed
    pub fn extract(&self, markup: &str, source: &str) -> Result<Vec<PitchCandidate>, EntryError> {
        let mut state = ExtractState::new(self.min_group_chars, source);
        let mut reader = html_reader(markup);
        // nesting depth inside the current tonal element, 0 when outside
        let mut run_depth = 0usize;

        loop {
            match reader.read_event() {
                Ok(Event::Start(e)) => {
                    let tag = Tag::from_event(reader.decoder(), &e, 0..0);
                    if run_depth > 0 {
                        if tag.name != "br" {
                            run_depth += 1;
                        }
                        continue;
                    }
                    match tag.name.as_str() {
                        "p" => state.open_paragraph(),
                        "br" => state.line_break(),
                        _ => {
                            if let Some(tone) = Tone::from_tag(&tag) {
                                state.begin_run(tone);
                                run_depth = 1;
                            }
                        }
                    }
                }
                Ok(Event::Empty(e)) => {
                    let tag = Tag::from_event(reader.decoder(), &e, 0..0);
                    if run_depth == 0 && tag.name == "br" {
                        state.line_break();
                    }
                }
                Ok(Event::End(e)) => {
                    if run_depth > 0 {
                        run_depth -= 1;
                        if run_depth == 0 {
                            state.end_run();
                        }
                        continue;
                    }
                    let name = reader
                        .decoder()
                        .decode(e.name().as_ref())
                        .map(|n| n.to_ascii_lowercase())
                        .unwrap_or_default();
                    if name == "p" {
                        state.close_paragraph();
                    }
                }
                Ok(Event::Text(e)) => {
                    let text = e.decode().map_err(|err| markup_error(&reader, err.into()))?;
                    state.text(&text, run_depth > 0);
                }
                Ok(Event::GeneralRef(e)) => {
                    let name = e.decode().map_err(|err| markup_error(&reader, err.into()))?;
                    let entity = format!("&{};", name);
                    let text = quick_xml::escape::unescape(&entity)
                        .map(|t| t.into_owned())
                        .unwrap_or_default();
                    state.text(&text, run_depth > 0);
                }
                Ok(Event::Eof) => break,
                Ok(_) => {}
                Err(e) => return Err(markup_error(&reader, e)),
            }
        }

        Ok(dedup(state.finish()))
    }
}

/// Mutable scan state; one per `extract` call
struct ExtractState<'s> {
    min_group_chars: usize,
    source: &'s str,
    candidates: Vec<PitchCandidate>,
    group: Group,
    /// Run being accumulated, merged with adjacent runs of the same tone
    run: Option<(Tone, String)>,
    /// Something visible appeared since the pending run ended
    separated: bool,
    paragraph_depth: usize,
    /// Inside a paragraph, past its first line
    skipping: bool,
}

impl<'s> ExtractState<'s> {
    fn new(min_group_chars: usize, source: &'s str) -> Self {
        Self {
            min_group_chars,
            source,
            candidates: Vec::new(),
            group: Group::default(),
            run: None,
            separated: false,
            paragraph_depth: 0,
            skipping: false,
        }
    }

    fn begin_run(&mut self, tone: Tone) {
        if self.skipping {
            return;
        }
        let continues = matches!(&self.run, Some((current, _)) if *current == tone) && !self.separated;
        if !continues {
            self.flush_run();
            self.run = Some((tone, String::new()));
        }
        self.separated = false;
    }

    fn end_run(&mut self) {
        self.separated = false;
    }

    fn text(&mut self, text: &str, in_run: bool) {
        if self.skipping {
            return;
        }
        if in_run {
            if let Some((_, run_text)) = &mut self.run {
                run_text.push_str(text.trim());
            }
        } else if !text.trim().is_empty() {
            self.separated = true;
        }
    }

    fn line_break(&mut self) {
        self.close_group();
        if self.paragraph_depth > 0 {
            self.skipping = true;
        }
    }

    fn open_paragraph(&mut self) {
        self.close_group();
        self.paragraph_depth += 1;
        self.skipping = false;
    }

    fn close_paragraph(&mut self) {
        self.close_group();
        self.paragraph_depth = self.paragraph_depth.saturating_sub(1);
        self.skipping = false;
    }

    fn flush_run(&mut self) {
        let Some((tone, text)) = self.run.take() else {
            return;
        };
        if text.is_empty() {
            return;
        }
        // paragraphs delimit readings themselves
        if self.paragraph_depth == 0
            && tone != Tone::Falling
            && self.group.chars >= self.min_group_chars
        {
            self.close_group_only();
        }
        self.group.append(tone, &text);
    }

    fn close_group(&mut self) {
        self.flush_run();
        self.close_group_only();
        self.separated = false;
    }

    fn close_group_only(&mut self) {
        let group = std::mem::take(&mut self.group);
        if !group.reading.is_empty() {
            self.candidates
                .push(PitchCandidate::new(group.reading, group.drop, self.source));
        }
    }

    fn finish(mut self) -> Vec<PitchCandidate> {
        self.close_group();
        self.candidates
    }
}

/// Drop candidates whose plain reading and marker were already seen
pub fn dedup(candidates: Vec<PitchCandidate>) -> Vec<PitchCandidate> {
    let mut seen = HashSet::new();
    candidates
        .into_iter()
        .filter(|c| seen.insert((c.plain_reading(), c.drop)))
        .collect()
}

/// Candidates from the first form `source` has a usable entry for.
///
/// Sources that carry no tonal markup yield nothing; malformed entries are
/// logged and the next form is tried.
pub fn lookup_pitch(
    cache: &mut HandleCache,
    extractor: &PitchGroupExtractor,
    source: &DictionarySource,
    forms: &CandidateForms,
) -> Vec<PitchCandidate> {
    if !source.kind.supports_pitch() {
        tracing::debug!("{} has no tonal markup ({})", source.name, source.kind.as_str());
        return Vec::new();
    }

    cache
        .with_dictionary(source, |dictionary| {
            for form in forms.iter() {
                let Some(raw) = dictionary.lookup(form) else {
                    continue;
                };
                match extractor.extract(&raw, &source.name) {
                    Ok(candidates) if !candidates.is_empty() => {
                        tracing::debug!(
                            "{} readings for {} in {}",
                            candidates.len(),
                            form,
                            source.name
                        );
                        return candidates;
                    }
                    Ok(_) => {}
                    Err(e) => tracing::warn!("Malformed pitch entry {} in {}: {}", form, source.name, e),
                }
            }
            Vec::new()
        })
        .unwrap_or_default()
}

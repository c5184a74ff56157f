//! Tag-level rewrites of raw dictionary entries.
//!
//! Entries are HTML fragments, not XML, so the reader is configured to accept
//! void elements, stray end tags and bare ampersands. Only start tags are
//! inspected; everything between them is copied through byte-for-byte.

use std::ops::Range;

use base64::Engine;
use base64::engine::general_purpose::STANDARD as BASE64;
use quick_xml::encoding::Decoder;
use quick_xml::events::{BytesStart, Event};
use quick_xml::reader::Reader;
use shiori_core::dictionary::Dictionary;
use shiori_core::error::EntryError;
use shiori_core::types::GlossFragment;

const SOUND_SCHEME: &str = "sound://";

/// A start or empty tag and where it sits in the source
#[derive(Debug, Clone)]
pub(crate) struct Tag {
    pub name: String,
    pub attributes: Vec<(String, String)>,
    pub span: Range<usize>,
}

impl Tag {
    pub(crate) fn from_event(decoder: Decoder, e: &BytesStart<'_>, span: Range<usize>) -> Self {
        let name = decoder
            .decode(e.name().as_ref())
            .map(|n| n.to_ascii_lowercase())
            .unwrap_or_default();

        let attributes = e
            .html_attributes()
            .flatten()
            .filter_map(|attr| {
                let key = decoder.decode(attr.key.as_ref()).ok()?.to_ascii_lowercase();
                let value = attr.decode_and_unescape_value(decoder).ok()?.into_owned();
                Some((key, value))
            })
            .collect();

        Self {
            name,
            attributes,
            span,
        }
    }

    pub fn attribute(&self, key: &str) -> Option<&str> {
        self.attributes
            .iter()
            .find(|(k, _)| k == key)
            .map(|(_, v)| v.as_str())
    }

    pub fn has_class(&self, class: &str) -> bool {
        self.attribute("class")
            .is_some_and(|classes| classes.split_whitespace().any(|c| c == class))
    }

    fn is_stylesheet(&self) -> bool {
        self.name == "link"
            && self
                .attribute("rel")
                .is_some_and(|rel| rel.to_ascii_lowercase().contains("stylesheet"))
    }

    /// Re-serialize with one attribute replaced
    fn render_with(&self, key: &str, value: &str) -> String {
        let mut out = format!("<{}", self.name);
        for (k, v) in &self.attributes {
            let v = if k == key { value } else { v.as_str() };
            out.push_str(&format!(" {}=\"{}\"", k, quick_xml::escape::escape(v)));
        }
        out.push('>');
        out
    }
}

pub(crate) fn html_reader(html: &str) -> Reader<&[u8]> {
    let mut reader = Reader::from_str(html);
    let config = reader.config_mut();
    config.trim_text(false);
    config.check_end_names = false;
    config.allow_unmatched_ends = true;
    config.allow_dangling_amp = true;
    reader
}

pub(crate) fn markup_error(reader: &Reader<&[u8]>, err: quick_xml::Error) -> EntryError {
    EntryError::Markup {
        position: reader.error_position(),
        reason: err.to_string(),
    }
}

/// Every start or empty tag, in document order
pub(crate) fn scan_tags(html: &str) -> Result<Vec<Tag>, EntryError> {
    let mut reader = html_reader(html);
    let mut tags = Vec::new();

    loop {
        let start = reader.buffer_position() as usize;
        match reader.read_event() {
            Ok(Event::Start(e)) | Ok(Event::Empty(e)) => {
                let end = reader.buffer_position() as usize;
                tags.push(Tag::from_event(reader.decoder(), &e, start..end));
            }
            Ok(Event::Eof) => break,
            Ok(_) => {}
            Err(e) => return Err(markup_error(&reader, e)),
        }
    }

    Ok(tags)
}

/// Split a raw entry into HTML and CSS.
///
/// Linked stylesheets are fetched from the dictionary and their `<link>` tags
/// removed; images the dictionary embeds are inlined as data URIs. Anything
/// that cannot be fetched is left as it was.
pub fn prepare_fragment(html: &str, dictionary: &dyn Dictionary) -> Result<GlossFragment, EntryError> {
    let mut out = String::with_capacity(html.len());
    let mut css = String::new();
    let mut cursor = 0;

    for tag in scan_tags(html)? {
        if tag.is_stylesheet() {
            if let Some(href) = tag.attribute("href") {
                match dictionary.fetch_embedded(href) {
                    Some(bytes) => {
                        css.push_str(&String::from_utf8_lossy(&bytes));
                        css.push('\n');
                    }
                    None => tracing::warn!("Stylesheet {} not found", href),
                }
            }
            out.push_str(&html[cursor..tag.span.start]);
            cursor = tag.span.end;
        } else if tag.name == "img" {
            let Some(src) = tag.attribute("src") else {
                continue;
            };
            if src.starts_with("data:") {
                continue;
            }
            match dictionary.fetch_embedded(src) {
                Some(bytes) => {
                    let uri = format!("data:{};base64,{}", image_mime_type(src), BASE64.encode(bytes));
                    out.push_str(&html[cursor..tag.span.start]);
                    out.push_str(&tag.render_with("src", &uri));
                    cursor = tag.span.end;
                }
                None => tracing::debug!("Image {} not embedded", src),
            }
        }
    }

    out.push_str(&html[cursor..]);

    Ok(GlossFragment {
        html: out.trim().to_string(),
        css: css.trim().to_string(),
    })
}

/// Audio resource paths an entry links to, in document order, without
/// duplicates
pub fn audio_references(html: &str) -> Result<Vec<String>, EntryError> {
    let mut refs: Vec<String> = Vec::new();

    for tag in scan_tags(html)? {
        let path = match tag.name.as_str() {
            "audio" | "source" => tag.attribute("src"),
            _ => tag
                .attribute("href")
                .filter(|href| href.starts_with(SOUND_SCHEME)),
        };

        let Some(path) = path else {
            continue;
        };
        if audio_mime_type(path).is_none() {
            continue;
        }
        if !refs.iter().any(|r| r == path) {
            refs.push(path.to_string());
        }
    }

    Ok(refs)
}

fn extension(path: &str) -> Option<String> {
    let file = path.rsplit(['/', '\\']).next()?;
    let (_, ext) = file.rsplit_once('.')?;
    Some(ext.to_ascii_lowercase())
}

pub fn audio_mime_type(path: &str) -> Option<&'static str> {
    let mime = match extension(path)?.as_str() {
        "mp3" => "audio/mpeg",
        "aac" => "audio/aac",
        "m4a" | "mp4" => "audio/mp4",
        "wav" => "audio/wav",
        "ogg" | "oga" | "opus" | "spx" => "audio/ogg",
        _ => return None,
    };
    Some(mime)
}

fn image_mime_type(path: &str) -> &'static str {
    match extension(path).as_deref() {
        Some("png") => "image/png",
        Some("jpg") | Some("jpeg") => "image/jpeg",
        Some("gif") => "image/gif",
        Some("svg") => "image/svg+xml",
        Some("webp") => "image/webp",
        Some("bmp") => "image/bmp",
        _ => "application/octet-stream",
    }
}

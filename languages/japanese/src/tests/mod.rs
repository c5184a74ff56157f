mod kana_tests;
mod lexicon_tests;
mod lookup_tests;
mod markup_tests;

use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex};

use shiori_core::dictionary::{Dictionary, DictionaryLoader, LoadError};
use shiori_dictionary::MemoryLoader;

use crate::pitch_groups::{OVERLINE_CLOSE, OVERLINE_OPEN};

/// Memory loader that records every path it is asked to open
pub(crate) struct RecordingLoader {
    inner: MemoryLoader,
    opened: Arc<Mutex<Vec<PathBuf>>>,
}

impl RecordingLoader {
    pub(crate) fn new(inner: MemoryLoader) -> (Self, Arc<Mutex<Vec<PathBuf>>>) {
        let opened = Arc::new(Mutex::new(Vec::new()));
        let loader = Self {
            inner,
            opened: Arc::clone(&opened),
        };
        (loader, opened)
    }
}

impl DictionaryLoader for RecordingLoader {
    fn load_from_file(&self, path: &Path) -> Result<Box<dyn Dictionary>, LoadError> {
        self.opened.lock().unwrap().push(path.to_path_buf());
        self.inner.load_from_file(path)
    }

    fn supported_formats(&self) -> Vec<String> {
        self.inner.supported_formats()
    }
}

pub(crate) fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter("shiori_lang_japanese=debug")
        .with_test_writer()
        .try_init();
}

/// `<span class="tune-N">text</span>`
pub(crate) fn tune(class: u8, text: &str) -> String {
    format!(r#"<span class="tune-{}">{}</span>"#, class, text)
}

pub(crate) fn overline(text: &str) -> String {
    format!("{}{}{}", OVERLINE_OPEN, text, OVERLINE_CLOSE)
}

/// Accent entry for 精霊 as the older pitch dictionaries lay it out: one
/// paragraph per reading, the particle-attached form after the `<br>`
pub(crate) fn seirei_pitch_entry() -> String {
    format!(
        concat!(
            r#"<p><a class="aud-btn" href="sound://seirei_1.mp3">発音図</a>{}{}{}<br>"#,
            r#"<a class="aud-btn">助詞付</a>{}{}{}</p>"#,
            r#"<p><a class="aud-btn" href="sound://seirei_2.mp3">発音図</a>{}{}<br>{}{}</p>"#,
            r#"<p><a class="aud-btn" href="sound://seirei_3.mp3">発音図</a>{}{}</p>"#,
        ),
        tune(0, "ショ"),
        tune(2, "ー"),
        tune(0, "リョー"),
        tune(0, "ショ"),
        tune(2, "ー"),
        tune(0, "リョーガ"),
        tune(0, "ショ"),
        tune(1, "ーリョー"),
        tune(0, "ショ"),
        tune(1, "ーリョーガ"),
        tune(0, "セ"),
        tune(1, "イレイ"),
    )
}

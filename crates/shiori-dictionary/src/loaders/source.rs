use std::fs;
use std::path::{Path, PathBuf};

use shiori_core::dictionary::{Dictionary, DictionaryLoader, DictionaryMetadata, LoadError};

use crate::entry::{EntryTable, normalize_resource_path};

/// Line closing one entry in MDict source text
pub const ENTRY_SEPARATOR: &str = "</>";

/// Dictionary in MDict source text form.
///
/// ```text
/// 精霊
/// <div class="entry">...</div>
/// </>
/// せいれい
/// @@@LINK=精霊
/// </>
/// ```
///
/// Embedded resources (stylesheets, images, audio) are plain files below the
/// directory holding the source file.
#[derive(Debug, Clone)]
pub struct SourceDictionary {
    title: String,
    root: PathBuf,
    entries: EntryTable,
}

impl SourceDictionary {
    pub fn parse(title: impl Into<String>, root: impl Into<PathBuf>, text: &str) -> Self {
        let title = title.into();
        let mut entries = EntryTable::new();
        let mut key: Option<&str> = None;
        let mut body: Vec<&str> = Vec::new();

        for line in text.trim_start_matches('\u{feff}').lines() {
            if line.trim() == ENTRY_SEPARATOR {
                match key.take() {
                    Some(k) if !body.is_empty() => entries.insert(k, body.join("\n")),
                    Some(k) => tracing::debug!("Skipping empty entry '{}' in {}", k, title),
                    None => {}
                }
                body.clear();
                continue;
            }

            match key {
                None if line.trim().is_empty() => {}
                None => key = Some(line.trim()),
                Some(_) => body.push(line),
            }
        }

        // Unterminated last entry
        if let Some(k) = key {
            if !body.is_empty() {
                entries.insert(k, body.join("\n"));
            }
        }

        Self {
            title,
            root: root.into(),
            entries,
        }
    }

    pub fn entry_count(&self) -> usize {
        self.entries.len()
    }
}

impl Dictionary for SourceDictionary {
    fn lookup(&self, key: &str) -> Option<String> {
        self.entries.get(key)
    }

    fn fetch_embedded(&self, resource_path: &str) -> Option<Vec<u8>> {
        let relative = normalize_resource_path(resource_path)?;
        fs::read(self.root.join(relative)).ok()
    }

    fn metadata(&self) -> DictionaryMetadata {
        DictionaryMetadata {
            title: self.title.clone(),
            format: "mdict-source".to_string(),
            entry_count: self.entries.len(),
            resource_count: 0,
        }
    }
}

/// Opens MDict source text files
#[derive(Debug, Clone, Copy, Default)]
pub struct SourceLoader;

impl DictionaryLoader for SourceLoader {
    fn load_from_file(&self, path: &Path) -> Result<Box<dyn Dictionary>, LoadError> {
        if !path.is_file() {
            return Err(LoadError::FileNotFound(path.display().to_string()));
        }

        let supported = path
            .extension()
            .and_then(|e| e.to_str())
            .is_some_and(|ext| {
                self.supported_formats()
                    .iter()
                    .any(|f| f.eq_ignore_ascii_case(ext))
            });
        if !supported {
            return Err(LoadError::InvalidFormat(format!(
                "{}: expected one of {:?}",
                path.display(),
                self.supported_formats()
            )));
        }

        let text = fs::read_to_string(path)?;
        let title = path
            .file_stem()
            .map(|s| s.to_string_lossy().into_owned())
            .unwrap_or_default();
        let root = path.parent().map(Path::to_path_buf).unwrap_or_default();

        let dictionary = SourceDictionary::parse(title, root, &text);
        if dictionary.entry_count() == 0 {
            return Err(LoadError::ParseError(format!(
                "{}: no entries",
                path.display()
            )));
        }

        tracing::info!(
            "Loaded {} entries from {}",
            dictionary.entry_count(),
            path.display()
        );
        Ok(Box::new(dictionary))
    }

    fn supported_formats(&self) -> Vec<String> {
        vec!["txt".to_string()]
    }
}

use std::path::Path;

use shiori_core::dictionary::LoadError;

use crate::dictionary::JMdict;

pub struct JMdictLoader;

impl JMdictLoader {
    /// Load dictionary from file path
    pub fn load_from_file(path: &Path) -> Result<JMdict, LoadError> {
        if !path.is_file() {
            return Err(LoadError::FileNotFound(path.display().to_string()));
        }
        tracing::info!("Loading JMdict from file: {}", path.display());
        let json = std::fs::read_to_string(path)?;
        let dict = JMdict::from_json(&json)?;
        tracing::info!("Loaded {} dictionary entries from file", dict.entry_count());
        Ok(dict)
    }

    /// Load several files, later ones overriding earlier entries by ID.
    ///
    /// Files that fail to load are logged and skipped.
    pub fn load_all(paths: &[&Path]) -> JMdict {
        paths.iter().fold(JMdict::new(), |dict, path| {
            match Self::load_from_file(path) {
                Ok(additional) => dict.merge(additional),
                Err(e) => {
                    tracing::warn!("Failed to load dictionary from {}: {}", path.display(), e);
                    dict
                }
            }
        })
    }
}

use std::path::Path;

use signaid_core::vocabulary::LoadError;

use crate::vocabulary::AslVocabulary;

pub struct VocabularyLoader;

impl VocabularyLoader {
    /// Load embedded vocabulary data
    pub fn load_embedded() -> Result<AslVocabulary, LoadError> {
        let json = include_str!("../data/vocabulary.json");
        tracing::info!("Loading embedded sign vocabulary...");
        let vocabulary = AslVocabulary::from_json(json)?;
        tracing::info!("Loaded {} signs", vocabulary.entry_count());
        Ok(vocabulary)
    }

    /// Load vocabulary from file path
    pub fn load_from_file(path: &Path) -> Result<AslVocabulary, LoadError> {
        if !path.exists() {
            return Err(LoadError::FileNotFound(path.display().to_string()));
        }

        tracing::info!("Loading vocabulary from file: {}", path.display());
        let json = std::fs::read_to_string(path)?;
        let vocabulary = AslVocabulary::from_json(&json)?;
        tracing::info!("Loaded {} signs from file", vocabulary.entry_count());
        Ok(vocabulary)
    }

    /// Embedded vocabulary with additional files merged over it in order.
    /// The embedded table must load; additional files that fail are skipped.
    pub fn load_with_additional(additional_paths: &[String]) -> Result<AslVocabulary, LoadError> {
        let mut vocabulary = Self::load_embedded()?;

        for path in additional_paths {
            match Self::load_from_file(Path::new(path)) {
                Ok(additional) => {
                    tracing::info!("Merging additional vocabulary from: {}", path);
                    vocabulary = vocabulary.merge(additional);
                }
                Err(e) => {
                    tracing::warn!("Failed to load vocabulary from {}: {}", path, e);
                }
            }
        }

        Ok(vocabulary)
    }
}

use std::collections::{HashMap, HashSet};

use serde::Deserialize;
use signaid_core::vocabulary::{LoadError, Vocabulary, VocabularyMetadata};
use signaid_types::{Category, VocabularyEntry};

// JSON structure of a vocabulary file
#[derive(Debug, Deserialize)]
struct VocabularyJson {
    #[serde(default)]
    version: Option<String>,
    signs: Vec<VocabularyEntry>,
}

/// ASL classroom vocabulary, kept in declaration order
#[derive(Debug, Clone)]
pub struct AslVocabulary {
    version: String,
    entries: Vec<VocabularyEntry>,
    word_index: HashMap<String, usize>,
    synonym_index: HashMap<String, usize>,
}

impl AslVocabulary {
    /// Build a vocabulary from entries, rejecting words that are empty, not
    /// canonical lowercase, duplicated, or use the reserved fingerspelled category
    pub fn from_entries(version: impl Into<String>, entries: Vec<VocabularyEntry>) -> Result<Self, LoadError> {
        let mut seen = HashSet::new();
        for entry in &entries {
            validate_entry(entry)?;
            if !seen.insert(entry.word.as_str()) {
                return Err(LoadError::DuplicateWord(entry.word.clone()));
            }
        }

        let mut vocabulary = Self {
            version: version.into(),
            entries,
            word_index: HashMap::new(),
            synonym_index: HashMap::new(),
        };
        vocabulary.rebuild_indices();
        Ok(vocabulary)
    }

    /// Load a vocabulary from a JSON string
    pub fn from_json(json_str: &str) -> Result<Self, LoadError> {
        let data: VocabularyJson = serde_json::from_str(json_str)?;
        Self::from_entries(data.version.unwrap_or_default(), data.signs)
    }

    /// Get the number of entries in the vocabulary
    pub fn entry_count(&self) -> usize {
        self.entries.len()
    }

    /// Merge another vocabulary into this one.
    /// An entry with an existing word replaces it in place; new words are appended.
    pub fn merge(mut self, other: AslVocabulary) -> Self {
        for entry in other.entries {
            let existing = self.word_index.get(&entry.word).copied();
            match existing {
                Some(idx) => self.entries[idx] = entry,
                None => {
                    self.word_index.insert(entry.word.clone(), self.entries.len());
                    self.entries.push(entry);
                }
            }
        }

        self.rebuild_indices();
        self
    }

    fn rebuild_indices(&mut self) {
        self.word_index.clear();
        self.synonym_index.clear();

        for (idx, entry) in self.entries.iter().enumerate() {
            self.word_index.insert(entry.word.clone(), idx);
            // First entry in declaration order owns a shared synonym
            for synonym in &entry.synonyms {
                self.synonym_index
                    .entry(synonym.trim().to_lowercase())
                    .or_insert(idx);
            }
        }
    }
}

fn validate_entry(entry: &VocabularyEntry) -> Result<(), LoadError> {
    let word = entry.word.as_str();
    if word.trim().is_empty() {
        return Err(LoadError::InvalidEntry("empty word".to_string()));
    }
    if word != word.trim() || word != word.to_lowercase() {
        return Err(LoadError::InvalidEntry(format!(
            "'{word}' is not a canonical lowercase word"
        )));
    }
    if entry.category == Category::Fingerspelled {
        return Err(LoadError::InvalidEntry(format!(
            "'{word}' uses the reserved fingerspelled category"
        )));
    }
    Ok(())
}

impl Vocabulary for AslVocabulary {
    fn lookup(&self, word: &str) -> Option<&VocabularyEntry> {
        self.word_index.get(word).and_then(|&idx| self.entries.get(idx))
    }

    fn lookup_synonym(&self, synonym: &str) -> Option<&VocabularyEntry> {
        self.synonym_index
            .get(synonym)
            .and_then(|&idx| self.entries.get(idx))
    }

    fn entries(&self) -> &[VocabularyEntry] {
        &self.entries
    }

    fn metadata(&self) -> VocabularyMetadata {
        VocabularyMetadata {
            name: "ASL classroom vocabulary".to_string(),
            version: self.version.clone(),
            language: "ase".to_string(),
            entry_count: self.entries.len(),
        }
    }
}

use signaid_types::{Category, VocabularyEntry};

/// Read-only sign vocabulary operations
pub trait Vocabulary: Send + Sync {
    /// Look up an entry by its canonical (lowercase) word
    fn lookup(&self, word: &str) -> Option<&VocabularyEntry>;

    /// First entry, in declaration order, listing `synonym`
    fn lookup_synonym(&self, synonym: &str) -> Option<&VocabularyEntry>;

    /// All entries in declaration order
    fn entries(&self) -> &[VocabularyEntry];

    /// Get vocabulary metadata
    fn metadata(&self) -> VocabularyMetadata;

    fn len(&self) -> usize {
        self.entries().len()
    }

    fn is_empty(&self) -> bool {
        self.entries().is_empty()
    }

    /// Canonical words in declaration order
    fn words(&self) -> Vec<&str> {
        self.entries().iter().map(|e| e.word.as_str()).collect()
    }

    /// Entries whose word spans several tokens, in declaration order
    fn phrases(&self) -> Vec<&VocabularyEntry> {
        self.entries()
            .iter()
            .filter(|e| e.word.contains(char::is_whitespace))
            .collect()
    }

    /// Distinct categories sorted by name
    fn categories(&self) -> Vec<Category> {
        let mut categories: Vec<Category> = self.entries().iter().map(|e| e.category).collect();
        categories.sort_by_key(|c| c.as_str());
        categories.dedup();
        categories
    }
}

#[derive(Debug, Clone)]
pub struct VocabularyMetadata {
    pub name: String,
    pub version: String,
    pub language: String,
    pub entry_count: usize,
}

#[derive(Debug, thiserror::Error)]
pub enum LoadError {
    #[error("File not found: {0}")]
    FileNotFound(String),

    #[error("Invalid entry: {0}")]
    InvalidEntry(String),

    #[error("Duplicate word: {0}")]
    DuplicateWord(String),

    #[error("Parse error: {0}")]
    ParseError(#[from] serde_json::Error),

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),
}

pub mod types;

pub use types::{AnimationType, Category, MatchMethod, MatchResult, VocabularyEntry};

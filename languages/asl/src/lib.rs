pub mod gemini;
pub mod loader;
pub mod processor;
pub mod vocabulary;

pub use gemini::GeminiMatcher;
pub use loader::VocabularyLoader;
pub use processor::SignProcessor;
pub use vocabulary::AslVocabulary;

use std::collections::HashSet;
use std::sync::Arc;

use signaid_core::fingerspell::fingerspell;
use signaid_core::matcher::{
    EXACT_CONFIDENCE, FALLBACK_FINGERSPELL_CONFIDENCE, FORCED_FINGERSPELL_CONFIDENCE,
    REMOTE_DEFAULT_CONFIDENCE, SYNONYM_CONFIDENCE, SignMatcher,
};
use signaid_core::preprocess::{Preprocessor, fingerspell_tokens};
use signaid_core::vocabulary::Vocabulary;
use signaid_remote::RemoteMatch;
use signaid_types::MatchResult;

use crate::vocabulary::AslVocabulary;

/// English text to ASL sign processor
pub struct SignProcessor {
    vocabulary: Arc<AslVocabulary>,
}

impl Preprocessor for SignProcessor {}

impl SignProcessor {
    pub fn new(vocabulary: Arc<AslVocabulary>) -> Self {
        Self { vocabulary }
    }

    pub fn vocabulary(&self) -> &AslVocabulary {
        &self.vocabulary
    }

    /// Fingerspell every word of `text`, skipping words without letters
    pub fn fingerspell_all(&self, text: &str) -> Vec<MatchResult> {
        fingerspell_tokens(text)
            .iter()
            .filter_map(|word| fingerspell(word, FORCED_FINGERSPELL_CONFIDENCE))
            .collect()
    }

    /// Turn provider matches into full results. Words outside the vocabulary
    /// are dropped.
    pub fn resolve_remote(&self, matches: Vec<RemoteMatch>) -> Vec<MatchResult> {
        matches
            .into_iter()
            .filter_map(|m| {
                let entry = self.vocabulary.lookup(&m.word)?;
                let confidence = m.confidence.unwrap_or(REMOTE_DEFAULT_CONFIDENCE);
                let matched_from = m.matched_from.unwrap_or_else(|| m.word.clone());
                Some(MatchResult::from_entry(entry, confidence, matched_from))
            })
            .collect()
    }
}

impl SignMatcher for SignProcessor {
    /// Phrases first (substring search, declaration order), then one result
    /// per distinct token in input order: exact word, synonym, or fingerspelling.
    fn match_text(&self, text: &str) -> Vec<MatchResult> {
        let normalized = self.process(text);
        if normalized.is_empty() {
            return Vec::new();
        }

        let mut results = Vec::new();
        let mut consumed: HashSet<String> = HashSet::new();

        for phrase in self.vocabulary.phrases() {
            if normalized.contains(phrase.word.as_str()) && consumed.insert(phrase.word.clone()) {
                results.push(MatchResult::from_entry(phrase, EXACT_CONFIDENCE, phrase.word.clone()));
            }
        }

        for token in self.tokenize(&normalized) {
            if consumed.contains(&token) {
                continue;
            }

            let result = if let Some(entry) = self.vocabulary.lookup(&token) {
                Some(MatchResult::from_entry(entry, EXACT_CONFIDENCE, token.clone()))
            } else if let Some(entry) = self.vocabulary.lookup_synonym(&token) {
                Some(MatchResult::from_entry(entry, SYNONYM_CONFIDENCE, token.clone()))
            } else {
                fingerspell(&token, FALLBACK_FINGERSPELL_CONFIDENCE)
            };

            if let Some(result) = result {
                tracing::trace!("'{}' -> '{}' ({})", token, result.word(), result.confidence);
                results.push(result);
                consumed.insert(token);
            }
        }

        results
    }
}

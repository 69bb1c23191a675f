use std::collections::BTreeMap;
use std::fmt;

use serde::{Deserialize, Serialize};

/// Sign category labels. `Fingerspelled` only ever appears on match results.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Category {
    Greetings,
    Responses,
    Actions,
    Nouns,
    Descriptors,
    Questions,
    Numbers,
    Colors,
    Phrases,
    Fingerspelled,
}

impl Category {
    pub fn as_str(&self) -> &'static str {
        match self {
            Category::Greetings => "greetings",
            Category::Responses => "responses",
            Category::Actions => "actions",
            Category::Nouns => "nouns",
            Category::Descriptors => "descriptors",
            Category::Questions => "questions",
            Category::Numbers => "numbers",
            Category::Colors => "colors",
            Category::Phrases => "phrases",
            Category::Fingerspelled => "fingerspelled",
        }
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// How a rendering client should animate a sign
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AnimationType {
    Css,
    Gif,
    Video,
}

/// One canonical sign concept
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct VocabularyEntry {
    pub word: String,
    pub category: Category,
    #[serde(default)]
    pub synonyms: Vec<String>,
    pub description: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub animation_type: Option<AnimationType>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub animation_data: Option<BTreeMap<String, String>>,
}

/// A vocabulary entry (or an ad-hoc fingerspelled word) matched from input text
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MatchResult {
    #[serde(flatten)]
    pub entry: VocabularyEntry,
    pub confidence: f32,
    pub matched_from: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub letters: Option<Vec<char>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub video_url: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub letter_videos: Option<Vec<Option<String>>>,
}

impl MatchResult {
    pub fn from_entry(entry: &VocabularyEntry, confidence: f32, matched_from: impl Into<String>) -> Self {
        Self {
            entry: entry.clone(),
            confidence,
            matched_from: matched_from.into(),
            letters: None,
            video_url: None,
            letter_videos: None,
        }
    }

    pub fn word(&self) -> &str {
        &self.entry.word
    }

    pub fn is_fingerspelled(&self) -> bool {
        self.entry.category == Category::Fingerspelled
    }
}

/// Strategy that produced a match response
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MatchMethod {
    Fingerspell,
    Gemini,
    Local,
    None,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fingerspelled_result_serializes_flat() {
        let result = MatchResult {
            entry: VocabularyEntry {
                word: "zed".to_string(),
                category: Category::Fingerspelled,
                synonyms: vec![],
                description: "Finger-spell the word 'zed'".to_string(),
                animation_type: None,
                animation_data: None,
            },
            confidence: 0.5,
            matched_from: "zed".to_string(),
            letters: Some(vec!['z', 'e', 'd']),
            video_url: None,
            letter_videos: None,
        };

        let json = serde_json::to_value(&result).unwrap();
        assert_eq!(json["word"], "zed");
        assert_eq!(json["category"], "fingerspelled");
        assert_eq!(json["confidence"], 0.5);
        assert_eq!(json["letters"], serde_json::json!(["z", "e", "d"]));
        assert!(json.get("animation_type").is_none());
        assert!(json.get("video_url").is_none());
    }

    #[test]
    fn test_entry_without_synonyms_deserializes() {
        let entry: VocabularyEntry = serde_json::from_str(
            r#"{"word": "wave", "category": "actions", "description": "Wave", "animation_type": "css"}"#,
        )
        .unwrap();
        assert!(entry.synonyms.is_empty());
        assert_eq!(entry.animation_type, Some(AnimationType::Css));
    }

    #[test]
    fn test_method_names() {
        assert_eq!(serde_json::to_string(&MatchMethod::Gemini).unwrap(), "\"gemini\"");
        assert_eq!(serde_json::to_string(&MatchMethod::None).unwrap(), "\"none\"");
    }
}

use signaid_types::{Category, MatchResult, VocabularyEntry};

/// Build a fingerspelled result for `word`, or `None` if it has no letters
pub fn fingerspell(word: &str, confidence: f32) -> Option<MatchResult> {
    let letters: Vec<char> = word.chars().filter(|c| c.is_alphabetic()).collect();
    if letters.is_empty() {
        return None;
    }

    Some(MatchResult {
        entry: VocabularyEntry {
            word: word.to_string(),
            category: Category::Fingerspelled,
            synonyms: vec![],
            description: format!("Finger-spell the word '{word}'"),
            animation_type: None,
            animation_data: None,
        },
        confidence,
        matched_from: word.to_string(),
        letters: Some(letters),
        video_url: None,
        letter_videos: None,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_letters_skip_digits_and_marks() {
        let result = fingerspell("r2-d2", 0.5).unwrap();
        assert_eq!(result.letters, Some(vec!['r', 'd']));
        assert_eq!(result.word(), "r2-d2");
        assert_eq!(result.entry.description, "Finger-spell the word 'r2-d2'");
        assert!(result.is_fingerspelled());
    }

    #[test]
    fn test_no_letters() {
        assert!(fingerspell("1234", 0.5).is_none());
        assert!(fingerspell("", 0.5).is_none());
    }
}

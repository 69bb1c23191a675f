use serde_json::Value;

/// Build the matching prompt. Both the vocabulary and the input are embedded
/// as JSON so quotes in user text cannot break out of the string.
pub fn build_prompt(text: &str, vocabulary: &[&str]) -> String {
    let vocab_list = Value::from(vocabulary.to_vec());
    let input = Value::from(text);

    format!(
        r#"You are an assistant that maps spoken text to sign language vocabulary.

Given the input text, identify which words from the available vocabulary should be used to represent the meaning.

Available vocabulary: {vocab_list}

Input text: {input}

Rules:
1. Only return words that are in the available vocabulary list
2. Consider synonyms and semantic meaning (e.g., "I don't get it" should match "confused")
3. Return words in the order they should be signed
4. Include a confidence score (0.0-1.0) for each match
5. For words with no good match, skip them

Return a JSON array of objects with format:
[{{"word": "vocabulary_word", "confidence": 0.95, "matched_from": "original_word_or_phrase"}}]

Only return the JSON array, no other text."#
    )
}

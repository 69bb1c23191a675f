/// Separators the local matcher treats as word breaks besides whitespace
const WORD_SEPARATORS: [char; 4] = [',', '.', '?', '!'];

pub trait Preprocessor {
    /// Trim and lowercase. No Unicode folding: full-width or compatibility
    /// forms stay distinct from their ASCII counterparts.
    fn process(&self, text: &str) -> String {
        text.trim().to_lowercase()
    }

    /// Split processed text into word tokens
    fn tokenize(&self, text: &str) -> Vec<String> {
        text.replace(WORD_SEPARATORS, " ")
            .split_whitespace()
            .map(str::to_string)
            .collect()
    }
}

/// Tokens for forced fingerspelling: everything but ASCII letters, digits and
/// whitespace becomes a break.
pub fn fingerspell_tokens(text: &str) -> Vec<String> {
    text.chars()
        .map(|c| {
            if c.is_ascii_alphanumeric() || c.is_whitespace() {
                c
            } else {
                ' '
            }
        })
        .collect::<String>()
        .split_whitespace()
        .map(str::to_string)
        .collect()
}

/// Trim `text` and keep at most `max_chars` characters
pub fn clamp_input(text: &str, max_chars: usize) -> String {
    text.trim().chars().take(max_chars).collect()
}

use signaid_types::MatchResult;

/// Confidence of an exact vocabulary key or phrase hit
pub const EXACT_CONFIDENCE: f32 = 1.0;
/// Confidence of a synonym hit
pub const SYNONYM_CONFIDENCE: f32 = 0.85;
/// Confidence of a fingerspelled word the matcher could not place
pub const FALLBACK_FINGERSPELL_CONFIDENCE: f32 = 0.5;
/// Confidence of a word the caller asked to fingerspell
pub const FORCED_FINGERSPELL_CONFIDENCE: f32 = 1.0;
/// Confidence assumed when a remote match omits one
pub const REMOTE_DEFAULT_CONFIDENCE: f32 = 0.8;

/// Text to sign matching interface
pub trait SignMatcher: Send + Sync {
    /// Map free text to an ordered list of signs
    fn match_text(&self, text: &str) -> Vec<MatchResult>;
}

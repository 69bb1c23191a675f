pub mod prompt;
pub mod response;

pub use prompt::build_prompt;
pub use response::{parse_matches, strip_code_fence};

/// Remote sign-matching provider interface
#[async_trait::async_trait]
pub trait RemoteMatcher: Send + Sync {
    /// Ask the provider which of `vocabulary` represent `text`, in signing order.
    ///
    /// Best effort: a single attempt, never retried. Callers fall back to
    /// local matching on any error.
    async fn match_signs(
        &self,
        text: &str,
        vocabulary: &[&str],
    ) -> Result<Vec<RemoteMatch>, RemoteMatchError>;

    /// Provider metadata
    fn metadata(&self) -> ProviderMetadata;
}

/// One validated element of a provider's answer. `word` is lowercased; it is
/// not yet checked against the vocabulary.
#[derive(Debug, Clone, PartialEq)]
pub struct RemoteMatch {
    pub word: String,
    pub confidence: Option<f32>,
    pub matched_from: Option<String>,
}

#[derive(Debug, Clone)]
pub struct ProviderMetadata {
    pub name: String,
    pub model: String,
    pub requires_api_key: bool,
}

#[derive(Debug, thiserror::Error)]
pub enum RemoteMatchError {
    #[error("No API key configured")]
    MissingCredential,

    #[error("API error: {0}")]
    ApiError(String),

    #[error("Network error: {0}")]
    NetworkError(#[from] reqwest::Error),

    #[error("Request timed out")]
    Timeout,

    #[error("Failed to parse response: {0}")]
    ParseError(#[from] serde_json::Error),

    #[error("Unexpected response shape: {0}")]
    InvalidResponse(String),

    #[error("Rate limit exceeded")]
    RateLimitExceeded,

    #[error("Authentication error")]
    AuthenticationError,
}

impl RemoteMatchError {
    /// Classify a transport error, separating out timeouts
    pub fn from_transport(err: reqwest::Error) -> Self {
        if err.is_timeout() {
            RemoteMatchError::Timeout
        } else {
            RemoteMatchError::NetworkError(err)
        }
    }
}

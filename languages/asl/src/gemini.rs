use std::time::Duration;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use signaid_config::remote::RemoteConfig;
use signaid_remote::{
    ProviderMetadata, RemoteMatch, RemoteMatchError, RemoteMatcher, build_prompt, parse_matches,
};

/// Gemini `generateContent` request body
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct GenerateRequest {
    contents: Vec<RequestContent>,
    generation_config: GenerationConfig,
}

#[derive(Debug, Serialize)]
struct RequestContent {
    parts: Vec<RequestPart>,
}

#[derive(Debug, Serialize)]
struct RequestPart {
    text: String,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct GenerationConfig {
    temperature: f32,
}

#[derive(Debug, Deserialize)]
struct GenerateResponse {
    #[serde(default)]
    candidates: Vec<Candidate>,
}

#[derive(Debug, Deserialize)]
struct Candidate {
    #[serde(default)]
    content: Option<ResponseContent>,
}

#[derive(Debug, Deserialize)]
struct ResponseContent {
    #[serde(default)]
    parts: Vec<ResponsePart>,
}

#[derive(Debug, Deserialize)]
struct ResponsePart {
    #[serde(default)]
    text: Option<String>,
}

#[derive(Clone)]
pub struct GeminiMatcher {
    client: reqwest::Client,
    api_key: String,
    api_url: String,
    model: String,
}

impl GeminiMatcher {
    pub fn new(
        api_key: String,
        api_url: String,
        model: String,
        timeout: Duration,
    ) -> Result<Self, RemoteMatchError> {
        let client = reqwest::Client::builder().timeout(timeout).build()?;

        Ok(Self {
            client,
            api_key,
            api_url,
            model,
        })
    }

    pub fn from_config(config: &RemoteConfig) -> Result<Self, RemoteMatchError> {
        Self::new(
            config.api_key.trim().to_string(),
            config.api_url.clone(),
            config.model.clone(),
            Duration::from_secs(config.timeout_seconds),
        )
    }

    fn endpoint(&self) -> String {
        format!(
            "{}/{}:generateContent",
            self.api_url.trim_end_matches('/'),
            self.model
        )
    }

    /// Concatenated text parts of the first candidate
    fn candidate_text(response: GenerateResponse) -> Result<String, RemoteMatchError> {
        let text: String = response
            .candidates
            .into_iter()
            .next()
            .and_then(|c| c.content)
            .map(|content| content.parts.into_iter().filter_map(|p| p.text).collect::<String>())
            .unwrap_or_default();

        if text.trim().is_empty() {
            return Err(RemoteMatchError::ApiError(
                "No text in response".to_string(),
            ));
        }

        Ok(text)
    }
}

#[async_trait]
impl RemoteMatcher for GeminiMatcher {
    async fn match_signs(
        &self,
        text: &str,
        vocabulary: &[&str],
    ) -> Result<Vec<RemoteMatch>, RemoteMatchError> {
        if self.api_key.is_empty() {
            return Err(RemoteMatchError::MissingCredential);
        }

        let request = GenerateRequest {
            contents: vec![RequestContent {
                parts: vec![RequestPart {
                    text: build_prompt(text, vocabulary),
                }],
            }],
            generation_config: GenerationConfig { temperature: 0.2 },
        };

        tracing::debug!("Sending match request to {}", self.endpoint());

        let response = self
            .client
            .post(self.endpoint())
            .header("x-goog-api-key", &self.api_key)
            .json(&request)
            .send()
            .await
            .map_err(RemoteMatchError::from_transport)?;

        let status = response.status();
        if status == 429 {
            return Err(RemoteMatchError::RateLimitExceeded);
        }

        if status == 401 || status == 403 {
            return Err(RemoteMatchError::AuthenticationError);
        }

        if !status.is_success() {
            return Err(RemoteMatchError::ApiError(format!("HTTP {}", status)));
        }

        let body = response
            .text()
            .await
            .map_err(RemoteMatchError::from_transport)?;
        let payload: GenerateResponse = serde_json::from_str(&body).map_err(|e| {
            RemoteMatchError::ApiError(format!("Malformed response body: {}", e))
        })?;

        let answer = Self::candidate_text(payload)?;
        tracing::debug!("Gemini answered with {} chars", answer.len());

        parse_matches(&answer)
    }

    fn metadata(&self) -> ProviderMetadata {
        ProviderMetadata {
            name: "gemini".to_string(),
            model: self.model.clone(),
            requires_api_key: true,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn matcher(api_key: &str) -> GeminiMatcher {
        GeminiMatcher::new(
            api_key.to_string(),
            "https://example.invalid/v1beta/models/".to_string(),
            "gemini-2.0-flash".to_string(),
            Duration::from_secs(1),
        )
        .unwrap()
    }

    #[test]
    fn test_endpoint() {
        assert_eq!(
            matcher("key").endpoint(),
            "https://example.invalid/v1beta/models/gemini-2.0-flash:generateContent"
        );
    }

    #[test]
    fn test_request_body_shape() {
        let request = GenerateRequest {
            contents: vec![RequestContent {
                parts: vec![RequestPart {
                    text: "prompt".to_string(),
                }],
            }],
            generation_config: GenerationConfig { temperature: 0.2 },
        };
        let json = serde_json::to_value(&request).unwrap();
        assert_eq!(json["contents"][0]["parts"][0]["text"], "prompt");
        assert!(json["generationConfig"]["temperature"].is_number());
    }

    #[test]
    fn test_candidate_text_joins_parts() {
        let response: GenerateResponse = serde_json::from_str(
            r#"{"candidates": [{"content": {"parts": [{"text": "[{\"word\": "}, {"text": "\"yes\"}]"}]}}]}"#,
        )
        .unwrap();
        assert_eq!(
            GeminiMatcher::candidate_text(response).unwrap(),
            r#"[{"word": "yes"}]"#
        );
    }

    #[test]
    fn test_candidate_text_missing() {
        let response: GenerateResponse = serde_json::from_str(r#"{"candidates": []}"#).unwrap();
        assert!(matches!(
            GeminiMatcher::candidate_text(response),
            Err(RemoteMatchError::ApiError(_))
        ));
    }

    #[tokio::test]
    async fn test_missing_credential_skips_request() {
        let err = matcher("").match_signs("hello", &["hello"]).await.unwrap_err();
        assert!(matches!(err, RemoteMatchError::MissingCredential));
    }
}

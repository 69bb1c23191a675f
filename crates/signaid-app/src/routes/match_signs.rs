use axum::Json;
use axum::extract::State;
use axum::extract::rejection::JsonRejection;
use axum::http::StatusCode;
use serde::Serialize;
use serde_json::{Map, Value};
use signaid_core::matcher::SignMatcher;
use signaid_core::preprocess::clamp_input;
use signaid_core::vocabulary::Vocabulary;
use signaid_types::{MatchMethod, MatchResult};

use crate::error::ApiError;
use crate::state::AppState;

/// Body of `POST /api/match`. Fields are loosely typed so that a wrong type
/// is a validation error rather than a parse error.
#[derive(Debug, Default)]
pub struct MatchRequest {
    pub text: Option<Value>,
    pub use_ai: Option<Value>,
    pub force_fingerspell: Option<Value>,
}

impl From<Map<String, Value>> for MatchRequest {
    fn from(mut fields: Map<String, Value>) -> Self {
        Self {
            text: fields.remove("text"),
            use_ai: fields.remove("use_ai"),
            force_fingerspell: fields.remove("force_fingerspell"),
        }
    }
}

#[derive(Debug, Serialize)]
pub struct MatchResponse {
    pub signs: Vec<MatchResult>,
    pub method: MatchMethod,
    pub text: String,
}

pub async fn match_signs(
    State(state): State<AppState>,
    payload: Result<Json<Value>, JsonRejection>,
) -> Result<Json<MatchResponse>, ApiError> {
    let Json(body) = payload.map_err(reject_payload)?;

    // Only an object can carry `text`
    let request = match body {
        Value::Object(fields) => MatchRequest::from(fields),
        _ => return Err(ApiError::MissingText),
    };

    let text = match request.text {
        Some(Value::String(text)) if !text.trim().is_empty() => {
            clamp_input(&text, state.config.server.max_text_chars)
        }
        _ => return Err(ApiError::MissingText),
    };
    let use_ai = flag(request.use_ai.as_ref(), true);
    let force_fingerspell = flag(request.force_fingerspell.as_ref(), false);

    let (mut signs, method) = if force_fingerspell {
        (state.processor.fingerspell_all(&text), MatchMethod::Fingerspell)
    } else {
        let remote = if use_ai {
            remote_match(&state, &text).await
        } else {
            None
        };

        match remote {
            Some(signs) => (signs, MatchMethod::Gemini),
            None => (state.processor.match_text(&text), MatchMethod::Local),
        }
    };

    state.media.enrich(&mut signs).await;
    tracing::debug!("Matched {} signs via {:?}", signs.len(), method);

    Ok(Json(MatchResponse {
        signs,
        method,
        text,
    }))
}

/// Remote results, or `None` when no provider is configured or it failed
async fn remote_match(state: &AppState, text: &str) -> Option<Vec<MatchResult>> {
    let remote = state.remote.as_ref()?;
    let vocabulary = state.vocabulary().words();

    match remote.match_signs(text, &vocabulary).await {
        Ok(matches) => Some(state.processor.resolve_remote(matches)),
        Err(e) => {
            tracing::info!("Remote matching failed, falling back to local: {}", e);
            None
        }
    }
}

fn reject_payload(rejection: JsonRejection) -> ApiError {
    if rejection.status() == StatusCode::PAYLOAD_TOO_LARGE {
        return ApiError::PayloadTooLarge;
    }

    tracing::debug!("Rejected match payload: {}", rejection.body_text());
    ApiError::InvalidPayload("Expected JSON payload".to_string())
}

/// JSON truthiness: absent or null takes the default
fn flag(value: Option<&Value>, default: bool) -> bool {
    match value {
        None | Some(Value::Null) => default,
        Some(Value::Bool(b)) => *b,
        Some(Value::Number(n)) => n.as_f64().is_some_and(|n| n != 0.0),
        Some(Value::String(s)) => !s.is_empty(),
        Some(Value::Array(items)) => !items.is_empty(),
        Some(Value::Object(fields)) => !fields.is_empty(),
    }
}

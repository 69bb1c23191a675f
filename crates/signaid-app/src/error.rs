use axum::Json;
use axum::http::{StatusCode, header};
use axum::response::{IntoResponse, Response};
use serde_json::json;

/// Request failures and their HTTP mapping
#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    #[error("{0}")]
    InvalidPayload(String),

    #[error("No text provided")]
    MissingText,

    #[error("Payload too large")]
    PayloadTooLarge,

    #[error("Not found")]
    NotFound,

    #[error("Too many requests")]
    RateLimited { retry_after_secs: u64 },

    #[error(transparent)]
    Internal(#[from] anyhow::Error),
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        match self {
            ApiError::MissingText => (
                StatusCode::BAD_REQUEST,
                Json(json!({"signs": [], "method": "none", "error": self.to_string()})),
            )
                .into_response(),
            ApiError::InvalidPayload(_) => error_body(StatusCode::BAD_REQUEST, &self),
            ApiError::PayloadTooLarge => error_body(StatusCode::PAYLOAD_TOO_LARGE, &self),
            ApiError::NotFound => error_body(StatusCode::NOT_FOUND, &self),
            ApiError::RateLimited { retry_after_secs } => (
                StatusCode::TOO_MANY_REQUESTS,
                [(header::RETRY_AFTER, retry_after_secs.to_string())],
                Json(json!({"error": self.to_string()})),
            )
                .into_response(),
            ApiError::Internal(e) => {
                tracing::error!("Internal error: {:#}", e);
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    Json(json!({"error": "Internal Server Error"})),
                )
                    .into_response()
            }
        }
    }
}

fn error_body(status: StatusCode, error: &ApiError) -> Response {
    (status, Json(json!({"error": error.to_string()}))).into_response()
}

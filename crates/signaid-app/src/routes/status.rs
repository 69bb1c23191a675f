use axum::Json;
use axum::extract::State;
use serde::Serialize;

use crate::state::AppState;

#[derive(Debug, Serialize)]
pub struct StatusResponse {
    pub gemini_configured: bool,
    pub vocabulary_count: usize,
}

pub async fn status(State(state): State<AppState>) -> Json<StatusResponse> {
    Json(StatusResponse {
        gemini_configured: state.remote.is_some(),
        vocabulary_count: state.vocabulary().entry_count(),
    })
}

use std::any::Any;
use std::sync::Arc;

use axum::Router;
use axum::extract::DefaultBodyLimit;
use axum::http::{HeaderValue, header};
use axum::middleware::from_fn_with_state;
use axum::response::{IntoResponse, Response};
use axum::routing::{get, post};
use tower::ServiceBuilder;
use tower_http::catch_panic::CatchPanicLayer;
use tower_http::services::ServeDir;
use tower_http::set_header::SetResponseHeaderLayer;
use tower_http::trace::TraceLayer;

use crate::error::ApiError;
use crate::middleware::{RateLimiter, enforce_rate_limit};
use crate::routes;
use crate::state::AppState;

const CONTENT_SECURITY_POLICY: &str = "default-src 'self'; script-src 'self'; style-src 'self'";

/// Build the HTTP router: API routes, media files, limits and response headers
pub fn build_router(state: AppState) -> Router {
    let config = Arc::clone(&state.config);

    let mut match_routes =
        Router::new().route("/api/match", post(routes::match_signs::match_signs));

    let mut general_routes = Router::new()
        .route("/api/vocabulary", get(routes::vocabulary::list_vocabulary))
        .route("/api/vocabulary/:word", get(routes::vocabulary::get_word))
        .route("/api/status", get(routes::status::status))
        .nest_service(state.media.url_prefix(), ServeDir::new(state.media.dir()));

    let limits = &config.rate_limit;
    if limits.enabled {
        let match_limiter = Arc::new(RateLimiter::per_minute(limits.match_per_minute));
        match_routes = match_routes.layer(from_fn_with_state(match_limiter, enforce_rate_limit));

        // Everything except matching shares one budget
        let general_limiter = Arc::new(RateLimiter::per_minute(limits.default_per_minute));
        general_routes =
            general_routes.layer(from_fn_with_state(general_limiter, enforce_rate_limit));
    } else {
        tracing::warn!("Rate limiting disabled");
    }

    let security_headers = ServiceBuilder::new()
        .layer(SetResponseHeaderLayer::if_not_present(
            header::X_CONTENT_TYPE_OPTIONS,
            HeaderValue::from_static("nosniff"),
        ))
        .layer(SetResponseHeaderLayer::if_not_present(
            header::X_FRAME_OPTIONS,
            HeaderValue::from_static("DENY"),
        ))
        .layer(SetResponseHeaderLayer::if_not_present(
            header::REFERRER_POLICY,
            HeaderValue::from_static("no-referrer"),
        ))
        .layer(SetResponseHeaderLayer::if_not_present(
            header::CONTENT_SECURITY_POLICY,
            HeaderValue::from_static(CONTENT_SECURITY_POLICY),
        ));

    match_routes
        .merge(general_routes)
        .layer(DefaultBodyLimit::max(config.server.max_body_bytes))
        .layer(CatchPanicLayer::custom(panic_response))
        .layer(security_headers)
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

fn panic_response(panic: Box<dyn Any + Send + 'static>) -> Response {
    let detail = if let Some(s) = panic.downcast_ref::<String>() {
        s.clone()
    } else if let Some(s) = panic.downcast_ref::<&str>() {
        s.to_string()
    } else {
        "unknown panic".to_string()
    };

    ApiError::Internal(anyhow::anyhow!("handler panicked: {detail}")).into_response()
}

use std::sync::Arc;

use axum::Router;
use axum::body::Body;
use axum::http::{HeaderMap, Request, StatusCode};
use http_body_util::BodyExt;
use serde_json::Value;
use signaid_config::Config;
use signaid_lang_asl::VocabularyLoader;
use signaid_remote::RemoteMatcher;
use tower::ServiceExt;

use crate::server::build_router;
use crate::state::AppState;


/// Defaults with media pointed at `media_dir` and no remote provider
fn test_config(media_dir: &std::path::Path) -> Config {
    let mut config = Config::default();
    config.media.dir = media_dir.display().to_string();
    config
}

fn test_app(config: Config, remote: Option<Arc<dyn RemoteMatcher>>) -> Router {
    let vocabulary = VocabularyLoader::load_embedded().unwrap();
    build_router(AppState::new(config, vocabulary, remote))
}

struct TestResponse {
    status: StatusCode,
    headers: HeaderMap,
    body: String,
}

impl TestResponse {
    fn json(&self) -> Value {
        serde_json::from_str(&self.body).unwrap()
    }
}

async fn send(app: &Router, request: Request<Body>) -> TestResponse {
    let response = app.clone().oneshot(request).await.unwrap();
    let status = response.status();
    let headers = response.headers().clone();
    let bytes = response.into_body().collect().await.unwrap().to_bytes();

    TestResponse {
        status,
        headers,
        body: String::from_utf8_lossy(&bytes).into_owned(),
    }
}

async fn get(app: &Router, uri: &str) -> TestResponse {
    send(app, Request::get(uri).body(Body::empty()).unwrap()).await
}

async fn post_json(app: &Router, uri: &str, body: Value) -> TestResponse {
    let request = Request::post(uri)
        .header("content-type", "application/json")
        .body(Body::from(body.to_string()))
        .unwrap();
    send(app, request).await
}

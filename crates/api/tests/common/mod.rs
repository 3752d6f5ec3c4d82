#![allow(dead_code)]

use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use axum::body::Body;
use axum::http::{Method, Request, Response};
use axum::Router;
use http_body_util::BodyExt;
use tower::ServiceExt;

use groundwork_api::config::{AssistConfig, LogFormat, ServerConfig};
use groundwork_api::middleware::actor::ACTOR_HEADER;
use groundwork_api::router::build_app_router;
use groundwork_api::state::AppState;
use groundwork_assist::{
    AssistError, Assistant, OfflineGenerator, Prompt, ScanVerdict, SecurityScanner, TextGenerator,
};

/// Build a test `ServerConfig` with safe defaults.
///
/// Demo data is loaded and every simulated delay is zero.
pub fn test_config() -> ServerConfig {
    ServerConfig {
        host: "127.0.0.1".to_string(),
        port: 0,
        cors_origins: vec!["http://localhost:5173".to_string()],
        request_timeout_secs: 30,
        shutdown_timeout_secs: 30,
        seed_demo_data: true,
        log_format: LogFormat::Text,
        assist: AssistConfig {
            api_key: None,
            model: "test-model".to_string(),
            base_url: "http://localhost:0".to_string(),
        },
        scan_pass_rate: 1.0,
        scan_delay_ms: 0,
        upload_chunk_delay_ms: 0,
    }
}

/// Scanner with a fixed verdict.
pub struct FixedScanner(pub ScanVerdict);

#[async_trait]
impl SecurityScanner for FixedScanner {
    async fn scan(&self, _document_name: &str) -> Result<ScanVerdict, AssistError> {
        Ok(self.0)
    }
}

/// Scanner that takes `delay` before passing every file.
pub struct SlowScanner {
    pub delay: Duration,
}

#[async_trait]
impl SecurityScanner for SlowScanner {
    async fn scan(&self, _document_name: &str) -> Result<ScanVerdict, AssistError> {
        tokio::time::sleep(self.delay).await;
        Ok(ScanVerdict::Clean)
    }
}

/// Generator that answers every prompt with the same text.
pub struct CannedGenerator(pub String);

#[async_trait]
impl TextGenerator for CannedGenerator {
    async fn generate(&self, _prompt: &Prompt) -> Result<String, AssistError> {
        Ok(self.0.clone())
    }
}

pub fn canned(reply: &str) -> Arc<dyn TextGenerator> {
    Arc::new(CannedGenerator(reply.to_string()))
}

/// The full application over the demo store, with the assistant offline
/// and every upload scanned clean.
pub fn build_test_app() -> Router {
    build_test_app_with(Arc::new(OfflineGenerator), ScanVerdict::Clean)
}

pub fn build_test_app_with(generator: Arc<dyn TextGenerator>, verdict: ScanVerdict) -> Router {
    build_test_app_with_scanner(generator, Arc::new(FixedScanner(verdict)))
}

pub fn build_test_app_with_scanner(
    generator: Arc<dyn TextGenerator>,
    scanner: Arc<dyn SecurityScanner>,
) -> Router {
    let config = test_config();
    let state = AppState {
        db: groundwork_db::create_database(config.seed_demo_data),
        assistant: Assistant::new(generator),
        scanner,
        config: Arc::new(config.clone()),
    };
    build_app_router(state, &config)
}

// ---------------------------------------------------------------------------
// Request helpers
// ---------------------------------------------------------------------------

async fn send(
    app: Router,
    method: Method,
    uri: &str,
    actor: Option<i64>,
    body: Option<serde_json::Value>,
) -> Response<Body> {
    let mut builder = Request::builder().method(method).uri(uri);
    if let Some(actor) = actor {
        builder = builder.header(ACTOR_HEADER, actor.to_string());
    }
    let request = match body {
        Some(json) => builder
            .header("content-type", "application/json")
            .body(Body::from(serde_json::to_vec(&json).unwrap()))
            .unwrap(),
        None => builder.body(Body::empty()).unwrap(),
    };
    app.oneshot(request).await.unwrap()
}

pub async fn get(app: Router, uri: &str) -> Response<Body> {
    send(app, Method::GET, uri, None, None).await
}

pub async fn post_json(app: Router, uri: &str, body: serde_json::Value) -> Response<Body> {
    send(app, Method::POST, uri, None, Some(body)).await
}

pub async fn put_json(app: Router, uri: &str, body: serde_json::Value) -> Response<Body> {
    send(app, Method::PUT, uri, None, Some(body)).await
}

/// POST with an `x-actor-id` header.
pub async fn post_json_as(
    app: Router,
    uri: &str,
    actor: i64,
    body: serde_json::Value,
) -> Response<Body> {
    send(app, Method::POST, uri, Some(actor), Some(body)).await
}

pub async fn post_as(app: Router, uri: &str, actor: i64) -> Response<Body> {
    send(app, Method::POST, uri, Some(actor), None).await
}

pub async fn put_json_as(
    app: Router,
    uri: &str,
    actor: i64,
    body: serde_json::Value,
) -> Response<Body> {
    send(app, Method::PUT, uri, Some(actor), Some(body)).await
}

pub async fn delete_as(app: Router, uri: &str, actor: i64) -> Response<Body> {
    send(app, Method::DELETE, uri, Some(actor), None).await
}

pub async fn body_json(response: Response<Body>) -> serde_json::Value {
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    serde_json::from_slice(&bytes).unwrap()
}

pub async fn body_text(response: Response<Body>) -> String {
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    String::from_utf8(bytes.to_vec()).unwrap()
}

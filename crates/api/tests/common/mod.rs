#![allow(dead_code)]

use std::net::SocketAddr;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Duration;

use axum::body::{Body, Bytes};
use axum::http::{Method, Request, StatusCode};
use axum::response::Response;
use axum::routing::post;
use axum::Router;
use http_body_util::BodyExt;
use tower::ServiceExt;

use zchedule_api::config::{LogFormat, ServerConfig};
use zchedule_api::router::build_app_router;
use zchedule_api::state::AppState;

/// Build a test `ServerConfig` pointing at `backend_url`.
///
/// Uses `http://localhost:3000` as CORS origin (matching the dev default)
/// and, like production, no request timeout.
pub fn test_config(backend_url: &str) -> ServerConfig {
    ServerConfig {
        host: "127.0.0.1".to_string(),
        port: 0,
        cors_origins: vec!["http://localhost:3000".to_string()],
        request_timeout_secs: None,
        backend_url: backend_url.to_string(),
        backend_timeout_secs: Some(5),
        log_format: LogFormat::Pretty,
    }
}

/// Build the full application router, with all middleware layers, relaying
/// to `backend_url`.
pub fn build_test_app(backend_url: &str) -> Router {
    build_app_with(test_config(backend_url))
}

/// Build the full application router from an explicit config.
pub fn build_app_with(config: ServerConfig) -> Router {
    let state = AppState::from_config(config.clone()).expect("backend client should build");
    build_app_router(state, &config)
}

// ---------------------------------------------------------------------------
// Mock backend
// ---------------------------------------------------------------------------

/// A canned backend response.
#[derive(Clone)]
pub struct Canned {
    pub status: StatusCode,
    pub content_type: &'static str,
    pub body: &'static str,
    pub delay: Option<Duration>,
}

impl Canned {
    pub fn json(status: StatusCode, body: &'static str) -> Self {
        Self {
            status,
            content_type: "application/json",
            body,
            delay: None,
        }
    }

    pub fn text(status: StatusCode, body: &'static str) -> Self {
        Self {
            status,
            content_type: "text/plain",
            body,
            delay: None,
        }
    }

    /// Answer only after `delay`, like a backend busy generating.
    pub fn delayed(mut self, delay: Duration) -> Self {
        self.delay = Some(delay);
        self
    }
}

/// A real HTTP server standing in for the schedule-generation backend.
/// Counts calls to `POST /generate` and records the last request body.
pub struct MockBackend {
    pub url: String,
    calls: Arc<AtomicUsize>,
    last_body: Arc<Mutex<Option<serde_json::Value>>>,
}

impl MockBackend {
    pub async fn start(canned: Canned) -> Self {
        let calls = Arc::new(AtomicUsize::new(0));
        let last_body = Arc::new(Mutex::new(None));

        let handler_calls = Arc::clone(&calls);
        let handler_body = Arc::clone(&last_body);
        let router = Router::new().route(
            "/generate",
            post(move |body: Bytes| {
                let calls = Arc::clone(&handler_calls);
                let last_body = Arc::clone(&handler_body);
                let canned = canned.clone();
                async move {
                    calls.fetch_add(1, Ordering::SeqCst);
                    *last_body.lock().unwrap() = serde_json::from_slice(&body).ok();
                    if let Some(delay) = canned.delay {
                        tokio::time::sleep(delay).await;
                    }
                    Response::builder()
                        .status(canned.status)
                        .header("content-type", canned.content_type)
                        .body(Body::from(canned.body))
                        .unwrap()
                }
            }),
        );

        let listener = tokio::net::TcpListener::bind(SocketAddr::from(([127, 0, 0, 1], 0)))
            .await
            .unwrap();
        let addr = listener.local_addr().unwrap();
        tokio::spawn(async move {
            axum::serve(listener, router).await.unwrap();
        });

        Self {
            url: format!("http://{addr}"),
            calls,
            last_body,
        }
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    pub fn last_body(&self) -> Option<serde_json::Value> {
        self.last_body.lock().unwrap().clone()
    }
}

/// A base URL on which nothing is listening.
pub async fn unreachable_backend_url() -> String {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    drop(listener);
    format!("http://{addr}")
}

// ---------------------------------------------------------------------------
// Request helpers
// ---------------------------------------------------------------------------

pub async fn get(app: Router, uri: &str) -> Response {
    let request = Request::builder()
        .method(Method::GET)
        .uri(uri)
        .body(Body::empty())
        .unwrap();
    app.oneshot(request).await.unwrap()
}

pub async fn post_json(app: Router, uri: &str, body: serde_json::Value) -> Response {
    post_raw(app, uri, body.to_string()).await
}

pub async fn post_raw(app: Router, uri: &str, body: impl Into<Body>) -> Response {
    let request = Request::builder()
        .method(Method::POST)
        .uri(uri)
        .header("content-type", "application/json")
        .body(body.into())
        .unwrap();
    app.oneshot(request).await.unwrap()
}

pub async fn body_bytes(response: Response) -> Bytes {
    response.into_body().collect().await.unwrap().to_bytes()
}

pub async fn body_json(response: Response) -> serde_json::Value {
    serde_json::from_slice(&body_bytes(response).await).unwrap()
}

/// Common test utilities and fixtures
use axum::{
    body::Body,
    http::{header, Method, Request, StatusCode},
    Router,
};
use explorer_discovery::{DeezerClient, LastfmClient};
use explorer_server::{create_router, state::AppState};
use explorer_storage::Backend;
use http_body_util::BodyExt;
use serde_json::Value;
use std::sync::Arc;
use std::time::Duration;
use tower::util::ServiceExt;

/// Test application over a fresh in-memory backend
///
/// Discovery clients point at `upstream`, normally a wiremock server. Tests
/// that never touch discovery routes can pass any unused URL.
pub struct TestApp {
    pub router: Router,
    pub storage: Arc<Backend>,
}

impl TestApp {
    pub fn new(upstream: &str) -> Self {
        let storage = Arc::new(Backend::memory());
        let timeout = Duration::from_secs(5);
        let lastfm = LastfmClient::new(upstream, Some("test-key".to_string()), timeout).unwrap();
        let deezer = DeezerClient::new(upstream, timeout).unwrap();

        let app_state = AppState::new(Arc::clone(&storage), Arc::new(lastfm), Arc::new(deezer));

        Self {
            router: create_router(app_state),
            storage,
        }
    }

    /// App whose discovery routes are never exercised
    pub fn offline() -> Self {
        Self::new("http://127.0.0.1:1")
    }

    /// Send a request and return status plus parsed JSON body (`Null` if empty)
    pub async fn request(
        &self,
        method: Method,
        uri: &str,
        body: Option<Value>,
    ) -> (StatusCode, Value) {
        let builder = Request::builder().method(method).uri(uri);
        let request = match body {
            Some(body) => builder
                .header(header::CONTENT_TYPE, "application/json")
                .body(Body::from(body.to_string()))
                .unwrap(),
            None => builder.body(Body::empty()).unwrap(),
        };

        let response = self.router.clone().oneshot(request).await.unwrap();
        let status = response.status();
        let bytes = response.into_body().collect().await.unwrap().to_bytes();
        let json = if bytes.is_empty() {
            Value::Null
        } else {
            serde_json::from_slice(&bytes).unwrap()
        };

        (status, json)
    }

    pub async fn get(&self, uri: &str) -> (StatusCode, Value) {
        self.request(Method::GET, uri, None).await
    }

    pub async fn post(&self, uri: &str, body: Value) -> (StatusCode, Value) {
        self.request(Method::POST, uri, Some(body)).await
    }

    pub async fn put(&self, uri: &str, body: Value) -> (StatusCode, Value) {
        self.request(Method::PUT, uri, Some(body)).await
    }

    pub async fn delete(&self, uri: &str) -> (StatusCode, Value) {
        self.request(Method::DELETE, uri, None).await
    }
}

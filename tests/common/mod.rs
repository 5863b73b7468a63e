// Each integration test file is a separate binary; helpers not used in every
// binary would otherwise trigger dead_code warnings from clippy.
#![allow(dead_code)]

use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use axum::{
    body::Body,
    http::{Method, Request, StatusCode},
    routing::get as route_get,
    Router,
};
use http_body_util::BodyExt;
use serde_json::{json, Value};
use tower::ServiceExt;

use printpress_server::{
    handlers,
    models::{CanonicalPin, Pin, RawPin},
    pinterest::{PinSource, UpstreamError},
    state::AppState,
    store::{MemoryPinStore, PinStore, StoreError},
};

/// Pin source that answers every search with the same canned result.
pub struct StubSource {
    result: Result<Value, UpstreamError>,
    limits: Arc<Mutex<Vec<u32>>>,
}

impl StubSource {
    /// `items` is a JSON array in the Pinterest `items` shape.
    pub fn items(items: Value) -> Self {
        Self {
            result: Ok(items),
            limits: Arc::default(),
        }
    }

    pub fn failing(err: UpstreamError) -> Self {
        Self {
            result: Err(err),
            limits: Arc::default(),
        }
    }

    /// Page sizes of every search made through this source, in call order.
    pub fn limits(&self) -> Arc<Mutex<Vec<u32>>> {
        self.limits.clone()
    }
}

#[async_trait]
impl PinSource for StubSource {
    async fn search(&self, _query: &str, limit: u32) -> Result<Vec<RawPin>, UpstreamError> {
        self.limits.lock().unwrap().push(limit);
        let items = self.result.clone()?;
        Ok(serde_json::from_value(items).expect("stub items must be pin-shaped"))
    }
}

/// Build the full application router over `store` and `source`.
pub fn create_test_app(store: Arc<dyn PinStore>, source: StubSource) -> Router {
    let state = AppState {
        store,
        pins: Arc::new(source),
    };
    Router::new()
        .route("/api/health", route_get(handlers::health_check))
        .route(
            "/api/pinterest/search",
            route_get(handlers::pinterest::search_pins),
        )
        .route("/api/images", route_get(handlers::images::list_images))
        .route("/api/images/:id", route_get(handlers::images::get_image))
        .with_state(state)
}

/// Store whose backend is unreachable: every call fails.
pub struct DownStore;

#[async_trait]
impl PinStore for DownStore {
    async fn upsert(&self, _pin: CanonicalPin) -> Result<Pin, StoreError> {
        Err(StoreError::Unavailable("connection refused".into()))
    }
    async fn list_all(&self) -> Result<Vec<Pin>, StoreError> {
        Err(StoreError::Unavailable("connection refused".into()))
    }
    async fn get_by_id(&self, _pin_id: &str) -> Result<Option<Pin>, StoreError> {
        Err(StoreError::Unavailable("connection refused".into()))
    }
    async fn ping(&self) -> Result<(), StoreError> {
        Err(StoreError::Unavailable("connection refused".into()))
    }
    async fn close(&self) {}
}

/// Router over a fresh in-memory store, returned alongside the store.
pub fn memory_app(source: StubSource) -> (Router, Arc<MemoryPinStore>) {
    let store = Arc::new(MemoryPinStore::new());
    (create_test_app(store.clone(), source), store)
}

/// Generate a pin id that is unique per test invocation.
pub fn unique_pin_id() -> String {
    uuid::Uuid::new_v4().simple().to_string()[..12].to_string()
}

/// A v5-shaped pin with one image.
pub fn pin_item(id: &str, title: &str) -> Value {
    json!({
        "id": id,
        "title": title,
        "media": {
            "media_type": "image",
            "images": { "1200x": { "url": format!("https://i.pinimg.com/1200x/{id}.jpg") } }
        }
    })
}

// ── Request helpers ──────────────────────────────────────────────────────────

pub async fn get(app: Router, uri: &str) -> (StatusCode, Value) {
    let req = Request::builder()
        .method(Method::GET)
        .uri(uri)
        .body(Body::empty())
        .unwrap();
    send(app, req).await
}

async fn send(app: Router, req: Request<Body>) -> (StatusCode, Value) {
    let response = app.oneshot(req).await.unwrap();
    let status = response.status();
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    let json: Value = serde_json::from_slice(&bytes).unwrap_or(Value::Null);
    (status, json)
}

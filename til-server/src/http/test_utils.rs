//! Router test helpers over in-memory storage

use std::sync::Arc;

use axum::body::{to_bytes, Body};
use axum::http::{Method, Request, StatusCode};
use axum::Router;
use serde_json::Value;
use tower::ServiceExt;

use super::server::{build_router, AppState, ServerConfig};
use crate::db::{MemoryStorage, Storage};

/// Router plus a handle on the storage behind it
pub fn app() -> (Router, Arc<MemoryStorage>) {
    let memory = Arc::new(MemoryStorage::new());
    let storage: Arc<dyn Storage> = memory.clone();
    let router = build_router(AppState::new(storage), &ServerConfig::default());
    (router, memory)
}

/// Send one request; the body comes back as JSON, `Null` when empty or not JSON.
pub async fn send(app: &Router, method: Method, uri: &str, body: Option<Value>) -> (StatusCode, Value) {
    let request = match body {
        Some(json) => Request::builder()
            .method(method)
            .uri(uri)
            .header("content-type", "application/json")
            .body(Body::from(json.to_string())),
        None => Request::builder().method(method).uri(uri).body(Body::empty()),
    }
    .unwrap();

    let response = app.clone().oneshot(request).await.unwrap();
    let status = response.status();
    let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    let value = serde_json::from_slice(&bytes).unwrap_or(Value::Null);
    (status, value)
}

/// Send a raw body with a JSON content type.
pub async fn send_raw(app: &Router, method: Method, uri: &str, body: &str) -> (StatusCode, Value) {
    let request = Request::builder()
        .method(method)
        .uri(uri)
        .header("content-type", "application/json")
        .body(Body::from(body.to_owned()))
        .unwrap();

    let response = app.clone().oneshot(request).await.unwrap();
    let status = response.status();
    let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    (status, serde_json::from_slice(&bytes).unwrap_or(Value::Null))
}

/// Fetch a plain-text endpoint.
pub async fn get_text(app: &Router, uri: &str) -> (StatusCode, String) {
    let request = Request::builder().uri(uri).body(Body::empty()).unwrap();
    let response = app.clone().oneshot(request).await.unwrap();
    let status = response.status();
    let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    (status, String::from_utf8_lossy(&bytes).into_owned())
}

/// Create a user and return its JSON.
pub async fn create_user(app: &Router, name: &str, username: &str) -> Value {
    let (status, user) = send(
        app,
        Method::POST,
        "/api/users",
        Some(serde_json::json!({"name": name, "username": username})),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    user
}

/// Create an acronym owned by `user` and return its JSON.
pub async fn create_acronym(app: &Router, short: &str, long: &str, user: &Value) -> Value {
    let (status, acronym) = send(
        app,
        Method::POST,
        "/api/acronyms",
        Some(serde_json::json!({"short": short, "long": long, "userID": user["id"]})),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    acronym
}

/// Create a category and return its JSON.
pub async fn create_category(app: &Router, name: &str) -> Value {
    let (status, category) = send(
        app,
        Method::POST,
        "/api/categories",
        Some(serde_json::json!({"name": name})),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    category
}

/// The `id` field of a created record.
pub fn id_of(record: &Value) -> &str {
    record["id"].as_str().unwrap()
}

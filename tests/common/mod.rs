//! Common test utilities

#![allow(dead_code)]

use axum::body::{Body, Bytes};
use axum::http::{Request, Response};
use axum::Router;
use form_easy::{api, AppState, EmployerInfo, StorageConfig};
use http_body_util::BodyExt;
use serde_json::Value;
use tempfile::TempDir;
use tower::util::ServiceExt;

/// Application over a fresh data directory; keep the `TempDir` alive
pub fn setup_app() -> (TempDir, AppState, Router) {
    let dir = TempDir::new().expect("Failed to create temp dir");
    let state = AppState::new(StorageConfig::under(dir.path()), EmployerInfo::default());
    let app = api::create_router().with_state(state.clone());
    (dir, state, app)
}

pub async fn send(app: &Router, request: Request<Body>) -> Response<Body> {
    app.clone().oneshot(request).await.expect("Request failed")
}

pub async fn get(app: &Router, uri: &str) -> Response<Body> {
    send(app, Request::builder().uri(uri).body(Body::empty()).unwrap()).await
}

pub async fn delete(app: &Router, uri: &str) -> Response<Body> {
    send(
        app,
        Request::builder()
            .method("DELETE")
            .uri(uri)
            .body(Body::empty())
            .unwrap(),
    )
    .await
}

pub async fn send_json(app: &Router, method: &str, uri: &str, body: Value) -> Response<Body> {
    let request = Request::builder()
        .method(method)
        .uri(uri)
        .header("content-type", "application/json")
        .body(Body::from(body.to_string()))
        .unwrap();
    send(app, request).await
}

pub async fn body_bytes(response: Response<Body>) -> Bytes {
    response
        .into_body()
        .collect()
        .await
        .expect("Failed to read body")
        .to_bytes()
}

pub async fn body_json(response: Response<Body>) -> Value {
    serde_json::from_slice(&body_bytes(response).await).expect("Body is not JSON")
}

/// Register an employee through the API
pub async fn add_employee(app: &Router, id: &str, surname: &str, name: &str) {
    let response = send_json(
        app,
        "POST",
        "/employees",
        serde_json::json!({
            "id_number": id,
            "surname": surname,
            "name": name,
            "contact": "0821234567"
        }),
    )
    .await;
    assert_eq!(response.status(), 201, "Employee {} creation failed", id);
}

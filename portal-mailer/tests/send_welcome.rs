//! HTTP tests for the welcome-mail endpoint, using the in-memory
//! backend so nothing leaves the process.

use std::sync::Arc;

use axum::body::Body;
use http::{Request, StatusCode};
use http_body_util::BodyExt;
use portal_mailer::{MemoryBackend, build_app};
use serde_json::{Value, json};
use tower::ServiceExt;

fn post_json(uri: &str, body: Value) -> Request<Body> {
    Request::builder()
        .method("POST")
        .uri(uri)
        .header("content-type", "application/json")
        .body(Body::from(body.to_string()))
        .unwrap()
}

async fn body_json(response: axum::response::Response) -> Value {
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    serde_json::from_slice(&bytes).unwrap()
}

#[tokio::test]
async fn sends_and_records_the_welcome_mail() {
    let backend = Arc::new(MemoryBackend::default());
    let app = build_app(backend.clone());

    let response = app
        .oneshot(post_json(
            "/send-welcome-email",
            json!({
                "name": "John Doe",
                "email": "john@example.com",
                "password": "initial-secret"
            }),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let body = body_json(response).await;
    assert_eq!(body["success"], true);

    let sent = backend.sent.lock().unwrap();
    assert_eq!(sent.len(), 1);
    assert_eq!(sent[0].to, "john@example.com");
    assert_eq!(sent[0].subject, "Welcome to HR Portal");
    assert!(sent[0].body.contains("Dear John Doe"));
    assert!(sent[0].body.contains("initial-secret"));
    assert!(sent[0].body.contains("change your password"));
}

#[tokio::test]
async fn missing_fields_are_rejected() {
    let backend = Arc::new(MemoryBackend::default());
    let app = build_app(backend.clone());

    let response = app
        .clone()
        .oneshot(post_json(
            "/send-welcome-email",
            json!({"name": "", "email": "john@example.com", "password": "x"}),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let body = body_json(response).await;
    assert_eq!(body["success"], false);
    assert_eq!(body["error"], "name,email,password required");

    assert!(backend.sent.lock().unwrap().is_empty());
}

#[tokio::test]
async fn delivery_failure_maps_to_500() {
    let backend = Arc::new(MemoryBackend::failing());
    let app = build_app(backend);

    let response = app
        .oneshot(post_json(
            "/send-welcome-email",
            json!({
                "name": "John Doe",
                "email": "john@example.com",
                "password": "initial-secret"
            }),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
    let body = body_json(response).await;
    assert_eq!(body["success"], false);
    assert!(body["error"].as_str().unwrap().contains("delivery failure"));
}

#[tokio::test]
async fn health_is_available() {
    let app = build_app(Arc::new(MemoryBackend::default()));
    let response = app
        .oneshot(Request::builder().uri("/health").body(Body::empty()).unwrap())
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
}

#![allow(dead_code)]

use axum::Router;
use axum::body::Body;
use axum::http::{Request, StatusCode, header};
use http_body_util::BodyExt;
use serde_json::{Value, json};
use tower::ServiceExt;
use uuid::Uuid;

use edupulse::config::cors::CorsConfig;
use edupulse::config::jwt::JwtConfig;
use edupulse::router::init_router;
use edupulse::state::AppState;
use edupulse::store::{MemoryStore, Store};

pub fn test_jwt_config() -> JwtConfig {
    JwtConfig {
        secret: "test_secret_key_for_testing_purposes".to_string(),
        issuer: "edupulse".to_string(),
        audience: "edupulse-app".to_string(),
        access_token_expiry: 3600,
    }
}

/// Router wired to a fresh in-memory store.
pub fn test_app() -> Router {
    let state = AppState {
        store: Store::Memory(MemoryStore::default()),
        jwt_config: test_jwt_config(),
        cors_config: CorsConfig {
            allowed_origins: vec!["http://localhost:3000".to_string()],
        },
    };
    init_router(state)
}

/// Send one request and return (status, parsed JSON body). Empty bodies come
/// back as `Value::Null`.
pub async fn send(
    app: &Router,
    method: &str,
    uri: &str,
    token: Option<&str>,
    body: Option<Value>,
) -> (StatusCode, Value) {
    let mut builder = Request::builder().method(method).uri(uri);
    if let Some(token) = token {
        builder = builder.header(header::AUTHORIZATION, format!("Bearer {token}"));
    }

    let request = match body {
        Some(json) => builder
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(json.to_string()))
            .unwrap(),
        None => builder.body(Body::empty()).unwrap(),
    };

    let response = app.clone().oneshot(request).await.unwrap();
    let status = response.status();
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    let value = if bytes.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&bytes).unwrap()
    };

    (status, value)
}

pub fn generate_unique_email() -> String {
    format!("test-{}@test.com", Uuid::new_v4())
}

/// Register a user and return (access token, user object).
pub async fn register(app: &Router, name: &str, role: &str, password: &str) -> (String, Value) {
    let (status, body) = send(
        app,
        "POST",
        "/api/auth/register",
        None,
        Some(json!({
            "name": name,
            "email": generate_unique_email(),
            "role": role,
            "password": password,
        })),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED, "register failed: {body}");

    (
        body["access_token"].as_str().unwrap().to_string(),
        body["user"].clone(),
    )
}

/// Create a course as the token's owner and return the course object.
pub async fn create_course(app: &Router, token: &str, title: &str) -> Value {
    let (status, body) = send(
        app,
        "POST",
        "/api/courses",
        Some(token),
        Some(json!({
            "title": title,
            "description": "A course used by the test suite",
            "price": 0.0,
        })),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED, "create course failed: {body}");
    body
}

/// Create an assessment under `course_id` and return the assessment object.
pub async fn create_assessment(app: &Router, token: &str, course_id: &str, title: &str) -> Value {
    let (status, body) = send(
        app,
        "POST",
        "/api/assessments",
        Some(token),
        Some(json!({
            "course_id": course_id,
            "title": title,
            "questions": "[{\"q\":\"What is ownership?\"}]",
            "max_score": 100,
        })),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED, "create assessment failed: {body}");
    body
}

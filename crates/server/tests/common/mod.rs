//! Shared helpers for the integration tests.
//!
//! Every test builds the full router over the in-memory store, so the whole
//! HTTP surface is exercised without Postgres or SMTP.

#![allow(dead_code)]
#![allow(clippy::unwrap_used)]

use axum::Router;
use axum::body::Body;
use axum::http::{Method, Request, StatusCode, header};
use http_body_util::BodyExt;
use secrecy::SecretString;
use serde_json::{Value, json};
use tower::ServiceExt;

use stonebridge_server::config::{ServerConfig, StoreBackend, TokenConfig};
use stonebridge_server::db::Repositories;
use stonebridge_server::{AppState, router};

pub const REGISTRATION_SECRET: &str = "integration-test-registration-secret";

pub fn test_config() -> ServerConfig {
    ServerConfig {
        database_url: None,
        store_backend: StoreBackend::Memory,
        host: "127.0.0.1".parse().unwrap(),
        port: 0,
        base_url: "http://localhost:3000".to_owned(),
        tokens: TokenConfig {
            access_secret: SecretString::from("access-secret-for-tests-0123456789abcdef"),
            refresh_secret: SecretString::from("refresh-secret-for-tests-0123456789abcdef"),
            access_ttl_minutes: 15,
            refresh_ttl_days: 7,
        },
        registration_secret: Some(SecretString::from(REGISTRATION_SECRET)),
        upload_dir: "target/test-uploads".to_owned(),
        cors_origins: Vec::new(),
        email: None,
        sentry_dsn: None,
        sentry_environment: None,
    }
}

/// Build the full application router over an empty in-memory store.
pub fn app() -> Router {
    router(AppState::new(test_config(), Repositories::memory(), None))
}

/// Send one JSON request and return `(status, parsed body)`.
pub async fn send(
    app: &Router,
    method: Method,
    path: &str,
    token: Option<&str>,
    body: Option<Value>,
) -> (StatusCode, Value) {
    let mut builder = Request::builder().method(method).uri(path);
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
    let parsed = if bytes.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&bytes).unwrap_or(Value::Null)
    };
    (status, parsed)
}

/// Register a super admin and return `(access_token, refresh_token)`.
pub async fn register_admin(app: &Router, email: &str) -> (String, String) {
    let (status, body) = send(
        app,
        Method::POST,
        "/api/auth/register",
        None,
        Some(json!({
            "name": "Test Admin",
            "email": email,
            "password": "correct-horse-battery",
            "registrationSecret": REGISTRATION_SECRET,
        })),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED, "register failed: {body}");

    let access = body["data"]["accessToken"].as_str().unwrap().to_owned();
    let refresh = body["data"]["refreshToken"].as_str().unwrap().to_owned();
    (access, refresh)
}

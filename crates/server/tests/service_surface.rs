//! Health, status, and envelope behavior of the outer router.

#![allow(clippy::unwrap_used)]

mod common;

use axum::http::{Method, StatusCode};

use common::{app, send};

#[tokio::test]
async fn health_endpoints_answer() {
    let app = app();

    let (status, _) = send(&app, Method::GET, "/health", None, None).await;
    assert_eq!(status, StatusCode::OK);

    let (status, _) = send(&app, Method::GET, "/health/ready", None, None).await;
    assert_eq!(status, StatusCode::OK);
}

#[tokio::test]
async fn status_reports_name_version_and_uptime() {
    let app = app();

    let (status, body) = send(&app, Method::GET, "/api/status", None, None).await;
    assert_eq!(status, StatusCode::OK);

    let data = &body["data"];
    assert_eq!(data["name"], "stonebridge-server");
    assert_eq!(data["version"], env!("CARGO_PKG_VERSION"));
    assert!(data["uptimeSeconds"].is_u64());
}

#[tokio::test]
async fn unmatched_routes_get_the_error_envelope() {
    let app = app();

    let (status, body) = send(&app, Method::GET, "/api/no-such-route", None, None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["status"], "error");
    assert_eq!(body["message"], "Route not found");
}

#[tokio::test]
async fn success_envelope_shape() {
    let app = app();

    let (_, body) = send(&app, Method::GET, "/api/content/services", None, None).await;
    assert_eq!(body["statusCode"], 200);
    assert!(body["message"].is_string());
    assert!(body["data"].is_array());
}

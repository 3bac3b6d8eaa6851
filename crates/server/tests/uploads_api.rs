//! Upload endpoint over the full router.

#![allow(clippy::unwrap_used)]

mod common;

use axum::body::Body;
use axum::http::{Request, StatusCode, header};
use http_body_util::BodyExt;
use serde_json::Value;
use tower::ServiceExt;

use common::{app, register_admin};

const BOUNDARY: &str = "stonebridge-test-boundary";

fn multipart_body(content_type: &str, payload: &[u8]) -> Vec<u8> {
    let mut body = Vec::new();
    body.extend_from_slice(format!("--{BOUNDARY}\r\n").as_bytes());
    body.extend_from_slice(
        format!(
            "Content-Disposition: form-data; name=\"file\"; filename=\"photo\"\r\n\
             Content-Type: {content_type}\r\n\r\n"
        )
        .as_bytes(),
    );
    body.extend_from_slice(payload);
    body.extend_from_slice(format!("\r\n--{BOUNDARY}--\r\n").as_bytes());
    body
}

async fn upload(
    app: &axum::Router,
    token: Option<&str>,
    content_type: &str,
    payload: &[u8],
) -> (StatusCode, Value) {
    let mut builder = Request::builder()
        .method("POST")
        .uri("/api/uploads")
        .header(
            header::CONTENT_TYPE,
            format!("multipart/form-data; boundary={BOUNDARY}"),
        );
    if let Some(token) = token {
        builder = builder.header(header::AUTHORIZATION, format!("Bearer {token}"));
    }
    let request = builder
        .body(Body::from(multipart_body(content_type, payload)))
        .unwrap();

    let response = app.clone().oneshot(request).await.unwrap();
    let status = response.status();
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    let parsed = serde_json::from_slice(&bytes).unwrap_or(Value::Null);
    (status, parsed)
}

#[tokio::test]
async fn upload_requires_authentication() {
    let app = app();
    let (status, _) = upload(&app, None, "image/png", b"fake png bytes").await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn accepted_image_gets_a_served_url() {
    let app = app();
    let (access, _) = register_admin(&app, "dana@example.com").await;

    let (status, body) = upload(&app, Some(&access), "image/png", b"fake png bytes").await;
    assert_eq!(status, StatusCode::CREATED);

    let url = body["data"]["url"].as_str().unwrap();
    assert!(url.starts_with("/uploads/"));
    assert!(url.ends_with(".png"));
}

#[tokio::test]
async fn uploads_between_the_default_body_limit_and_the_cap_are_accepted() {
    let app = app();
    let (access, _) = register_admin(&app, "dana@example.com").await;

    // 3 MiB: over axum's default body limit, under the 5 MiB cap.
    let payload = vec![0u8; 3 * 1024 * 1024];
    let (status, body) = upload(&app, Some(&access), "image/jpeg", &payload).await;
    assert_eq!(status, StatusCode::CREATED, "upload rejected: {body}");
    assert!(body["data"]["url"].as_str().unwrap().ends_with(".jpg"));
}

#[tokio::test]
async fn uploads_over_the_cap_are_rejected() {
    let app = app();
    let (access, _) = register_admin(&app, "dana@example.com").await;

    let payload = vec![0u8; 6 * 1024 * 1024];
    let (status, body) = upload(&app, Some(&access), "image/jpeg", &payload).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["status"], "error");
}

#[tokio::test]
async fn non_image_content_is_rejected() {
    let app = app();
    let (access, _) = register_admin(&app, "dana@example.com").await;

    let (status, body) = upload(&app, Some(&access), "application/pdf", b"%PDF-1.4").await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["status"], "error");
}

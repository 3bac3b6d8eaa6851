//! Contact form and inbox flow over the full router.

#![allow(clippy::unwrap_used)]

mod common;

use axum::http::{Method, StatusCode};
use serde_json::json;

use common::{app, register_admin, send};

#[tokio::test]
async fn public_submission_lands_in_the_inbox_as_new() {
    let app = app();
    let (access, _) = register_admin(&app, "dana@example.com").await;

    let (status, created) = send(
        &app,
        Method::POST,
        "/api/contact",
        None,
        Some(json!({
            "name": "Jane Builder",
            "email": "jane@example.com",
            "message": "Can you quote a warehouse extension?",
        })),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(created["data"]["status"], "new");

    let (status, inbox) = send(&app, Method::GET, "/api/contact", Some(&access), None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(inbox["data"]["total"], 1);
    assert_eq!(inbox["data"]["items"][0]["name"], "Jane Builder");
}

#[tokio::test]
async fn invalid_submission_reports_field_errors() {
    let app = app();

    let (status, body) = send(
        &app,
        Method::POST,
        "/api/contact",
        None,
        Some(json!({"name": "", "email": "not-an-email", "message": ""})),
    )
    .await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["status"], "error");
    assert_eq!(body["errors"].as_array().unwrap().len(), 3);
}

#[tokio::test]
async fn inbox_requires_authentication() {
    let app = app();
    let (status, _) = send(&app, Method::GET, "/api/contact", None, None).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn reply_closes_the_message() {
    let app = app();
    let (access, _) = register_admin(&app, "dana@example.com").await;

    let (_, created) = send(
        &app,
        Method::POST,
        "/api/contact",
        None,
        Some(json!({
            "name": "Jane Builder",
            "email": "jane@example.com",
            "message": "Can you quote a warehouse extension?",
        })),
    )
    .await;
    let id = created["data"]["id"].as_i64().unwrap();

    let (status, replied) = send(
        &app,
        Method::POST,
        &format!("/api/contact/{id}/reply"),
        Some(&access),
        Some(json!({"reply": "Yes - we will call you this week."})),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(replied["data"]["status"], "closed");
    assert_eq!(replied["data"]["reply"], "Yes - we will call you this week.");
    assert!(replied["data"]["repliedAt"].is_string());
}

#[tokio::test]
async fn status_filter_narrows_the_inbox() {
    let app = app();
    let (access, _) = register_admin(&app, "dana@example.com").await;

    for i in 0..2 {
        send(
            &app,
            Method::POST,
            "/api/contact",
            None,
            Some(json!({
                "name": format!("Visitor {i}"),
                "email": format!("visitor{i}@example.com"),
                "message": "Hello",
            })),
        )
        .await;
    }

    // Close the first message.
    let (_, inbox) = send(&app, Method::GET, "/api/contact", Some(&access), None).await;
    let id = inbox["data"]["items"][0]["id"].as_i64().unwrap();
    send(
        &app,
        Method::PATCH,
        &format!("/api/contact/{id}"),
        Some(&access),
        Some(json!({"status": "closed"})),
    )
    .await;

    let (status, open_only) = send(
        &app,
        Method::GET,
        "/api/contact?status=new",
        Some(&access),
        None,
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(open_only["data"]["total"], 1);
    assert_eq!(open_only["data"]["items"][0]["status"], "new");
}

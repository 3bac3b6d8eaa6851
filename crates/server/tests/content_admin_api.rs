//! Admin content CRUD over the full router.

#![allow(clippy::unwrap_used)]

mod common;

use axum::http::{Method, StatusCode};
use serde_json::json;

use common::{app, register_admin, send};

#[tokio::test]
async fn content_routes_require_authentication() {
    let app = app();

    let (status, body) = send(&app, Method::GET, "/api/admin/content/services", None, None).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
    assert_eq!(body["status"], "error");
}

#[tokio::test]
async fn service_slug_is_derived_from_the_title() {
    let app = app();
    let (access, _) = register_admin(&app, "dana@example.com").await;

    let (status, body) = send(
        &app,
        Method::POST,
        "/api/admin/content/services",
        Some(&access),
        Some(json!({"title": "Hello World!", "summary": "A service"})),
    )
    .await;

    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(body["data"]["slug"], "hello-world");
    assert_eq!(body["data"]["isActive"], true);
}

#[tokio::test]
async fn service_crud_roundtrip() {
    let app = app();
    let (access, _) = register_admin(&app, "dana@example.com").await;

    let (status, created) = send(
        &app,
        Method::POST,
        "/api/admin/content/services",
        Some(&access),
        Some(json!({"title": "Groundworks", "summary": "Excavation and foundations", "order": 5})),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);
    let id = created["data"]["id"].as_i64().unwrap();

    let (status, updated) = send(
        &app,
        Method::PATCH,
        &format!("/api/admin/content/services/{id}"),
        Some(&access),
        Some(json!({"order": 10})),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(updated["data"]["order"], 10);
    assert_eq!(updated["data"]["title"], "Groundworks");

    let (status, deleted) = send(
        &app,
        Method::DELETE,
        &format!("/api/admin/content/services/{id}"),
        Some(&access),
        None,
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(deleted["data"]["id"].as_i64(), Some(id));

    let (status, _) = send(
        &app,
        Method::PATCH,
        &format!("/api/admin/content/services/{id}"),
        Some(&access),
        Some(json!({"order": 1})),
    )
    .await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn duplicate_slugs_conflict() {
    let app = app();
    let (access, _) = register_admin(&app, "dana@example.com").await;

    let body = json!({"title": "Roofing", "summary": "Flat and pitched roofs"});
    let (status, _) = send(
        &app,
        Method::POST,
        "/api/admin/content/services",
        Some(&access),
        Some(body.clone()),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);

    let (status, conflict) = send(
        &app,
        Method::POST,
        "/api/admin/content/services",
        Some(&access),
        Some(body),
    )
    .await;
    assert_eq!(status, StatusCode::CONFLICT);
    assert_eq!(conflict["status"], "error");
}

#[tokio::test]
async fn unsluggable_title_is_rejected() {
    let app = app();
    let (access, _) = register_admin(&app, "dana@example.com").await;

    let (status, _) = send(
        &app,
        Method::POST,
        "/api/admin/content/services",
        Some(&access),
        Some(json!({"title": "!!!", "summary": "No letters here"})),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn news_create_computes_reading_time() {
    let app = app();
    let (access, _) = register_admin(&app, "dana@example.com").await;

    let words = vec!["word"; 450].join(" ");
    let (status, body) = send(
        &app,
        Method::POST,
        "/api/admin/content/news",
        Some(&access),
        Some(json!({"headline": "Site Progress Update", "body": words})),
    )
    .await;

    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(body["data"]["slug"], "site-progress-update");
    // 450 words at 200 wpm rounds up to 3 minutes.
    assert_eq!(body["data"]["readingTimeMinutes"], 3);
}

#[tokio::test]
async fn team_member_crud() {
    let app = app();
    let (access, _) = register_admin(&app, "dana@example.com").await;

    let (status, created) = send(
        &app,
        Method::POST,
        "/api/admin/content/team",
        Some(&access),
        Some(json!({"name": "Priya Shah", "title": "Head of Projects"})),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(created["data"]["slug"], "priya-shah");

    let (status, listed) = send(
        &app,
        Method::GET,
        "/api/admin/content/team",
        Some(&access),
        None,
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(listed["data"].as_array().unwrap().len(), 1);
}

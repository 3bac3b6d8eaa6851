//! Public content endpoints over the full router.

#![allow(clippy::unwrap_used)]

mod common;

use axum::http::{Method, StatusCode};
use serde_json::json;

use common::{app, register_admin, send};

#[tokio::test]
async fn empty_store_serves_fallback_content() {
    let app = app();

    let (status, body) = send(&app, Method::GET, "/api/content/services", None, None).await;
    assert_eq!(status, StatusCode::OK);

    let services = body["data"].as_array().unwrap();
    assert_eq!(services.len(), 3);
    assert_eq!(services[0]["title"], "General Contracting");
}

#[tokio::test]
async fn real_content_replaces_the_fallback() {
    let app = app();
    let (access, _) = register_admin(&app, "dana@example.com").await;

    send(
        &app,
        Method::POST,
        "/api/admin/content/services",
        Some(&access),
        Some(json!({"title": "Steel Erection", "summary": "Structural steel frames"})),
    )
    .await;

    let (status, body) = send(&app, Method::GET, "/api/content/services", None, None).await;
    assert_eq!(status, StatusCode::OK);

    let services = body["data"].as_array().unwrap();
    assert_eq!(services.len(), 1);
    assert_eq!(services[0]["title"], "Steel Erection");
}

#[tokio::test]
async fn inactive_content_is_invisible_so_fallback_returns() {
    let app = app();
    let (access, _) = register_admin(&app, "dana@example.com").await;

    send(
        &app,
        Method::POST,
        "/api/admin/content/services",
        Some(&access),
        Some(json!({
            "title": "Internal Draft",
            "summary": "Not ready yet",
            "isActive": false,
        })),
    )
    .await;

    let (_, body) = send(&app, Method::GET, "/api/content/services", None, None).await;
    let services = body["data"].as_array().unwrap();
    // The only stored service is inactive, so the fallback list shows.
    assert_eq!(services.len(), 3);
}

#[tokio::test]
async fn news_resolves_by_id_or_slug() {
    let app = app();
    let (access, _) = register_admin(&app, "dana@example.com").await;

    let (_, created) = send(
        &app,
        Method::POST,
        "/api/admin/content/news",
        Some(&access),
        Some(json!({"headline": "Topping Out at Harbor Quay", "body": "The frame is complete."})),
    )
    .await;
    let id = created["data"]["id"].as_i64().unwrap();

    let (status, by_slug) = send(
        &app,
        Method::GET,
        "/api/content/news/topping-out-at-harbor-quay",
        None,
        None,
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(by_slug["data"]["id"].as_i64(), Some(id));

    let (status, by_id) = send(
        &app,
        Method::GET,
        &format!("/api/content/news/{id}"),
        None,
        None,
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(by_id["data"]["slug"], "topping-out-at-harbor-quay");
}

#[tokio::test]
async fn unpublished_news_is_not_served() {
    let app = app();
    let (access, _) = register_admin(&app, "dana@example.com").await;

    send(
        &app,
        Method::POST,
        "/api/admin/content/news",
        Some(&access),
        Some(json!({
            "headline": "Embargoed Announcement",
            "body": "Not yet public.",
            "isPublished": false,
        })),
    )
    .await;

    let (status, _) = send(
        &app,
        Method::GET,
        "/api/content/news/embargoed-announcement",
        None,
        None,
    )
    .await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn home_services_fall_back_when_nothing_is_featured() {
    let app = app();
    let (access, _) = register_admin(&app, "dana@example.com").await;

    // Active but not featured: invisible on home, so the fallback shows.
    send(
        &app,
        Method::POST,
        "/api/admin/content/services",
        Some(&access),
        Some(json!({
            "title": "Steel Erection",
            "summary": "Structural steel frames",
            "isFeatured": false,
        })),
    )
    .await;

    let (status, body) = send(&app, Method::GET, "/api/content/home", None, None).await;
    assert_eq!(status, StatusCode::OK);

    let services = body["data"]["services"].as_array().unwrap();
    assert!(!services.is_empty());
    assert!(services.iter().all(|s| s["title"] != "Steel Erection"));
}

#[tokio::test]
async fn home_shows_the_featured_service_subset() {
    let app = app();
    let (access, _) = register_admin(&app, "dana@example.com").await;

    send(
        &app,
        Method::POST,
        "/api/admin/content/services",
        Some(&access),
        Some(json!({
            "title": "Design-Build",
            "summary": "Single-contract delivery",
            "isFeatured": true,
        })),
    )
    .await;
    send(
        &app,
        Method::POST,
        "/api/admin/content/services",
        Some(&access),
        Some(json!({"title": "Steel Erection", "summary": "Structural steel frames"})),
    )
    .await;

    let (_, body) = send(&app, Method::GET, "/api/content/home", None, None).await;
    let services = body["data"]["services"].as_array().unwrap();
    assert_eq!(services.len(), 1);
    assert_eq!(services[0]["title"], "Design-Build");
}

#[tokio::test]
async fn home_assembles_all_sections() {
    let app = app();

    let (status, body) = send(&app, Method::GET, "/api/content/home", None, None).await;
    assert_eq!(status, StatusCode::OK);

    let data = &body["data"];
    assert!(data["services"].as_array().is_some_and(|s| !s.is_empty()));
    assert!(data["projects"].as_array().is_some_and(|p| !p.is_empty()));
    assert!(data["news"].as_array().is_some_and(|n| !n.is_empty()));
    assert!(data["team"].as_array().is_some_and(|t| !t.is_empty()));
}

//! Admin account management over the full router.

#![allow(clippy::unwrap_used)]

mod common;

use axum::http::{Method, StatusCode};
use serde_json::json;

use common::{app, register_admin, send};

async fn login(app: &axum::Router, email: &str, password: &str) -> String {
    let (status, body) = send(
        app,
        Method::POST,
        "/api/auth/login",
        None,
        Some(json!({"email": email, "password": password})),
    )
    .await;
    assert_eq!(status, StatusCode::OK, "login failed: {body}");
    body["data"]["accessToken"].as_str().unwrap().to_owned()
}

#[tokio::test]
async fn super_admin_creates_accounts() {
    let app = app();
    let (access, _) = register_admin(&app, "dana@example.com").await;

    let (status, created) = send(
        &app,
        Method::POST,
        "/api/admin/users",
        Some(&access),
        Some(json!({
            "name": "Sam Editor",
            "email": "sam@example.com",
            "password": "editor-password",
        })),
    )
    .await;

    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(created["data"]["role"], "content_manager");

    // The invited admin can log in with the password that was set.
    login(&app, "sam@example.com", "editor-password").await;
}

#[tokio::test]
async fn non_super_admins_cannot_manage_accounts() {
    let app = app();
    let (access, _) = register_admin(&app, "dana@example.com").await;

    send(
        &app,
        Method::POST,
        "/api/admin/users",
        Some(&access),
        Some(json!({
            "name": "Sam Editor",
            "email": "sam@example.com",
            "password": "editor-password",
        })),
    )
    .await;
    let sam = login(&app, "sam@example.com", "editor-password").await;

    let (status, body) = send(
        &app,
        Method::POST,
        "/api/admin/users",
        Some(&sam),
        Some(json!({
            "name": "Eve",
            "email": "eve@example.com",
            "password": "eve-password-1",
        })),
    )
    .await;

    assert_eq!(status, StatusCode::FORBIDDEN);
    assert_eq!(body["message"], "Insufficient permissions");
}

#[tokio::test]
async fn duplicate_admin_email_conflicts() {
    let app = app();
    let (access, _) = register_admin(&app, "dana@example.com").await;

    let body = json!({
        "name": "Dup",
        "email": "dup@example.com",
        "password": "dup-password-1",
    });
    let (status, _) = send(&app, Method::POST, "/api/admin/users", Some(&access), Some(body.clone())).await;
    assert_eq!(status, StatusCode::CREATED);

    let (status, _) = send(&app, Method::POST, "/api/admin/users", Some(&access), Some(body)).await;
    assert_eq!(status, StatusCode::CONFLICT);
}

#[tokio::test]
async fn deactivated_accounts_lose_access_immediately() {
    let app = app();
    let (access, _) = register_admin(&app, "dana@example.com").await;

    send(
        &app,
        Method::POST,
        "/api/admin/users",
        Some(&access),
        Some(json!({
            "name": "Sam Editor",
            "email": "sam@example.com",
            "password": "editor-password",
        })),
    )
    .await;
    let sam = login(&app, "sam@example.com", "editor-password").await;

    // Find Sam's id from the listing.
    let (_, listing) = send(&app, Method::GET, "/api/admin/users", Some(&access), None).await;
    let sam_id = listing["data"]["items"]
        .as_array()
        .unwrap()
        .iter()
        .find(|a| a["email"] == "sam@example.com")
        .and_then(|a| a["id"].as_i64())
        .unwrap();

    let (status, _) = send(
        &app,
        Method::PATCH,
        &format!("/api/admin/users/{sam_id}"),
        Some(&access),
        Some(json!({"isActive": false})),
    )
    .await;
    assert_eq!(status, StatusCode::OK);

    // Sam's still-valid token no longer authenticates.
    let (status, _) = send(&app, Method::GET, "/api/auth/me", Some(&sam), None).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn dashboard_overview_counts_everything() {
    let app = app();
    let (access, _) = register_admin(&app, "dana@example.com").await;

    send(
        &app,
        Method::POST,
        "/api/contact",
        None,
        Some(json!({
            "name": "Jane",
            "email": "jane@example.com",
            "message": "Hello",
        })),
    )
    .await;
    send(
        &app,
        Method::POST,
        "/api/admin/content/services",
        Some(&access),
        Some(json!({"title": "Groundworks", "summary": "Excavation"})),
    )
    .await;

    let (status, body) = send(
        &app,
        Method::GET,
        "/api/admin/dashboard/overview",
        Some(&access),
        None,
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    let data = &body["data"];
    assert_eq!(data["contact"]["total"], 1);
    assert_eq!(data["contact"]["matching"], 1);
    assert_eq!(data["services"]["total"], 1);
    assert_eq!(data["newsTotal"], 0);
    assert_eq!(data["recentMessages"].as_array().unwrap().len(), 1);
}

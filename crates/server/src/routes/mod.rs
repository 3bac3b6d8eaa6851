//! HTTP route handlers for the Stonebridge backend.
//!
//! # Route Structure
//!
//! ```text
//! GET  /health                          - Liveness check
//! GET  /health/ready                    - Readiness check (store reachable)
//! GET  /uploads/*                       - Uploaded images (static, cached)
//!
//! # Auth
//! POST /api/auth/register               - Create the first account (secret-gated)
//! POST /api/auth/login                  - Email + password login
//! POST /api/auth/refresh                - Rotate the token pair
//! POST /api/auth/logout                 - Revoke outstanding refresh tokens
//! POST /api/auth/forgot-password        - Request a reset email
//! POST /api/auth/reset-password         - Consume a reset token
//! GET  /api/auth/me                     - Current admin profile
//!
//! # Admin content (authenticated)
//! GET|POST       /api/admin/content/services
//! PATCH|DELETE   /api/admin/content/services/{id}
//! GET|POST       /api/admin/content/projects
//! PATCH|DELETE   /api/admin/content/projects/{id}
//! GET|POST       /api/admin/content/news
//! PATCH|DELETE   /api/admin/content/news/{id}
//! GET|POST       /api/admin/content/team
//! PATCH|DELETE   /api/admin/content/team/{id}
//!
//! # Admin (authenticated)
//! GET  /api/admin/dashboard/overview    - Count fan-out + recent messages
//! GET  /api/admin/users                 - List accounts
//! POST /api/admin/users                 - Create account (super admin)
//! PATCH /api/admin/users/{id}           - Update account (super admin)
//!
//! # Contact
//! POST /api/contact                     - Public submission
//! GET  /api/contact                     - Inbox (authenticated, paginated)
//! PATCH /api/contact/{id}               - Triage update (authenticated)
//! POST /api/contact/{id}/reply          - Reply (authenticated)
//!
//! # Public content
//! GET  /api/content/home                - Home page assembly
//! GET  /api/content/services
//! GET  /api/content/news
//! GET  /api/content/news/{key}          - By numeric id or slug
//! GET  /api/content/projects
//! GET  /api/content/team
//!
//! # Misc
//! POST /api/uploads                     - Image upload (authenticated)
//! GET  /api/status                      - Name / version / uptime
//! ```

pub mod auth;
pub mod contact;
pub mod content_admin;
pub mod dashboard;
pub mod public;
pub mod uploads;
pub mod users;

use axum::extract::{DefaultBodyLimit, State};
use axum::http::{HeaderValue, Method, StatusCode, header};
use axum::routing::{get, patch, post};
use axum::Router;
use serde::Serialize;
use tower_http::cors::CorsLayer;
use tower_http::services::ServeDir;
use tower_http::set_header::SetResponseHeaderLayer;
use tower_http::trace::TraceLayer;
use tracing::instrument;

use crate::error::AppError;
use crate::response::ApiResponse;
use crate::state::AppState;

fn auth_routes() -> Router<AppState> {
    Router::new()
        .route("/register", post(auth::register))
        .route("/login", post(auth::login))
        .route("/refresh", post(auth::refresh))
        .route("/logout", post(auth::logout))
        .route("/forgot-password", post(auth::forgot_password))
        .route("/reset-password", post(auth::reset_password))
        .route("/me", get(auth::me))
}

fn admin_content_routes() -> Router<AppState> {
    Router::new()
        .route(
            "/services",
            get(content_admin::list_services).post(content_admin::create_service),
        )
        .route(
            "/services/{id}",
            patch(content_admin::update_service).delete(content_admin::delete_service),
        )
        .route(
            "/projects",
            get(content_admin::list_projects).post(content_admin::create_project),
        )
        .route(
            "/projects/{id}",
            patch(content_admin::update_project).delete(content_admin::delete_project),
        )
        .route(
            "/news",
            get(content_admin::list_news).post(content_admin::create_news),
        )
        .route(
            "/news/{id}",
            patch(content_admin::update_news).delete(content_admin::delete_news),
        )
        .route(
            "/team",
            get(content_admin::list_team).post(content_admin::create_team_member),
        )
        .route(
            "/team/{id}",
            patch(content_admin::update_team_member).delete(content_admin::delete_team_member),
        )
}

fn admin_routes() -> Router<AppState> {
    Router::new()
        .nest("/content", admin_content_routes())
        .route("/dashboard/overview", get(dashboard::overview))
        .route("/users", get(users::list).post(users::create))
        .route("/users/{id}", patch(users::update))
}

fn contact_routes() -> Router<AppState> {
    Router::new()
        .route("/", post(contact::submit).get(contact::list))
        .route("/{id}", patch(contact::update))
        .route("/{id}/reply", post(contact::reply))
}

fn public_content_routes() -> Router<AppState> {
    Router::new()
        .route("/home", get(public::home))
        .route("/services", get(public::services))
        .route("/news", get(public::news))
        .route("/news/{key}", get(public::news_item))
        .route("/projects", get(public::projects))
        .route("/team", get(public::team))
}

fn api_routes() -> Router<AppState> {
    Router::new()
        .nest("/auth", auth_routes())
        .nest("/admin", admin_routes())
        .nest("/contact", contact_routes())
        .nest("/content", public_content_routes())
        .route(
            "/uploads",
            post(uploads::upload).layer(DefaultBodyLimit::max(uploads::MAX_UPLOAD_BODY_BYTES)),
        )
        .route("/status", get(status))
}

/// Build the CORS layer from the configured origins.
///
/// An empty origin list (local development) allows any origin.
fn cors_layer(origins: &[String]) -> CorsLayer {
    let layer = CorsLayer::new()
        .allow_methods([
            Method::GET,
            Method::POST,
            Method::PATCH,
            Method::DELETE,
            Method::OPTIONS,
        ])
        .allow_headers([header::AUTHORIZATION, header::CONTENT_TYPE]);

    if origins.is_empty() {
        layer.allow_origin(tower_http::cors::Any)
    } else {
        let parsed: Vec<HeaderValue> = origins
            .iter()
            .filter_map(|origin| origin.parse().ok())
            .collect();
        layer.allow_origin(parsed)
    }
}

/// Assemble the full application router.
#[must_use]
pub fn router(state: AppState) -> Router {
    let uploads_service = ServeDir::new(&state.config().upload_dir);
    let cors = cors_layer(&state.config().cors_origins);

    Router::new()
        .route("/health", get(health))
        .route("/health/ready", get(readiness))
        .nest("/api", api_routes())
        .nest_service(
            "/uploads",
            tower::ServiceBuilder::new()
                .layer(SetResponseHeaderLayer::if_not_present(
                    header::CACHE_CONTROL,
                    HeaderValue::from_static("public, max-age=31536000, immutable"),
                ))
                .service(uploads_service),
        )
        .fallback(not_found)
        .layer(cors)
        .layer(TraceLayer::new_for_http())
        .with_state(state)
        // Sentry layers (outermost for full request coverage)
        .layer(sentry_tower::NewSentryLayer::new_from_top())
        .layer(sentry_tower::SentryHttpLayer::new().enable_transaction())
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct StatusPayload {
    name: &'static str,
    version: &'static str,
    uptime_seconds: u64,
}

/// GET /api/status
#[instrument(skip_all)]
async fn status(State(state): State<AppState>) -> ApiResponse<StatusPayload> {
    ApiResponse::ok(
        "Service status",
        StatusPayload {
            name: env!("CARGO_PKG_NAME"),
            version: env!("CARGO_PKG_VERSION"),
            uptime_seconds: state.uptime_seconds(),
        },
    )
}

/// Liveness check. Does not touch dependencies.
async fn health() -> &'static str {
    "ok"
}

/// Readiness check. Verifies the active store answers a trivial query.
async fn readiness(State(state): State<AppState>) -> StatusCode {
    match state.repos().news.count().await {
        Ok(_) => StatusCode::OK,
        Err(e) => {
            tracing::error!(error = %e, "Readiness check failed");
            StatusCode::SERVICE_UNAVAILABLE
        }
    }
}

/// Fallback for unmatched routes, kept in the JSON envelope.
async fn not_found() -> AppError {
    AppError::NotFound("Route not found".to_owned())
}

//! Admin account management handlers.
//!
//! Listing is open to any authenticated admin; creating and updating
//! accounts are super-admin only. Accounts are never hard-deleted - the
//! active toggle is the off switch.

use axum::Json;
use axum::extract::{Path, Query, State};
use serde::Deserialize;
use tracing::instrument;

use stonebridge_core::{AdminId, AdminRole, Email};

use crate::error::AppError;
use crate::middleware::{CurrentAdmin, RequireSuperAdmin};
use crate::models::{AdminProfile, AdminUpdate, NewAdmin, PageQuery, Paginated};
use crate::response::ApiResponse;
use crate::services::auth::AuthService;
use crate::state::AppState;

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateAdminRequest {
    pub name: String,
    pub email: String,
    pub password: String,
    /// Defaults to `content_manager`.
    pub role: Option<AdminRole>,
}

/// GET /api/admin/users
#[instrument(skip_all)]
pub async fn list(
    State(state): State<AppState>,
    CurrentAdmin(_): CurrentAdmin,
    Query(query): Query<PageQuery>,
) -> Result<ApiResponse<Paginated<AdminProfile>>, AppError> {
    let (page, limit, offset) = query.resolve();
    let (admins, total) = state.repos().admins.list(limit, offset).await?;
    let items = admins.iter().map(AdminProfile::from).collect();
    Ok(ApiResponse::ok(
        "Admins fetched",
        Paginated {
            items,
            total,
            page,
            limit,
        },
    ))
}

/// POST /api/admin/users
#[instrument(skip_all, fields(by = by.id.as_i32()))]
pub async fn create(
    State(state): State<AppState>,
    RequireSuperAdmin(by): RequireSuperAdmin,
    Json(body): Json<CreateAdminRequest>,
) -> Result<ApiResponse<AdminProfile>, AppError> {
    let email = Email::parse(&body.email).map_err(|e| AppError::BadRequest(e.to_string()))?;
    let password_hash = AuthService::hash_new_password(&body.password)?;

    let admin = state
        .repos()
        .admins
        .create(NewAdmin {
            name: body.name.trim().to_owned(),
            email,
            password_hash,
            role: body.role.unwrap_or(AdminRole::ContentManager),
        })
        .await?;
    Ok(ApiResponse::created(
        "Admin created",
        AdminProfile::from(&admin),
    ))
}

/// PATCH /api/admin/users/{id}
#[instrument(skip_all, fields(by = by.id.as_i32(), id))]
pub async fn update(
    State(state): State<AppState>,
    RequireSuperAdmin(by): RequireSuperAdmin,
    Path(id): Path<i32>,
    Json(body): Json<AdminUpdate>,
) -> Result<ApiResponse<AdminProfile>, AppError> {
    let admin = state
        .repos()
        .admins
        .update(AdminId::new(id), body)
        .await?
        .ok_or_else(|| AppError::NotFound("Admin not found".to_owned()))?;
    Ok(ApiResponse::ok("Admin updated", AdminProfile::from(&admin)))
}

//! Auth route handlers.
//!
//! The session payload returned by register, login and refresh is:
//!
//! ```json
//! { "accessToken": "...", "refreshToken": "...", "admin": { ... } }
//! ```

use axum::Json;
use axum::extract::State;
use serde::{Deserialize, Serialize};
use tracing::instrument;

use crate::error::AppError;
use crate::middleware::CurrentAdmin;
use crate::models::{Admin, AdminProfile};
use crate::response::ApiResponse;
use crate::services::auth::TokenPair;
use crate::state::AppState;

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RegisterRequest {
    pub name: String,
    pub email: String,
    pub password: String,
    pub registration_secret: Option<String>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LoginRequest {
    pub email: String,
    pub password: String,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RefreshRequest {
    pub refresh_token: String,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ForgotPasswordRequest {
    pub email: String,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ResetPasswordRequest {
    pub token: String,
    pub new_password: String,
}

/// Session payload returned by register, login and refresh.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SessionPayload {
    pub access_token: String,
    pub refresh_token: String,
    pub admin: AdminProfile,
}

impl SessionPayload {
    fn new(admin: &Admin, pair: TokenPair) -> Self {
        Self {
            access_token: pair.access_token,
            refresh_token: pair.refresh_token,
            admin: AdminProfile::from(admin),
        }
    }
}

/// POST /api/auth/register
#[instrument(skip_all)]
pub async fn register(
    State(state): State<AppState>,
    Json(body): Json<RegisterRequest>,
) -> Result<ApiResponse<SessionPayload>, AppError> {
    let (admin, pair) = state
        .auth()
        .register(
            &body.name,
            &body.email,
            &body.password,
            body.registration_secret.as_deref(),
        )
        .await?;
    Ok(ApiResponse::created(
        "Account created",
        SessionPayload::new(&admin, pair),
    ))
}

/// POST /api/auth/login
#[instrument(skip_all, fields(email = %body.email))]
pub async fn login(
    State(state): State<AppState>,
    Json(body): Json<LoginRequest>,
) -> Result<ApiResponse<SessionPayload>, AppError> {
    let (admin, pair) = state.auth().login(&body.email, &body.password).await?;
    Ok(ApiResponse::ok(
        "Login successful",
        SessionPayload::new(&admin, pair),
    ))
}

/// POST /api/auth/refresh
#[instrument(skip_all)]
pub async fn refresh(
    State(state): State<AppState>,
    Json(body): Json<RefreshRequest>,
) -> Result<ApiResponse<SessionPayload>, AppError> {
    let (admin, pair) = state.auth().refresh(&body.refresh_token).await?;
    Ok(ApiResponse::ok(
        "Token refreshed",
        SessionPayload::new(&admin, pair),
    ))
}

/// POST /api/auth/logout
#[instrument(skip_all)]
pub async fn logout(
    State(state): State<AppState>,
    CurrentAdmin(admin): CurrentAdmin,
) -> Result<ApiResponse<serde_json::Value>, AppError> {
    state.auth().logout(admin.id).await?;
    Ok(ApiResponse::ok("Logged out", serde_json::Value::Null))
}

/// POST /api/auth/forgot-password
///
/// Always answers the same way so the endpoint cannot be used to probe
/// which emails have accounts.
#[instrument(skip_all)]
pub async fn forgot_password(
    State(state): State<AppState>,
    Json(body): Json<ForgotPasswordRequest>,
) -> Result<ApiResponse<serde_json::Value>, AppError> {
    if let Some((admin, token)) = state.auth().forgot_password(&body.email).await? {
        if let Some(mailer) = state.mailer() {
            let mailer = mailer.clone();
            let to = admin.email.as_str().to_owned();
            let name = admin.name.clone();
            tokio::spawn(async move {
                if let Err(e) = mailer.send_password_reset(&to, &name, &token).await {
                    tracing::error!(error = %e, "Failed to send password reset email");
                }
            });
        } else {
            tracing::warn!("SMTP not configured; password reset email skipped");
        }
    }

    Ok(ApiResponse::ok(
        "If that email exists, a reset link has been sent",
        serde_json::Value::Null,
    ))
}

/// POST /api/auth/reset-password
#[instrument(skip_all)]
pub async fn reset_password(
    State(state): State<AppState>,
    Json(body): Json<ResetPasswordRequest>,
) -> Result<ApiResponse<serde_json::Value>, AppError> {
    state
        .auth()
        .reset_password(&body.token, &body.new_password)
        .await?;
    Ok(ApiResponse::ok("Password updated", serde_json::Value::Null))
}

/// GET /api/auth/me
#[instrument(skip_all)]
pub async fn me(CurrentAdmin(admin): CurrentAdmin) -> ApiResponse<AdminProfile> {
    ApiResponse::ok("Profile fetched", AdminProfile::from(&admin))
}

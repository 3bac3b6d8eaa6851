//! Authentication extractors for admin routes.
//!
//! Handlers take [`CurrentAdmin`] (any active admin) or
//! [`RequireSuperAdmin`]. Every authentication failure - missing header,
//! malformed token, expired, revoked, disabled account - rejects with the
//! same 401 message so callers learn nothing about why.

use axum::extract::FromRequestParts;
use axum::http::header;
use axum::http::request::Parts;

use stonebridge_core::AdminRole;

use crate::error::AppError;
use crate::models::Admin;
use crate::state::AppState;

/// Extractor that requires an authenticated, active admin.
///
/// The access token is read from the `Authorization: Bearer` header, falling
/// back to a `token` cookie for browser clients.
pub struct CurrentAdmin(pub Admin);

impl FromRequestParts<AppState> for CurrentAdmin {
    type Rejection = AppError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let token = bearer_token(parts)
            .or_else(|| cookie_token(parts))
            .ok_or_else(invalid_token)?;

        let admin = state
            .auth()
            .authenticate(&token)
            .await
            .map_err(|_| invalid_token())?;

        Ok(Self(admin))
    }
}

/// Extractor that additionally requires the super admin role.
pub struct RequireSuperAdmin(pub Admin);

impl FromRequestParts<AppState> for RequireSuperAdmin {
    type Rejection = AppError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let CurrentAdmin(admin) = CurrentAdmin::from_request_parts(parts, state).await?;
        authorize(&admin, &[AdminRole::SuperAdmin])?;
        Ok(Self(admin))
    }
}

/// Check that an admin holds one of the allowed roles.
///
/// # Errors
///
/// Returns `AppError::Forbidden` otherwise.
pub fn authorize(admin: &Admin, allowed: &[AdminRole]) -> Result<(), AppError> {
    if allowed.contains(&admin.role) {
        Ok(())
    } else {
        Err(AppError::Forbidden("Insufficient permissions".to_owned()))
    }
}

fn invalid_token() -> AppError {
    AppError::Unauthorized("Invalid or expired token".to_owned())
}

fn bearer_token(parts: &Parts) -> Option<String> {
    parts
        .headers
        .get(header::AUTHORIZATION)?
        .to_str()
        .ok()?
        .strip_prefix("Bearer ")
        .map(str::to_owned)
}

fn cookie_token(parts: &Parts) -> Option<String> {
    let cookies = parts.headers.get(header::COOKIE)?.to_str().ok()?;
    cookies.split(';').find_map(|pair| {
        let (name, value) = pair.trim().split_once('=')?;
        (name == "token").then(|| value.to_owned())
    })
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use chrono::Utc;
    use stonebridge_core::{AdminId, Email};

    fn admin_with_role(role: AdminRole) -> Admin {
        Admin {
            id: AdminId::new(1),
            name: "Dana Mason".to_owned(),
            email: Email::parse("dana@stonebridge.example").unwrap(),
            role,
            is_active: true,
            last_login_at: None,
            refresh_token_version: 0,
            created_at: Utc::now(),
            updated_at: Utc::now(),
        }
    }

    #[test]
    fn test_authorize_allows_listed_roles() {
        let admin = admin_with_role(AdminRole::ContentManager);
        assert!(authorize(&admin, &[AdminRole::SuperAdmin, AdminRole::ContentManager]).is_ok());
    }

    #[test]
    fn test_authorize_rejects_other_roles() {
        let admin = admin_with_role(AdminRole::CustomerCare);
        let err = authorize(&admin, &[AdminRole::SuperAdmin]).unwrap_err();
        assert!(matches!(err, AppError::Forbidden(_)));
    }
}

//! Admin account domain types.
//!
//! The password hash is carried separately from [`Admin`] wherever possible
//! and never appears in any serializable type. [`AdminProfile`] is the only
//! form that crosses the API boundary.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use stonebridge_core::{AdminId, AdminRole, Email};

/// An administrator account (domain type).
///
/// Not serializable by design - responses go through [`AdminProfile`].
#[derive(Debug, Clone)]
pub struct Admin {
    /// Unique admin ID.
    pub id: AdminId,
    /// Display name.
    pub name: String,
    /// Login email, unique across accounts.
    pub email: Email,
    /// Permission level.
    pub role: AdminRole,
    /// Inactive accounts cannot log in and their tokens stop working.
    pub is_active: bool,
    /// Last successful login, if any.
    pub last_login_at: Option<DateTime<Utc>>,
    /// Monotonic counter embedded in refresh tokens. Bumping it revokes
    /// every outstanding token for this account.
    pub refresh_token_version: i32,
    /// When the account was created.
    pub created_at: DateTime<Utc>,
    /// When the account was last updated.
    pub updated_at: DateTime<Utc>,
}

/// Public serialization of an [`Admin`].
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AdminProfile {
    pub id: AdminId,
    pub name: String,
    pub email: Email,
    pub role: AdminRole,
    pub is_active: bool,
    pub last_login_at: Option<DateTime<Utc>>,
    pub created_at: DateTime<Utc>,
}

impl From<&Admin> for AdminProfile {
    fn from(admin: &Admin) -> Self {
        Self {
            id: admin.id,
            name: admin.name.clone(),
            email: admin.email.clone(),
            role: admin.role,
            is_active: admin.is_active,
            last_login_at: admin.last_login_at,
            created_at: admin.created_at,
        }
    }
}

/// Input for creating an admin account.
///
/// The password has already been hashed by the auth service by the time
/// this reaches a repository.
#[derive(Debug, Clone)]
pub struct NewAdmin {
    pub name: String,
    pub email: Email,
    pub password_hash: String,
    pub role: AdminRole,
}

/// Partial update applied to an admin account by a super admin.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AdminUpdate {
    pub name: Option<String>,
    pub role: Option<AdminRole>,
    pub is_active: Option<bool>,
}

impl AdminUpdate {
    /// Merge this patch into an existing account.
    pub fn apply(self, admin: &mut Admin, now: DateTime<Utc>) {
        if let Some(name) = self.name {
            admin.name = name;
        }
        if let Some(role) = self.role {
            admin.role = role;
        }
        if let Some(is_active) = self.is_active {
            admin.is_active = is_active;
        }
        admin.updated_at = now;
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    fn sample_admin() -> Admin {
        Admin {
            id: AdminId::new(1),
            name: "Dana Mason".to_owned(),
            email: Email::parse("dana@stonebridge.example").unwrap(),
            role: AdminRole::ContentManager,
            is_active: true,
            last_login_at: None,
            refresh_token_version: 0,
            created_at: Utc::now(),
            updated_at: Utc::now(),
        }
    }

    #[test]
    fn test_profile_has_no_password_material() {
        let profile = AdminProfile::from(&sample_admin());
        let json = serde_json::to_value(&profile).unwrap();
        let text = json.to_string();
        assert!(!text.contains("password"));
        assert!(!text.contains("refreshTokenVersion"));
        assert!(!text.contains("resetToken"));
        assert_eq!(json["role"], "content_manager");
        assert_eq!(json["isActive"], true);
    }

    #[test]
    fn test_update_applies_only_provided_fields() {
        let mut admin = sample_admin();
        let patch = AdminUpdate {
            role: Some(AdminRole::CustomerCare),
            ..AdminUpdate::default()
        };
        patch.apply(&mut admin, Utc::now());
        assert_eq!(admin.role, AdminRole::CustomerCare);
        assert_eq!(admin.name, "Dana Mason");
        assert!(admin.is_active);
    }
}

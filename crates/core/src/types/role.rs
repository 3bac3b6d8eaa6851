//! Admin role with different permission levels.

use serde::{Deserialize, Serialize};

/// Role assigned to an admin account.
///
/// Stored as lowercase snake_case text in both storage engines so the
/// wire format and the database representation stay identical.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AdminRole {
    /// Full access including admin-account management.
    SuperAdmin,
    /// Manages site content (services, projects, news, team).
    ContentManager,
    /// Works the contact-message inbox.
    CustomerCare,
}

impl AdminRole {
    /// All roles, in descending order of privilege.
    pub const ALL: [Self; 3] = [Self::SuperAdmin, Self::ContentManager, Self::CustomerCare];

    /// The stable string form used in tokens and storage.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::SuperAdmin => "super_admin",
            Self::ContentManager => "content_manager",
            Self::CustomerCare => "customer_care",
        }
    }
}

impl std::fmt::Display for AdminRole {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for AdminRole {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "super_admin" => Ok(Self::SuperAdmin),
            "content_manager" => Ok(Self::ContentManager),
            "customer_care" => Ok(Self::CustomerCare),
            _ => Err(format!("invalid admin role: {s}")),
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_roundtrip_via_str() {
        for role in AdminRole::ALL {
            let parsed: AdminRole = role.as_str().parse().unwrap();
            assert_eq!(parsed, role);
        }
    }

    #[test]
    fn test_serde_snake_case() {
        let json = serde_json::to_string(&AdminRole::ContentManager).unwrap();
        assert_eq!(json, "\"content_manager\"");
        let parsed: AdminRole = serde_json::from_str("\"customer_care\"").unwrap();
        assert_eq!(parsed, AdminRole::CustomerCare);
    }

    #[test]
    fn test_invalid_role() {
        assert!("owner".parse::<AdminRole>().is_err());
    }
}

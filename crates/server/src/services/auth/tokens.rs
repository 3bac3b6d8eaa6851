//! JWT issuing and verification.
//!
//! Two token kinds, signed with independent secrets:
//!
//! - **access** - short-lived, sent as a bearer header on every admin call
//! - **refresh** - long-lived, exchanged at `/api/auth/refresh` for a fresh
//!   pair
//!
//! Both carry the account's `refresh_token_version` in the `ver` claim.
//! Logout and password resets bump the stored version, which invalidates
//! every token minted before the bump without any server-side token state.

use chrono::{Duration, Utc};
use jsonwebtoken::{DecodingKey, EncodingKey, Header, Validation, decode, encode};
use secrecy::ExposeSecret;
use serde::{Deserialize, Serialize};

use stonebridge_core::{AdminId, AdminRole};

use super::AuthError;
use crate::config::TokenConfig;
use crate::models::Admin;

/// Claims carried by both token kinds.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Claims {
    /// Account id.
    pub sub: i32,
    /// Role at issue time.
    pub role: AdminRole,
    /// Refresh-token version at issue time.
    pub ver: i32,
    /// Issued-at (seconds since epoch).
    pub iat: i64,
    /// Expiry (seconds since epoch).
    pub exp: i64,
}

impl Claims {
    /// The admin id this token was minted for.
    #[must_use]
    pub const fn admin_id(&self) -> AdminId {
        AdminId::new(self.sub)
    }
}

/// An access/refresh pair as returned by login and refresh.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TokenPair {
    pub access_token: String,
    pub refresh_token: String,
}

/// Signs and verifies both token kinds.
#[derive(Clone)]
pub struct TokenService {
    config: TokenConfig,
}

impl TokenService {
    #[must_use]
    pub const fn new(config: TokenConfig) -> Self {
        Self { config }
    }

    /// Issue a fresh access/refresh pair for an account.
    ///
    /// # Errors
    ///
    /// Returns `AuthError::TokenSigning` if encoding fails.
    pub fn issue_pair(&self, admin: &Admin) -> Result<TokenPair, AuthError> {
        let now = Utc::now();

        let access = self.sign(
            admin,
            now.timestamp(),
            (now + Duration::minutes(self.config.access_ttl_minutes)).timestamp(),
            self.config.access_secret.expose_secret(),
        )?;
        let refresh = self.sign(
            admin,
            now.timestamp(),
            (now + Duration::days(self.config.refresh_ttl_days)).timestamp(),
            self.config.refresh_secret.expose_secret(),
        )?;

        Ok(TokenPair {
            access_token: access,
            refresh_token: refresh,
        })
    }

    /// Verify an access token and return its claims.
    ///
    /// # Errors
    ///
    /// Returns `AuthError::InvalidToken` on any verification failure.
    pub fn verify_access(&self, token: &str) -> Result<Claims, AuthError> {
        Self::verify(token, self.config.access_secret.expose_secret())
    }

    /// Verify a refresh token and return its claims.
    ///
    /// # Errors
    ///
    /// Returns `AuthError::InvalidToken` on any verification failure.
    pub fn verify_refresh(&self, token: &str) -> Result<Claims, AuthError> {
        Self::verify(token, self.config.refresh_secret.expose_secret())
    }

    fn sign(&self, admin: &Admin, iat: i64, exp: i64, secret: &str) -> Result<String, AuthError> {
        let claims = Claims {
            sub: admin.id.as_i32(),
            role: admin.role,
            ver: admin.refresh_token_version,
            iat,
            exp,
        };
        encode(
            &Header::default(),
            &claims,
            &EncodingKey::from_secret(secret.as_bytes()),
        )
        .map_err(|_| AuthError::TokenSigning)
    }

    fn verify(token: &str, secret: &str) -> Result<Claims, AuthError> {
        decode::<Claims>(
            token,
            &DecodingKey::from_secret(secret.as_bytes()),
            &Validation::default(),
        )
        .map(|data| data.claims)
        .map_err(|_| AuthError::InvalidToken)
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use secrecy::SecretString;
    use stonebridge_core::Email;

    fn test_service() -> TokenService {
        TokenService::new(TokenConfig {
            access_secret: SecretString::from("a".repeat(48)),
            refresh_secret: SecretString::from("b".repeat(48)),
            access_ttl_minutes: 15,
            refresh_ttl_days: 7,
        })
    }

    fn sample_admin(version: i32) -> Admin {
        Admin {
            id: AdminId::new(7),
            name: "Dana Mason".to_owned(),
            email: Email::parse("dana@stonebridge.example").unwrap(),
            role: AdminRole::SuperAdmin,
            is_active: true,
            last_login_at: None,
            refresh_token_version: version,
            created_at: Utc::now(),
            updated_at: Utc::now(),
        }
    }

    #[test]
    fn test_round_trip() {
        let tokens = test_service();
        let pair = tokens.issue_pair(&sample_admin(3)).unwrap();

        let claims = tokens.verify_access(&pair.access_token).unwrap();
        assert_eq!(claims.sub, 7);
        assert_eq!(claims.ver, 3);
        assert_eq!(claims.role, AdminRole::SuperAdmin);

        let refresh_claims = tokens.verify_refresh(&pair.refresh_token).unwrap();
        assert_eq!(refresh_claims.admin_id(), AdminId::new(7));
    }

    #[test]
    fn test_secrets_are_not_interchangeable() {
        let tokens = test_service();
        let pair = tokens.issue_pair(&sample_admin(0)).unwrap();

        // An access token must not pass refresh verification, and vice versa.
        assert!(tokens.verify_refresh(&pair.access_token).is_err());
        assert!(tokens.verify_access(&pair.refresh_token).is_err());
    }

    #[test]
    fn test_garbage_token_rejected() {
        let tokens = test_service();
        assert!(matches!(
            tokens.verify_access("not-a-token"),
            Err(AuthError::InvalidToken)
        ));
    }
}

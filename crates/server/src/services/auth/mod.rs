//! Authentication service.
//!
//! Owns the whole credential lifecycle: registration, login, token refresh,
//! logout, and password reset. Route handlers stay thin; every decision about
//! who may do what with which token lives here.

mod error;
pub mod tokens;

pub use error::AuthError;
pub use tokens::{Claims, TokenPair, TokenService};

use std::sync::Arc;

use argon2::{
    Argon2,
    password_hash::{PasswordHash, PasswordHasher, PasswordVerifier, SaltString, rand_core::OsRng},
};
use chrono::{Duration, Utc};
use rand::Rng;
use rand::distr::Alphanumeric;
use secrecy::{ExposeSecret, SecretString};
use sha2::{Digest, Sha256};

use stonebridge_core::{AdminId, AdminRole, Email};

use crate::db::RepositoryError;
use crate::db::store::AdminStore;
use crate::models::{Admin, NewAdmin};

/// Minimum password length.
const MIN_PASSWORD_LENGTH: usize = 8;

/// Length of the plaintext password-reset token.
const RESET_TOKEN_LENGTH: usize = 48;

/// How long a password-reset token stays valid.
const RESET_TOKEN_TTL_HOURS: i64 = 1;

/// Authentication service.
#[derive(Clone)]
pub struct AuthService {
    admins: Arc<dyn AdminStore>,
    tokens: TokenService,
    registration_secret: Option<SecretString>,
}

impl AuthService {
    /// Create a new authentication service.
    #[must_use]
    pub fn new(
        admins: Arc<dyn AdminStore>,
        tokens: TokenService,
        registration_secret: Option<SecretString>,
    ) -> Self {
        Self {
            admins,
            tokens,
            registration_secret,
        }
    }

    /// Register a new super admin account.
    ///
    /// Registration is an installation bootstrap, gated by a shared secret.
    /// Deployments that leave `REGISTRATION_SECRET` unset have it disabled
    /// entirely.
    ///
    /// # Errors
    ///
    /// Returns `AuthError::RegistrationDisabled` when no secret is
    /// configured, `AuthError::InvalidRegistrationSecret` on a mismatch,
    /// plus the usual email/password validation failures.
    pub async fn register(
        &self,
        name: &str,
        email: &str,
        password: &str,
        provided_secret: Option<&str>,
    ) -> Result<(Admin, TokenPair), AuthError> {
        let Some(expected) = &self.registration_secret else {
            return Err(AuthError::RegistrationDisabled);
        };
        if provided_secret != Some(expected.expose_secret()) {
            return Err(AuthError::InvalidRegistrationSecret);
        }

        let email = Email::parse(email)?;
        validate_password(password)?;
        let password_hash = hash_password(password)?;

        let admin = self
            .admins
            .create(NewAdmin {
                name: name.trim().to_owned(),
                email,
                password_hash,
                role: AdminRole::SuperAdmin,
            })
            .await
            .map_err(|e| match e {
                RepositoryError::Conflict(_) => AuthError::EmailTaken,
                other => AuthError::Repository(other),
            })?;

        let pair = self.tokens.issue_pair(&admin)?;
        Ok((admin, pair))
    }

    /// Login with email and password.
    ///
    /// # Errors
    ///
    /// Returns `AuthError::InvalidCredentials` for a wrong email, a wrong
    /// password, or a deactivated account; the caller cannot tell which.
    pub async fn login(&self, email: &str, password: &str) -> Result<(Admin, TokenPair), AuthError> {
        let email = Email::parse(email).map_err(|_| AuthError::InvalidCredentials)?;

        let (admin, password_hash) = self
            .admins
            .find_auth_by_email(&email)
            .await?
            .ok_or(AuthError::InvalidCredentials)?;

        verify_password(password, &password_hash)?;

        if !admin.is_active {
            return Err(AuthError::InvalidCredentials);
        }

        self.admins.record_login(admin.id, Utc::now()).await?;
        let pair = self.tokens.issue_pair(&admin)?;
        Ok((admin, pair))
    }

    /// Exchange a refresh token for a fresh pair.
    ///
    /// # Errors
    ///
    /// Returns `AuthError::InvalidToken` when the token fails verification,
    /// was revoked (version mismatch), or the account is gone or disabled.
    pub async fn refresh(&self, refresh_token: &str) -> Result<(Admin, TokenPair), AuthError> {
        let claims = self.tokens.verify_refresh(refresh_token)?;

        let admin = self
            .admins
            .find_by_id(claims.admin_id())
            .await?
            .ok_or(AuthError::InvalidToken)?;

        if !admin.is_active || admin.refresh_token_version != claims.ver {
            return Err(AuthError::InvalidToken);
        }

        let pair = self.tokens.issue_pair(&admin)?;
        Ok((admin, pair))
    }

    /// Resolve an access token to a live account.
    ///
    /// # Errors
    ///
    /// Returns `AuthError::InvalidToken` when the token fails verification,
    /// was revoked, or the account is gone or disabled.
    pub async fn authenticate(&self, access_token: &str) -> Result<Admin, AuthError> {
        let claims = self.tokens.verify_access(access_token)?;

        let admin = self
            .admins
            .find_by_id(claims.admin_id())
            .await?
            .ok_or(AuthError::InvalidToken)?;

        if !admin.is_active || admin.refresh_token_version != claims.ver {
            return Err(AuthError::InvalidToken);
        }

        Ok(admin)
    }

    /// Revoke every outstanding token for an account.
    ///
    /// # Errors
    ///
    /// Returns `AuthError::Repository` if the version bump fails.
    pub async fn logout(&self, admin_id: AdminId) -> Result<(), AuthError> {
        self.admins.bump_token_version(admin_id).await?;
        Ok(())
    }

    /// Start a password reset.
    ///
    /// Returns the account and the plaintext token to email when the address
    /// is known, `None` otherwise. Callers respond identically in both cases
    /// so the endpoint cannot be used to probe which emails exist.
    ///
    /// # Errors
    ///
    /// Returns `AuthError::Repository` if storing the token digest fails.
    pub async fn forgot_password(&self, email: &str) -> Result<Option<(Admin, String)>, AuthError> {
        let Ok(email) = Email::parse(email) else {
            return Ok(None);
        };
        let Some(admin) = self.admins.find_by_email(&email).await? else {
            return Ok(None);
        };
        if !admin.is_active {
            return Ok(None);
        }

        let token: String = rand::rng()
            .sample_iter(Alphanumeric)
            .take(RESET_TOKEN_LENGTH)
            .map(char::from)
            .collect();

        // Only the digest is stored; a database leak does not leak usable
        // reset links.
        let expires = Utc::now() + Duration::hours(RESET_TOKEN_TTL_HOURS);
        self.admins
            .set_reset_token(admin.id, &digest(&token), expires)
            .await?;

        Ok(Some((admin, token)))
    }

    /// Complete a password reset.
    ///
    /// A successful reset also revokes every outstanding refresh token.
    ///
    /// # Errors
    ///
    /// Returns `AuthError::InvalidResetToken` for unknown or expired tokens
    /// and `AuthError::WeakPassword` when the new password is too short.
    pub async fn reset_password(&self, token: &str, new_password: &str) -> Result<(), AuthError> {
        validate_password(new_password)?;

        let admin = self
            .admins
            .find_by_reset_digest(&digest(token), Utc::now())
            .await?
            .ok_or(AuthError::InvalidResetToken)?;

        let password_hash = hash_password(new_password)?;
        self.admins.reset_password(admin.id, &password_hash).await?;
        Ok(())
    }

    /// Hash a password for account creation outside the register flow
    /// (super-admin invites, the CLI).
    ///
    /// # Errors
    ///
    /// Returns `AuthError::WeakPassword` or `AuthError::PasswordHash`.
    pub fn hash_new_password(password: &str) -> Result<String, AuthError> {
        validate_password(password)?;
        hash_password(password)
    }
}

/// Validate password meets requirements.
fn validate_password(password: &str) -> Result<(), AuthError> {
    if password.len() < MIN_PASSWORD_LENGTH {
        return Err(AuthError::WeakPassword(format!(
            "password must be at least {MIN_PASSWORD_LENGTH} characters"
        )));
    }
    Ok(())
}

/// Hash a password using Argon2id.
fn hash_password(password: &str) -> Result<String, AuthError> {
    let salt = SaltString::generate(&mut OsRng);
    let argon2 = Argon2::default();

    argon2
        .hash_password(password.as_bytes(), &salt)
        .map(|hash| hash.to_string())
        .map_err(|_| AuthError::PasswordHash)
}

/// Verify a password against a hash.
fn verify_password(password: &str, hash: &str) -> Result<(), AuthError> {
    let parsed_hash = PasswordHash::new(hash).map_err(|_| AuthError::InvalidCredentials)?;
    let argon2 = Argon2::default();

    argon2
        .verify_password(password.as_bytes(), &parsed_hash)
        .map_err(|_| AuthError::InvalidCredentials)
}

/// Hex SHA-256 of a reset token.
fn digest(token: &str) -> String {
    let mut hasher = Sha256::new();
    hasher.update(token.as_bytes());
    format!("{:x}", hasher.finalize())
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::config::TokenConfig;
    use crate::db::memory::MemoryStore;

    fn service(registration_secret: Option<&str>) -> AuthService {
        let tokens = TokenService::new(TokenConfig {
            access_secret: SecretString::from("a".repeat(48)),
            refresh_secret: SecretString::from("b".repeat(48)),
            access_ttl_minutes: 15,
            refresh_ttl_days: 7,
        });
        AuthService::new(
            MemoryStore::shared(),
            tokens,
            registration_secret.map(SecretString::from),
        )
    }

    #[tokio::test]
    async fn test_register_requires_matching_secret() {
        let auth = service(Some("bootstrap-key"));

        let err = auth
            .register("Dana", "dana@stonebridge.example", "hunter22", Some("wrong"))
            .await
            .unwrap_err();
        assert!(matches!(err, AuthError::InvalidRegistrationSecret));

        let (admin, pair) = auth
            .register("Dana", "dana@stonebridge.example", "hunter22", Some("bootstrap-key"))
            .await
            .unwrap();
        assert_eq!(admin.role, AdminRole::SuperAdmin);
        assert!(!pair.access_token.is_empty());
    }

    #[tokio::test]
    async fn test_register_disabled_without_secret() {
        let auth = service(None);
        let err = auth
            .register("Dana", "dana@stonebridge.example", "hunter22", Some("anything"))
            .await
            .unwrap_err();
        assert!(matches!(err, AuthError::RegistrationDisabled));
    }

    #[tokio::test]
    async fn test_login_failures_share_one_error() {
        let auth = service(Some("bootstrap-key"));
        auth.register("Dana", "dana@stonebridge.example", "hunter22", Some("bootstrap-key"))
            .await
            .unwrap();

        // Unknown email and wrong password are indistinguishable.
        let unknown = auth.login("nobody@stonebridge.example", "hunter22").await;
        let wrong = auth.login("dana@stonebridge.example", "wrong-pass").await;
        assert!(matches!(unknown, Err(AuthError::InvalidCredentials)));
        assert!(matches!(wrong, Err(AuthError::InvalidCredentials)));
    }

    #[tokio::test]
    async fn test_logout_invalidates_refresh() {
        let auth = service(Some("bootstrap-key"));
        auth.register("Dana", "dana@stonebridge.example", "hunter22", Some("bootstrap-key"))
            .await
            .unwrap();
        let (admin, pair) = auth.login("dana@stonebridge.example", "hunter22").await.unwrap();

        // Works before logout.
        auth.refresh(&pair.refresh_token).await.unwrap();

        auth.logout(admin.id).await.unwrap();
        let err = auth.refresh(&pair.refresh_token).await.unwrap_err();
        assert!(matches!(err, AuthError::InvalidToken));
    }

    #[tokio::test]
    async fn test_reset_flow_revokes_and_rotates() {
        let auth = service(Some("bootstrap-key"));
        auth.register("Dana", "dana@stonebridge.example", "hunter22", Some("bootstrap-key"))
            .await
            .unwrap();
        let (_, pair) = auth.login("dana@stonebridge.example", "hunter22").await.unwrap();

        let (_, token) = auth
            .forgot_password("dana@stonebridge.example")
            .await
            .unwrap()
            .unwrap();
        assert_eq!(token.len(), RESET_TOKEN_LENGTH);

        auth.reset_password(&token, "new-password-1").await.unwrap();

        // Old password and old refresh token are both dead.
        assert!(auth.login("dana@stonebridge.example", "hunter22").await.is_err());
        assert!(auth.refresh(&pair.refresh_token).await.is_err());
        auth.login("dana@stonebridge.example", "new-password-1")
            .await
            .unwrap();

        // Tokens are single-use.
        let err = auth.reset_password(&token, "another-pass").await.unwrap_err();
        assert!(matches!(err, AuthError::InvalidResetToken));
    }

    #[tokio::test]
    async fn test_forgot_password_hides_unknown_emails() {
        let auth = service(None);
        let outcome = auth.forgot_password("ghost@stonebridge.example").await.unwrap();
        assert!(outcome.is_none());
    }
}

//! Authentication error types.

use thiserror::Error;

use crate::db::RepositoryError;
use crate::error::AppError;

/// Errors that can occur during authentication operations.
#[derive(Debug, Error)]
pub enum AuthError {
    /// Invalid email format.
    #[error("invalid email: {0}")]
    InvalidEmail(#[from] stonebridge_core::EmailError),

    /// Wrong email or password. Deliberately carries no detail about which.
    #[error("Invalid email or password")]
    InvalidCredentials,

    /// Self-service registration is not configured on this deployment.
    #[error("Registration is disabled")]
    RegistrationDisabled,

    /// Registration secret did not match.
    #[error("Invalid registration secret")]
    InvalidRegistrationSecret,

    /// Email is already registered.
    #[error("An account with this email already exists")]
    EmailTaken,

    /// Password does not meet requirements.
    #[error("{0}")]
    WeakPassword(String),

    /// Token failed verification, expired, was revoked, or belongs to a
    /// disabled account. One message for all of them.
    #[error("Invalid or expired token")]
    InvalidToken,

    /// Password-reset token is unknown or expired.
    #[error("Invalid or expired reset token")]
    InvalidResetToken,

    /// Repository/database error.
    #[error("database error: {0}")]
    Repository(#[from] RepositoryError),

    /// Password hashing failed.
    #[error("password hashing failed")]
    PasswordHash,

    /// Token signing failed.
    #[error("token signing failed")]
    TokenSigning,
}

impl From<AuthError> for AppError {
    fn from(e: AuthError) -> Self {
        let message = e.to_string();
        match e {
            AuthError::InvalidEmail(_)
            | AuthError::WeakPassword(_)
            | AuthError::InvalidResetToken => Self::BadRequest(message),
            AuthError::InvalidCredentials
            | AuthError::InvalidToken
            | AuthError::InvalidRegistrationSecret => Self::Unauthorized(message),
            AuthError::RegistrationDisabled => Self::Forbidden(message),
            AuthError::EmailTaken => Self::Conflict(message),
            AuthError::Repository(inner) => Self::from(inner),
            AuthError::PasswordHash | AuthError::TokenSigning => Self::Internal(message),
        }
    }
}

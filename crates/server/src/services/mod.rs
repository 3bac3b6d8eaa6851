//! Business logic services.

pub mod auth;
pub mod email;

pub use auth::{AuthService, TokenService};
pub use email::Mailer;

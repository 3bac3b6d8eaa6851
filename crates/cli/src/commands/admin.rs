//! Admin account management command.

use stonebridge_core::{AdminRole, Email};
use stonebridge_server::db::Repositories;
use stonebridge_server::models::NewAdmin;
use stonebridge_server::services::auth::AuthService;

use super::CliError;

/// Create a new admin account.
///
/// The password is validated and hashed the same way the register endpoint
/// does it, so accounts created here log in identically.
pub async fn create(email: &str, name: &str, password: &str, role: &str) -> Result<i32, CliError> {
    let role: AdminRole = role.parse().map_err(|_| {
        CliError::InvalidArgument(format!(
            "Invalid role: {role}. Valid roles: super_admin, content_manager, customer_care"
        ))
    })?;
    let email = Email::parse(email).map_err(|e| CliError::InvalidArgument(e.to_string()))?;
    let password_hash =
        AuthService::hash_new_password(password).map_err(|e| CliError::InvalidArgument(e.to_string()))?;

    let pool = super::connect().await?;
    let repos = Repositories::postgres(pool);

    tracing::info!("Creating admin account: {} ({})", email, role);
    let admin = repos
        .admins
        .create(NewAdmin {
            name: name.trim().to_owned(),
            email,
            password_hash,
            role,
        })
        .await?;

    tracing::info!(
        "Admin account created. ID: {}, Email: {}, Role: {}",
        admin.id,
        admin.email,
        admin.role
    );

    Ok(admin.id.as_i32())
}

//! Database migration command.
//!
//! Migrations are embedded at compile time from `crates/server/migrations/`
//! and applied in order. Re-running is a no-op for already-applied files.

use super::CliError;

/// Run all pending migrations.
pub async fn run() -> Result<(), CliError> {
    let pool = super::connect().await?;

    tracing::info!("Running migrations...");
    sqlx::migrate!("../server/migrations").run(&pool).await?;

    tracing::info!("Migrations complete");
    Ok(())
}

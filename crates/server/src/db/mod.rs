//! Persistence layer.
//!
//! Controllers never see an engine directly; they talk to the narrow
//! per-entity store traits in [`store`]. Two engines satisfy those traits:
//!
//! - [`postgres`] - sqlx-backed Postgres repositories (production)
//! - [`memory`] - an in-process document store (`STORE_BACKEND=memory`,
//!   also the test substrate)
//!
//! # Migrations
//!
//! Migrations live in `crates/server/migrations/` and run via:
//! ```bash
//! cargo run -p stonebridge-cli -- migrate
//! ```

pub mod memory;
pub mod postgres;
pub mod store;

use std::sync::Arc;
use std::time::Duration;

use secrecy::ExposeSecret;
use sqlx::PgPool;
use sqlx::postgres::PgPoolOptions;

use store::{AdminStore, ContactStore, NewsStore, ProjectStore, ServiceStore, TeamStore};

/// Errors surfaced by either storage engine.
#[derive(Debug, thiserror::Error)]
pub enum RepositoryError {
    /// Underlying database failure.
    #[error("database error: {0}")]
    Database(#[from] sqlx::Error),

    /// A unique constraint (email, slug) was violated.
    #[error("conflict: {0}")]
    Conflict(String),

    /// A stored value could not be mapped back to its domain type.
    #[error("data corruption: {0}")]
    DataCorruption(String),
}

/// The full set of entity stores handed to the application state.
///
/// Cheap to clone; every store is behind an `Arc`.
#[derive(Clone)]
pub struct Repositories {
    pub admins: Arc<dyn AdminStore>,
    pub services: Arc<dyn ServiceStore>,
    pub projects: Arc<dyn ProjectStore>,
    pub news: Arc<dyn NewsStore>,
    pub team: Arc<dyn TeamStore>,
    pub contact: Arc<dyn ContactStore>,
}

impl Repositories {
    /// Build the Postgres-backed set over one shared pool.
    #[must_use]
    pub fn postgres(pool: PgPool) -> Self {
        Self {
            admins: Arc::new(postgres::PgAdminStore::new(pool.clone())),
            services: Arc::new(postgres::PgServiceStore::new(pool.clone())),
            projects: Arc::new(postgres::PgProjectStore::new(pool.clone())),
            news: Arc::new(postgres::PgNewsStore::new(pool.clone())),
            team: Arc::new(postgres::PgTeamStore::new(pool.clone())),
            contact: Arc::new(postgres::PgContactStore::new(pool)),
        }
    }

    /// Build the in-memory document set (empty tables).
    #[must_use]
    pub fn memory() -> Self {
        let store = memory::MemoryStore::shared();
        Self {
            admins: store.clone(),
            services: store.clone(),
            projects: store.clone(),
            news: store.clone(),
            team: store.clone(),
            contact: store,
        }
    }
}

/// Create a `PostgreSQL` connection pool with sensible defaults.
///
/// # Errors
///
/// Returns `sqlx::Error` if the connection cannot be established.
pub async fn create_pool(database_url: &secrecy::SecretString) -> Result<PgPool, sqlx::Error> {
    PgPoolOptions::new()
        .max_connections(10)
        .min_connections(2)
        .acquire_timeout(Duration::from_secs(10))
        .connect(database_url.expose_secret())
        .await
}

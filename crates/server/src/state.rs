//! Application state shared across handlers.

use std::sync::Arc;
use std::time::Instant;

use crate::config::ServerConfig;
use crate::db::Repositories;
use crate::services::auth::{AuthService, TokenService};
use crate::services::email::Mailer;

/// Application state shared across all handlers.
///
/// Cheap to clone; everything lives behind one `Arc`.
#[derive(Clone)]
pub struct AppState {
    inner: Arc<AppStateInner>,
}

struct AppStateInner {
    config: ServerConfig,
    repos: Repositories,
    auth: AuthService,
    mailer: Option<Mailer>,
    started_at: Instant,
}

impl AppState {
    #[must_use]
    pub fn new(config: ServerConfig, repos: Repositories, mailer: Option<Mailer>) -> Self {
        let auth = AuthService::new(
            repos.admins.clone(),
            TokenService::new(config.tokens.clone()),
            config.registration_secret.clone(),
        );
        Self {
            inner: Arc::new(AppStateInner {
                config,
                repos,
                auth,
                mailer,
                started_at: Instant::now(),
            }),
        }
    }

    #[must_use]
    pub fn config(&self) -> &ServerConfig {
        &self.inner.config
    }

    #[must_use]
    pub fn repos(&self) -> &Repositories {
        &self.inner.repos
    }

    #[must_use]
    pub fn auth(&self) -> &AuthService {
        &self.inner.auth
    }

    /// The mailer, if SMTP is configured.
    #[must_use]
    pub fn mailer(&self) -> Option<&Mailer> {
        self.inner.mailer.as_ref()
    }

    /// Seconds since the server started.
    #[must_use]
    pub fn uptime_seconds(&self) -> u64 {
        self.inner.started_at.elapsed().as_secs()
    }
}

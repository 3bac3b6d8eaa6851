//! Per-entity store traits.
//!
//! Each trait is the narrow contract from the controllers' point of view:
//! find, list, create, update, delete, plus the handful of counts the
//! dashboard needs. Both engines implement every trait, which is what lets
//! the relational and document backends swap behind one REST surface.

use async_trait::async_trait;
use chrono::{DateTime, Utc};

use stonebridge_core::{
    AdminId, ContactMessageId, ContactStatus, Email, NewsArticleId, ProjectId, ServiceId,
    TeamMemberId,
};

use super::RepositoryError;
use crate::models::{
    Admin, AdminUpdate, ContactMessage, ContactUpdate, NewAdmin, NewNewsArticle, NewProject,
    NewService, NewTeamMember, NewsArticle, NewsArticleUpdate, Project, ProjectUpdate, Service,
    ServiceUpdate, TeamMember, TeamMemberUpdate,
};

/// Validated contact submission handed to a store.
#[derive(Debug, Clone)]
pub struct NewContact {
    pub name: String,
    pub email: Email,
    pub phone: Option<String>,
    pub message: String,
}

/// `(matching-filter, total)` pair used by the dashboard counts.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CountPair {
    pub matching: u64,
    pub total: u64,
}

/// Store for admin accounts and their credential state.
#[async_trait]
pub trait AdminStore: Send + Sync {
    async fn find_by_id(&self, id: AdminId) -> Result<Option<Admin>, RepositoryError>;

    async fn find_by_email(&self, email: &Email) -> Result<Option<Admin>, RepositoryError>;

    /// Fetch an account together with its password hash (login path only).
    async fn find_auth_by_email(
        &self,
        email: &Email,
    ) -> Result<Option<(Admin, String)>, RepositoryError>;

    /// Create an account. Fails with `Conflict` on a duplicate email.
    async fn create(&self, admin: NewAdmin) -> Result<Admin, RepositoryError>;

    /// Page through accounts, newest first. Returns the page and total count.
    async fn list(&self, limit: u32, offset: u64) -> Result<(Vec<Admin>, u64), RepositoryError>;

    async fn update(
        &self,
        id: AdminId,
        patch: AdminUpdate,
    ) -> Result<Option<Admin>, RepositoryError>;

    /// Stamp `last_login_at`.
    async fn record_login(&self, id: AdminId, at: DateTime<Utc>) -> Result<(), RepositoryError>;

    /// Increment `refresh_token_version`, revoking outstanding refresh
    /// tokens. Returns the new version, or `None` for an unknown id.
    async fn bump_token_version(&self, id: AdminId) -> Result<Option<i32>, RepositoryError>;

    /// Store the one-way digest of a password-reset token plus its expiry.
    async fn set_reset_token(
        &self,
        id: AdminId,
        digest: &str,
        expires: DateTime<Utc>,
    ) -> Result<(), RepositoryError>;

    /// Find the account whose stored reset digest matches and has not
    /// expired as of `now`.
    async fn find_by_reset_digest(
        &self,
        digest: &str,
        now: DateTime<Utc>,
    ) -> Result<Option<Admin>, RepositoryError>;

    /// Set a new password hash, clear the reset fields, and bump the
    /// refresh-token version in one step.
    async fn reset_password(
        &self,
        id: AdminId,
        password_hash: &str,
    ) -> Result<(), RepositoryError>;
}

/// Store for service content.
#[async_trait]
pub trait ServiceStore: Send + Sync {
    /// All services, ordered by display order ascending then recency.
    async fn list(&self) -> Result<Vec<Service>, RepositoryError>;

    /// Active services only, same ordering.
    async fn list_active(&self) -> Result<Vec<Service>, RepositoryError>;

    async fn find(&self, id: ServiceId) -> Result<Option<Service>, RepositoryError>;

    /// Fails with `Conflict` on a duplicate slug.
    async fn create(
        &self,
        service: NewService,
        slug: String,
        created_by: AdminId,
    ) -> Result<Service, RepositoryError>;

    async fn update(
        &self,
        id: ServiceId,
        patch: ServiceUpdate,
        updated_by: AdminId,
    ) -> Result<Option<Service>, RepositoryError>;

    /// Returns the deleted record's last known state.
    async fn delete(&self, id: ServiceId) -> Result<Option<Service>, RepositoryError>;

    /// `(active, total)` counts.
    async fn counts(&self) -> Result<CountPair, RepositoryError>;
}

/// Store for portfolio projects.
#[async_trait]
pub trait ProjectStore: Send + Sync {
    async fn list(&self) -> Result<Vec<Project>, RepositoryError>;

    /// Active projects; when `featured_only`, restrict to featured ones.
    async fn list_public(&self, featured_only: bool) -> Result<Vec<Project>, RepositoryError>;

    async fn find(&self, id: ProjectId) -> Result<Option<Project>, RepositoryError>;

    async fn create(
        &self,
        project: NewProject,
        slug: String,
        created_by: AdminId,
    ) -> Result<Project, RepositoryError>;

    async fn update(
        &self,
        id: ProjectId,
        patch: ProjectUpdate,
        updated_by: AdminId,
    ) -> Result<Option<Project>, RepositoryError>;

    async fn delete(&self, id: ProjectId) -> Result<Option<Project>, RepositoryError>;

    /// `(featured, total)` counts.
    async fn counts(&self) -> Result<CountPair, RepositoryError>;
}

/// Store for news articles.
#[async_trait]
pub trait NewsStore: Send + Sync {
    /// All articles, newest publish date first.
    async fn list(&self) -> Result<Vec<NewsArticle>, RepositoryError>;

    /// Published articles, newest first, optionally limited.
    async fn list_published(
        &self,
        limit: Option<u32>,
    ) -> Result<Vec<NewsArticle>, RepositoryError>;

    async fn find(&self, id: NewsArticleId) -> Result<Option<NewsArticle>, RepositoryError>;

    /// Resolve a path segment that is either a numeric id or a slug.
    async fn find_by_id_or_slug(
        &self,
        key: &str,
    ) -> Result<Option<NewsArticle>, RepositoryError>;

    async fn create(
        &self,
        article: NewNewsArticle,
        slug: String,
        reading_time_minutes: i32,
        created_by: AdminId,
    ) -> Result<NewsArticle, RepositoryError>;

    async fn update(
        &self,
        id: NewsArticleId,
        patch: NewsArticleUpdate,
        updated_by: AdminId,
    ) -> Result<Option<NewsArticle>, RepositoryError>;

    async fn delete(&self, id: NewsArticleId) -> Result<Option<NewsArticle>, RepositoryError>;

    /// Total article count.
    async fn count(&self) -> Result<u64, RepositoryError>;
}

/// Store for team members.
#[async_trait]
pub trait TeamStore: Send + Sync {
    async fn list(&self) -> Result<Vec<TeamMember>, RepositoryError>;

    async fn list_active(&self) -> Result<Vec<TeamMember>, RepositoryError>;

    async fn find(&self, id: TeamMemberId) -> Result<Option<TeamMember>, RepositoryError>;

    async fn create(
        &self,
        member: NewTeamMember,
        slug: String,
        created_by: AdminId,
    ) -> Result<TeamMember, RepositoryError>;

    async fn update(
        &self,
        id: TeamMemberId,
        patch: TeamMemberUpdate,
        updated_by: AdminId,
    ) -> Result<Option<TeamMember>, RepositoryError>;

    async fn delete(&self, id: TeamMemberId) -> Result<Option<TeamMember>, RepositoryError>;

    /// `(active, total)` counts.
    async fn counts(&self) -> Result<CountPair, RepositoryError>;
}

/// Store for the contact-message inbox.
#[async_trait]
pub trait ContactStore: Send + Sync {
    async fn create(&self, message: NewContact) -> Result<ContactMessage, RepositoryError>;

    /// Page through messages, newest first, optionally filtered by status.
    async fn list(
        &self,
        status: Option<ContactStatus>,
        limit: u32,
        offset: u64,
    ) -> Result<(Vec<ContactMessage>, u64), RepositoryError>;

    async fn find(&self, id: ContactMessageId)
        -> Result<Option<ContactMessage>, RepositoryError>;

    async fn update(
        &self,
        id: ContactMessageId,
        patch: ContactUpdate,
    ) -> Result<Option<ContactMessage>, RepositoryError>;

    /// Stamp a reply (text, author, timestamps, resulting status).
    async fn reply(
        &self,
        id: ContactMessageId,
        reply: String,
        replied_by: AdminId,
        status: Option<ContactStatus>,
    ) -> Result<Option<ContactMessage>, RepositoryError>;

    /// The `n` most recent messages.
    async fn recent(&self, n: u32) -> Result<Vec<ContactMessage>, RepositoryError>;

    /// `(open, total)` counts, where open means not closed.
    async fn counts(&self) -> Result<CountPair, RepositoryError>;
}

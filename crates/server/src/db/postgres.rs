//! Postgres engine.
//!
//! One repository type per entity, each holding a clone of the shared pool.
//! Rows come back as plain structs (`TEXT` for enums, raw `i32` ids) and are
//! converted to domain types at the boundary; a stored value that no longer
//! parses surfaces as [`RepositoryError::DataCorruption`] instead of
//! panicking.
//!
//! Updates are fetch, apply the patch in Rust, write the full row back. That
//! keeps the patch semantics identical across both engines at the cost of a
//! second round trip, which is fine at this traffic level.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::PgPool;

use stonebridge_core::{
    AdminId, AdminRole, ContactMessageId, ContactStatus, Email, NewsArticleId, ProjectId,
    ServiceId, TeamMemberId,
};

use super::RepositoryError;
use super::store::{
    AdminStore, ContactStore, CountPair, NewContact, NewsStore, ProjectStore, ServiceStore,
    TeamStore,
};
use crate::models::{
    Admin, AdminUpdate, ContactMessage, ContactUpdate, NewAdmin, NewNewsArticle, NewProject,
    NewService, NewTeamMember, NewsArticle, NewsArticleUpdate, Project, ProjectUpdate, Service,
    ServiceUpdate, TeamMember, TeamMemberUpdate,
};

/// Map a unique-constraint violation to `Conflict`, everything else to
/// `Database`.
fn map_unique(e: sqlx::Error, what: &str) -> RepositoryError {
    if let sqlx::Error::Database(ref db_err) = e
        && db_err.is_unique_violation()
    {
        return RepositoryError::Conflict(format!("{what} already exists"));
    }
    RepositoryError::Database(e)
}

fn corrupt(column: &str, raw: &str) -> RepositoryError {
    RepositoryError::DataCorruption(format!("unreadable {column} value {raw:?}"))
}

fn parse_role(raw: &str) -> Result<AdminRole, RepositoryError> {
    raw.parse().map_err(|_| corrupt("role", raw))
}

fn parse_status(raw: &str) -> Result<ContactStatus, RepositoryError> {
    raw.parse().map_err(|_| corrupt("status", raw))
}

fn parse_email(raw: &str) -> Result<Email, RepositoryError> {
    Email::parse(raw).map_err(|_| corrupt("email", raw))
}

#[derive(sqlx::FromRow)]
struct AdminRow {
    id: i32,
    name: String,
    email: String,
    password_hash: String,
    role: String,
    is_active: bool,
    last_login_at: Option<DateTime<Utc>>,
    refresh_token_version: i32,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

impl AdminRow {
    fn into_domain(self) -> Result<(Admin, String), RepositoryError> {
        let admin = Admin {
            id: AdminId::new(self.id),
            name: self.name,
            email: parse_email(&self.email)?,
            role: parse_role(&self.role)?,
            is_active: self.is_active,
            last_login_at: self.last_login_at,
            refresh_token_version: self.refresh_token_version,
            created_at: self.created_at,
            updated_at: self.updated_at,
        };
        Ok((admin, self.password_hash))
    }
}

const ADMIN_COLUMNS: &str = "id, name, email, password_hash, role, is_active, last_login_at, \
     refresh_token_version, created_at, updated_at";

pub struct PgAdminStore {
    pool: PgPool,
}

impl PgAdminStore {
    #[must_use]
    pub const fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl AdminStore for PgAdminStore {
    async fn find_by_id(&self, id: AdminId) -> Result<Option<Admin>, RepositoryError> {
        let row = sqlx::query_as::<_, AdminRow>(&format!(
            "SELECT {ADMIN_COLUMNS} FROM admin_account WHERE id = $1"
        ))
        .bind(id.as_i32())
        .fetch_optional(&self.pool)
        .await?;
        row.map(|r| r.into_domain().map(|(admin, _)| admin)).transpose()
    }

    async fn find_by_email(&self, email: &Email) -> Result<Option<Admin>, RepositoryError> {
        Ok(self
            .find_auth_by_email(email)
            .await?
            .map(|(admin, _)| admin))
    }

    async fn find_auth_by_email(
        &self,
        email: &Email,
    ) -> Result<Option<(Admin, String)>, RepositoryError> {
        let row = sqlx::query_as::<_, AdminRow>(&format!(
            "SELECT {ADMIN_COLUMNS} FROM admin_account WHERE email = $1"
        ))
        .bind(email.as_str())
        .fetch_optional(&self.pool)
        .await?;
        row.map(AdminRow::into_domain).transpose()
    }

    async fn create(&self, admin: NewAdmin) -> Result<Admin, RepositoryError> {
        let row = sqlx::query_as::<_, AdminRow>(&format!(
            "INSERT INTO admin_account (name, email, password_hash, role) \
             VALUES ($1, $2, $3, $4) \
             RETURNING {ADMIN_COLUMNS}"
        ))
        .bind(&admin.name)
        .bind(admin.email.as_str())
        .bind(&admin.password_hash)
        .bind(admin.role.as_str())
        .fetch_one(&self.pool)
        .await
        .map_err(|e| map_unique(e, "email"))?;
        row.into_domain().map(|(created, _)| created)
    }

    async fn list(&self, limit: u32, offset: u64) -> Result<(Vec<Admin>, u64), RepositoryError> {
        let rows = sqlx::query_as::<_, AdminRow>(&format!(
            "SELECT {ADMIN_COLUMNS} FROM admin_account \
             ORDER BY created_at DESC LIMIT $1 OFFSET $2"
        ))
        .bind(i64::from(limit))
        .bind(i64::try_from(offset).unwrap_or(i64::MAX))
        .fetch_all(&self.pool)
        .await?;

        let total: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM admin_account")
            .fetch_one(&self.pool)
            .await?;

        let admins = rows
            .into_iter()
            .map(|r| r.into_domain().map(|(admin, _)| admin))
            .collect::<Result<Vec<_>, _>>()?;
        Ok((admins, total.unsigned_abs()))
    }

    async fn update(
        &self,
        id: AdminId,
        patch: AdminUpdate,
    ) -> Result<Option<Admin>, RepositoryError> {
        let Some(mut admin) = self.find_by_id(id).await? else {
            return Ok(None);
        };
        patch.apply(&mut admin, Utc::now());

        sqlx::query(
            "UPDATE admin_account \
             SET name = $2, role = $3, is_active = $4, updated_at = $5 \
             WHERE id = $1",
        )
        .bind(id.as_i32())
        .bind(&admin.name)
        .bind(admin.role.as_str())
        .bind(admin.is_active)
        .bind(admin.updated_at)
        .execute(&self.pool)
        .await?;
        Ok(Some(admin))
    }

    async fn record_login(&self, id: AdminId, at: DateTime<Utc>) -> Result<(), RepositoryError> {
        sqlx::query("UPDATE admin_account SET last_login_at = $2 WHERE id = $1")
            .bind(id.as_i32())
            .bind(at)
            .execute(&self.pool)
            .await?;
        Ok(())
    }

    async fn bump_token_version(&self, id: AdminId) -> Result<Option<i32>, RepositoryError> {
        let version: Option<i32> = sqlx::query_scalar(
            "UPDATE admin_account \
             SET refresh_token_version = refresh_token_version + 1 \
             WHERE id = $1 \
             RETURNING refresh_token_version",
        )
        .bind(id.as_i32())
        .fetch_optional(&self.pool)
        .await?;
        Ok(version)
    }

    async fn set_reset_token(
        &self,
        id: AdminId,
        digest: &str,
        expires: DateTime<Utc>,
    ) -> Result<(), RepositoryError> {
        sqlx::query(
            "UPDATE admin_account \
             SET reset_token_digest = $2, reset_token_expires = $3 \
             WHERE id = $1",
        )
        .bind(id.as_i32())
        .bind(digest)
        .bind(expires)
        .execute(&self.pool)
        .await?;
        Ok(())
    }

    async fn find_by_reset_digest(
        &self,
        digest: &str,
        now: DateTime<Utc>,
    ) -> Result<Option<Admin>, RepositoryError> {
        let row = sqlx::query_as::<_, AdminRow>(&format!(
            "SELECT {ADMIN_COLUMNS} FROM admin_account \
             WHERE reset_token_digest = $1 AND reset_token_expires > $2"
        ))
        .bind(digest)
        .bind(now)
        .fetch_optional(&self.pool)
        .await?;
        row.map(|r| r.into_domain().map(|(admin, _)| admin)).transpose()
    }

    async fn reset_password(
        &self,
        id: AdminId,
        password_hash: &str,
    ) -> Result<(), RepositoryError> {
        sqlx::query(
            "UPDATE admin_account \
             SET password_hash = $2, \
                 reset_token_digest = NULL, \
                 reset_token_expires = NULL, \
                 refresh_token_version = refresh_token_version + 1, \
                 updated_at = now() \
             WHERE id = $1",
        )
        .bind(id.as_i32())
        .bind(password_hash)
        .execute(&self.pool)
        .await?;
        Ok(())
    }
}

#[derive(sqlx::FromRow)]
struct ServiceRow {
    id: i32,
    title: String,
    slug: String,
    summary: String,
    description: Option<String>,
    icon: Option<String>,
    gallery: serde_json::Value,
    display_order: i32,
    is_active: bool,
    is_featured: bool,
    created_by: Option<i32>,
    updated_by: Option<i32>,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

impl From<ServiceRow> for Service {
    fn from(row: ServiceRow) -> Self {
        Self {
            id: ServiceId::new(row.id),
            title: row.title,
            slug: row.slug,
            summary: row.summary,
            description: row.description,
            icon: row.icon,
            gallery: row.gallery,
            order: row.display_order,
            is_active: row.is_active,
            is_featured: row.is_featured,
            created_by: row.created_by.map(AdminId::new),
            updated_by: row.updated_by.map(AdminId::new),
            created_at: row.created_at,
            updated_at: row.updated_at,
        }
    }
}

const SERVICE_COLUMNS: &str = "id, title, slug, summary, description, icon, gallery, \
     display_order, is_active, is_featured, created_by, updated_by, created_at, updated_at";

pub struct PgServiceStore {
    pool: PgPool,
}

impl PgServiceStore {
    #[must_use]
    pub const fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    async fn fetch(&self, clause: &str) -> Result<Vec<Service>, RepositoryError> {
        let rows = sqlx::query_as::<_, ServiceRow>(&format!(
            "SELECT {SERVICE_COLUMNS} FROM service {clause} \
             ORDER BY display_order ASC, created_at DESC"
        ))
        .fetch_all(&self.pool)
        .await?;
        Ok(rows.into_iter().map(Service::from).collect())
    }
}

#[async_trait]
impl ServiceStore for PgServiceStore {
    async fn list(&self) -> Result<Vec<Service>, RepositoryError> {
        self.fetch("").await
    }

    async fn list_active(&self) -> Result<Vec<Service>, RepositoryError> {
        self.fetch("WHERE is_active").await
    }

    async fn find(&self, id: ServiceId) -> Result<Option<Service>, RepositoryError> {
        let row = sqlx::query_as::<_, ServiceRow>(&format!(
            "SELECT {SERVICE_COLUMNS} FROM service WHERE id = $1"
        ))
        .bind(id.as_i32())
        .fetch_optional(&self.pool)
        .await?;
        Ok(row.map(Service::from))
    }

    async fn create(
        &self,
        service: NewService,
        slug: String,
        created_by: AdminId,
    ) -> Result<Service, RepositoryError> {
        let row = sqlx::query_as::<_, ServiceRow>(&format!(
            "INSERT INTO service \
             (title, slug, summary, description, icon, gallery, display_order, \
              is_active, is_featured, created_by, updated_by) \
             VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $10) \
             RETURNING {SERVICE_COLUMNS}"
        ))
        .bind(&service.title)
        .bind(&slug)
        .bind(&service.summary)
        .bind(&service.description)
        .bind(&service.icon)
        .bind(&service.gallery)
        .bind(service.order)
        .bind(service.is_active)
        .bind(service.is_featured)
        .bind(created_by.as_i32())
        .fetch_one(&self.pool)
        .await
        .map_err(|e| map_unique(e, "slug"))?;
        Ok(Service::from(row))
    }

    async fn update(
        &self,
        id: ServiceId,
        patch: ServiceUpdate,
        updated_by: AdminId,
    ) -> Result<Option<Service>, RepositoryError> {
        let Some(mut service) = self.find(id).await? else {
            return Ok(None);
        };
        patch.apply(&mut service, updated_by, Utc::now());

        sqlx::query(
            "UPDATE service \
             SET title = $2, slug = $3, summary = $4, description = $5, icon = $6, \
                 gallery = $7, display_order = $8, is_active = $9, is_featured = $10, \
                 updated_by = $11, updated_at = $12 \
             WHERE id = $1",
        )
        .bind(id.as_i32())
        .bind(&service.title)
        .bind(&service.slug)
        .bind(&service.summary)
        .bind(&service.description)
        .bind(&service.icon)
        .bind(&service.gallery)
        .bind(service.order)
        .bind(service.is_active)
        .bind(service.is_featured)
        .bind(updated_by.as_i32())
        .bind(service.updated_at)
        .execute(&self.pool)
        .await
        .map_err(|e| map_unique(e, "slug"))?;
        Ok(Some(service))
    }

    async fn delete(&self, id: ServiceId) -> Result<Option<Service>, RepositoryError> {
        let row = sqlx::query_as::<_, ServiceRow>(&format!(
            "DELETE FROM service WHERE id = $1 RETURNING {SERVICE_COLUMNS}"
        ))
        .bind(id.as_i32())
        .fetch_optional(&self.pool)
        .await?;
        Ok(row.map(Service::from))
    }

    async fn counts(&self) -> Result<CountPair, RepositoryError> {
        let (active, total): (i64, i64) = sqlx::query_as(
            "SELECT COUNT(*) FILTER (WHERE is_active), COUNT(*) FROM service",
        )
        .fetch_one(&self.pool)
        .await?;
        Ok(CountPair {
            matching: active.unsigned_abs(),
            total: total.unsigned_abs(),
        })
    }
}

#[derive(sqlx::FromRow)]
struct ProjectRow {
    id: i32,
    title: String,
    slug: String,
    summary: Option<String>,
    description: Option<String>,
    location: Option<String>,
    client: Option<String>,
    completed_at: Option<DateTime<Utc>>,
    gallery: serde_json::Value,
    metrics: serde_json::Value,
    display_order: i32,
    is_active: bool,
    is_featured: bool,
    created_by: Option<i32>,
    updated_by: Option<i32>,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

impl From<ProjectRow> for Project {
    fn from(row: ProjectRow) -> Self {
        Self {
            id: ProjectId::new(row.id),
            title: row.title,
            slug: row.slug,
            summary: row.summary,
            description: row.description,
            location: row.location,
            client: row.client,
            completed_at: row.completed_at,
            gallery: row.gallery,
            metrics: row.metrics,
            order: row.display_order,
            is_active: row.is_active,
            is_featured: row.is_featured,
            created_by: row.created_by.map(AdminId::new),
            updated_by: row.updated_by.map(AdminId::new),
            created_at: row.created_at,
            updated_at: row.updated_at,
        }
    }
}

const PROJECT_COLUMNS: &str = "id, title, slug, summary, description, location, client, \
     completed_at, gallery, metrics, display_order, is_active, is_featured, \
     created_by, updated_by, created_at, updated_at";

pub struct PgProjectStore {
    pool: PgPool,
}

impl PgProjectStore {
    #[must_use]
    pub const fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    async fn fetch(&self, clause: &str) -> Result<Vec<Project>, RepositoryError> {
        let rows = sqlx::query_as::<_, ProjectRow>(&format!(
            "SELECT {PROJECT_COLUMNS} FROM project {clause} \
             ORDER BY display_order ASC, created_at DESC"
        ))
        .fetch_all(&self.pool)
        .await?;
        Ok(rows.into_iter().map(Project::from).collect())
    }
}

#[async_trait]
impl ProjectStore for PgProjectStore {
    async fn list(&self) -> Result<Vec<Project>, RepositoryError> {
        self.fetch("").await
    }

    async fn list_public(&self, featured_only: bool) -> Result<Vec<Project>, RepositoryError> {
        if featured_only {
            self.fetch("WHERE is_active AND is_featured").await
        } else {
            self.fetch("WHERE is_active").await
        }
    }

    async fn find(&self, id: ProjectId) -> Result<Option<Project>, RepositoryError> {
        let row = sqlx::query_as::<_, ProjectRow>(&format!(
            "SELECT {PROJECT_COLUMNS} FROM project WHERE id = $1"
        ))
        .bind(id.as_i32())
        .fetch_optional(&self.pool)
        .await?;
        Ok(row.map(Project::from))
    }

    async fn create(
        &self,
        project: NewProject,
        slug: String,
        created_by: AdminId,
    ) -> Result<Project, RepositoryError> {
        let row = sqlx::query_as::<_, ProjectRow>(&format!(
            "INSERT INTO project \
             (title, slug, summary, description, location, client, completed_at, \
              gallery, metrics, display_order, is_active, is_featured, created_by, updated_by) \
             VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12, $13, $13) \
             RETURNING {PROJECT_COLUMNS}"
        ))
        .bind(&project.title)
        .bind(&slug)
        .bind(&project.summary)
        .bind(&project.description)
        .bind(&project.location)
        .bind(&project.client)
        .bind(project.completed_at)
        .bind(&project.gallery)
        .bind(&project.metrics)
        .bind(project.order)
        .bind(project.is_active)
        .bind(project.is_featured)
        .bind(created_by.as_i32())
        .fetch_one(&self.pool)
        .await
        .map_err(|e| map_unique(e, "slug"))?;
        Ok(Project::from(row))
    }

    async fn update(
        &self,
        id: ProjectId,
        patch: ProjectUpdate,
        updated_by: AdminId,
    ) -> Result<Option<Project>, RepositoryError> {
        let Some(mut project) = self.find(id).await? else {
            return Ok(None);
        };
        patch.apply(&mut project, updated_by, Utc::now());

        sqlx::query(
            "UPDATE project \
             SET title = $2, slug = $3, summary = $4, description = $5, location = $6, \
                 client = $7, completed_at = $8, gallery = $9, metrics = $10, \
                 display_order = $11, is_active = $12, is_featured = $13, \
                 updated_by = $14, updated_at = $15 \
             WHERE id = $1",
        )
        .bind(id.as_i32())
        .bind(&project.title)
        .bind(&project.slug)
        .bind(&project.summary)
        .bind(&project.description)
        .bind(&project.location)
        .bind(&project.client)
        .bind(project.completed_at)
        .bind(&project.gallery)
        .bind(&project.metrics)
        .bind(project.order)
        .bind(project.is_active)
        .bind(project.is_featured)
        .bind(updated_by.as_i32())
        .bind(project.updated_at)
        .execute(&self.pool)
        .await
        .map_err(|e| map_unique(e, "slug"))?;
        Ok(Some(project))
    }

    async fn delete(&self, id: ProjectId) -> Result<Option<Project>, RepositoryError> {
        let row = sqlx::query_as::<_, ProjectRow>(&format!(
            "DELETE FROM project WHERE id = $1 RETURNING {PROJECT_COLUMNS}"
        ))
        .bind(id.as_i32())
        .fetch_optional(&self.pool)
        .await?;
        Ok(row.map(Project::from))
    }

    async fn counts(&self) -> Result<CountPair, RepositoryError> {
        let (featured, total): (i64, i64) = sqlx::query_as(
            "SELECT COUNT(*) FILTER (WHERE is_featured), COUNT(*) FROM project",
        )
        .fetch_one(&self.pool)
        .await?;
        Ok(CountPair {
            matching: featured.unsigned_abs(),
            total: total.unsigned_abs(),
        })
    }
}

#[derive(sqlx::FromRow)]
struct NewsRow {
    id: i32,
    headline: String,
    slug: String,
    excerpt: Option<String>,
    body: String,
    cover_image: Option<String>,
    tags: serde_json::Value,
    reading_time_minutes: i32,
    published_at: DateTime<Utc>,
    is_published: bool,
    created_by: Option<i32>,
    updated_by: Option<i32>,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

impl From<NewsRow> for NewsArticle {
    fn from(row: NewsRow) -> Self {
        Self {
            id: NewsArticleId::new(row.id),
            headline: row.headline,
            slug: row.slug,
            excerpt: row.excerpt,
            body: row.body,
            cover_image: row.cover_image,
            tags: row.tags,
            reading_time_minutes: row.reading_time_minutes,
            published_at: row.published_at,
            is_published: row.is_published,
            created_by: row.created_by.map(AdminId::new),
            updated_by: row.updated_by.map(AdminId::new),
            created_at: row.created_at,
            updated_at: row.updated_at,
        }
    }
}

const NEWS_COLUMNS: &str = "id, headline, slug, excerpt, body, cover_image, tags, \
     reading_time_minutes, published_at, is_published, created_by, updated_by, \
     created_at, updated_at";

pub struct PgNewsStore {
    pool: PgPool,
}

impl PgNewsStore {
    #[must_use]
    pub const fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl NewsStore for PgNewsStore {
    async fn list(&self) -> Result<Vec<NewsArticle>, RepositoryError> {
        let rows = sqlx::query_as::<_, NewsRow>(&format!(
            "SELECT {NEWS_COLUMNS} FROM news_article ORDER BY published_at DESC"
        ))
        .fetch_all(&self.pool)
        .await?;
        Ok(rows.into_iter().map(NewsArticle::from).collect())
    }

    async fn list_published(
        &self,
        limit: Option<u32>,
    ) -> Result<Vec<NewsArticle>, RepositoryError> {
        let rows = sqlx::query_as::<_, NewsRow>(&format!(
            "SELECT {NEWS_COLUMNS} FROM news_article \
             WHERE is_published \
             ORDER BY published_at DESC \
             LIMIT $1"
        ))
        .bind(limit.map(i64::from))
        .fetch_all(&self.pool)
        .await?;
        Ok(rows.into_iter().map(NewsArticle::from).collect())
    }

    async fn find(&self, id: NewsArticleId) -> Result<Option<NewsArticle>, RepositoryError> {
        let row = sqlx::query_as::<_, NewsRow>(&format!(
            "SELECT {NEWS_COLUMNS} FROM news_article WHERE id = $1"
        ))
        .bind(id.as_i32())
        .fetch_optional(&self.pool)
        .await?;
        Ok(row.map(NewsArticle::from))
    }

    async fn find_by_id_or_slug(
        &self,
        key: &str,
    ) -> Result<Option<NewsArticle>, RepositoryError> {
        if let Ok(id) = key.parse::<i32>()
            && let Some(article) = self.find(NewsArticleId::new(id)).await?
        {
            return Ok(Some(article));
        }
        let row = sqlx::query_as::<_, NewsRow>(&format!(
            "SELECT {NEWS_COLUMNS} FROM news_article WHERE slug = $1"
        ))
        .bind(key)
        .fetch_optional(&self.pool)
        .await?;
        Ok(row.map(NewsArticle::from))
    }

    async fn create(
        &self,
        article: NewNewsArticle,
        slug: String,
        reading_time_minutes: i32,
        created_by: AdminId,
    ) -> Result<NewsArticle, RepositoryError> {
        let row = sqlx::query_as::<_, NewsRow>(&format!(
            "INSERT INTO news_article \
             (headline, slug, excerpt, body, cover_image, tags, reading_time_minutes, \
              published_at, is_published, created_by, updated_by) \
             VALUES ($1, $2, $3, $4, $5, $6, $7, COALESCE($8, now()), $9, $10, $10) \
             RETURNING {NEWS_COLUMNS}"
        ))
        .bind(&article.headline)
        .bind(&slug)
        .bind(&article.excerpt)
        .bind(&article.body)
        .bind(&article.cover_image)
        .bind(&article.tags)
        .bind(reading_time_minutes)
        .bind(article.published_at)
        .bind(article.is_published)
        .bind(created_by.as_i32())
        .fetch_one(&self.pool)
        .await
        .map_err(|e| map_unique(e, "slug"))?;
        Ok(NewsArticle::from(row))
    }

    async fn update(
        &self,
        id: NewsArticleId,
        patch: NewsArticleUpdate,
        updated_by: AdminId,
    ) -> Result<Option<NewsArticle>, RepositoryError> {
        let Some(mut article) = self.find(id).await? else {
            return Ok(None);
        };
        patch.apply(&mut article, updated_by, Utc::now());

        sqlx::query(
            "UPDATE news_article \
             SET headline = $2, slug = $3, excerpt = $4, body = $5, cover_image = $6, \
                 tags = $7, reading_time_minutes = $8, published_at = $9, \
                 is_published = $10, updated_by = $11, updated_at = $12 \
             WHERE id = $1",
        )
        .bind(id.as_i32())
        .bind(&article.headline)
        .bind(&article.slug)
        .bind(&article.excerpt)
        .bind(&article.body)
        .bind(&article.cover_image)
        .bind(&article.tags)
        .bind(article.reading_time_minutes)
        .bind(article.published_at)
        .bind(article.is_published)
        .bind(updated_by.as_i32())
        .bind(article.updated_at)
        .execute(&self.pool)
        .await
        .map_err(|e| map_unique(e, "slug"))?;
        Ok(Some(article))
    }

    async fn delete(&self, id: NewsArticleId) -> Result<Option<NewsArticle>, RepositoryError> {
        let row = sqlx::query_as::<_, NewsRow>(&format!(
            "DELETE FROM news_article WHERE id = $1 RETURNING {NEWS_COLUMNS}"
        ))
        .bind(id.as_i32())
        .fetch_optional(&self.pool)
        .await?;
        Ok(row.map(NewsArticle::from))
    }

    async fn count(&self) -> Result<u64, RepositoryError> {
        let total: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM news_article")
            .fetch_one(&self.pool)
            .await?;
        Ok(total.unsigned_abs())
    }
}

#[derive(sqlx::FromRow)]
struct TeamRow {
    id: i32,
    name: String,
    slug: String,
    title: String,
    bio: Option<String>,
    photo: Option<String>,
    social_links: serde_json::Value,
    display_order: i32,
    is_active: bool,
    is_featured: bool,
    created_by: Option<i32>,
    updated_by: Option<i32>,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

impl From<TeamRow> for TeamMember {
    fn from(row: TeamRow) -> Self {
        Self {
            id: TeamMemberId::new(row.id),
            name: row.name,
            slug: row.slug,
            title: row.title,
            bio: row.bio,
            photo: row.photo,
            social_links: row.social_links,
            order: row.display_order,
            is_active: row.is_active,
            is_featured: row.is_featured,
            created_by: row.created_by.map(AdminId::new),
            updated_by: row.updated_by.map(AdminId::new),
            created_at: row.created_at,
            updated_at: row.updated_at,
        }
    }
}

const TEAM_COLUMNS: &str = "id, name, slug, title, bio, photo, social_links, display_order, \
     is_active, is_featured, created_by, updated_by, created_at, updated_at";

pub struct PgTeamStore {
    pool: PgPool,
}

impl PgTeamStore {
    #[must_use]
    pub const fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    async fn fetch(&self, clause: &str) -> Result<Vec<TeamMember>, RepositoryError> {
        let rows = sqlx::query_as::<_, TeamRow>(&format!(
            "SELECT {TEAM_COLUMNS} FROM team_member {clause} \
             ORDER BY display_order ASC, created_at DESC"
        ))
        .fetch_all(&self.pool)
        .await?;
        Ok(rows.into_iter().map(TeamMember::from).collect())
    }
}

#[async_trait]
impl TeamStore for PgTeamStore {
    async fn list(&self) -> Result<Vec<TeamMember>, RepositoryError> {
        self.fetch("").await
    }

    async fn list_active(&self) -> Result<Vec<TeamMember>, RepositoryError> {
        self.fetch("WHERE is_active").await
    }

    async fn find(&self, id: TeamMemberId) -> Result<Option<TeamMember>, RepositoryError> {
        let row = sqlx::query_as::<_, TeamRow>(&format!(
            "SELECT {TEAM_COLUMNS} FROM team_member WHERE id = $1"
        ))
        .bind(id.as_i32())
        .fetch_optional(&self.pool)
        .await?;
        Ok(row.map(TeamMember::from))
    }

    async fn create(
        &self,
        member: NewTeamMember,
        slug: String,
        created_by: AdminId,
    ) -> Result<TeamMember, RepositoryError> {
        let row = sqlx::query_as::<_, TeamRow>(&format!(
            "INSERT INTO team_member \
             (name, slug, title, bio, photo, social_links, display_order, \
              is_active, is_featured, created_by, updated_by) \
             VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $10) \
             RETURNING {TEAM_COLUMNS}"
        ))
        .bind(&member.name)
        .bind(&slug)
        .bind(&member.title)
        .bind(&member.bio)
        .bind(&member.photo)
        .bind(&member.social_links)
        .bind(member.order)
        .bind(member.is_active)
        .bind(member.is_featured)
        .bind(created_by.as_i32())
        .fetch_one(&self.pool)
        .await
        .map_err(|e| map_unique(e, "slug"))?;
        Ok(TeamMember::from(row))
    }

    async fn update(
        &self,
        id: TeamMemberId,
        patch: TeamMemberUpdate,
        updated_by: AdminId,
    ) -> Result<Option<TeamMember>, RepositoryError> {
        let Some(mut member) = self.find(id).await? else {
            return Ok(None);
        };
        patch.apply(&mut member, updated_by, Utc::now());

        sqlx::query(
            "UPDATE team_member \
             SET name = $2, slug = $3, title = $4, bio = $5, photo = $6, \
                 social_links = $7, display_order = $8, is_active = $9, \
                 is_featured = $10, updated_by = $11, updated_at = $12 \
             WHERE id = $1",
        )
        .bind(id.as_i32())
        .bind(&member.name)
        .bind(&member.slug)
        .bind(&member.title)
        .bind(&member.bio)
        .bind(&member.photo)
        .bind(&member.social_links)
        .bind(member.order)
        .bind(member.is_active)
        .bind(member.is_featured)
        .bind(updated_by.as_i32())
        .bind(member.updated_at)
        .execute(&self.pool)
        .await
        .map_err(|e| map_unique(e, "slug"))?;
        Ok(Some(member))
    }

    async fn delete(&self, id: TeamMemberId) -> Result<Option<TeamMember>, RepositoryError> {
        let row = sqlx::query_as::<_, TeamRow>(&format!(
            "DELETE FROM team_member WHERE id = $1 RETURNING {TEAM_COLUMNS}"
        ))
        .bind(id.as_i32())
        .fetch_optional(&self.pool)
        .await?;
        Ok(row.map(TeamMember::from))
    }

    async fn counts(&self) -> Result<CountPair, RepositoryError> {
        let (active, total): (i64, i64) = sqlx::query_as(
            "SELECT COUNT(*) FILTER (WHERE is_active), COUNT(*) FROM team_member",
        )
        .fetch_one(&self.pool)
        .await?;
        Ok(CountPair {
            matching: active.unsigned_abs(),
            total: total.unsigned_abs(),
        })
    }
}

#[derive(sqlx::FromRow)]
struct ContactRow {
    id: i32,
    name: String,
    email: String,
    phone: Option<String>,
    message: String,
    status: String,
    reply: Option<String>,
    replied_at: Option<DateTime<Utc>>,
    replied_by: Option<i32>,
    responded_at: Option<DateTime<Utc>>,
    notes: Option<String>,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

impl ContactRow {
    fn into_domain(self) -> Result<ContactMessage, RepositoryError> {
        Ok(ContactMessage {
            id: ContactMessageId::new(self.id),
            name: self.name,
            email: parse_email(&self.email)?,
            phone: self.phone,
            message: self.message,
            status: parse_status(&self.status)?,
            reply: self.reply,
            replied_at: self.replied_at,
            replied_by: self.replied_by.map(AdminId::new),
            responded_at: self.responded_at,
            notes: self.notes,
            created_at: self.created_at,
            updated_at: self.updated_at,
        })
    }
}

const CONTACT_COLUMNS: &str = "id, name, email, phone, message, status, reply, replied_at, \
     replied_by, responded_at, notes, created_at, updated_at";

pub struct PgContactStore {
    pool: PgPool,
}

impl PgContactStore {
    #[must_use]
    pub const fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl ContactStore for PgContactStore {
    async fn create(&self, message: NewContact) -> Result<ContactMessage, RepositoryError> {
        let row = sqlx::query_as::<_, ContactRow>(&format!(
            "INSERT INTO contact_message (name, email, phone, message) \
             VALUES ($1, $2, $3, $4) \
             RETURNING {CONTACT_COLUMNS}"
        ))
        .bind(&message.name)
        .bind(message.email.as_str())
        .bind(&message.phone)
        .bind(&message.message)
        .fetch_one(&self.pool)
        .await?;
        row.into_domain()
    }

    async fn list(
        &self,
        status: Option<ContactStatus>,
        limit: u32,
        offset: u64,
    ) -> Result<(Vec<ContactMessage>, u64), RepositoryError> {
        let status = status.map(|s| s.as_str().to_owned());

        let rows = sqlx::query_as::<_, ContactRow>(&format!(
            "SELECT {CONTACT_COLUMNS} FROM contact_message \
             WHERE $1::text IS NULL OR status = $1 \
             ORDER BY created_at DESC LIMIT $2 OFFSET $3"
        ))
        .bind(&status)
        .bind(i64::from(limit))
        .bind(i64::try_from(offset).unwrap_or(i64::MAX))
        .fetch_all(&self.pool)
        .await?;

        let total: i64 = sqlx::query_scalar(
            "SELECT COUNT(*) FROM contact_message WHERE $1::text IS NULL OR status = $1",
        )
        .bind(&status)
        .fetch_one(&self.pool)
        .await?;

        let messages = rows
            .into_iter()
            .map(ContactRow::into_domain)
            .collect::<Result<Vec<_>, _>>()?;
        Ok((messages, total.unsigned_abs()))
    }

    async fn find(
        &self,
        id: ContactMessageId,
    ) -> Result<Option<ContactMessage>, RepositoryError> {
        let row = sqlx::query_as::<_, ContactRow>(&format!(
            "SELECT {CONTACT_COLUMNS} FROM contact_message WHERE id = $1"
        ))
        .bind(id.as_i32())
        .fetch_optional(&self.pool)
        .await?;
        row.map(ContactRow::into_domain).transpose()
    }

    async fn update(
        &self,
        id: ContactMessageId,
        patch: ContactUpdate,
    ) -> Result<Option<ContactMessage>, RepositoryError> {
        let Some(mut message) = self.find(id).await? else {
            return Ok(None);
        };
        patch.apply(&mut message, Utc::now());
        self.write_back(&message).await?;
        Ok(Some(message))
    }

    async fn reply(
        &self,
        id: ContactMessageId,
        reply: String,
        replied_by: AdminId,
        status: Option<ContactStatus>,
    ) -> Result<Option<ContactMessage>, RepositoryError> {
        let Some(mut message) = self.find(id).await? else {
            return Ok(None);
        };
        message.record_reply(reply, replied_by, status, Utc::now());
        self.write_back(&message).await?;
        Ok(Some(message))
    }

    async fn recent(&self, n: u32) -> Result<Vec<ContactMessage>, RepositoryError> {
        let (messages, _) = self.list(None, n, 0).await?;
        Ok(messages)
    }

    async fn counts(&self) -> Result<CountPair, RepositoryError> {
        let (open, total): (i64, i64) = sqlx::query_as(
            "SELECT COUNT(*) FILTER (WHERE status <> 'closed'), COUNT(*) FROM contact_message",
        )
        .fetch_one(&self.pool)
        .await?;
        Ok(CountPair {
            matching: open.unsigned_abs(),
            total: total.unsigned_abs(),
        })
    }
}

impl PgContactStore {
    async fn write_back(&self, message: &ContactMessage) -> Result<(), RepositoryError> {
        sqlx::query(
            "UPDATE contact_message \
             SET status = $2, reply = $3, replied_at = $4, replied_by = $5, \
                 responded_at = $6, notes = $7, updated_at = $8 \
             WHERE id = $1",
        )
        .bind(message.id.as_i32())
        .bind(message.status.as_str())
        .bind(&message.reply)
        .bind(message.replied_at)
        .bind(message.replied_by.map(|id| id.as_i32()))
        .bind(message.responded_at)
        .bind(&message.notes)
        .bind(message.updated_at)
        .execute(&self.pool)
        .await?;
        Ok(())
    }
}

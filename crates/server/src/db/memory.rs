//! In-memory document engine.
//!
//! The second storage backend behind the store traits: plain document
//! tables guarded by an async `RwLock`. Selected with `STORE_BACKEND=memory`
//! for demo deployments, and used as the test substrate since it needs no
//! external services. Data does not survive a restart.

use std::collections::BTreeMap;
use std::sync::Arc;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use tokio::sync::RwLock;

use stonebridge_core::{
    AdminId, ContactMessageId, ContactStatus, Email, NewsArticleId, ProjectId, ServiceId,
    TeamMemberId,
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

/// An admin document: the public record plus credential state that never
/// leaves the store unscoped.
#[derive(Debug, Clone)]
struct AdminDoc {
    admin: Admin,
    password_hash: String,
    reset_digest: Option<String>,
    reset_expires: Option<DateTime<Utc>>,
}

#[derive(Debug, Default)]
struct Tables {
    admins: BTreeMap<i32, AdminDoc>,
    services: BTreeMap<i32, Service>,
    projects: BTreeMap<i32, Project>,
    news: BTreeMap<i32, NewsArticle>,
    team: BTreeMap<i32, TeamMember>,
    contact: BTreeMap<i32, ContactMessage>,
    next_id: i32,
}

impl Tables {
    fn allocate_id(&mut self) -> i32 {
        self.next_id += 1;
        self.next_id
    }
}

/// One lock over all tables. Contention is irrelevant at the scale this
/// engine is meant for.
pub struct MemoryStore {
    tables: RwLock<Tables>,
}

impl MemoryStore {
    /// Create an empty store behind an `Arc` so one instance can serve as
    /// every entity store.
    #[must_use]
    pub fn shared() -> Arc<Self> {
        Arc::new(Self {
            tables: RwLock::new(Tables::default()),
        })
    }
}

/// Display-order ascending, then newest created first.
fn order_then_recency<T>(items: &mut [T], order: impl Fn(&T) -> i32, created: impl Fn(&T) -> DateTime<Utc>) {
    items.sort_by(|a, b| {
        order(a)
            .cmp(&order(b))
            .then_with(|| created(b).cmp(&created(a)))
    });
}

#[async_trait]
impl AdminStore for MemoryStore {
    async fn find_by_id(&self, id: AdminId) -> Result<Option<Admin>, RepositoryError> {
        let tables = self.tables.read().await;
        Ok(tables.admins.get(&id.as_i32()).map(|doc| doc.admin.clone()))
    }

    async fn find_by_email(&self, email: &Email) -> Result<Option<Admin>, RepositoryError> {
        let tables = self.tables.read().await;
        Ok(tables
            .admins
            .values()
            .find(|doc| &doc.admin.email == email)
            .map(|doc| doc.admin.clone()))
    }

    async fn find_auth_by_email(
        &self,
        email: &Email,
    ) -> Result<Option<(Admin, String)>, RepositoryError> {
        let tables = self.tables.read().await;
        Ok(tables
            .admins
            .values()
            .find(|doc| &doc.admin.email == email)
            .map(|doc| (doc.admin.clone(), doc.password_hash.clone())))
    }

    async fn create(&self, admin: NewAdmin) -> Result<Admin, RepositoryError> {
        let mut tables = self.tables.write().await;
        if tables.admins.values().any(|doc| doc.admin.email == admin.email) {
            return Err(RepositoryError::Conflict("email already exists".to_owned()));
        }

        let now = Utc::now();
        let id = tables.allocate_id();
        let record = Admin {
            id: AdminId::new(id),
            name: admin.name,
            email: admin.email,
            role: admin.role,
            is_active: true,
            last_login_at: None,
            refresh_token_version: 0,
            created_at: now,
            updated_at: now,
        };
        tables.admins.insert(
            id,
            AdminDoc {
                admin: record.clone(),
                password_hash: admin.password_hash,
                reset_digest: None,
                reset_expires: None,
            },
        );
        Ok(record)
    }

    async fn list(&self, limit: u32, offset: u64) -> Result<(Vec<Admin>, u64), RepositoryError> {
        let tables = self.tables.read().await;
        let mut admins: Vec<Admin> = tables.admins.values().map(|doc| doc.admin.clone()).collect();
        admins.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        let total = admins.len() as u64;
        let page = admins
            .into_iter()
            .skip(usize::try_from(offset).unwrap_or(usize::MAX))
            .take(limit as usize)
            .collect();
        Ok((page, total))
    }

    async fn update(
        &self,
        id: AdminId,
        patch: AdminUpdate,
    ) -> Result<Option<Admin>, RepositoryError> {
        let mut tables = self.tables.write().await;
        let Some(doc) = tables.admins.get_mut(&id.as_i32()) else {
            return Ok(None);
        };
        patch.apply(&mut doc.admin, Utc::now());
        Ok(Some(doc.admin.clone()))
    }

    async fn record_login(&self, id: AdminId, at: DateTime<Utc>) -> Result<(), RepositoryError> {
        let mut tables = self.tables.write().await;
        if let Some(doc) = tables.admins.get_mut(&id.as_i32()) {
            doc.admin.last_login_at = Some(at);
        }
        Ok(())
    }

    async fn bump_token_version(&self, id: AdminId) -> Result<Option<i32>, RepositoryError> {
        let mut tables = self.tables.write().await;
        Ok(tables.admins.get_mut(&id.as_i32()).map(|doc| {
            doc.admin.refresh_token_version += 1;
            doc.admin.refresh_token_version
        }))
    }

    async fn set_reset_token(
        &self,
        id: AdminId,
        digest: &str,
        expires: DateTime<Utc>,
    ) -> Result<(), RepositoryError> {
        let mut tables = self.tables.write().await;
        if let Some(doc) = tables.admins.get_mut(&id.as_i32()) {
            doc.reset_digest = Some(digest.to_owned());
            doc.reset_expires = Some(expires);
        }
        Ok(())
    }

    async fn find_by_reset_digest(
        &self,
        digest: &str,
        now: DateTime<Utc>,
    ) -> Result<Option<Admin>, RepositoryError> {
        let tables = self.tables.read().await;
        Ok(tables
            .admins
            .values()
            .find(|doc| {
                doc.reset_digest.as_deref() == Some(digest)
                    && doc.reset_expires.is_some_and(|exp| exp > now)
            })
            .map(|doc| doc.admin.clone()))
    }

    async fn reset_password(
        &self,
        id: AdminId,
        password_hash: &str,
    ) -> Result<(), RepositoryError> {
        let mut tables = self.tables.write().await;
        if let Some(doc) = tables.admins.get_mut(&id.as_i32()) {
            doc.password_hash = password_hash.to_owned();
            doc.reset_digest = None;
            doc.reset_expires = None;
            doc.admin.refresh_token_version += 1;
            doc.admin.updated_at = Utc::now();
        }
        Ok(())
    }
}

#[async_trait]
impl ServiceStore for MemoryStore {
    async fn list(&self) -> Result<Vec<Service>, RepositoryError> {
        let tables = self.tables.read().await;
        let mut services: Vec<Service> = tables.services.values().cloned().collect();
        order_then_recency(&mut services, |s| s.order, |s| s.created_at);
        Ok(services)
    }

    async fn list_active(&self) -> Result<Vec<Service>, RepositoryError> {
        let mut services = ServiceStore::list(self).await?;
        services.retain(|s| s.is_active);
        Ok(services)
    }

    async fn find(&self, id: ServiceId) -> Result<Option<Service>, RepositoryError> {
        let tables = self.tables.read().await;
        Ok(tables.services.get(&id.as_i32()).cloned())
    }

    async fn create(
        &self,
        service: NewService,
        slug: String,
        created_by: AdminId,
    ) -> Result<Service, RepositoryError> {
        let mut tables = self.tables.write().await;
        if tables.services.values().any(|s| s.slug == slug) {
            return Err(RepositoryError::Conflict("slug already exists".to_owned()));
        }

        let now = Utc::now();
        let id = tables.allocate_id();
        let record = Service {
            id: ServiceId::new(id),
            title: service.title,
            slug,
            summary: service.summary,
            description: service.description,
            icon: service.icon,
            gallery: service.gallery,
            order: service.order,
            is_active: service.is_active,
            is_featured: service.is_featured,
            created_by: Some(created_by),
            updated_by: Some(created_by),
            created_at: now,
            updated_at: now,
        };
        tables.services.insert(id, record.clone());
        Ok(record)
    }

    async fn update(
        &self,
        id: ServiceId,
        patch: ServiceUpdate,
        updated_by: AdminId,
    ) -> Result<Option<Service>, RepositoryError> {
        let mut tables = self.tables.write().await;
        if let Some(slug) = patch.slug.as_deref()
            && tables
                .services
                .values()
                .any(|s| s.slug == slug && s.id != id)
        {
            return Err(RepositoryError::Conflict("slug already exists".to_owned()));
        }
        let Some(service) = tables.services.get_mut(&id.as_i32()) else {
            return Ok(None);
        };
        patch.apply(service, updated_by, Utc::now());
        Ok(Some(service.clone()))
    }

    async fn delete(&self, id: ServiceId) -> Result<Option<Service>, RepositoryError> {
        let mut tables = self.tables.write().await;
        Ok(tables.services.remove(&id.as_i32()))
    }

    async fn counts(&self) -> Result<CountPair, RepositoryError> {
        let tables = self.tables.read().await;
        Ok(CountPair {
            matching: tables.services.values().filter(|s| s.is_active).count() as u64,
            total: tables.services.len() as u64,
        })
    }
}

#[async_trait]
impl ProjectStore for MemoryStore {
    async fn list(&self) -> Result<Vec<Project>, RepositoryError> {
        let tables = self.tables.read().await;
        let mut projects: Vec<Project> = tables.projects.values().cloned().collect();
        order_then_recency(&mut projects, |p| p.order, |p| p.created_at);
        Ok(projects)
    }

    async fn list_public(&self, featured_only: bool) -> Result<Vec<Project>, RepositoryError> {
        let mut projects = ProjectStore::list(self).await?;
        projects.retain(|p| p.is_active && (!featured_only || p.is_featured));
        Ok(projects)
    }

    async fn find(&self, id: ProjectId) -> Result<Option<Project>, RepositoryError> {
        let tables = self.tables.read().await;
        Ok(tables.projects.get(&id.as_i32()).cloned())
    }

    async fn create(
        &self,
        project: NewProject,
        slug: String,
        created_by: AdminId,
    ) -> Result<Project, RepositoryError> {
        let mut tables = self.tables.write().await;
        if tables.projects.values().any(|p| p.slug == slug) {
            return Err(RepositoryError::Conflict("slug already exists".to_owned()));
        }

        let now = Utc::now();
        let id = tables.allocate_id();
        let record = Project {
            id: ProjectId::new(id),
            title: project.title,
            slug,
            summary: project.summary,
            description: project.description,
            location: project.location,
            client: project.client,
            completed_at: project.completed_at,
            gallery: project.gallery,
            metrics: project.metrics,
            order: project.order,
            is_active: project.is_active,
            is_featured: project.is_featured,
            created_by: Some(created_by),
            updated_by: Some(created_by),
            created_at: now,
            updated_at: now,
        };
        tables.projects.insert(id, record.clone());
        Ok(record)
    }

    async fn update(
        &self,
        id: ProjectId,
        patch: ProjectUpdate,
        updated_by: AdminId,
    ) -> Result<Option<Project>, RepositoryError> {
        let mut tables = self.tables.write().await;
        if let Some(slug) = patch.slug.as_deref()
            && tables
                .projects
                .values()
                .any(|p| p.slug == slug && p.id != id)
        {
            return Err(RepositoryError::Conflict("slug already exists".to_owned()));
        }
        let Some(project) = tables.projects.get_mut(&id.as_i32()) else {
            return Ok(None);
        };
        patch.apply(project, updated_by, Utc::now());
        Ok(Some(project.clone()))
    }

    async fn delete(&self, id: ProjectId) -> Result<Option<Project>, RepositoryError> {
        let mut tables = self.tables.write().await;
        Ok(tables.projects.remove(&id.as_i32()))
    }

    async fn counts(&self) -> Result<CountPair, RepositoryError> {
        let tables = self.tables.read().await;
        Ok(CountPair {
            matching: tables.projects.values().filter(|p| p.is_featured).count() as u64,
            total: tables.projects.len() as u64,
        })
    }
}

#[async_trait]
impl NewsStore for MemoryStore {
    async fn list(&self) -> Result<Vec<NewsArticle>, RepositoryError> {
        let tables = self.tables.read().await;
        let mut articles: Vec<NewsArticle> = tables.news.values().cloned().collect();
        articles.sort_by(|a, b| b.published_at.cmp(&a.published_at));
        Ok(articles)
    }

    async fn list_published(
        &self,
        limit: Option<u32>,
    ) -> Result<Vec<NewsArticle>, RepositoryError> {
        let mut articles = NewsStore::list(self).await?;
        articles.retain(|a| a.is_published);
        if let Some(limit) = limit {
            articles.truncate(limit as usize);
        }
        Ok(articles)
    }

    async fn find(&self, id: NewsArticleId) -> Result<Option<NewsArticle>, RepositoryError> {
        let tables = self.tables.read().await;
        Ok(tables.news.get(&id.as_i32()).cloned())
    }

    async fn find_by_id_or_slug(
        &self,
        key: &str,
    ) -> Result<Option<NewsArticle>, RepositoryError> {
        let tables = self.tables.read().await;
        if let Ok(id) = key.parse::<i32>()
            && let Some(article) = tables.news.get(&id)
        {
            return Ok(Some(article.clone()));
        }
        Ok(tables.news.values().find(|a| a.slug == key).cloned())
    }

    async fn create(
        &self,
        article: NewNewsArticle,
        slug: String,
        reading_time_minutes: i32,
        created_by: AdminId,
    ) -> Result<NewsArticle, RepositoryError> {
        let mut tables = self.tables.write().await;
        if tables.news.values().any(|a| a.slug == slug) {
            return Err(RepositoryError::Conflict("slug already exists".to_owned()));
        }

        let now = Utc::now();
        let id = tables.allocate_id();
        let record = NewsArticle {
            id: NewsArticleId::new(id),
            headline: article.headline,
            slug,
            excerpt: article.excerpt,
            body: article.body,
            cover_image: article.cover_image,
            tags: article.tags,
            reading_time_minutes,
            published_at: article.published_at.unwrap_or(now),
            is_published: article.is_published,
            created_by: Some(created_by),
            updated_by: Some(created_by),
            created_at: now,
            updated_at: now,
        };
        tables.news.insert(id, record.clone());
        Ok(record)
    }

    async fn update(
        &self,
        id: NewsArticleId,
        patch: NewsArticleUpdate,
        updated_by: AdminId,
    ) -> Result<Option<NewsArticle>, RepositoryError> {
        let mut tables = self.tables.write().await;
        if let Some(slug) = patch.slug.as_deref()
            && tables.news.values().any(|a| a.slug == slug && a.id != id)
        {
            return Err(RepositoryError::Conflict("slug already exists".to_owned()));
        }
        let Some(article) = tables.news.get_mut(&id.as_i32()) else {
            return Ok(None);
        };
        patch.apply(article, updated_by, Utc::now());
        Ok(Some(article.clone()))
    }

    async fn delete(&self, id: NewsArticleId) -> Result<Option<NewsArticle>, RepositoryError> {
        let mut tables = self.tables.write().await;
        Ok(tables.news.remove(&id.as_i32()))
    }

    async fn count(&self) -> Result<u64, RepositoryError> {
        let tables = self.tables.read().await;
        Ok(tables.news.len() as u64)
    }
}

#[async_trait]
impl TeamStore for MemoryStore {
    async fn list(&self) -> Result<Vec<TeamMember>, RepositoryError> {
        let tables = self.tables.read().await;
        let mut members: Vec<TeamMember> = tables.team.values().cloned().collect();
        order_then_recency(&mut members, |m| m.order, |m| m.created_at);
        Ok(members)
    }

    async fn list_active(&self) -> Result<Vec<TeamMember>, RepositoryError> {
        let mut members = TeamStore::list(self).await?;
        members.retain(|m| m.is_active);
        Ok(members)
    }

    async fn find(&self, id: TeamMemberId) -> Result<Option<TeamMember>, RepositoryError> {
        let tables = self.tables.read().await;
        Ok(tables.team.get(&id.as_i32()).cloned())
    }

    async fn create(
        &self,
        member: NewTeamMember,
        slug: String,
        created_by: AdminId,
    ) -> Result<TeamMember, RepositoryError> {
        let mut tables = self.tables.write().await;
        if tables.team.values().any(|m| m.slug == slug) {
            return Err(RepositoryError::Conflict("slug already exists".to_owned()));
        }

        let now = Utc::now();
        let id = tables.allocate_id();
        let record = TeamMember {
            id: TeamMemberId::new(id),
            name: member.name,
            slug,
            title: member.title,
            bio: member.bio,
            photo: member.photo,
            social_links: member.social_links,
            order: member.order,
            is_active: member.is_active,
            is_featured: member.is_featured,
            created_by: Some(created_by),
            updated_by: Some(created_by),
            created_at: now,
            updated_at: now,
        };
        tables.team.insert(id, record.clone());
        Ok(record)
    }

    async fn update(
        &self,
        id: TeamMemberId,
        patch: TeamMemberUpdate,
        updated_by: AdminId,
    ) -> Result<Option<TeamMember>, RepositoryError> {
        let mut tables = self.tables.write().await;
        if let Some(slug) = patch.slug.as_deref()
            && tables.team.values().any(|m| m.slug == slug && m.id != id)
        {
            return Err(RepositoryError::Conflict("slug already exists".to_owned()));
        }
        let Some(member) = tables.team.get_mut(&id.as_i32()) else {
            return Ok(None);
        };
        patch.apply(member, updated_by, Utc::now());
        Ok(Some(member.clone()))
    }

    async fn delete(&self, id: TeamMemberId) -> Result<Option<TeamMember>, RepositoryError> {
        let mut tables = self.tables.write().await;
        Ok(tables.team.remove(&id.as_i32()))
    }

    async fn counts(&self) -> Result<CountPair, RepositoryError> {
        let tables = self.tables.read().await;
        Ok(CountPair {
            matching: tables.team.values().filter(|m| m.is_active).count() as u64,
            total: tables.team.len() as u64,
        })
    }
}

#[async_trait]
impl ContactStore for MemoryStore {
    async fn create(&self, message: NewContact) -> Result<ContactMessage, RepositoryError> {
        let mut tables = self.tables.write().await;
        let now = Utc::now();
        let id = tables.allocate_id();
        let record = ContactMessage {
            id: ContactMessageId::new(id),
            name: message.name,
            email: message.email,
            phone: message.phone,
            message: message.message,
            status: ContactStatus::New,
            reply: None,
            replied_at: None,
            replied_by: None,
            responded_at: None,
            notes: None,
            created_at: now,
            updated_at: now,
        };
        tables.contact.insert(id, record.clone());
        Ok(record)
    }

    async fn list(
        &self,
        status: Option<ContactStatus>,
        limit: u32,
        offset: u64,
    ) -> Result<(Vec<ContactMessage>, u64), RepositoryError> {
        let tables = self.tables.read().await;
        let mut messages: Vec<ContactMessage> = tables
            .contact
            .values()
            .filter(|m| status.is_none_or(|s| m.status == s))
            .cloned()
            .collect();
        messages.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        let total = messages.len() as u64;
        let page = messages
            .into_iter()
            .skip(usize::try_from(offset).unwrap_or(usize::MAX))
            .take(limit as usize)
            .collect();
        Ok((page, total))
    }

    async fn find(
        &self,
        id: ContactMessageId,
    ) -> Result<Option<ContactMessage>, RepositoryError> {
        let tables = self.tables.read().await;
        Ok(tables.contact.get(&id.as_i32()).cloned())
    }

    async fn update(
        &self,
        id: ContactMessageId,
        patch: ContactUpdate,
    ) -> Result<Option<ContactMessage>, RepositoryError> {
        let mut tables = self.tables.write().await;
        let Some(message) = tables.contact.get_mut(&id.as_i32()) else {
            return Ok(None);
        };
        patch.apply(message, Utc::now());
        Ok(Some(message.clone()))
    }

    async fn reply(
        &self,
        id: ContactMessageId,
        reply: String,
        replied_by: AdminId,
        status: Option<ContactStatus>,
    ) -> Result<Option<ContactMessage>, RepositoryError> {
        let mut tables = self.tables.write().await;
        let Some(message) = tables.contact.get_mut(&id.as_i32()) else {
            return Ok(None);
        };
        message.record_reply(reply, replied_by, status, Utc::now());
        Ok(Some(message.clone()))
    }

    async fn recent(&self, n: u32) -> Result<Vec<ContactMessage>, RepositoryError> {
        let (messages, _) = ContactStore::list(self, None, n, 0).await?;
        Ok(messages)
    }

    async fn counts(&self) -> Result<CountPair, RepositoryError> {
        let tables = self.tables.read().await;
        Ok(CountPair {
            matching: tables
                .contact
                .values()
                .filter(|m| m.status != ContactStatus::Closed)
                .count() as u64,
            total: tables.contact.len() as u64,
        })
    }
}

//! Admin content CRUD handlers (services, projects, news, team).
//!
//! All four content types share the same shape of surface: list everything,
//! create with a derived slug, partial update, delete returning the removed
//! record. Listings are unpaginated; content volumes here are tens of rows.

use axum::Json;
use axum::extract::{Path, State};
use tracing::instrument;

use stonebridge_core::text::{reading_time_minutes, slugify};
use stonebridge_core::{NewsArticleId, ProjectId, ServiceId, TeamMemberId};

use crate::error::AppError;
use crate::middleware::CurrentAdmin;
use crate::models::{
    NewNewsArticle, NewProject, NewService, NewTeamMember, NewsArticle, NewsArticleUpdate,
    Project, ProjectUpdate, Service, ServiceUpdate, TeamMember, TeamMemberUpdate,
};
use crate::response::ApiResponse;
use crate::state::AppState;

/// Derive the URL slug, preferring an explicit value over the title.
fn derive_slug(explicit: Option<&str>, source: &str) -> Result<String, AppError> {
    let slug = slugify(explicit.unwrap_or(source));
    if slug.is_empty() {
        return Err(AppError::BadRequest(
            "slug must contain at least one alphanumeric character".to_owned(),
        ));
    }
    Ok(slug)
}

// =============================================================================
// Services
// =============================================================================

/// GET /api/admin/content/services
#[instrument(skip_all)]
pub async fn list_services(
    State(state): State<AppState>,
    CurrentAdmin(_): CurrentAdmin,
) -> Result<ApiResponse<Vec<Service>>, AppError> {
    let services = state.repos().services.list().await?;
    Ok(ApiResponse::ok("Services fetched", services))
}

/// POST /api/admin/content/services
#[instrument(skip_all, fields(admin = admin.id.as_i32()))]
pub async fn create_service(
    State(state): State<AppState>,
    CurrentAdmin(admin): CurrentAdmin,
    Json(body): Json<NewService>,
) -> Result<ApiResponse<Service>, AppError> {
    let slug = derive_slug(body.slug.as_deref(), &body.title)?;
    let service = state.repos().services.create(body, slug, admin.id).await?;
    Ok(ApiResponse::created("Service created", service))
}

/// PATCH /api/admin/content/services/{id}
#[instrument(skip_all, fields(admin = admin.id.as_i32(), id))]
pub async fn update_service(
    State(state): State<AppState>,
    CurrentAdmin(admin): CurrentAdmin,
    Path(id): Path<i32>,
    Json(body): Json<ServiceUpdate>,
) -> Result<ApiResponse<Service>, AppError> {
    let service = state
        .repos()
        .services
        .update(ServiceId::new(id), body, admin.id)
        .await?
        .ok_or_else(|| AppError::NotFound("Service not found".to_owned()))?;
    Ok(ApiResponse::ok("Service updated", service))
}

/// DELETE /api/admin/content/services/{id}
#[instrument(skip_all, fields(admin = admin.id.as_i32(), id))]
pub async fn delete_service(
    State(state): State<AppState>,
    CurrentAdmin(admin): CurrentAdmin,
    Path(id): Path<i32>,
) -> Result<ApiResponse<Service>, AppError> {
    let service = state
        .repos()
        .services
        .delete(ServiceId::new(id))
        .await?
        .ok_or_else(|| AppError::NotFound("Service not found".to_owned()))?;
    Ok(ApiResponse::ok("Service deleted", service))
}

// =============================================================================
// Projects
// =============================================================================

/// GET /api/admin/content/projects
#[instrument(skip_all)]
pub async fn list_projects(
    State(state): State<AppState>,
    CurrentAdmin(_): CurrentAdmin,
) -> Result<ApiResponse<Vec<Project>>, AppError> {
    let projects = state.repos().projects.list().await?;
    Ok(ApiResponse::ok("Projects fetched", projects))
}

/// POST /api/admin/content/projects
#[instrument(skip_all, fields(admin = admin.id.as_i32()))]
pub async fn create_project(
    State(state): State<AppState>,
    CurrentAdmin(admin): CurrentAdmin,
    Json(body): Json<NewProject>,
) -> Result<ApiResponse<Project>, AppError> {
    let slug = derive_slug(body.slug.as_deref(), &body.title)?;
    let project = state.repos().projects.create(body, slug, admin.id).await?;
    Ok(ApiResponse::created("Project created", project))
}

/// PATCH /api/admin/content/projects/{id}
#[instrument(skip_all, fields(admin = admin.id.as_i32(), id))]
pub async fn update_project(
    State(state): State<AppState>,
    CurrentAdmin(admin): CurrentAdmin,
    Path(id): Path<i32>,
    Json(body): Json<ProjectUpdate>,
) -> Result<ApiResponse<Project>, AppError> {
    let project = state
        .repos()
        .projects
        .update(ProjectId::new(id), body, admin.id)
        .await?
        .ok_or_else(|| AppError::NotFound("Project not found".to_owned()))?;
    Ok(ApiResponse::ok("Project updated", project))
}

/// DELETE /api/admin/content/projects/{id}
#[instrument(skip_all, fields(admin = admin.id.as_i32(), id))]
pub async fn delete_project(
    State(state): State<AppState>,
    CurrentAdmin(admin): CurrentAdmin,
    Path(id): Path<i32>,
) -> Result<ApiResponse<Project>, AppError> {
    let project = state
        .repos()
        .projects
        .delete(ProjectId::new(id))
        .await?
        .ok_or_else(|| AppError::NotFound("Project not found".to_owned()))?;
    Ok(ApiResponse::ok("Project deleted", project))
}

// =============================================================================
// News
// =============================================================================

/// GET /api/admin/content/news
#[instrument(skip_all)]
pub async fn list_news(
    State(state): State<AppState>,
    CurrentAdmin(_): CurrentAdmin,
) -> Result<ApiResponse<Vec<NewsArticle>>, AppError> {
    let articles = state.repos().news.list().await?;
    Ok(ApiResponse::ok("News fetched", articles))
}

/// POST /api/admin/content/news
#[instrument(skip_all, fields(admin = admin.id.as_i32()))]
pub async fn create_news(
    State(state): State<AppState>,
    CurrentAdmin(admin): CurrentAdmin,
    Json(body): Json<NewNewsArticle>,
) -> Result<ApiResponse<NewsArticle>, AppError> {
    let slug = derive_slug(body.slug.as_deref(), &body.headline)?;
    let reading_time = reading_time_minutes(&body.body);
    let article = state
        .repos()
        .news
        .create(body, slug, reading_time, admin.id)
        .await?;
    Ok(ApiResponse::created("Article created", article))
}

/// PATCH /api/admin/content/news/{id}
#[instrument(skip_all, fields(admin = admin.id.as_i32(), id))]
pub async fn update_news(
    State(state): State<AppState>,
    CurrentAdmin(admin): CurrentAdmin,
    Path(id): Path<i32>,
    Json(body): Json<NewsArticleUpdate>,
) -> Result<ApiResponse<NewsArticle>, AppError> {
    let article = state
        .repos()
        .news
        .update(NewsArticleId::new(id), body, admin.id)
        .await?
        .ok_or_else(|| AppError::NotFound("Article not found".to_owned()))?;
    Ok(ApiResponse::ok("Article updated", article))
}

/// DELETE /api/admin/content/news/{id}
#[instrument(skip_all, fields(admin = admin.id.as_i32(), id))]
pub async fn delete_news(
    State(state): State<AppState>,
    CurrentAdmin(admin): CurrentAdmin,
    Path(id): Path<i32>,
) -> Result<ApiResponse<NewsArticle>, AppError> {
    let article = state
        .repos()
        .news
        .delete(NewsArticleId::new(id))
        .await?
        .ok_or_else(|| AppError::NotFound("Article not found".to_owned()))?;
    Ok(ApiResponse::ok("Article deleted", article))
}

// =============================================================================
// Team
// =============================================================================

/// GET /api/admin/content/team
#[instrument(skip_all)]
pub async fn list_team(
    State(state): State<AppState>,
    CurrentAdmin(_): CurrentAdmin,
) -> Result<ApiResponse<Vec<TeamMember>>, AppError> {
    let members = state.repos().team.list().await?;
    Ok(ApiResponse::ok("Team fetched", members))
}

/// POST /api/admin/content/team
#[instrument(skip_all, fields(admin = admin.id.as_i32()))]
pub async fn create_team_member(
    State(state): State<AppState>,
    CurrentAdmin(admin): CurrentAdmin,
    Json(body): Json<NewTeamMember>,
) -> Result<ApiResponse<TeamMember>, AppError> {
    let slug = derive_slug(body.slug.as_deref(), &body.name)?;
    let member = state.repos().team.create(body, slug, admin.id).await?;
    Ok(ApiResponse::created("Team member created", member))
}

/// PATCH /api/admin/content/team/{id}
#[instrument(skip_all, fields(admin = admin.id.as_i32(), id))]
pub async fn update_team_member(
    State(state): State<AppState>,
    CurrentAdmin(admin): CurrentAdmin,
    Path(id): Path<i32>,
    Json(body): Json<TeamMemberUpdate>,
) -> Result<ApiResponse<TeamMember>, AppError> {
    let member = state
        .repos()
        .team
        .update(TeamMemberId::new(id), body, admin.id)
        .await?
        .ok_or_else(|| AppError::NotFound("Team member not found".to_owned()))?;
    Ok(ApiResponse::ok("Team member updated", member))
}

/// DELETE /api/admin/content/team/{id}
#[instrument(skip_all, fields(admin = admin.id.as_i32(), id))]
pub async fn delete_team_member(
    State(state): State<AppState>,
    CurrentAdmin(admin): CurrentAdmin,
    Path(id): Path<i32>,
) -> Result<ApiResponse<TeamMember>, AppError> {
    let member = state
        .repos()
        .team
        .delete(TeamMemberId::new(id))
        .await?
        .ok_or_else(|| AppError::NotFound("Team member not found".to_owned()))?;
    Ok(ApiResponse::ok("Team member deleted", member))
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_derive_slug_prefers_explicit() {
        assert_eq!(
            derive_slug(Some("Custom Slug"), "Ignored Title").unwrap(),
            "custom-slug"
        );
        assert_eq!(derive_slug(None, "Hello World!").unwrap(), "hello-world");
    }

    #[test]
    fn test_derive_slug_rejects_empty() {
        assert!(derive_slug(None, "!!!").is_err());
    }
}

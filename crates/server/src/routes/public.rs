//! Public content handlers.
//!
//! No authentication; only active/published content is visible. Every list
//! substitutes the fallback seed content when the store subset is empty so
//! the marketing site never renders a blank section.

use axum::extract::{Path, State};
use serde::Serialize;
use tracing::instrument;

use crate::error::AppError;
use crate::models::{NewsArticle, Project, Service, TeamMember};
use crate::response::ApiResponse;
use crate::seed;
use crate::state::AppState;

/// Number of articles shown on the home page.
const HOME_NEWS_LIMIT: u32 = 3;

fn or_fallback<T>(items: Vec<T>, fallback: fn() -> Vec<T>) -> Vec<T> {
    if items.is_empty() { fallback() } else { items }
}

/// Everything the home page needs, assembled in one request.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct HomePayload {
    pub services: Vec<Service>,
    pub projects: Vec<Project>,
    pub news: Vec<NewsArticle>,
    pub team: Vec<TeamMember>,
}

/// GET /api/content/home
///
/// Fans out the four section queries concurrently; any failure fails the
/// whole request rather than rendering a partial page.
#[instrument(skip_all)]
pub async fn home(State(state): State<AppState>) -> Result<ApiResponse<HomePayload>, AppError> {
    let repos = state.repos();
    let (services, projects, news, team) = tokio::try_join!(
        repos.services.list_active(),
        repos.projects.list_public(true),
        repos.news.list_published(Some(HOME_NEWS_LIMIT)),
        repos.team.list_active(),
    )?;

    // Featured subset first, fallback last, same as the projects path.
    let featured: Vec<Service> = services.into_iter().filter(|s| s.is_featured).collect();

    let payload = HomePayload {
        services: or_fallback(featured, seed::services),
        projects: or_fallback(projects, seed::projects),
        news: or_fallback(news, seed::news),
        team: or_fallback(team, seed::team),
    };
    Ok(ApiResponse::ok("Home content fetched", payload))
}

/// GET /api/content/services
#[instrument(skip_all)]
pub async fn services(
    State(state): State<AppState>,
) -> Result<ApiResponse<Vec<Service>>, AppError> {
    let services = state.repos().services.list_active().await?;
    Ok(ApiResponse::ok(
        "Services fetched",
        or_fallback(services, seed::services),
    ))
}

/// GET /api/content/projects
#[instrument(skip_all)]
pub async fn projects(
    State(state): State<AppState>,
) -> Result<ApiResponse<Vec<Project>>, AppError> {
    let projects = state.repos().projects.list_public(false).await?;
    Ok(ApiResponse::ok(
        "Projects fetched",
        or_fallback(projects, seed::projects),
    ))
}

/// GET /api/content/news
#[instrument(skip_all)]
pub async fn news(
    State(state): State<AppState>,
) -> Result<ApiResponse<Vec<NewsArticle>>, AppError> {
    let articles = state.repos().news.list_published(None).await?;
    Ok(ApiResponse::ok(
        "News fetched",
        or_fallback(articles, seed::news),
    ))
}

/// GET /api/content/news/{key}
///
/// `key` may be a numeric id or a slug. Unpublished articles are invisible
/// here regardless of how they are addressed.
#[instrument(skip_all, fields(key = %key))]
pub async fn news_item(
    State(state): State<AppState>,
    Path(key): Path<String>,
) -> Result<ApiResponse<NewsArticle>, AppError> {
    let article = state
        .repos()
        .news
        .find_by_id_or_slug(&key)
        .await?
        .filter(|a| a.is_published)
        .ok_or_else(|| AppError::NotFound("Article not found".to_owned()))?;
    Ok(ApiResponse::ok("Article fetched", article))
}

/// GET /api/content/team
#[instrument(skip_all)]
pub async fn team(
    State(state): State<AppState>,
) -> Result<ApiResponse<Vec<TeamMember>>, AppError> {
    let members = state.repos().team.list_active().await?;
    Ok(ApiResponse::ok(
        "Team fetched",
        or_fallback(members, seed::team),
    ))
}

//! Seed command: write the starter content into the database.
//!
//! Inserts the same records the public endpoints fall back to when their
//! store subsets are empty, attributed to an existing admin account. Useful
//! for local development so the admin console has something to edit.

use stonebridge_core::Email;
use stonebridge_core::text::reading_time_minutes;
use stonebridge_server::db::Repositories;
use stonebridge_server::models::{NewNewsArticle, NewProject, NewService, NewTeamMember};
use stonebridge_server::seed;

use super::CliError;

/// Seed starter content, attributed to the admin with the given email.
pub async fn run(admin_email: &str) -> Result<(), CliError> {
    let email =
        Email::parse(admin_email).map_err(|e| CliError::InvalidArgument(e.to_string()))?;

    let pool = super::connect().await?;
    let repos = Repositories::postgres(pool);

    let admin = repos
        .admins
        .find_by_email(&email)
        .await?
        .ok_or_else(|| {
            CliError::InvalidArgument(format!("No admin account with email {email}"))
        })?;

    for service in seed::services() {
        let body = NewService {
            title: service.title.clone(),
            slug: None,
            summary: service.summary,
            description: service.description,
            icon: service.icon,
            gallery: service.gallery,
            order: service.order,
            is_active: service.is_active,
            is_featured: service.is_featured,
        };
        repos
            .services
            .create(body, service.slug, admin.id)
            .await?;
        tracing::info!("Seeded service: {}", service.title);
    }

    for project in seed::projects() {
        let body = NewProject {
            title: project.title.clone(),
            slug: None,
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
        };
        repos
            .projects
            .create(body, project.slug, admin.id)
            .await?;
        tracing::info!("Seeded project: {}", project.title);
    }

    for article in seed::news() {
        let reading_time = reading_time_minutes(&article.body);
        let body = NewNewsArticle {
            headline: article.headline.clone(),
            slug: None,
            excerpt: article.excerpt,
            body: article.body,
            cover_image: article.cover_image,
            tags: article.tags,
            published_at: Some(article.published_at),
            is_published: article.is_published,
        };
        repos
            .news
            .create(body, article.slug, reading_time, admin.id)
            .await?;
        tracing::info!("Seeded article: {}", article.headline);
    }

    for member in seed::team() {
        let body = NewTeamMember {
            name: member.name.clone(),
            slug: None,
            title: member.title,
            bio: member.bio,
            photo: member.photo,
            social_links: member.social_links,
            order: member.order,
            is_active: member.is_active,
            is_featured: member.is_featured,
        };
        repos.team.create(body, member.slug, admin.id).await?;
        tracing::info!("Seeded team member: {}", member.name);
    }

    tracing::info!("Seeding complete");
    Ok(())
}

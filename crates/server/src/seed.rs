//! Fallback content for public endpoints.
//!
//! The marketing site must never render an empty section, so public reads
//! substitute these hard-coded lists whenever the matching store subset is
//! empty. They are placeholders until the first real content entry, not
//! persisted anywhere. The CLI `seed` command writes the same records into
//! the active store for local development.

use chrono::{DateTime, Utc};
use serde_json::json;

use stonebridge_core::{NewsArticleId, ProjectId, ServiceId, TeamMemberId};
use stonebridge_core::text::reading_time_minutes;

use crate::models::{NewsArticle, Project, Service, TeamMember};

fn epoch() -> DateTime<Utc> {
    DateTime::<Utc>::UNIX_EPOCH
}

/// Placeholder services shown before any are entered.
#[must_use]
pub fn services() -> Vec<Service> {
    let entries = [
        (
            1,
            "General Contracting",
            "general-contracting",
            "Full-service delivery of commercial and residential builds, from groundbreak to handover.",
            "hammer",
        ),
        (
            2,
            "Design & Build",
            "design-and-build",
            "One team for architecture, engineering and construction under a single contract.",
            "ruler",
        ),
        (
            3,
            "Renovation & Fit-Out",
            "renovation-and-fit-out",
            "Structural renovation and interior fit-out for occupied commercial spaces.",
            "paint-roller",
        ),
    ];

    entries
        .into_iter()
        .map(|(id, title, slug, summary, icon)| Service {
            id: ServiceId::new(id),
            title: title.to_owned(),
            slug: slug.to_owned(),
            summary: summary.to_owned(),
            description: None,
            icon: Some(icon.to_owned()),
            gallery: json!([]),
            order: id,
            is_active: true,
            is_featured: true,
            created_by: None,
            updated_by: None,
            created_at: epoch(),
            updated_at: epoch(),
        })
        .collect()
}

/// Placeholder projects shown before any are entered.
#[must_use]
pub fn projects() -> Vec<Project> {
    let entries = [
        (
            1,
            "Harbor Quay Business Park",
            "harbor-quay-business-park",
            "Four-building office campus with structured parking.",
            "Harborside",
        ),
        (
            2,
            "Millbrook Distribution Centre",
            "millbrook-distribution-centre",
            "24,000 sqm high-bay warehouse completed eight weeks ahead of schedule.",
            "Millbrook",
        ),
    ];

    entries
        .into_iter()
        .map(|(id, title, slug, summary, location)| Project {
            id: ProjectId::new(id),
            title: title.to_owned(),
            slug: slug.to_owned(),
            summary: Some(summary.to_owned()),
            description: None,
            location: Some(location.to_owned()),
            client: None,
            completed_at: None,
            gallery: json!([]),
            metrics: json!({}),
            order: id,
            is_active: true,
            is_featured: true,
            created_by: None,
            updated_by: None,
            created_at: epoch(),
            updated_at: epoch(),
        })
        .collect()
}

/// Placeholder news shown before any articles are published.
#[must_use]
pub fn news() -> Vec<NewsArticle> {
    let body = "Stonebridge Construction is refreshing its website. Project \
                updates, tenders and company news will be published here.";
    vec![NewsArticle {
        id: NewsArticleId::new(1),
        headline: "Welcome to the new Stonebridge website".to_owned(),
        slug: "welcome-to-the-new-stonebridge-website".to_owned(),
        excerpt: None,
        body: body.to_owned(),
        cover_image: None,
        tags: json!(["company"]),
        reading_time_minutes: reading_time_minutes(body),
        published_at: epoch(),
        is_published: true,
        created_by: None,
        updated_by: None,
        created_at: epoch(),
        updated_at: epoch(),
    }]
}

/// Placeholder team shown before any members are entered.
#[must_use]
pub fn team() -> Vec<TeamMember> {
    let entries = [
        (1, "Robert Stone", "robert-stone", "Managing Director"),
        (2, "Priya Shah", "priya-shah", "Head of Projects"),
    ];

    entries
        .into_iter()
        .map(|(id, name, slug, title)| TeamMember {
            id: TeamMemberId::new(id),
            name: name.to_owned(),
            slug: slug.to_owned(),
            title: title.to_owned(),
            bio: None,
            photo: None,
            social_links: json!({}),
            order: id,
            is_active: true,
            is_featured: true,
            created_by: None,
            updated_by: None,
            created_at: epoch(),
            updated_at: epoch(),
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_no_fallback_list_is_empty() {
        assert!(!services().is_empty());
        assert!(!projects().is_empty());
        assert!(!news().is_empty());
        assert!(!team().is_empty());
    }

    #[test]
    fn test_fallback_content_is_public() {
        assert!(services().iter().all(|s| s.is_active));
        assert!(projects().iter().all(|p| p.is_active && p.is_featured));
        assert!(news().iter().all(|a| a.is_published));
        assert!(team().iter().all(|m| m.is_active));
    }
}

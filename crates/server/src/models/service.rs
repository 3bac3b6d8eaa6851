//! Service content entity (what the company offers).

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use stonebridge_core::{AdminId, ServiceId};

/// A construction service offered on the marketing site.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Service {
    pub id: ServiceId,
    pub title: String,
    /// Unique URL slug, derived from the title when not supplied.
    pub slug: String,
    pub summary: String,
    pub description: Option<String>,
    pub icon: Option<String>,
    /// Free-form list of image URLs.
    pub gallery: serde_json::Value,
    /// Explicit display position; listings sort by this ascending.
    pub order: i32,
    pub is_active: bool,
    pub is_featured: bool,
    pub created_by: Option<AdminId>,
    pub updated_by: Option<AdminId>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Request body for creating a service.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewService {
    pub title: String,
    /// Optional explicit slug; derived from `title` when absent.
    pub slug: Option<String>,
    pub summary: String,
    pub description: Option<String>,
    pub icon: Option<String>,
    #[serde(default = "crate::models::empty_array")]
    pub gallery: serde_json::Value,
    #[serde(default)]
    pub order: i32,
    #[serde(default = "crate::models::default_true")]
    pub is_active: bool,
    #[serde(default)]
    pub is_featured: bool,
}

/// Partial update for a service.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ServiceUpdate {
    pub title: Option<String>,
    pub slug: Option<String>,
    pub summary: Option<String>,
    pub description: Option<String>,
    pub icon: Option<String>,
    pub gallery: Option<serde_json::Value>,
    pub order: Option<i32>,
    pub is_active: Option<bool>,
    pub is_featured: Option<bool>,
}

impl ServiceUpdate {
    /// Merge this patch into an existing record.
    pub fn apply(self, service: &mut Service, updated_by: AdminId, now: DateTime<Utc>) {
        if let Some(title) = self.title {
            service.title = title;
        }
        if let Some(slug) = self.slug {
            service.slug = slug;
        }
        if let Some(summary) = self.summary {
            service.summary = summary;
        }
        if let Some(description) = self.description {
            service.description = Some(description);
        }
        if let Some(icon) = self.icon {
            service.icon = Some(icon);
        }
        if let Some(gallery) = self.gallery {
            service.gallery = gallery;
        }
        if let Some(order) = self.order {
            service.order = order;
        }
        if let Some(is_active) = self.is_active {
            service.is_active = is_active;
        }
        if let Some(is_featured) = self.is_featured {
            service.is_featured = is_featured;
        }
        service.updated_by = Some(updated_by);
        service.updated_at = now;
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_new_service_defaults() {
        let body: NewService = serde_json::from_str(
            r#"{"title": "Structural Steel", "summary": "Fabrication and erection"}"#,
        )
        .unwrap();
        assert_eq!(body.order, 0);
        assert!(body.is_active);
        assert!(!body.is_featured);
        assert_eq!(body.gallery, serde_json::json!([]));
        assert!(body.slug.is_none());
    }

    #[test]
    fn test_update_apply_partial() {
        let now = Utc::now();
        let mut service = Service {
            id: ServiceId::new(1),
            title: "Structural Steel".to_owned(),
            slug: "structural-steel".to_owned(),
            summary: "Fabrication".to_owned(),
            description: None,
            icon: None,
            gallery: serde_json::json!([]),
            order: 5,
            is_active: true,
            is_featured: false,
            created_by: None,
            updated_by: None,
            created_at: now,
            updated_at: now,
        };

        let patch = ServiceUpdate {
            order: Some(10),
            ..ServiceUpdate::default()
        };
        patch.apply(&mut service, AdminId::new(2), Utc::now());

        assert_eq!(service.order, 10);
        assert_eq!(service.title, "Structural Steel");
        assert_eq!(service.updated_by, Some(AdminId::new(2)));
    }
}

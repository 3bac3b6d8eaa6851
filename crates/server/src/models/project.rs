//! Project content entity (completed and in-flight builds shown as portfolio).

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use stonebridge_core::{AdminId, ProjectId};

/// A portfolio project.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Project {
    pub id: ProjectId,
    pub title: String,
    pub slug: String,
    pub summary: Option<String>,
    pub description: Option<String>,
    pub location: Option<String>,
    pub client: Option<String>,
    pub completed_at: Option<DateTime<Utc>>,
    /// Free-form list of image URLs.
    pub gallery: serde_json::Value,
    /// Free-form key/value facts (square footage, duration, budget band).
    pub metrics: serde_json::Value,
    pub order: i32,
    pub is_active: bool,
    pub is_featured: bool,
    pub created_by: Option<AdminId>,
    pub updated_by: Option<AdminId>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Request body for creating a project.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewProject {
    pub title: String,
    pub slug: Option<String>,
    pub summary: Option<String>,
    pub description: Option<String>,
    pub location: Option<String>,
    pub client: Option<String>,
    pub completed_at: Option<DateTime<Utc>>,
    #[serde(default = "crate::models::empty_array")]
    pub gallery: serde_json::Value,
    #[serde(default = "crate::models::empty_object")]
    pub metrics: serde_json::Value,
    #[serde(default)]
    pub order: i32,
    #[serde(default = "crate::models::default_true")]
    pub is_active: bool,
    #[serde(default)]
    pub is_featured: bool,
}

/// Partial update for a project.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProjectUpdate {
    pub title: Option<String>,
    pub slug: Option<String>,
    pub summary: Option<String>,
    pub description: Option<String>,
    pub location: Option<String>,
    pub client: Option<String>,
    pub completed_at: Option<DateTime<Utc>>,
    pub gallery: Option<serde_json::Value>,
    pub metrics: Option<serde_json::Value>,
    pub order: Option<i32>,
    pub is_active: Option<bool>,
    pub is_featured: Option<bool>,
}

impl ProjectUpdate {
    /// Merge this patch into an existing record.
    pub fn apply(self, project: &mut Project, updated_by: AdminId, now: DateTime<Utc>) {
        if let Some(title) = self.title {
            project.title = title;
        }
        if let Some(slug) = self.slug {
            project.slug = slug;
        }
        if let Some(summary) = self.summary {
            project.summary = Some(summary);
        }
        if let Some(description) = self.description {
            project.description = Some(description);
        }
        if let Some(location) = self.location {
            project.location = Some(location);
        }
        if let Some(client) = self.client {
            project.client = Some(client);
        }
        if let Some(completed_at) = self.completed_at {
            project.completed_at = Some(completed_at);
        }
        if let Some(gallery) = self.gallery {
            project.gallery = gallery;
        }
        if let Some(metrics) = self.metrics {
            project.metrics = metrics;
        }
        if let Some(order) = self.order {
            project.order = order;
        }
        if let Some(is_active) = self.is_active {
            project.is_active = is_active;
        }
        if let Some(is_featured) = self.is_featured {
            project.is_featured = is_featured;
        }
        project.updated_by = Some(updated_by);
        project.updated_at = now;
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_new_project_defaults() {
        let body: NewProject =
            serde_json::from_str(r#"{"title": "Riverside Depot Refit"}"#).unwrap();
        assert_eq!(body.metrics, serde_json::json!({}));
        assert!(body.is_active);
        assert!(!body.is_featured);
    }
}

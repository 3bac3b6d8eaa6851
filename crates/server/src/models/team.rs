//! Team member content entity.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use stonebridge_core::{AdminId, TeamMemberId};

/// A person shown on the team page.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TeamMember {
    pub id: TeamMemberId,
    pub name: String,
    pub slug: String,
    /// Job title ("Site Manager", "Lead Estimator").
    pub title: String,
    pub bio: Option<String>,
    pub photo: Option<String>,
    /// Free-form map of network name to profile URL.
    pub social_links: serde_json::Value,
    pub order: i32,
    pub is_active: bool,
    pub is_featured: bool,
    pub created_by: Option<AdminId>,
    pub updated_by: Option<AdminId>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Request body for creating a team member.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewTeamMember {
    pub name: String,
    /// Optional explicit slug; derived from `name` when absent.
    pub slug: Option<String>,
    pub title: String,
    pub bio: Option<String>,
    pub photo: Option<String>,
    #[serde(default = "crate::models::empty_object")]
    pub social_links: serde_json::Value,
    #[serde(default)]
    pub order: i32,
    #[serde(default = "crate::models::default_true")]
    pub is_active: bool,
    #[serde(default)]
    pub is_featured: bool,
}

/// Partial update for a team member.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TeamMemberUpdate {
    pub name: Option<String>,
    pub slug: Option<String>,
    pub title: Option<String>,
    pub bio: Option<String>,
    pub photo: Option<String>,
    pub social_links: Option<serde_json::Value>,
    pub order: Option<i32>,
    pub is_active: Option<bool>,
    pub is_featured: Option<bool>,
}

impl TeamMemberUpdate {
    /// Merge this patch into an existing record.
    pub fn apply(self, member: &mut TeamMember, updated_by: AdminId, now: DateTime<Utc>) {
        if let Some(name) = self.name {
            member.name = name;
        }
        if let Some(slug) = self.slug {
            member.slug = slug;
        }
        if let Some(title) = self.title {
            member.title = title;
        }
        if let Some(bio) = self.bio {
            member.bio = Some(bio);
        }
        if let Some(photo) = self.photo {
            member.photo = Some(photo);
        }
        if let Some(social_links) = self.social_links {
            member.social_links = social_links;
        }
        if let Some(order) = self.order {
            member.order = order;
        }
        if let Some(is_active) = self.is_active {
            member.is_active = is_active;
        }
        if let Some(is_featured) = self.is_featured {
            member.is_featured = is_featured;
        }
        member.updated_by = Some(updated_by);
        member.updated_at = now;
    }
}

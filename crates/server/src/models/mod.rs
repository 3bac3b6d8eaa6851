//! Domain models for the Stonebridge backend.
//!
//! These are validated domain objects, separate from database row types.
//! All serialized forms use camelCase field names to match the JSON API
//! contract consumed by the web frontend.

pub mod admin;
pub mod contact;
pub mod news;
pub mod project;
pub mod service;
pub mod team;

pub use admin::{Admin, AdminProfile, AdminUpdate, NewAdmin};
pub use contact::{ContactMessage, ContactReply, ContactUpdate, NewContactMessage};
pub use news::{NewNewsArticle, NewsArticle, NewsArticleUpdate};
pub use project::{NewProject, Project, ProjectUpdate};
pub use service::{NewService, Service, ServiceUpdate};
pub use team::{NewTeamMember, TeamMember, TeamMemberUpdate};

use serde::{Deserialize, Serialize};

/// Serde default: empty JSON array.
pub(crate) fn empty_array() -> serde_json::Value {
    serde_json::Value::Array(Vec::new())
}

/// Serde default: empty JSON object.
pub(crate) fn empty_object() -> serde_json::Value {
    serde_json::Value::Object(serde_json::Map::new())
}

/// Serde default: `true`.
pub(crate) const fn default_true() -> bool {
    true
}

/// Maximum page size for paginated listings.
pub const MAX_PAGE_LIMIT: u32 = 100;

/// Pagination parameters accepted as query-string values.
#[derive(Debug, Clone, Copy, Deserialize, Default)]
pub struct PageQuery {
    /// 1-based page number.
    pub page: Option<u32>,
    /// Items per page, capped at [`MAX_PAGE_LIMIT`].
    pub limit: Option<u32>,
}

impl PageQuery {
    /// Resolve to a concrete `(page, limit, offset)` triple.
    #[must_use]
    pub fn resolve(&self) -> (u32, u32, u64) {
        let page = self.page.unwrap_or(1).max(1);
        let limit = self.limit.unwrap_or(20).clamp(1, MAX_PAGE_LIMIT);
        let offset = u64::from(page - 1) * u64::from(limit);
        (page, limit, offset)
    }
}

/// A page of results plus enough metadata to render pagination controls.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Paginated<T> {
    pub items: Vec<T>,
    pub total: u64,
    pub page: u32,
    pub limit: u32,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_page_query_defaults() {
        let (page, limit, offset) = PageQuery::default().resolve();
        assert_eq!((page, limit, offset), (1, 20, 0));
    }

    #[test]
    fn test_page_query_clamps_limit() {
        let query = PageQuery {
            page: Some(3),
            limit: Some(500),
        };
        let (page, limit, offset) = query.resolve();
        assert_eq!(page, 3);
        assert_eq!(limit, MAX_PAGE_LIMIT);
        assert_eq!(offset, 200);
    }

    #[test]
    fn test_page_query_zero_page_treated_as_first() {
        let query = PageQuery {
            page: Some(0),
            limit: Some(10),
        };
        let (page, _, offset) = query.resolve();
        assert_eq!(page, 1);
        assert_eq!(offset, 0);
    }
}

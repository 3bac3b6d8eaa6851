//! News article content entity.
//!
//! News differs from the other content types in two ways: the slug is
//! derived from the headline, and a reading-time estimate is recomputed
//! whenever the body changes.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use stonebridge_core::text::reading_time_minutes;
use stonebridge_core::{AdminId, NewsArticleId};

/// A news article.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct NewsArticle {
    pub id: NewsArticleId,
    pub headline: String,
    pub slug: String,
    pub excerpt: Option<String>,
    pub body: String,
    pub cover_image: Option<String>,
    /// Free-form list of tag strings.
    pub tags: serde_json::Value,
    /// Whole minutes, `max(1, ceil(words / 200))`.
    pub reading_time_minutes: i32,
    pub published_at: DateTime<Utc>,
    pub is_published: bool,
    pub created_by: Option<AdminId>,
    pub updated_by: Option<AdminId>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Request body for creating a news article.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewNewsArticle {
    pub headline: String,
    /// Optional explicit slug; derived from `headline` when absent.
    pub slug: Option<String>,
    pub excerpt: Option<String>,
    pub body: String,
    pub cover_image: Option<String>,
    #[serde(default = "crate::models::empty_array")]
    pub tags: serde_json::Value,
    /// Defaults to the creation time.
    pub published_at: Option<DateTime<Utc>>,
    #[serde(default = "crate::models::default_true")]
    pub is_published: bool,
}

/// Partial update for a news article.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewsArticleUpdate {
    pub headline: Option<String>,
    pub slug: Option<String>,
    pub excerpt: Option<String>,
    pub body: Option<String>,
    pub cover_image: Option<String>,
    pub tags: Option<serde_json::Value>,
    pub published_at: Option<DateTime<Utc>>,
    pub is_published: Option<bool>,
}

impl NewsArticleUpdate {
    /// Merge this patch into an existing article.
    ///
    /// A body change recomputes the reading-time estimate.
    pub fn apply(self, article: &mut NewsArticle, updated_by: AdminId, now: DateTime<Utc>) {
        if let Some(headline) = self.headline {
            article.headline = headline;
        }
        if let Some(slug) = self.slug {
            article.slug = slug;
        }
        if let Some(excerpt) = self.excerpt {
            article.excerpt = Some(excerpt);
        }
        if let Some(body) = self.body {
            article.reading_time_minutes = reading_time_minutes(&body);
            article.body = body;
        }
        if let Some(cover_image) = self.cover_image {
            article.cover_image = Some(cover_image);
        }
        if let Some(tags) = self.tags {
            article.tags = tags;
        }
        if let Some(published_at) = self.published_at {
            article.published_at = published_at;
        }
        if let Some(is_published) = self.is_published {
            article.is_published = is_published;
        }
        article.updated_by = Some(updated_by);
        article.updated_at = now;
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    fn sample_article() -> NewsArticle {
        let now = Utc::now();
        NewsArticle {
            id: NewsArticleId::new(1),
            headline: "Topping Out at Harbor Quay".to_owned(),
            slug: "topping-out-at-harbor-quay".to_owned(),
            excerpt: None,
            body: "Short announcement.".to_owned(),
            cover_image: None,
            tags: serde_json::json!([]),
            reading_time_minutes: 1,
            published_at: now,
            is_published: true,
            created_by: None,
            updated_by: None,
            created_at: now,
            updated_at: now,
        }
    }

    #[test]
    fn test_body_change_recomputes_reading_time() {
        let mut article = sample_article();
        let long_body = "word ".repeat(450);
        let patch = NewsArticleUpdate {
            body: Some(long_body),
            ..NewsArticleUpdate::default()
        };
        patch.apply(&mut article, AdminId::new(1), Utc::now());
        assert_eq!(article.reading_time_minutes, 3);
    }

    #[test]
    fn test_non_body_change_keeps_reading_time() {
        let mut article = sample_article();
        let patch = NewsArticleUpdate {
            headline: Some("Updated headline".to_owned()),
            ..NewsArticleUpdate::default()
        };
        patch.apply(&mut article, AdminId::new(1), Utc::now());
        assert_eq!(article.reading_time_minutes, 1);
        assert_eq!(article.headline, "Updated headline");
    }
}

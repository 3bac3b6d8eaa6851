//! Admin dashboard overview handler.

use axum::extract::State;
use serde::Serialize;
use tracing::instrument;

use crate::error::AppError;
use crate::middleware::CurrentAdmin;
use crate::models::ContactMessage;
use crate::response::ApiResponse;
use crate::state::AppState;

/// Messages shown in the "recent enquiries" panel.
const RECENT_MESSAGES: u32 = 5;

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SectionCounts {
    pub matching: u64,
    pub total: u64,
}

impl From<crate::db::store::CountPair> for SectionCounts {
    fn from(pair: crate::db::store::CountPair) -> Self {
        Self {
            matching: pair.matching,
            total: pair.total,
        }
    }
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DashboardOverview {
    /// Open (not closed) vs total contact messages.
    pub contact: SectionCounts,
    /// Active vs total team members.
    pub team: SectionCounts,
    /// Featured vs total projects.
    pub projects: SectionCounts,
    /// Active vs total services.
    pub services: SectionCounts,
    /// Total article count.
    pub news_total: u64,
    pub recent_messages: Vec<ContactMessage>,
}

/// GET /api/admin/dashboard/overview
///
/// A fixed fan-out of count queries joined concurrently. Always computed
/// fresh; the numbers are small enough that caching would only add staleness.
#[instrument(skip_all)]
pub async fn overview(
    State(state): State<AppState>,
    CurrentAdmin(_): CurrentAdmin,
) -> Result<ApiResponse<DashboardOverview>, AppError> {
    let repos = state.repos();
    let (contact, team, projects, services, news_total, recent_messages) = tokio::try_join!(
        repos.contact.counts(),
        repos.team.counts(),
        repos.projects.counts(),
        repos.services.counts(),
        repos.news.count(),
        repos.contact.recent(RECENT_MESSAGES),
    )?;

    let overview = DashboardOverview {
        contact: contact.into(),
        team: team.into(),
        projects: projects.into(),
        services: services.into(),
        news_total,
        recent_messages,
    };
    Ok(ApiResponse::ok("Dashboard fetched", overview))
}

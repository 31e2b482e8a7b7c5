//! Campaign handlers
//!
//! Endpoints for sending campaigns.

use axum::{
    extract::{Path, State},
    Json,
};
use serde::Serialize;

use crate::app::SendReport;
use crate::domain::entities::{CampaignId, CampaignStats};
use crate::error::AppError;
use crate::AppState;

/// Response body for a completed send
#[derive(Debug, Serialize)]
pub struct SendCampaignResponse {
    pub success: bool,
    pub message: String,
    pub stats: CampaignStats,
    /// Per-contact failures, `"<email>: <reason>"`
    #[serde(skip_serializing_if = "Option::is_none")]
    pub errors: Option<Vec<String>>,
}

impl From<SendReport> for SendCampaignResponse {
    fn from(report: SendReport) -> Self {
        let errors = report.errors();
        Self {
            success: true,
            message: report.summary(),
            errors: (!errors.is_empty()).then_some(errors),
            stats: report.stats,
        }
    }
}

/// POST /api/campaigns/:id/send
///
/// Send a Draft campaign to its target contacts. Returns 200 whenever the
/// send completed, even if some contacts bounced.
pub async fn send_campaign(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<SendCampaignResponse>, AppError> {
    let id = id.trim();
    if id.is_empty() {
        return Err(AppError::BadRequest("Campaign id is required".to_string()));
    }

    let report = state
        .campaign_service
        .send_campaign(&CampaignId::from(id))
        .await?;

    Ok(Json(report.into()))
}

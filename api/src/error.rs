//! Unified error types for the Mailhub API
//!
//! This module defines error types for each layer:
//! - `DomainError`: Status store errors surfaced through the repository port
//! - `CmsError`: Cosmic API client errors
//! - `EmailError`: Email provider errors
//! - `ContactError`: Per-contact validation failures
//! - `SendError`: Campaign send failures that abort the whole operation
//! - `AppError`: Application layer errors (wraps the above for HTTP responses)

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;
use thiserror::Error;

use crate::domain::entities::{CampaignId, CampaignStats, CampaignStatus};

/// Domain layer errors - status store and business rule errors
#[derive(Debug, Error)]
pub enum DomainError {
    #[error("Entity not found: {0}")]
    NotFound(String),

    #[error("Conflict: {0}")]
    Conflict(String),

    #[error("Storage error: {0}")]
    Storage(String),
}

/// Cosmic CMS client errors
#[derive(Debug, Error)]
pub enum CmsError {
    #[error("Request failed: {0}")]
    Request(#[from] reqwest::Error),

    #[error("API error: {status} - {message}")]
    Api { status: u16, message: String },

    #[error("Object not found: {0}")]
    ObjectNotFound(String),

    #[error("Unauthorized - invalid bucket key")]
    Unauthorized,

    #[error("Deserialization error: {0}")]
    Deserialization(String),
}

impl From<CmsError> for DomainError {
    fn from(e: CmsError) -> Self {
        match e {
            CmsError::ObjectNotFound(id) => DomainError::NotFound(id),
            e => DomainError::Storage(e.to_string()),
        }
    }
}

/// Email provider errors
#[derive(Debug, Error)]
pub enum EmailError {
    #[error("Email provider is not configured (RESEND_API_KEY is not set)")]
    Unconfigured,

    #[error("Request failed: {0}")]
    Request(#[from] reqwest::Error),

    #[error("Rejected by provider: {status} - {message}")]
    Rejected { status: u16, message: String },

    #[error("Deserialization error: {0}")]
    Deserialization(String),
}

/// Per-contact validation failures
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ContactError {
    #[error("invalid email address")]
    InvalidAddress(String),
}

/// Failures that stop a campaign send as a whole
#[derive(Debug, Error)]
pub enum SendError {
    #[error("Campaign not found: {0}")]
    NotFound(CampaignId),

    #[error("Campaign can only be sent from Draft status (current: {0})")]
    InvalidState(CampaignStatus),

    #[error("Campaign template not found or empty")]
    MissingTemplate,

    #[error("No target contacts found")]
    NoRecipients,

    #[error("Email service is not configured. Set RESEND_API_KEY to send campaigns.")]
    ProviderUnconfigured,

    #[error("Campaign {0} is already being sent")]
    AlreadySending(CampaignId),

    /// Emails were dispatched but the final status write failed
    #[error("Emails were dispatched but the campaign status could not be updated: {source}")]
    StatusUpdate {
        stats: CampaignStats,
        #[source]
        source: DomainError,
    },

    #[error("Status store error: {0}")]
    Store(#[from] DomainError),
}

/// Application layer errors - used by HTTP handlers
#[derive(Debug, Error)]
pub enum AppError {
    #[error("{0}")]
    Send(#[from] SendError),

    #[error("Invalid request: {0}")]
    BadRequest(String),

    #[error("Unauthorized")]
    Unauthorized,
}

/// Error response body for JSON responses
#[derive(Serialize)]
struct ErrorResponse {
    error: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    details: Option<String>,
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, error, details) = match &self {
            AppError::Send(e) => match e {
                SendError::NotFound(_) => {
                    (StatusCode::NOT_FOUND, "Campaign not found".to_string(), None)
                }
                SendError::InvalidState(_)
                | SendError::MissingTemplate
                | SendError::NoRecipients => (StatusCode::BAD_REQUEST, e.to_string(), None),
                SendError::AlreadySending(_) => (StatusCode::CONFLICT, e.to_string(), None),
                SendError::ProviderUnconfigured => {
                    tracing::error!("Campaign send attempted without email provider credentials");
                    (StatusCode::INTERNAL_SERVER_ERROR, e.to_string(), None)
                }
                SendError::StatusUpdate { stats, source } => {
                    // Logged by the service with full counts
                    let details = format!("{} sent, {} bounced", stats.sent, stats.bounced);
                    match source {
                        DomainError::Conflict(_) => (
                            StatusCode::CONFLICT,
                            "Campaign was sent by another request".to_string(),
                            Some(details),
                        ),
                        _ => (
                            StatusCode::INTERNAL_SERVER_ERROR,
                            "Emails were dispatched but the campaign status could not be updated"
                                .to_string(),
                            Some(details),
                        ),
                    }
                }
                SendError::Store(inner) => {
                    tracing::error!(error = %inner, "Status store error");
                    (
                        StatusCode::INTERNAL_SERVER_ERROR,
                        "Failed to send campaign".to_string(),
                        None,
                    )
                }
            },
            AppError::BadRequest(msg) => (
                StatusCode::BAD_REQUEST,
                "Bad request".to_string(),
                Some(msg.clone()),
            ),
            AppError::Unauthorized => (StatusCode::UNAUTHORIZED, "Unauthorized".to_string(), None),
        };

        let body = Json(ErrorResponse { error, details });

        (status, body).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn status_of(e: impl Into<AppError>) -> StatusCode {
        e.into().into_response().status()
    }

    #[test]
    fn test_send_error_status_mapping() {
        assert_eq!(
            status_of(SendError::NotFound(CampaignId::from("c1"))),
            StatusCode::NOT_FOUND
        );
        assert_eq!(
            status_of(SendError::InvalidState(CampaignStatus::Sent)),
            StatusCode::BAD_REQUEST
        );
        assert_eq!(status_of(SendError::MissingTemplate), StatusCode::BAD_REQUEST);
        assert_eq!(status_of(SendError::NoRecipients), StatusCode::BAD_REQUEST);
        assert_eq!(
            status_of(SendError::ProviderUnconfigured),
            StatusCode::INTERNAL_SERVER_ERROR
        );
        assert_eq!(
            status_of(SendError::AlreadySending(CampaignId::from("c1"))),
            StatusCode::CONFLICT
        );
        assert_eq!(
            status_of(SendError::StatusUpdate {
                stats: CampaignStats::new(1, 0),
                source: DomainError::Storage("timeout".into()),
            }),
            StatusCode::INTERNAL_SERVER_ERROR
        );
        assert_eq!(
            status_of(SendError::StatusUpdate {
                stats: CampaignStats::new(1, 0),
                source: DomainError::Conflict("campaign c1 is Sent (expected Draft)".into()),
            }),
            StatusCode::CONFLICT
        );
    }

    #[test]
    fn test_cms_not_found_maps_to_domain_not_found() {
        let e: DomainError = CmsError::ObjectNotFound("abc".into()).into();
        assert!(matches!(e, DomainError::NotFound(id) if id == "abc"));

        let e: DomainError = CmsError::Unauthorized.into();
        assert!(matches!(e, DomainError::Storage(_)));
    }
}

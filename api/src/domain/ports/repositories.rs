//! Repository port traits
//!
//! These traits define the interface for data persistence.
//! Implementations are provided by adapters (e.g., the Cosmic CMS).

use async_trait::async_trait;

use crate::domain::entities::{Campaign, CampaignId, CampaignStats, CampaignStatus};
use crate::error::DomainError;

/// Repository for Campaign entities
///
/// The store owns the campaign record; we only read it and record the outcome
/// of a send.
#[async_trait]
pub trait CampaignRepository: Send + Sync {
    /// Find a campaign by ID, with its template and target contacts resolved
    async fn find_by_id(&self, id: &CampaignId) -> Result<Option<Campaign>, DomainError>;

    /// Move a campaign from `from` to `to` and overwrite its stats in one call.
    ///
    /// Fails with `DomainError::Conflict` when the stored status is no longer
    /// `from`, and with `DomainError::NotFound` when the campaign is gone.
    async fn transition_status(
        &self,
        id: &CampaignId,
        from: &CampaignStatus,
        to: &CampaignStatus,
        stats: &CampaignStats,
    ) -> Result<(), DomainError>;
}

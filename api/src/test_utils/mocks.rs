//! Mock implementations of port traits
//!
//! These are in-memory implementations that can be configured for testing.
//! They store data in memory and allow tests to verify behavior.

use async_trait::async_trait;
use std::collections::{HashMap, HashSet};
use std::sync::{Arc, RwLock};

use crate::domain::entities::{Campaign, CampaignId, CampaignStats, CampaignStatus};
use crate::domain::ports::{CampaignRepository, EmailSender, OutboundEmail, SentEmail};
use crate::error::{DomainError, EmailError};

// ============================================================================
// In-Memory Campaign Repository
// ============================================================================

#[derive(Default)]
pub struct InMemoryCampaignRepository {
    campaigns: Arc<RwLock<HashMap<CampaignId, Campaign>>>,
    stats: Arc<RwLock<HashMap<CampaignId, CampaignStats>>>,
    fail_updates: bool,
    /// Stats another sender records just before our status write lands
    sent_elsewhere: Option<CampaignStats>,
}

impl InMemoryCampaignRepository {
    pub fn new() -> Self {
        Self::default()
    }

    /// Pre-populate with a campaign for testing
    pub fn with_campaign(self, campaign: Campaign) -> Self {
        self.campaigns
            .write()
            .unwrap()
            .insert(campaign.id.clone(), campaign);
        self
    }

    /// Make every status transition fail with a storage error
    pub fn failing_updates(mut self) -> Self {
        self.fail_updates = true;
        self
    }

    /// Let another sender mark the campaign Sent between our read and our
    /// status write, recording `stats` as its own
    pub fn sent_elsewhere_before_update(mut self, stats: CampaignStats) -> Self {
        self.sent_elsewhere = Some(stats);
        self
    }

    /// Current stored state of a campaign
    pub fn get(&self, id: &CampaignId) -> Option<Campaign> {
        self.campaigns.read().unwrap().get(id).cloned()
    }

    /// Stats last written with a status transition
    pub fn stats_for(&self, id: &CampaignId) -> Option<CampaignStats> {
        self.stats.read().unwrap().get(id).cloned()
    }
}

#[async_trait]
impl CampaignRepository for InMemoryCampaignRepository {
    async fn find_by_id(&self, id: &CampaignId) -> Result<Option<Campaign>, DomainError> {
        Ok(self.get(id))
    }

    async fn transition_status(
        &self,
        id: &CampaignId,
        from: &CampaignStatus,
        to: &CampaignStatus,
        stats: &CampaignStats,
    ) -> Result<(), DomainError> {
        if self.fail_updates {
            return Err(DomainError::Storage("status store unavailable".to_string()));
        }

        let mut campaigns = self.campaigns.write().unwrap();
        let campaign = campaigns
            .get_mut(id)
            .ok_or_else(|| DomainError::NotFound(id.0.clone()))?;

        if let Some(theirs) = &self.sent_elsewhere {
            campaign.status = CampaignStatus::Sent;
            self.stats.write().unwrap().insert(id.clone(), theirs.clone());
        }

        if &campaign.status != from {
            return Err(DomainError::Conflict(format!(
                "campaign {} is {} (expected {})",
                id, campaign.status, from
            )));
        }

        campaign.status = to.clone();
        self.stats.write().unwrap().insert(id.clone(), stats.clone());
        Ok(())
    }
}

// ============================================================================
// Mock Email Sender
// ============================================================================

/// Records every message handed to it
pub struct MockEmailSender {
    configured: bool,
    rejected: HashSet<String>,
    calls: Arc<RwLock<Vec<OutboundEmail>>>,
}

impl Default for MockEmailSender {
    fn default() -> Self {
        Self {
            configured: true,
            rejected: HashSet::new(),
            calls: Arc::new(RwLock::new(Vec::new())),
        }
    }
}

impl MockEmailSender {
    pub fn new() -> Self {
        Self::default()
    }

    /// A sender with no credentials
    pub fn unconfigured() -> Self {
        Self {
            configured: false,
            ..Self::default()
        }
    }

    /// Reject messages to this address with a provider error
    pub fn rejecting(mut self, address: &str) -> Self {
        self.rejected.insert(address.to_string());
        self
    }

    /// Every message passed to `send`, in call order
    pub fn sent(&self) -> Vec<OutboundEmail> {
        self.calls.read().unwrap().clone()
    }

    pub fn send_count(&self) -> usize {
        self.calls.read().unwrap().len()
    }
}

#[async_trait]
impl EmailSender for MockEmailSender {
    fn is_configured(&self) -> bool {
        self.configured
    }

    async fn send(&self, email: &OutboundEmail) -> Result<SentEmail, EmailError> {
        if !self.configured {
            return Err(EmailError::Unconfigured);
        }

        let count = {
            let mut calls = self.calls.write().unwrap();
            calls.push(email.clone());
            calls.len()
        };

        if self.rejected.contains(&email.to) {
            return Err(EmailError::Rejected {
                status: 422,
                message: "validation_error: Invalid `to` field".to_string(),
            });
        }

        Ok(SentEmail {
            id: format!("msg-{}", count),
        })
    }
}

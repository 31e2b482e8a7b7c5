//! Campaign domain entity
//!
//! A campaign is one bulk email send: a template and a list of target
//! contacts. Stats are written back when it is sent and never read here.

use serde::{Deserialize, Serialize};

use super::{Contact, EmailTemplate};

/// Unique identifier for a campaign (the CMS object id)
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct CampaignId(pub String);

impl From<&str> for CampaignId {
    fn from(id: &str) -> Self {
        Self(id.to_string())
    }
}

impl std::fmt::Display for CampaignId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Campaign lifecycle status
///
/// Only `Draft` campaigns can be sent. The transition to `Sent` is one-way.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CampaignStatus {
    Draft,
    Scheduled,
    Sent,
    /// A status value the CMS knows about but we don't
    Other(String),
}

impl CampaignStatus {
    pub fn as_str(&self) -> &str {
        match self {
            CampaignStatus::Draft => "Draft",
            CampaignStatus::Scheduled => "Scheduled",
            CampaignStatus::Sent => "Sent",
            CampaignStatus::Other(s) => s,
        }
    }
}

impl std::fmt::Display for CampaignStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl From<&str> for CampaignStatus {
    fn from(s: &str) -> Self {
        match s {
            "Draft" => CampaignStatus::Draft,
            "Scheduled" => CampaignStatus::Scheduled,
            "Sent" => CampaignStatus::Sent,
            other => CampaignStatus::Other(other.to_string()),
        }
    }
}

/// Delivery stats recorded on a campaign
///
/// Opens, clicks and unsubscribes are filled in later by tracking; at send
/// time they are always zero and the rates are "0%".
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CampaignStats {
    pub sent: u32,
    pub delivered: u32,
    pub opened: u32,
    pub clicked: u32,
    pub bounced: u32,
    pub unsubscribed: u32,
    pub open_rate: String,
    pub click_rate: String,
}

impl CampaignStats {
    /// Fresh stats for a send attempt
    pub fn new(sent: u32, bounced: u32) -> Self {
        Self {
            sent,
            // No separate delivery confirmation, so a handoff counts as delivered
            delivered: sent,
            opened: 0,
            clicked: 0,
            bounced,
            unsubscribed: 0,
            open_rate: "0%".to_string(),
            click_rate: "0%".to_string(),
        }
    }
}

impl Default for CampaignStats {
    fn default() -> Self {
        Self::new(0, 0)
    }
}

/// Campaign entity
#[derive(Debug, Clone)]
pub struct Campaign {
    pub id: CampaignId,
    pub name: String,
    pub status: CampaignStatus,
    pub template: Option<EmailTemplate>,
    pub target_contacts: Vec<Contact>,
}

impl Campaign {
    /// Whether the campaign is still in the only sendable state
    pub fn is_draft(&self) -> bool {
        self.status == CampaignStatus::Draft
    }
}

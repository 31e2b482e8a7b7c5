//! Email provider port trait
//!
//! Defines the interface for handing a single message to the email provider.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::error::EmailError;

/// Name/value pair attached to a message for provider-side analytics
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EmailTag {
    pub name: String,
    pub value: String,
}

impl EmailTag {
    pub fn new(name: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            value: value.into(),
        }
    }
}

/// One message to one recipient
#[derive(Debug, Clone)]
pub struct OutboundEmail {
    pub from: String,
    pub to: String,
    pub subject: String,
    pub html: String,
    pub tags: Vec<EmailTag>,
}

/// Provider acknowledgement of an accepted message
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SentEmail {
    pub id: String,
}

/// Email provider
#[async_trait]
pub trait EmailSender: Send + Sync {
    /// Whether credentials are present. Checked once before a campaign send.
    fn is_configured(&self) -> bool;

    /// Send a single message. No batching, no retries.
    async fn send(&self, email: &OutboundEmail) -> Result<SentEmail, EmailError>;
}

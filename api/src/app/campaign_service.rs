//! Campaign send service
//!
//! Runs the send workflow for one campaign:
//! 1. Claim the campaign's send slot (one send per campaign at a time)
//! 2. Load the campaign and check it is eligible (Draft, has content, has recipients)
//! 3. Check the email provider is configured
//! 4. For each contact in order: validate, render, sanitize, dispatch
//! 5. Record `Sent` and the aggregated stats with a single conditional update
//!
//! Per-contact failures are collected as `SendOutcome::Bounced` and never stop
//! the loop. Nothing is retried.

use std::collections::HashSet;
use std::sync::{Arc, Mutex};

use chrono::{NaiveDate, Utc};

use crate::app::contact_validator::{validate_contact, Eligibility};
use crate::app::sanitizer::sanitize_html;
use crate::app::template_renderer::render;
use crate::domain::entities::{
    Campaign, CampaignId, CampaignStats, CampaignStatus, Contact, EmailTemplate,
};
use crate::domain::ports::{CampaignRepository, EmailSender, EmailTag, OutboundEmail};
use crate::error::{ContactError, SendError};

/// What happened to one contact during a send
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SendOutcome {
    /// Accepted by the provider
    Delivered { email: String, message_id: String },
    /// Contact is inactive; not mailed and not counted
    Skipped { email: String },
    /// Invalid address or provider rejection
    Bounced { email: String, error: String },
}

impl SendOutcome {
    /// Human-readable error entry for bounced contacts
    pub fn error_message(&self) -> Option<String> {
        match self {
            SendOutcome::Bounced { email, error } => Some(format!("{}: {}", email, error)),
            _ => None,
        }
    }
}

/// Result of a completed send
#[derive(Debug, Clone)]
pub struct SendReport {
    pub stats: CampaignStats,
    pub outcomes: Vec<SendOutcome>,
}

impl SendReport {
    pub fn summary(&self) -> String {
        format!(
            "Campaign sent successfully to {} recipients",
            self.stats.sent
        )
    }

    pub fn errors(&self) -> Vec<String> {
        self.outcomes
            .iter()
            .filter_map(SendOutcome::error_message)
            .collect()
    }
}

/// Aggregate per-contact outcomes into fresh campaign stats
pub fn tally(outcomes: &[SendOutcome]) -> CampaignStats {
    let (sent, bounced) = outcomes
        .iter()
        .fold((0u32, 0u32), |(sent, bounced), outcome| match outcome {
            SendOutcome::Delivered { .. } => (sent + 1, bounced),
            SendOutcome::Bounced { .. } => (sent, bounced + 1),
            SendOutcome::Skipped { .. } => (sent, bounced),
        });
    CampaignStats::new(sent, bounced)
}

/// Check the send preconditions, returning the template to render
pub fn check_eligibility(campaign: &Campaign) -> Result<&EmailTemplate, SendError> {
    if !campaign.is_draft() {
        return Err(SendError::InvalidState(campaign.status.clone()));
    }

    let template = campaign
        .template
        .as_ref()
        .filter(|t| t.has_content())
        .ok_or(SendError::MissingTemplate)?;

    if campaign.target_contacts.is_empty() {
        return Err(SendError::NoRecipients);
    }

    Ok(template)
}

/// Removes the campaign from the in-flight set when the send finishes
struct SendSlot<'a> {
    in_flight: &'a Mutex<HashSet<CampaignId>>,
    id: CampaignId,
}

impl Drop for SendSlot<'_> {
    fn drop(&mut self) {
        let mut in_flight = self.in_flight.lock().unwrap_or_else(|e| e.into_inner());
        in_flight.remove(&self.id);
    }
}

/// Service for sending campaigns
pub struct CampaignService<CR, ES>
where
    CR: CampaignRepository + ?Sized,
    ES: EmailSender + ?Sized,
{
    campaigns: Arc<CR>,
    email: Arc<ES>,
    /// Sender address, e.g. `Email Marketing <noreply@example.com>`
    from_address: String,
    in_flight: Mutex<HashSet<CampaignId>>,
}

impl<CR, ES> CampaignService<CR, ES>
where
    CR: CampaignRepository + ?Sized,
    ES: EmailSender + ?Sized,
{
    pub fn new(campaigns: Arc<CR>, email: Arc<ES>, from_address: String) -> Self {
        Self {
            campaigns,
            email,
            from_address,
            in_flight: Mutex::new(HashSet::new()),
        }
    }

    /// Send a Draft campaign to all of its active contacts
    pub async fn send_campaign(&self, id: &CampaignId) -> Result<SendReport, SendError> {
        self.send_campaign_on(id, Utc::now().date_naive()).await
    }

    /// Send a campaign, rendering date tokens for `today`
    pub async fn send_campaign_on(
        &self,
        id: &CampaignId,
        today: NaiveDate,
    ) -> Result<SendReport, SendError> {
        let _slot = self.claim_slot(id)?;

        let campaign = self
            .campaigns
            .find_by_id(id)
            .await?
            .ok_or_else(|| SendError::NotFound(id.clone()))?;

        let template = check_eligibility(&campaign)?;

        if !self.email.is_configured() {
            return Err(SendError::ProviderUnconfigured);
        }

        tracing::info!(
            campaign_id = %id,
            campaign = %campaign.name,
            recipients = campaign.target_contacts.len(),
            "Sending campaign"
        );

        let mut outcomes = Vec::with_capacity(campaign.target_contacts.len());
        for contact in &campaign.target_contacts {
            let outcome = self.deliver(&campaign, template, contact, today).await;
            outcomes.push(outcome);
        }

        let stats = tally(&outcomes);

        if let Err(e) = self
            .campaigns
            .transition_status(id, &CampaignStatus::Draft, &CampaignStatus::Sent, &stats)
            .await
        {
            tracing::error!(
                campaign_id = %id,
                sent = stats.sent,
                bounced = stats.bounced,
                error = %e,
                "Campaign emails dispatched but status update failed"
            );
            return Err(SendError::StatusUpdate { stats, source: e });
        }

        tracing::info!(
            campaign_id = %id,
            sent = stats.sent,
            bounced = stats.bounced,
            "Campaign sent"
        );

        Ok(SendReport { stats, outcomes })
    }

    fn claim_slot(&self, id: &CampaignId) -> Result<SendSlot<'_>, SendError> {
        let mut in_flight = self.in_flight.lock().unwrap_or_else(|e| e.into_inner());
        if !in_flight.insert(id.clone()) {
            return Err(SendError::AlreadySending(id.clone()));
        }
        Ok(SendSlot {
            in_flight: &self.in_flight,
            id: id.clone(),
        })
    }

    async fn deliver(
        &self,
        campaign: &Campaign,
        template: &EmailTemplate,
        contact: &Contact,
        today: NaiveDate,
    ) -> SendOutcome {
        match validate_contact(contact) {
            Ok(Eligibility::Eligible) => {}
            Ok(Eligibility::Inactive) => {
                tracing::debug!(contact_id = %contact.id, "Skipping inactive contact");
                return SendOutcome::Skipped {
                    email: contact.email.clone(),
                };
            }
            Err(e) => {
                let ContactError::InvalidAddress(email) = &e;
                tracing::warn!(contact_id = %contact.id, email = %email, "Invalid email address");
                return SendOutcome::Bounced {
                    email: email.clone(),
                    error: e.to_string(),
                };
            }
        }

        let to = contact.email.trim().to_string();
        let rendered = render(&template.subject, &template.content, contact, today);

        let message = OutboundEmail {
            from: self.from_address.clone(),
            to: to.clone(),
            subject: rendered.subject,
            html: sanitize_html(&rendered.body),
            tags: vec![
                EmailTag::new("campaign_id", campaign.id.0.clone()),
                EmailTag::new("template_id", template.id.0.clone()),
                EmailTag::new("contact_id", contact.id.0.clone()),
            ],
        };

        match self.email.send(&message).await {
            Ok(sent) => {
                tracing::debug!(contact_id = %contact.id, message_id = %sent.id, "Email sent");
                SendOutcome::Delivered {
                    email: to,
                    message_id: sent.id,
                }
            }
            Err(e) => {
                tracing::warn!(contact_id = %contact.id, email = %to, error = %e, "Failed to send email");
                SendOutcome::Bounced {
                    email: to,
                    error: e.to_string(),
                }
            }
        }
    }
}

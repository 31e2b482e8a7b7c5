//! Cosmic CMS client implementation
//!
//! Campaigns, templates and contacts are Cosmic objects. A campaign's
//! `template` and `target_contacts` metafields are object references, so the
//! campaign is read with `depth=1` to resolve them in one request.

use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use urlencoding::encode;

use crate::domain::entities::{
    Campaign, CampaignId, CampaignStats, CampaignStatus, Contact, ContactId, ContactStatus,
    EmailTemplate, TemplateId,
};
use crate::domain::ports::CampaignRepository;
use crate::error::{CmsError, DomainError};

const CAMPAIGN_PROPS: &str = "id,title,metadata";

/// Campaign repository backed by a Cosmic bucket
pub struct CosmicCampaignRepository {
    http: Client,
    base_url: String,
    bucket_slug: String,
    read_key: String,
    write_key: String,
}

impl CosmicCampaignRepository {
    pub fn new(base_url: String, bucket_slug: String, read_key: String, write_key: String) -> Self {
        Self {
            http: Client::new(),
            base_url: base_url.trim_end_matches('/').to_string(),
            bucket_slug,
            read_key,
            write_key,
        }
    }

    fn object_url(&self, id: &str) -> String {
        format!(
            "{}/v3/buckets/{}/objects/{}",
            self.base_url,
            encode(&self.bucket_slug),
            encode(id)
        )
    }

    async fn fetch_campaign(&self, id: &CampaignId) -> Result<Option<CosmicObject>, CmsError> {
        let url = format!(
            "{}?read_key={}&depth=1&props={}",
            self.object_url(&id.0),
            encode(&self.read_key),
            encode(CAMPAIGN_PROPS)
        );

        let response = self.http.get(&url).send().await?;

        if response.status().as_u16() == 404 {
            return Ok(None);
        }

        let body: ObjectResponse = self.handle_response(response).await?;
        Ok(Some(body.object))
    }

    async fn update_metadata(
        &self,
        id: &CampaignId,
        metadata: &StatusUpdate<'_>,
    ) -> Result<(), CmsError> {
        let response = self
            .http
            .patch(self.object_url(&id.0))
            .bearer_auth(&self.write_key)
            .json(&UpdateObjectRequest { metadata })
            .send()
            .await?;

        if response.status().as_u16() == 404 {
            return Err(CmsError::ObjectNotFound(id.0.clone()));
        }

        self.handle_empty_response(response).await
    }

    async fn handle_response<T: for<'de> Deserialize<'de>>(
        &self,
        response: reqwest::Response,
    ) -> Result<T, CmsError> {
        let status = response.status();

        if status.is_success() {
            response
                .json()
                .await
                .map_err(|e| CmsError::Deserialization(e.to_string()))
        } else if status.as_u16() == 401 || status.as_u16() == 403 {
            Err(CmsError::Unauthorized)
        } else {
            let message = response.text().await.unwrap_or_default();
            Err(CmsError::Api {
                status: status.as_u16(),
                message,
            })
        }
    }

    async fn handle_empty_response(&self, response: reqwest::Response) -> Result<(), CmsError> {
        let status = response.status();

        if status.is_success() {
            Ok(())
        } else if status.as_u16() == 401 || status.as_u16() == 403 {
            Err(CmsError::Unauthorized)
        } else {
            let message = response.text().await.unwrap_or_default();
            Err(CmsError::Api {
                status: status.as_u16(),
                message,
            })
        }
    }
}

#[async_trait]
impl CampaignRepository for CosmicCampaignRepository {
    async fn find_by_id(&self, id: &CampaignId) -> Result<Option<Campaign>, DomainError> {
        let object = self.fetch_campaign(id).await?;
        Ok(object.map(Campaign::from))
    }

    async fn transition_status(
        &self,
        id: &CampaignId,
        from: &CampaignStatus,
        to: &CampaignStatus,
        stats: &CampaignStats,
    ) -> Result<(), DomainError> {
        // Cosmic has no conditional writes; re-read right before patching so
        // a send that finished in the meantime is not overwritten.
        let current = self
            .fetch_campaign(id)
            .await?
            .ok_or_else(|| DomainError::NotFound(id.0.clone()))?;
        let current_status = current.metadata.status_value();
        if &current_status != from {
            return Err(DomainError::Conflict(format!(
                "campaign {} is {} (expected {})",
                id, current_status, from
            )));
        }

        let update = StatusUpdate {
            status: to.as_str(),
            stats,
        };
        self.update_metadata(id, &update).await?;

        tracing::debug!(campaign_id = %id, status = %to, "Campaign status updated");
        Ok(())
    }
}

/// Request types for Cosmic API
#[derive(Serialize)]
struct UpdateObjectRequest<'a> {
    metadata: &'a StatusUpdate<'a>,
}

#[derive(Serialize)]
struct StatusUpdate<'a> {
    status: &'a str,
    stats: &'a CampaignStats,
}

/// Response types from Cosmic API
#[derive(Deserialize)]
struct ObjectResponse {
    object: CosmicObject,
}

#[derive(Debug, Deserialize)]
struct CosmicObject {
    id: String,
    #[serde(default)]
    title: String,
    #[serde(default)]
    metadata: CampaignMetadata,
}

/// Select-dropdown metafields come back as `{key, value}`; older buckets
/// store a plain string.
#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum SelectValue {
    Dropdown { value: String },
    Plain(String),
}

impl SelectValue {
    fn as_str(&self) -> &str {
        match self {
            SelectValue::Dropdown { value } => value,
            SelectValue::Plain(value) => value,
        }
    }
}

#[derive(Debug, Default, Deserialize)]
struct CampaignMetadata {
    status: Option<SelectValue>,
    template: Option<TemplateObject>,
    #[serde(default)]
    target_contacts: Option<Vec<ContactObject>>,
}

impl CampaignMetadata {
    fn status_value(&self) -> CampaignStatus {
        self.status
            .as_ref()
            .map(|s| CampaignStatus::from(s.as_str()))
            .unwrap_or_else(|| CampaignStatus::Other(String::new()))
    }
}

#[derive(Debug, Deserialize)]
struct TemplateObject {
    id: String,
    metadata: Option<TemplateMetadata>,
}

#[derive(Debug, Deserialize)]
struct TemplateMetadata {
    #[serde(default)]
    subject: Option<String>,
    #[serde(default)]
    content: Option<String>,
}

#[derive(Debug, Deserialize)]
struct ContactObject {
    id: String,
    #[serde(default)]
    metadata: ContactMetadata,
}

#[derive(Debug, Default, Deserialize)]
struct ContactMetadata {
    email: Option<String>,
    first_name: Option<String>,
    last_name: Option<String>,
    status: Option<SelectValue>,
}

impl From<CosmicObject> for Campaign {
    fn from(o: CosmicObject) -> Self {
        let status = o.metadata.status_value();
        let template = o.metadata.template.and_then(|t| {
            // An unresolved reference has no metadata
            t.metadata.map(|m| EmailTemplate {
                id: TemplateId(t.id),
                subject: m.subject.unwrap_or_default(),
                content: m.content.unwrap_or_default(),
            })
        });

        Campaign {
            id: CampaignId(o.id),
            name: o.title,
            status,
            template,
            target_contacts: o
                .metadata
                .target_contacts
                .unwrap_or_default()
                .into_iter()
                .map(Contact::from)
                .collect(),
        }
    }
}

impl From<ContactObject> for Contact {
    fn from(c: ContactObject) -> Self {
        let status = ContactStatus::from_cms(c.metadata.status.as_ref().map(|s| s.as_str()));
        Contact {
            id: ContactId(c.id),
            email: c.metadata.email.unwrap_or_default(),
            first_name: c.metadata.first_name.filter(|s| !s.is_empty()),
            last_name: c.metadata.last_name.filter(|s| !s.is_empty()),
            status,
        }
    }
}

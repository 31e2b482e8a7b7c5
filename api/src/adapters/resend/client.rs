//! Resend API client implementation

use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};

use crate::domain::ports::{EmailSender, EmailTag, OutboundEmail, SentEmail};
use crate::error::EmailError;

/// Email sender backed by Resend
///
/// The API key is optional so the server can start without it; sends fail
/// with `EmailError::Unconfigured` until it is provided.
pub struct ResendClient {
    http: Client,
    base_url: String,
    api_key: Option<String>,
}

impl ResendClient {
    pub fn new(base_url: String, api_key: Option<String>) -> Self {
        Self {
            http: Client::new(),
            base_url: base_url.trim_end_matches('/').to_string(),
            api_key: api_key.filter(|k| !k.trim().is_empty()),
        }
    }

    async fn handle_response(&self, response: reqwest::Response) -> Result<SentEmail, EmailError> {
        let status = response.status();

        if status.is_success() {
            let body: SendEmailResponse = response
                .json()
                .await
                .map_err(|e| EmailError::Deserialization(e.to_string()))?;
            Ok(SentEmail { id: body.id })
        } else {
            let text = response.text().await.unwrap_or_default();
            let message = serde_json::from_str::<ResendErrorResponse>(&text)
                .map(|e| format!("{}: {}", e.name, e.message))
                .unwrap_or(text);
            Err(EmailError::Rejected {
                status: status.as_u16(),
                message,
            })
        }
    }
}

/// Request types for Resend API
#[derive(Serialize)]
struct SendEmailRequest<'a> {
    from: &'a str,
    to: [&'a str; 1],
    subject: &'a str,
    html: &'a str,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    tags: Vec<EmailTag>,
}

impl<'a> From<&'a OutboundEmail> for SendEmailRequest<'a> {
    fn from(email: &'a OutboundEmail) -> Self {
        Self {
            from: &email.from,
            to: [&email.to],
            subject: &email.subject,
            html: &email.html,
            tags: email
                .tags
                .iter()
                .map(|t| EmailTag::new(tag_safe(&t.name), tag_safe(&t.value)))
                .collect(),
        }
    }
}

/// Response types from Resend API
#[derive(Deserialize)]
struct SendEmailResponse {
    id: String,
}

#[derive(Deserialize)]
struct ResendErrorResponse {
    #[serde(default)]
    name: String,
    message: String,
}

/// Resend only accepts ASCII letters, digits, underscores and dashes in tags
fn tag_safe(s: &str) -> String {
    s.chars()
        .map(|c| {
            if c.is_ascii_alphanumeric() || c == '_' || c == '-' {
                c
            } else {
                '_'
            }
        })
        .collect()
}

#[async_trait]
impl EmailSender for ResendClient {
    fn is_configured(&self) -> bool {
        self.api_key.is_some()
    }

    async fn send(&self, email: &OutboundEmail) -> Result<SentEmail, EmailError> {
        let api_key = self.api_key.as_deref().ok_or(EmailError::Unconfigured)?;

        let response = self
            .http
            .post(format!("{}/emails", self.base_url))
            .bearer_auth(api_key)
            .json(&SendEmailRequest::from(email))
            .send()
            .await?;

        self.handle_response(response).await
    }
}

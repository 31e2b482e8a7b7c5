//! Email template domain entity

use serde::{Deserialize, Serialize};

/// Unique identifier for a template (the CMS object id)
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TemplateId(pub String);

impl std::fmt::Display for TemplateId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Subject and HTML body with `{{token}}` placeholders
#[derive(Debug, Clone)]
pub struct EmailTemplate {
    pub id: TemplateId,
    pub subject: String,
    pub content: String,
}

impl EmailTemplate {
    pub fn has_content(&self) -> bool {
        !self.content.trim().is_empty()
    }
}

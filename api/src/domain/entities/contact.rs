//! Contact domain entity

use serde::{Deserialize, Serialize};

/// Unique identifier for a contact (the CMS object id)
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ContactId(pub String);

impl std::fmt::Display for ContactId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Whether a contact should receive campaign email
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ContactStatus {
    Active,
    Inactive,
}

impl ContactStatus {
    /// Map a CMS status value. Anything other than "Active" (unsubscribed,
    /// bounced, ...) opts the contact out; a missing value means active.
    pub fn from_cms(value: Option<&str>) -> Self {
        match value {
            None | Some("Active") => ContactStatus::Active,
            Some(_) => ContactStatus::Inactive,
        }
    }
}

/// Contact entity
#[derive(Debug, Clone)]
pub struct Contact {
    pub id: ContactId,
    pub email: String,
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    pub status: ContactStatus,
}

//! Test fixtures
//!
//! Factory functions for creating test data with sensible defaults.
//! Each fixture function creates a valid entity that can be customized.

use std::sync::atomic::{AtomicU32, Ordering};

use crate::domain::entities::{
    Campaign, CampaignId, CampaignStatus, Contact, ContactId, ContactStatus, EmailTemplate,
    TemplateId,
};

static NEXT_ID: AtomicU32 = AtomicU32::new(1);

fn next_id(prefix: &str) -> String {
    format!("{}-{}", prefix, NEXT_ID.fetch_add(1, Ordering::Relaxed))
}

/// Create an active contact with a first name
pub fn test_contact(first_name: &str, email: &str) -> Contact {
    Contact {
        id: ContactId(next_id("contact")),
        email: email.to_string(),
        first_name: Some(first_name.to_string()),
        last_name: None,
        status: ContactStatus::Active,
    }
}

/// Create an active contact with only an email address
pub fn test_contact_with_email(email: &str) -> Contact {
    Contact {
        id: ContactId(next_id("contact")),
        email: email.to_string(),
        first_name: None,
        last_name: None,
        status: ContactStatus::Active,
    }
}

/// Create a template with a personalized subject and body
pub fn test_template() -> EmailTemplate {
    EmailTemplate {
        id: TemplateId(next_id("template")),
        subject: "News for {{first_name}}".to_string(),
        content: "<p>Hello {{first_name}}, here is the {{month}} {{year}} update.</p>"
            .to_string(),
    }
}

/// Create a Draft campaign targeting the given contacts
pub fn test_campaign(contacts: Vec<Contact>) -> Campaign {
    Campaign {
        id: CampaignId(next_id("campaign")),
        name: "Test campaign".to_string(),
        status: CampaignStatus::Draft,
        template: Some(test_template()),
        target_contacts: contacts,
    }
}

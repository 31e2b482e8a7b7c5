//! Contact eligibility checks
//!
//! Decides whether a contact can be mailed before any rendering happens.

use std::sync::OnceLock;

use regex::Regex;

use crate::domain::entities::{Contact, ContactStatus};
use crate::error::ContactError;

/// Result of validating a contact with a usable address
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Eligibility {
    Eligible,
    /// Opted out; skipped without counting as a bounce
    Inactive,
}

fn email_pattern() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| {
        Regex::new(r"^[^\s@]+@[^\s@]+\.[^\s@]+$").expect("email pattern is a valid regex")
    })
}

/// Check that an address looks like `local@domain.tld`
pub fn is_valid_email(email: &str) -> bool {
    email_pattern().is_match(email)
}

/// Validate a contact: address syntax first, then activity status.
pub fn validate_contact(contact: &Contact) -> Result<Eligibility, ContactError> {
    let email = contact.email.trim();
    if email.is_empty() || !is_valid_email(email) {
        return Err(ContactError::InvalidAddress(contact.email.clone()));
    }

    match contact.status {
        ContactStatus::Active => Ok(Eligibility::Eligible),
        ContactStatus::Inactive => Ok(Eligibility::Inactive),
    }
}

//! Template personalization
//!
//! Replaces `{{token}}` placeholders in a template's subject and body with
//! contact and date values. Unknown tokens are left as written.

use std::sync::OnceLock;

use chrono::{Datelike, NaiveDate};
use regex::{Captures, Regex};

use crate::domain::entities::Contact;

/// Used for `{{first_name}}` when the contact has no first name
pub const FIRST_NAME_FALLBACK: &str = "Friend";

/// A subject and body ready for one recipient
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RenderedEmail {
    pub subject: String,
    pub body: String,
}

/// Render a template's subject and body for a contact on a given date
pub fn render(subject: &str, body: &str, contact: &Contact, today: NaiveDate) -> RenderedEmail {
    let values = TokenValues::new(contact, today);
    RenderedEmail {
        subject: substitute(subject, &values),
        body: substitute(body, &values),
    }
}

fn token_pattern() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| {
        Regex::new(r"\{\{(first_name|last_name|month|year)\}\}")
            .expect("token pattern is a valid regex")
    })
}

/// Values for the recognized tokens, keyed by token name
struct TokenValues {
    first_name: String,
    last_name: String,
    month: String,
    year: String,
}

impl TokenValues {
    fn new(contact: &Contact, today: NaiveDate) -> Self {
        let first_name = contact
            .first_name
            .as_deref()
            .filter(|name| !name.trim().is_empty())
            .unwrap_or(FIRST_NAME_FALLBACK);

        Self {
            first_name: first_name.to_string(),
            last_name: contact.last_name.clone().unwrap_or_default(),
            month: today.format("%B").to_string(),
            year: format!("{:04}", today.year()),
        }
    }

    fn get(&self, token: &str) -> &str {
        match token {
            "first_name" => &self.first_name,
            "last_name" => &self.last_name,
            "month" => &self.month,
            "year" => &self.year,
            _ => unreachable!("token pattern only matches known names"),
        }
    }
}

// Single pass, so substituted values are never themselves re-expanded
fn substitute(input: &str, values: &TokenValues) -> String {
    token_pattern()
        .replace_all(input, |caps: &Captures| values.get(&caps[1]).to_string())
        .into_owned()
}

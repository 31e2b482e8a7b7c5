//! Domain entities
//!
//! Pure domain models representing core business concepts.
//! These are separate from the CMS wire types in the `adapters::cosmic` module.

pub mod campaign;
pub mod contact;
pub mod template;

pub use campaign::{Campaign, CampaignId, CampaignStats, CampaignStatus};
pub use contact::{Contact, ContactId, ContactStatus};
pub use template::{EmailTemplate, TemplateId};

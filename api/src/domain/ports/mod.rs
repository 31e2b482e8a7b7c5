//! Domain ports (traits)
//!
//! Port traits define interfaces that the domain layer requires.
//! Adapters provide concrete implementations of these traits.

pub mod email;
pub mod repositories;

pub use email::{EmailSender, EmailTag, OutboundEmail, SentEmail};
pub use repositories::CampaignRepository;

//! Application layer
//!
//! Contains use cases and service orchestration.
//! Services coordinate between domain entities, ports, and external systems.

pub mod campaign_service;
pub mod contact_validator;
pub mod sanitizer;
pub mod template_renderer;

pub use campaign_service::{CampaignService, SendOutcome, SendReport};

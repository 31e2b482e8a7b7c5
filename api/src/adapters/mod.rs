//! Adapters layer
//!
//! Implementations of port traits for external systems.

pub mod cosmic;
pub mod resend;

pub use cosmic::CosmicCampaignRepository;
pub use resend::ResendClient;

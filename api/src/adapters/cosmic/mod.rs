//! Cosmic adapter
//!
//! Campaign repository backed by the Cosmic headless CMS REST API.

pub mod client;

pub use client::CosmicCampaignRepository;

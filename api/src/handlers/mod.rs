//! HTTP handlers
//!
//! Axum request handlers for the API endpoints.

pub mod auth;
pub mod campaigns;

pub use auth::{login, logout};
pub use campaigns::send_campaign;

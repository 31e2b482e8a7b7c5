//! Resend adapter
//!
//! Email sender backed by the Resend HTTP API.

pub mod client;

pub use client::ResendClient;

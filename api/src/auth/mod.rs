//! Dashboard access gate
//!
//! A shared access code exchanged for a signed session cookie.

pub mod session;

pub use session::{session_middleware, SessionSettings};

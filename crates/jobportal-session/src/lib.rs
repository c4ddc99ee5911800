//! Durable session store for the JobPortal client.
//!
//! This crate provides:
//! - Persistence of the bearer token and cached user profile
//! - The `is_authenticated` predicate every caller gates on
//! - Fail-safe reads that degrade corruption to "logged out"

pub mod error;
pub mod store;

pub use error::{SessionError, SessionResult};
pub use store::SessionStore;

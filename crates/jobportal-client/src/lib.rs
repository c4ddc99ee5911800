//! HTTP client and feature services for the JobPortal API.
//!
//! This crate provides:
//! - [`ApiClient`]: the single chokepoint for outbound calls — bearer
//!   injection, envelope normalization, multipart uploads
//! - [`QueryBuilder`]: percent-encoded query strings for list endpoints
//! - [`AuthService`] and [`JobService`]: one method per backend operation
//!
//! A `success: false` envelope is a normal `Ok` outcome everywhere; only
//! transport failures and undecodable bodies surface as [`ClientError`].

pub mod auth;
pub mod client;
pub mod error;
pub mod jobs;
pub mod query;

pub use auth::AuthService;
pub use client::{ApiClient, ApiClientConfig};
pub use error::{ClientError, ClientResult};
pub use jobs::JobService;
pub use query::QueryBuilder;

//! Shared data models for the JobPortal client.
//!
//! This crate provides Serde-serializable types for:
//! - Users, roles and profile forms
//! - Jobs, companies and applications
//! - Search filters and sort options
//! - The API response envelope and pagination schemas

pub mod application;
pub mod company;
pub mod envelope;
pub mod job;
pub mod search;
pub mod user;

// Re-export common types
pub use application::{ApplicationCheck, ApplicationStatus, JobApplication, UploadData};
pub use company::Company;
pub use envelope::{ApiEnvelope, EnvelopeFailure, PaginatedResponse, Pagination};
pub use job::{ExperienceLevel, Job, JobForm, JobStats, JobStatus, JobType};
pub use search::{JobSearchFilters, SortBy, SortOptions, SortOrder};
pub use user::{
    AuthData, LoginForm, MessageData, ProfilePictureData, ProfileUpdate, RegisterForm, UserProfile,
    UserRole,
};

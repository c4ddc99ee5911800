//! User account types and auth request/response payloads.

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

/// Account role. Drives which operations the backend accepts for a user.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "snake_case")]
pub enum UserRole {
    /// Candidate searching and applying for jobs
    JobSeeker,
    /// Company account posting jobs and reviewing applications
    Employer,
    /// Platform administrator
    Admin,
}

impl UserRole {
    /// All known roles.
    pub const ALL: &'static [UserRole] = &[UserRole::JobSeeker, UserRole::Employer, UserRole::Admin];

    pub fn as_str(&self) -> &'static str {
        match self {
            UserRole::JobSeeker => "job_seeker",
            UserRole::Employer => "employer",
            UserRole::Admin => "admin",
        }
    }

    /// Whether this role may post and manage job listings.
    pub fn can_manage_jobs(&self) -> bool {
        matches!(self, UserRole::Employer | UserRole::Admin)
    }
}

impl fmt::Display for UserRole {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for UserRole {
    type Err = UserRoleParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "job_seeker" => Ok(UserRole::JobSeeker),
            "employer" => Ok(UserRole::Employer),
            "admin" => Ok(UserRole::Admin),
            _ => Err(UserRoleParseError(s.to_string())),
        }
    }
}

#[derive(Debug, Error)]
#[error("Unknown user role: {0}")]
pub struct UserRoleParseError(String);

/// A user account as returned by the backend.
///
/// Replaced wholesale on every auth/profile response; never patched
/// field-by-field on the client side.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct UserProfile {
    pub id: String,
    pub email: String,
    pub first_name: String,
    pub last_name: String,
    /// Wire key is `userType`.
    #[serde(rename = "userType")]
    pub role: UserRole,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub profile_picture: Option<String>,
    pub created_at: chrono::DateTime<chrono::Utc>,
    pub updated_at: chrono::DateTime<chrono::Utc>,
}

impl UserProfile {
    /// Display name for UI surfaces.
    pub fn full_name(&self) -> String {
        format!("{} {}", self.first_name, self.last_name)
    }
}

/// Login request body.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
pub struct LoginForm {
    pub email: String,
    pub password: String,
}

/// Registration request body.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct RegisterForm {
    pub email: String,
    pub password: String,
    pub confirm_password: String,
    pub first_name: String,
    pub last_name: String,
    /// The backend only accepts `job_seeker` or `employer` here; `admin`
    /// registration is rejected server-side.
    #[serde(rename = "userType")]
    pub role: UserRole,
}

/// Partial profile update. Fields left as `None` are not sent.
#[derive(Debug, Clone, Default, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct ProfileUpdate {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub first_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub last_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub phone: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub location: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub experience: Option<u32>,
    #[serde(skip_serializing_if = "Vec::is_empty", default)]
    pub skills: Vec<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub bio: Option<String>,
}

/// Payload of successful login/register responses.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
pub struct AuthData {
    pub user: UserProfile,
    pub token: String,
}

/// Payload of operations that only acknowledge with a message.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
pub struct MessageData {
    pub message: String,
}

/// Payload of a profile picture upload.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct ProfilePictureData {
    pub profile_picture: String,
}

//! Response envelope and pagination schemas.
//!
//! Every backend endpoint wraps its payload in [`ApiEnvelope`]. Callers
//! branch on `success` only; a `success: false` envelope is a normal,
//! representable outcome of a call, not a client failure.

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Uniform wrapper around every backend response.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct ApiEnvelope<T> {
    pub success: bool,
    /// Present iff `success` is true.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<T>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl<T> ApiEnvelope<T> {
    /// Build a failed envelope carrying a human-readable reason.
    pub fn failure(reason: impl Into<String>) -> Self {
        Self {
            success: false,
            data: None,
            message: None,
            error: Some(reason.into()),
        }
    }

    pub fn is_success(&self) -> bool {
        self.success
    }

    /// The human-readable reason attached to a failed envelope, if any.
    pub fn failure_reason(&self) -> Option<&str> {
        self.error.as_deref().or(self.message.as_deref())
    }

    /// Unwrap into the payload, or an [`EnvelopeFailure`] describing why
    /// the operation did not succeed.
    pub fn into_result(self) -> Result<T, EnvelopeFailure> {
        if self.success {
            self.data.ok_or(EnvelopeFailure::MissingData)
        } else {
            Err(EnvelopeFailure::Rejected(
                self.failure_reason().unwrap_or("request failed").to_string(),
            ))
        }
    }

    /// Re-wrap a failed envelope under a different payload type.
    ///
    /// Used when a preparatory call (e.g. a file upload) fails and its
    /// outcome must be reported as the enclosing operation's result.
    pub fn failure_as<U>(&self) -> ApiEnvelope<U> {
        ApiEnvelope {
            success: false,
            data: None,
            message: self.message.clone(),
            error: self.error.clone(),
        }
    }
}

/// Why [`ApiEnvelope::into_result`] produced no payload.
#[derive(Debug, Error)]
pub enum EnvelopeFailure {
    #[error("Request rejected: {0}")]
    Rejected(String),
    #[error("Successful envelope carried no data")]
    MissingData,
}

/// Page bookkeeping attached to list responses.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct Pagination {
    pub page: u32,
    pub limit: u32,
    pub total: u64,
    pub total_pages: u32,
}

/// A page of results plus its bookkeeping.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct PaginatedResponse<T> {
    pub data: Vec<T>,
    pub pagination: Pagination,
}

//! API client error types.
//!
//! Only conditions where no usable envelope exists are errors here; a
//! well-formed `success: false` envelope is returned as a normal value so
//! callers can always tell "the backend said no" from "no answer arrived".

use thiserror::Error;

/// Result type for API client operations.
pub type ClientResult<T> = Result<T, ClientError>;

#[derive(Debug, Error)]
pub enum ClientError {
    /// No response reached the client (connection refused, timeout, DNS).
    #[error("Network error: {0}")]
    Transport(#[from] reqwest::Error),

    /// A response arrived but its body was not a parsable envelope.
    #[error("Undecodable response body (HTTP {status}): {source}")]
    Decode {
        status: u16,
        #[source]
        source: serde_json::Error,
    },

    /// A local file could not be read ahead of an upload.
    #[error("Failed to read {path}: {source}")]
    File {
        path: String,
        #[source]
        source: std::io::Error,
    },
}

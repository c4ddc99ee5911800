//! Session store error types.

use thiserror::Error;

/// Result type for session store operations.
pub type SessionResult<T> = Result<T, SessionError>;

/// Errors that can occur while persisting a session.
///
/// These surface only from writes ([`SessionStore::save`]); reads degrade
/// to "not authenticated" instead of erroring into the caller.
///
/// [`SessionStore::save`]: crate::SessionStore::save
#[derive(Debug, Error)]
pub enum SessionError {
    #[error("Failed to prepare session directory: {0}")]
    Directory(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

impl SessionError {
    pub fn directory(msg: impl Into<String>) -> Self {
        Self::Directory(msg.into())
    }
}

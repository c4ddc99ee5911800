//! Session persistence.

use std::fs;
use std::path::{Path, PathBuf};

use jobportal_models::UserProfile;
use tracing::{debug, warn};

use crate::error::{SessionError, SessionResult};

/// Fixed entry name for the bearer token.
const TOKEN_ENTRY: &str = "token";
/// Fixed entry name for the serialized user profile.
const USER_ENTRY: &str = "user.json";
/// Suffix for staged entries awaiting commit.
const STAGE_SUFFIX: &str = ".tmp";

/// Environment variable overriding the default session directory.
const SESSION_DIR_ENV: &str = "JOBPORTAL_SESSION_DIR";
/// Default session directory, relative to the working directory.
const DEFAULT_SESSION_DIR: &str = ".jobportal";

/// Durable holder of the current bearer token and cached user profile.
///
/// The token and the profile are set and cleared together: after any
/// completed operation either both entries exist or neither does, and
/// [`is_authenticated`](SessionStore::is_authenticated) is the single
/// predicate callers gate authenticated behavior on.
///
/// Concurrent writers are not sequenced against each other; each entry is
/// committed with a rename, and the last completed write wins.
#[derive(Debug, Clone)]
pub struct SessionStore {
    dir: PathBuf,
}

impl SessionStore {
    /// Open a store rooted at `dir`, creating the directory if needed.
    pub fn new(dir: impl Into<PathBuf>) -> SessionResult<Self> {
        let dir = dir.into();
        fs::create_dir_all(&dir)
            .map_err(|e| SessionError::directory(format!("{}: {}", dir.display(), e)))?;
        Ok(Self { dir })
    }

    /// Open the default store, honoring `JOBPORTAL_SESSION_DIR`.
    pub fn open_default() -> SessionResult<Self> {
        let dir = std::env::var(SESSION_DIR_ENV)
            .unwrap_or_else(|_| DEFAULT_SESSION_DIR.to_string());
        Self::new(dir)
    }

    /// Persist `token` and `user` together.
    ///
    /// Both entries are staged before either is committed; if anything
    /// fails mid-way the store is rolled back to fully cleared and the
    /// error is returned, so a caller never observes a half-written
    /// session.
    pub fn save(&self, token: &str, user: &UserProfile) -> SessionResult<()> {
        let encoded = serde_json::to_vec(user)?;

        if let Err(e) = self.commit(token.as_bytes(), &encoded) {
            warn!("Session save failed, clearing partial state: {}", e);
            self.clear();
            return Err(e);
        }

        debug!(user_id = %user.id, "Session saved");
        Ok(())
    }

    fn commit(&self, token: &[u8], user: &[u8]) -> SessionResult<()> {
        let token_stage = self.stage_path(TOKEN_ENTRY);
        let user_stage = self.stage_path(USER_ENTRY);

        fs::write(&token_stage, token)?;
        fs::write(&user_stage, user)?;
        fs::rename(&token_stage, self.entry_path(TOKEN_ENTRY))?;
        fs::rename(&user_stage, self.entry_path(USER_ENTRY))?;
        Ok(())
    }

    /// Remove both entries unconditionally. Succeeds when nothing is
    /// stored; unexpected storage errors are logged, not raised.
    pub fn clear(&self) {
        for entry in [TOKEN_ENTRY, USER_ENTRY] {
            remove_quietly(&self.entry_path(entry));
            remove_quietly(&self.stage_path(entry));
        }
        debug!("Session cleared");
    }

    /// The persisted bearer token, returned as opaque text.
    pub fn current_token(&self) -> Option<String> {
        read_quietly(&self.entry_path(TOKEN_ENTRY))
            .and_then(|bytes| String::from_utf8(bytes).ok())
            .filter(|token| !token.is_empty())
    }

    /// The persisted user profile.
    ///
    /// A corrupt or foreign persisted value clears the whole session and
    /// reads as logged out; this never errors into the caller.
    pub fn current_user(&self) -> Option<UserProfile> {
        let bytes = read_quietly(&self.entry_path(USER_ENTRY))?;
        match serde_json::from_slice(&bytes) {
            Ok(user) => Some(user),
            Err(e) => {
                warn!("Persisted user profile is undecodable, clearing session: {}", e);
                self.clear();
                None
            }
        }
    }

    /// True iff both the token and the user profile are present.
    pub fn is_authenticated(&self) -> bool {
        self.current_token().is_some() && self.current_user().is_some()
    }

    fn entry_path(&self, entry: &str) -> PathBuf {
        self.dir.join(entry)
    }

    fn stage_path(&self, entry: &str) -> PathBuf {
        self.dir.join(format!("{entry}{STAGE_SUFFIX}"))
    }
}

fn read_quietly(path: &Path) -> Option<Vec<u8>> {
    match fs::read(path) {
        Ok(bytes) => Some(bytes),
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => None,
        Err(e) => {
            warn!("Failed to read {}: {}", path.display(), e);
            None
        }
    }
}

fn remove_quietly(path: &Path) {
    if let Err(e) = fs::remove_file(path) {
        if e.kind() != std::io::ErrorKind::NotFound {
            warn!("Failed to remove {}: {}", path.display(), e);
        }
    }
}

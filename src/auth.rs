use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use tracing::{debug, warn};
use uuid::Uuid;

use crate::error::AuthError;

const SESSION_FILE: &str = "session.json";

/// Opaque token held for the logged-in user. Never validated locally.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SessionToken {
    pub username: String,
    pub token: String,
    pub issued_at: DateTime<Utc>,
}

/// Token slot persisted under the state directory
pub struct TokenStore {
    dir: PathBuf,
}

impl TokenStore {
    pub fn new(state_dir: &Path) -> Self {
        Self {
            dir: state_dir.to_path_buf(),
        }
    }

    /// Current token, if any. An unreadable slot counts as logged out.
    pub fn load(&self) -> Option<SessionToken> {
        let path = self.path();
        if !path.exists() {
            return None;
        }
        let content = fs::read_to_string(&path).ok()?;
        match serde_json::from_str(&content) {
            Ok(token) => Some(token),
            Err(e) => {
                warn!("Ignoring unreadable session file {}: {}", path.display(), e);
                None
            }
        }
    }

    pub fn login(&self, username: &str, password: &str) -> Result<SessionToken, AuthError> {
        if username.trim().is_empty() || password.is_empty() {
            return Err(AuthError::MissingCredentials);
        }

        let token = SessionToken {
            username: username.trim().to_string(),
            token: Uuid::new_v4().to_string(),
            issued_at: Utc::now(),
        };
        self.save(&token)?;
        debug!("Stored session token for {}", token.username);
        Ok(token)
    }

    /// Clear the slot. Returns false when nobody was logged in.
    pub fn logout(&self) -> Result<bool, AuthError> {
        let path = self.path();
        if !path.exists() {
            return Ok(false);
        }
        fs::remove_file(&path).map_err(|source| AuthError::Write { path, source })?;
        Ok(true)
    }

    fn save(&self, token: &SessionToken) -> Result<(), AuthError> {
        fs::create_dir_all(&self.dir).map_err(|source| AuthError::Write {
            path: self.dir.clone(),
            source,
        })?;

        let path = self.path();
        let json = serde_json::to_string_pretty(token)?;
        fs::write(&path, json).map_err(|source| AuthError::Write { path, source })
    }

    fn path(&self) -> PathBuf {
        self.dir.join(SESSION_FILE)
    }
}

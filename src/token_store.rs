//! Durable storage for the session bearer token.
//!
//! The token lives in `~/.vouch/auth.json` and is re-read on every
//! outgoing request, so an external edit (or deletion) takes effect
//! immediately. There is no local expiry or refresh logic — the token
//! stays until `clear()` removes it, and the service alone decides
//! whether it is still honoured.

use anyhow::Result;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::PathBuf;

/// On-disk auth file structure.
#[derive(Debug, Serialize, Deserialize)]
struct AuthFile {
    token: String,
}

/// Handle to the auth file. Cheap to clone; holds only the path.
#[derive(Debug, Clone)]
pub struct TokenStore {
    path: PathBuf,
}

/// Base directory for vouch state (`~/.vouch`, or `$VOUCH_HOME`).
pub fn vouch_home() -> PathBuf {
    if let Ok(home) = std::env::var("VOUCH_HOME") {
        return PathBuf::from(home);
    }
    dirs::home_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join(".vouch")
}

impl TokenStore {
    /// Store at the default location under [`vouch_home`].
    pub fn new() -> Self {
        Self {
            path: vouch_home().join("auth.json"),
        }
    }

    /// Load the stored token. A missing or unparseable file reads as
    /// "no token" rather than an error.
    pub fn load(&self) -> Option<String> {
        let content = fs::read_to_string(&self.path).ok()?;
        let auth: AuthFile = serde_json::from_str(&content).ok()?;
        Some(auth.token)
    }

    /// Persist a token, creating the parent directory if needed.
    pub fn save(&self, token: &str) -> Result<()> {
        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent)?;
        }
        let auth = AuthFile {
            token: token.to_string(),
        };
        fs::write(&self.path, serde_json::to_string_pretty(&auth)?)?;
        Ok(())
    }

    /// Remove the stored token. Removing an already-absent file is fine.
    pub fn clear(&self) -> Result<()> {
        match fs::remove_file(&self.path) {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(()),
            Err(e) => Err(e.into()),
        }
    }
}

impl Default for TokenStore {
    fn default() -> Self {
        Self::new()
    }
}

//! Session and bearer-token storage.
//!
//! The token is persisted in `<home>/token.json` with restricted permissions
//! (0600). Tokens are never logged in full. All access goes through an
//! explicit [`Session`] object owned by the API client; there is no global
//! mutable token state.

use std::fs::{self, OpenOptions};
use std::io::Write;
use std::path::PathBuf;
use std::sync::RwLock;

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

use crate::config::paths;

/// The signed-in user, held in memory for the lifetime of the session.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct User {
    pub name: String,
    pub email: String,
}

/// On-disk token record.
#[derive(Debug, Clone, Serialize, Deserialize)]
struct StoredToken {
    access_token: String,
    token_type: String,
}

/// Session context: the bearer token plus its persistence.
///
/// Interior mutability lets the authentication path replace the token while
/// the HTTP client holds a shared reference.
#[derive(Debug)]
pub struct Session {
    path: PathBuf,
    token: RwLock<Option<String>>,
}

impl Session {
    /// Loads the session from the default token path.
    pub fn load() -> Self {
        Self::load_from(paths::token_path())
    }

    /// Loads the session from a specific token file.
    ///
    /// A missing or unreadable file yields an empty session; a corrupt token
    /// file is not fatal, it just means the user is signed out.
    pub fn load_from(path: PathBuf) -> Self {
        let token = fs::read_to_string(&path)
            .ok()
            .and_then(|contents| serde_json::from_str::<StoredToken>(&contents).ok())
            .map(|stored| stored.access_token);
        Self {
            path,
            token: RwLock::new(token),
        }
    }

    /// Returns a copy of the current bearer token, if signed in.
    pub fn token(&self) -> Option<String> {
        self.token.read().ok().and_then(|guard| guard.clone())
    }

    /// Returns true if a bearer token is present.
    pub fn is_authenticated(&self) -> bool {
        self.token.read().is_ok_and(|guard| guard.is_some())
    }

    /// Stores a new bearer token in memory and on disk.
    pub fn set_token(&self, access_token: &str) -> Result<()> {
        if let Ok(mut guard) = self.token.write() {
            *guard = Some(access_token.to_string());
        }

        let stored = StoredToken {
            access_token: access_token.to_string(),
            token_type: "bearer".to_string(),
        };
        let contents =
            serde_json::to_string_pretty(&stored).context("Failed to serialize token")?;
        self.write_restricted(&contents)
    }

    /// Clears the token in memory and removes the token file.
    ///
    /// Returns true if a persisted token existed.
    pub fn clear_token(&self) -> Result<bool> {
        if let Ok(mut guard) = self.token.write() {
            *guard = None;
        }
        if self.path.exists() {
            fs::remove_file(&self.path)
                .with_context(|| format!("Failed to remove {}", self.path.display()))?;
            return Ok(true);
        }
        Ok(false)
    }

    /// Writes the token file with 0600 permissions.
    fn write_restricted(&self, contents: &str) -> Result<()> {
        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent)
                .with_context(|| format!("Failed to create directory {}", parent.display()))?;
        }

        #[cfg(unix)]
        {
            use std::os::unix::fs::OpenOptionsExt;
            let mut file = OpenOptions::new()
                .write(true)
                .create(true)
                .truncate(true)
                .mode(0o600)
                .open(&self.path)
                .with_context(|| format!("Failed to open {} for writing", self.path.display()))?;
            file.write_all(contents.as_bytes())
                .with_context(|| format!("Failed to write to {}", self.path.display()))?;
        }

        #[cfg(not(unix))]
        {
            fs::write(&self.path, contents)
                .with_context(|| format!("Failed to write to {}", self.path.display()))?;
        }

        Ok(())
    }
}

/// Masks a token for display: first 8 characters plus an ellipsis.
pub fn mask_token(token: &str) -> String {
    let prefix: String = token.chars().take(8).collect();
    format!("{prefix}...")
}

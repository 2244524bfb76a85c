//! Session storage: the auth token and cached user profile.
//!
//! Durable key-value storage for the session: a single JSON file under
//! `${HABITCTL_HOME}` holding two fixed keys (`authToken`, `userData`),
//! written with restricted permissions (0600). Tokens are opaque and never
//! validated or logged in full.

use std::fs::{self, OpenOptions};
use std::io::Write;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

use crate::config::paths;

/// Minimal user profile cached next to the token.
///
/// `email` is absent when the profile was derived from login input alone;
/// it fills in after a profile view or update.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserProfile {
    pub username: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
}

/// On-disk session payload. The serde renames are the two fixed storage
/// key names.
#[derive(Debug, Default, Clone, Serialize, Deserialize)]
struct SessionData {
    #[serde(rename = "authToken", default, skip_serializing_if = "Option::is_none")]
    auth_token: Option<String>,
    #[serde(rename = "userData", default, skip_serializing_if = "Option::is_none")]
    user: Option<UserProfile>,
}

/// Durable session store.
///
/// Every operation reads or writes the session file synchronously; there is
/// no in-memory caching, so concurrent processes observe each other's
/// logins and logouts.
#[derive(Debug, Clone)]
pub struct SessionStore {
    path: PathBuf,
}

impl SessionStore {
    /// Store at the default session path under `${HABITCTL_HOME}`.
    pub fn new() -> Self {
        Self {
            path: paths::session_path(),
        }
    }

    /// Store at an explicit path (tests, alternate homes).
    pub fn at(path: PathBuf) -> Self {
        Self { path }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Returns the stored token, treating an empty string as absent.
    pub fn token(&self) -> Result<Option<String>> {
        Ok(self.load()?.auth_token.filter(|t| !t.is_empty()))
    }

    /// Returns the cached user profile, if any.
    pub fn user(&self) -> Result<Option<UserProfile>> {
        Ok(self.load()?.user)
    }

    /// Stores the token and, when given, the profile.
    /// A `None` profile leaves any previously stored one in place.
    pub fn set_auth(&self, token: &str, user: Option<&UserProfile>) -> Result<()> {
        let mut data = self.load()?;
        data.auth_token = Some(token.to_string());
        if let Some(user) = user {
            data.user = Some(user.clone());
        }
        self.save(&data)
    }

    /// Replaces the cached profile without touching the token.
    pub fn set_user(&self, user: &UserProfile) -> Result<()> {
        let mut data = self.load()?;
        data.user = Some(user.clone());
        self.save(&data)
    }

    /// Removes both keys by deleting the session file.
    /// Returns whether a session existed.
    pub fn clear_auth(&self) -> Result<bool> {
        if self.path.exists() {
            fs::remove_file(&self.path)
                .with_context(|| format!("Failed to remove {}", self.path.display()))?;
            Ok(true)
        } else {
            Ok(false)
        }
    }

    /// Loads the session file. A missing file reads as an empty session.
    fn load(&self) -> Result<SessionData> {
        if !self.path.exists() {
            return Ok(SessionData::default());
        }

        let contents = fs::read_to_string(&self.path)
            .with_context(|| format!("Failed to read session from {}", self.path.display()))?;

        serde_json::from_str(&contents)
            .with_context(|| format!("Failed to parse session from {}", self.path.display()))
    }

    /// Saves the session file with restricted permissions (0600).
    fn save(&self, data: &SessionData) -> Result<()> {
        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent)
                .with_context(|| format!("Failed to create directory {}", parent.display()))?;
        }

        let contents =
            serde_json::to_string_pretty(data).context("Failed to serialize session")?;

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

impl Default for SessionStore {
    fn default() -> Self {
        Self::new()
    }
}

//! Session Context
//!
//! The login session (bearer token plus the cached user record) lives in a
//! single [`SessionContext`] created once at start-up and shared with the API
//! client and every view. `sign_in` and `sign_out` are the only mutation
//! points; persistence goes through a [`CredentialStore`].

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex, RwLock};
use thiserror::Error;

use crate::api::dto::User;

/// Bearer token plus the identity it was issued for
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Credential {
    pub token: String,
    #[serde(default)]
    pub user: User,
    #[serde(default = "Utc::now")]
    pub issued_at: DateTime<Utc>,
}

impl Credential {
    pub fn new(token: impl Into<String>, user: User) -> Self {
        Self {
            token: token.into(),
            user,
            issued_at: Utc::now(),
        }
    }
}

/// Errors raised while persisting or restoring a session
#[derive(Error, Debug)]
pub enum SessionError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Serialization(String),
}

impl From<serde_json::Error> for SessionError {
    fn from(err: serde_json::Error) -> Self {
        SessionError::Serialization(err.to_string())
    }
}

pub type SessionResult<T> = Result<T, SessionError>;

/// Persistent storage for the session credential
pub trait CredentialStore: Send + Sync {
    /// Read the stored credential, if any
    fn load(&self) -> SessionResult<Option<Credential>>;

    /// Replace the stored credential
    fn save(&self, credential: &Credential) -> SessionResult<()>;

    /// Remove the stored credential
    fn clear(&self) -> SessionResult<()>;
}

/// JSON file store with fixed keys `token`, `user` and `issued_at`
#[derive(Debug, Clone)]
pub struct FileCredentialStore {
    path: PathBuf,
}

impl FileCredentialStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl CredentialStore for FileCredentialStore {
    fn load(&self) -> SessionResult<Option<Credential>> {
        let content = match std::fs::read_to_string(&self.path) {
            Ok(content) => content,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(None),
            Err(e) => return Err(e.into()),
        };

        if content.trim().is_empty() {
            return Ok(None);
        }

        Ok(Some(serde_json::from_str(&content)?))
    }

    fn save(&self, credential: &Credential) -> SessionResult<()> {
        if let Some(parent) = self.path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        let content = serde_json::to_string_pretty(credential)?;
        std::fs::write(&self.path, content)?;
        Ok(())
    }

    fn clear(&self) -> SessionResult<()> {
        match std::fs::remove_file(&self.path) {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(()),
            Err(e) => Err(e.into()),
        }
    }
}

/// Store that keeps the credential in memory only
#[derive(Debug, Default)]
pub struct MemoryCredentialStore {
    slot: Mutex<Option<Credential>>,
}

impl MemoryCredentialStore {
    pub fn new() -> Self {
        Self::default()
    }

    fn slot(&self) -> std::sync::MutexGuard<'_, Option<Credential>> {
        self.slot.lock().unwrap_or_else(|e| e.into_inner())
    }
}

impl CredentialStore for MemoryCredentialStore {
    fn load(&self) -> SessionResult<Option<Credential>> {
        Ok(self.slot().clone())
    }

    fn save(&self, credential: &Credential) -> SessionResult<()> {
        *self.slot() = Some(credential.clone());
        Ok(())
    }

    fn clear(&self) -> SessionResult<()> {
        *self.slot() = None;
        Ok(())
    }
}

/// Shared login session
pub struct SessionContext {
    store: Box<dyn CredentialStore>,
    current: RwLock<Option<Credential>>,
}

impl SessionContext {
    /// Restore the session from `store`.
    ///
    /// An unreadable credential is logged and treated as signed out.
    pub fn open(store: impl CredentialStore + 'static) -> Arc<Self> {
        let current = match store.load() {
            Ok(credential) => credential,
            Err(e) => {
                tracing::warn!("Ignoring stored session: {}", e);
                None
            }
        };

        Arc::new(Self {
            store: Box::new(store),
            current: RwLock::new(current),
        })
    }

    /// Session that is never written to disk
    pub fn in_memory() -> Arc<Self> {
        Self::open(MemoryCredentialStore::new())
    }

    pub fn credential(&self) -> Option<Credential> {
        self.read().clone()
    }

    pub fn token(&self) -> Option<String> {
        self.read().as_ref().map(|c| c.token.clone())
    }

    pub fn user(&self) -> Option<User> {
        self.read().as_ref().map(|c| c.user.clone())
    }

    pub fn is_authenticated(&self) -> bool {
        self.read().is_some()
    }

    /// Persist a freshly issued credential and make it current
    pub fn sign_in(&self, token: impl Into<String>, user: User) -> SessionResult<()> {
        let credential = Credential::new(token, user);
        self.store.save(&credential)?;
        tracing::info!(user = %credential.user.display_name(), "Signed in");
        *self.write() = Some(credential);
        Ok(())
    }

    /// Forget the current credential
    pub fn sign_out(&self) -> SessionResult<()> {
        self.store.clear()?;
        if self.write().take().is_some() {
            tracing::info!("Signed out");
        }
        Ok(())
    }

    fn read(&self) -> std::sync::RwLockReadGuard<'_, Option<Credential>> {
        self.current.read().unwrap_or_else(|e| e.into_inner())
    }

    fn write(&self) -> std::sync::RwLockWriteGuard<'_, Option<Credential>> {
        self.current.write().unwrap_or_else(|e| e.into_inner())
    }
}

impl std::fmt::Debug for SessionContext {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SessionContext")
            .field("authenticated", &self.is_authenticated())
            .finish()
    }
}

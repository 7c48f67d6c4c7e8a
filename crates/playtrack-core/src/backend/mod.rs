//! Backend-as-a-service client.
//!
//! The hosted backend provides email/password authentication and a per-user
//! datastore for the tracked-game list and per-game stats blobs. The session
//! token lives in the OS keyring, never on disk.

pub mod auth;
pub mod store;

pub use auth::AuthClient;
pub use store::UserStore;

use serde::{Deserialize, Serialize};

use crate::error::AuthError;

/// Thin wrapper around the OS keyring for credential storage.
pub mod keyring_store {
    const SERVICE: &str = "playtrack";

    pub fn get(key: &str) -> Result<Option<String>, Box<dyn std::error::Error>> {
        let entry = keyring::Entry::new(SERVICE, key)?;
        match entry.get_password() {
            Ok(pw) => Ok(Some(pw)),
            Err(keyring::Error::NoEntry) => Ok(None),
            Err(e) => Err(e.into()),
        }
    }

    pub fn set(key: &str, value: &str) -> Result<(), Box<dyn std::error::Error>> {
        let entry = keyring::Entry::new(SERVICE, key)?;
        entry.set_password(value)?;
        Ok(())
    }

    pub fn delete(key: &str) -> Result<(), Box<dyn std::error::Error>> {
        let entry = keyring::Entry::new(SERVICE, key)?;
        match entry.delete_credential() {
            Ok(()) => Ok(()),
            Err(keyring::Error::NoEntry) => Ok(()),
            Err(e) => Err(e.into()),
        }
    }
}

const SESSION_KEY: &str = "backend_session";

/// An authenticated backend session, serialized into the keyring.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BackendSession {
    pub token: String,
    pub user_id: String,
    pub email: String,
}

impl BackendSession {
    /// Load the stored session, if any.
    pub fn load() -> Result<Option<Self>, AuthError> {
        let json = keyring_store::get(SESSION_KEY).map_err(|e| AuthError::Storage(e.to_string()))?;
        match json {
            Some(json) => {
                let session =
                    serde_json::from_str(&json).map_err(|e| AuthError::Storage(e.to_string()))?;
                Ok(Some(session))
            }
            None => Ok(None),
        }
    }

    /// Load the stored session or fail with `NotLoggedIn`.
    pub fn require() -> Result<Self, AuthError> {
        Self::load()?.ok_or(AuthError::NotLoggedIn)
    }

    pub fn save(&self) -> Result<(), AuthError> {
        let json = serde_json::to_string(self).map_err(|e| AuthError::Storage(e.to_string()))?;
        keyring_store::set(SESSION_KEY, &json).map_err(|e| AuthError::Storage(e.to_string()))
    }

    pub fn clear() -> Result<(), AuthError> {
        keyring_store::delete(SESSION_KEY).map_err(|e| AuthError::Storage(e.to_string()))
    }
}

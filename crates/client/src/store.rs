//! Durable token persistence behind a narrow get/set/clear seam.
//!
//! The store holds exactly one value: the opaque bearer token under the
//! [`AUTH_TOKEN_KEY`] key. No expiry metadata is stored; expiry is inferred
//! only from a later `unauthenticated` response. The trait exists so the
//! platform keychain can be swapped for an in-memory mock in tests.

use async_trait::async_trait;

/// Durable key holding the bearer token.
pub const AUTH_TOKEN_KEY: &str = "auth_token";

/// Persistent storage for the session's bearer token.
#[async_trait]
pub trait TokenStore: Send + Sync {
    /// Read the stored token; `None` when no token is stored.
    ///
    /// # Errors
    /// Returns an error string when the backing store fails.
    async fn get(&self) -> Result<Option<String>, String>;

    /// Persist a token, replacing any previous value.
    ///
    /// # Errors
    /// Returns an error string when the backing store fails.
    async fn set(&self, token: &str) -> Result<(), String>;

    /// Remove the stored token (idempotent).
    ///
    /// # Errors
    /// Returns an error string when the backing store fails.
    async fn clear(&self) -> Result<(), String>;
}

/// Platform-keychain backed token store.
///
/// Uses the OS credential service (macOS Keychain, Windows Credential
/// Manager, Linux Secret Service) namespaced by a service name.
#[derive(Debug, Clone)]
pub struct KeyringTokenStore {
    service: String,
}

impl KeyringTokenStore {
    /// Create a store namespaced by the given keychain service name.
    #[must_use]
    pub fn new(service: impl Into<String>) -> Self {
        Self { service: service.into() }
    }

    fn entry(&self) -> Result<keyring::Entry, keyring::Error> {
        keyring::Entry::new(&self.service, AUTH_TOKEN_KEY)
    }
}

#[async_trait]
impl TokenStore for KeyringTokenStore {
    async fn get(&self) -> Result<Option<String>, String> {
        match self.entry().and_then(|entry| entry.get_password()) {
            Ok(token) => Ok(Some(token)),
            Err(keyring::Error::NoEntry) => Ok(None),
            Err(err) => Err(err.to_string()),
        }
    }

    async fn set(&self, token: &str) -> Result<(), String> {
        self.entry().and_then(|entry| entry.set_password(token)).map_err(|err| err.to_string())
    }

    async fn clear(&self) -> Result<(), String> {
        match self.entry().and_then(|entry| entry.delete_credential()) {
            Ok(()) | Err(keyring::Error::NoEntry) => Ok(()),
            Err(err) => Err(err.to_string()),
        }
    }
}

//! Bearer token lifecycle: read-through cache, login exchange, logout.
//!
//! The provider is the single writer of the durable token store and the
//! session's in-memory token copy. It owns its own unauthenticated
//! [`AuthenticationClient`] (rebuilt lazily when the session URL moves), so
//! resolving a token never depends on the authenticated transport it feeds.

use std::sync::Arc;

use async_trait::async_trait;
use parking_lot::RwLock;
use tokio::sync::Mutex;
use tracing::{debug, info};

use crate::error::ClientError;
use crate::services::authentication::{AuthenticationClient, Verifier};
use crate::session::Session;
use crate::store::TokenStore;
use crate::transport::{TokenSource, Transport};

/// Obtains and maintains a valid bearer token.
///
/// State machine per provider: `NoToken → (get_token/login success) →
/// HasToken → (logout success) → NoToken`. The provider never detects
/// server-side rejection on its own; callers re-run [`TokenProvider::login`]
/// when a call fails `unauthenticated`.
pub struct TokenProvider {
    session: Arc<Session>,
    store: Arc<dyn TokenStore>,
    http: reqwest::Client,
    auth: RwLock<Option<(u64, AuthenticationClient)>>,
    // Single-flight guard: concurrent resolvers over an empty store share
    // one login exchange instead of racing their own.
    login_flight: Mutex<()>,
}

impl TokenProvider {
    /// Create a provider over the shared session and a durable store.
    #[must_use]
    pub fn new(session: Arc<Session>, store: Arc<dyn TokenStore>) -> Self {
        Self {
            session,
            store,
            http: Transport::http_client(),
            auth: RwLock::new(None),
            login_flight: Mutex::new(()),
        }
    }

    /// Authentication client bound to the unauthenticated transport,
    /// cached per session generation.
    fn authentication(&self) -> AuthenticationClient {
        let version = self.session.version();
        {
            let cached = self.auth.read();
            if let Some((cached_version, client)) = cached.as_ref() {
                if *cached_version == version {
                    return client.clone();
                }
            }
        }
        let client =
            AuthenticationClient::new(Transport::new(self.http.clone(), self.session.url(), None));
        *self.auth.write() = Some((version, client.clone()));
        client
    }

    async fn stored_token(&self) -> Result<Option<String>, ClientError> {
        match self.store.get().await.map_err(ClientError::Store)? {
            Some(token) if !token.is_empty() => Ok(Some(token)),
            _ => Ok(None),
        }
    }

    /// Persist an issued token. An empty response token never overwrites a
    /// previously stored value.
    async fn persist_if_issued(&self, token: &str) -> Result<(), ClientError> {
        if token.is_empty() {
            return Ok(());
        }
        self.store.set(token).await.map_err(ClientError::Store)?;
        self.session.set_token(token);
        info!("bearer token persisted");
        Ok(())
    }

    /// Resolve a valid bearer token.
    ///
    /// A non-empty stored token returns immediately with zero network
    /// calls. Otherwise one refresh login (`Verifier::Empty`,
    /// `auto_refresh=true`) runs; concurrent callers share that exchange.
    /// No retry on failure.
    ///
    /// # Errors
    /// Store failures and the login failure propagate to the caller.
    pub async fn get_token(&self) -> Result<String, ClientError> {
        if let Some(token) = self.stored_token().await? {
            return Ok(token);
        }

        let _flight = self.login_flight.lock().await;
        // Re-check: another caller may have finished the exchange while we
        // waited for the guard.
        if let Some(token) = self.stored_token().await? {
            return Ok(token);
        }

        debug!("no stored token, running refresh login");
        let response = self.authentication().login(&Verifier::Empty, true).await?;
        self.persist_if_issued(&response.token).await?;
        Ok(response.token)
    }

    /// Run one phase of the two-phase login exchange.
    ///
    /// Phase 1 (`Verifier::Channel`) makes the server send a one-time code
    /// and yields an empty token; phase 2 (`Verifier::Code`) yields the
    /// session token. Whatever the phase, a non-empty response token is
    /// persisted and mirrored into the session.
    ///
    /// # Errors
    /// The exchange failure propagates; nothing is persisted on failure.
    pub async fn login(&self, verifier: &Verifier) -> Result<String, ClientError> {
        let response = self.authentication().login(verifier, true).await?;
        self.persist_if_issued(&response.token).await?;
        Ok(response.token)
    }

    /// Invalidate the session remotely, then clear local state.
    ///
    /// The remote call runs first: when it fails the stored token stays
    /// intact and the operation is safely retryable.
    ///
    /// # Errors
    /// The remote failure or a store failure propagates to the caller.
    pub async fn logout(&self) -> Result<(), ClientError> {
        self.authentication().logout().await?;
        self.store.clear().await.map_err(ClientError::Store)?;
        self.session.clear_token();
        info!("logged out, token cleared");
        Ok(())
    }
}

#[async_trait]
impl TokenSource for TokenProvider {
    async fn token(&self) -> Result<String, ClientError> {
        self.get_token().await
    }
}

impl std::fmt::Debug for TokenProvider {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TokenProvider").finish_non_exhaustive()
    }
}

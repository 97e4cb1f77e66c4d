//! Lazily derived, version-gated service client handles.
//!
//! The registry owns the single authenticated transport and the client
//! handles bound to it. Accessors are pure reads: no I/O, no errors. The
//! cached set is rebuilt only when the session version moved, so at any
//! instant there is at most one current transport and one consistent set of
//! handles. Token rotation alone does not need a rebuild to be observed
//! (resolution is per call), but rebuilding on it is harmless and keeps the
//! gate a plain version compare.

use std::sync::Arc;

use parking_lot::RwLock;
use tracing::debug;

use crate::services::authentication::AuthenticationClient;
use crate::services::management::ManagementClient;
use crate::services::planning::PlanningClient;
use crate::services::timing::TimingClient;
use crate::session::Session;
use crate::transport::{TokenSource, Transport};

struct Clients {
    version: u64,
    authentication: AuthenticationClient,
    management: ManagementClient,
    planning: PlanningClient,
    timing: TimingClient,
}

/// One accessor per backend service.
pub struct ClientRegistry {
    session: Arc<Session>,
    token_source: Arc<dyn TokenSource>,
    http: reqwest::Client,
    cached: RwLock<Option<Clients>>,
}

impl ClientRegistry {
    /// Create a registry over the shared session.
    ///
    /// `token_source` feeds the authenticated transport; in production this
    /// is the [`crate::TokenProvider`].
    #[must_use]
    pub fn new(session: Arc<Session>, token_source: Arc<dyn TokenSource>) -> Self {
        Self { session, token_source, http: Transport::http_client(), cached: RwLock::new(None) }
    }

    fn with_clients<T>(&self, select: impl Fn(&Clients) -> T) -> T {
        let version = self.session.version();
        {
            let cached = self.cached.read();
            if let Some(clients) = cached.as_ref() {
                if clients.version == version {
                    return select(clients);
                }
            }
        }

        let mut cached = self.cached.write();
        // Another accessor may have rebuilt while we waited for the lock.
        match cached.as_ref() {
            Some(clients) if clients.version == version => select(clients),
            _ => {
                let url = self.session.url();
                debug!(url = %url, version, "rebuilding service clients");
                let authenticated =
                    Transport::new(self.http.clone(), url.clone(), Some(self.token_source.clone()));
                let unauthenticated = Transport::new(self.http.clone(), url, None);
                let clients = Clients {
                    version,
                    authentication: AuthenticationClient::new(unauthenticated),
                    management: ManagementClient::new(authenticated.clone()),
                    planning: PlanningClient::new(authenticated.clone()),
                    timing: TimingClient::new(authenticated),
                };
                let selected = select(&clients);
                *cached = Some(clients);
                selected
            }
        }
    }

    /// Authentication service handle (unauthenticated transport).
    #[must_use]
    pub fn authentication(&self) -> AuthenticationClient {
        self.with_clients(|clients| clients.authentication.clone())
    }

    /// Management service handle.
    #[must_use]
    pub fn management(&self) -> ManagementClient {
        self.with_clients(|clients| clients.management.clone())
    }

    /// Planning service handle.
    #[must_use]
    pub fn planning(&self) -> PlanningClient {
        self.with_clients(|clients| clients.planning.clone())
    }

    /// Timing service handle.
    #[must_use]
    pub fn timing(&self) -> TimingClient {
        self.with_clients(|clients| clients.timing.clone())
    }
}

impl std::fmt::Debug for ClientRegistry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ClientRegistry").finish_non_exhaustive()
    }
}

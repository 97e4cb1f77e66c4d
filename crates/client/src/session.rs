//! Process-wide session state: base URL and current bearer token.
//!
//! The session is an explicit mutable context passed by `Arc` to every
//! constructor instead of framework-level reactivity. Mutations are
//! synchronous and last-write-wins; each effective change bumps a version
//! counter that derived resources (transports, client handles) compare
//! against to recompute lazily.

use parking_lot::RwLock;

#[derive(Debug, Default)]
struct Inner {
    url: String,
    token: String,
    version: u64,
}

/// Shared session context for one backend.
///
/// In-flight calls that already resolved their token are unaffected by a
/// mutation; only subsequent calls observe the new values.
#[derive(Debug, Default)]
pub struct Session {
    inner: RwLock<Inner>,
}

impl Session {
    /// Create a session pointing at the given base URL.
    #[must_use]
    pub fn new(url: impl Into<String>) -> Self {
        Self { inner: RwLock::new(Inner { url: url.into(), token: String::new(), version: 0 }) }
    }

    /// Set the backend base URL. Idempotent; a no-op write does not
    /// invalidate derived resources.
    pub fn set_url(&self, url: impl Into<String>) {
        let url = url.into();
        let mut inner = self.inner.write();
        if inner.url != url {
            inner.url = url;
            inner.version += 1;
        }
    }

    /// Set the current bearer token. Idempotent, last-write-wins.
    pub fn set_token(&self, token: impl Into<String>) {
        let token = token.into();
        let mut inner = self.inner.write();
        if inner.token != token {
            inner.token = token;
            inner.version += 1;
        }
    }

    /// Drop the in-memory token (the durable store is cleared separately).
    pub fn clear_token(&self) {
        self.set_token("");
    }

    /// Snapshot of the base URL.
    #[must_use]
    pub fn url(&self) -> String {
        self.inner.read().url.clone()
    }

    /// Snapshot of the current token (empty when logged out).
    #[must_use]
    pub fn token(&self) -> String {
        self.inner.read().token.clone()
    }

    /// Generation counter over `(url, token)`.
    #[must_use]
    pub fn version(&self) -> u64 {
        self.inner.read().version
    }
}

use async_trait::async_trait;
use parking_lot::Mutex;
use std::sync::Arc;

use crate::error::ClientError;
use crate::notify::Notifier;
use crate::store::TokenStore;
use crate::transport::TokenSource;

#[derive(Debug, Default)]
struct MemoryState {
    token: Option<String>,
    failure: Option<String>,
}

/// [`TokenStore`] double backed by process memory.
///
/// Clones share state, so a test can hold one handle for assertions while
/// the provider owns another. `fail_with` turns every subsequent operation
/// into an error, modeling a locked keychain.
#[derive(Debug, Default, Clone)]
pub struct MemoryTokenStore {
    state: Arc<Mutex<MemoryState>>,
}

impl MemoryTokenStore {
    /// Seed the store with a token, as if a prior session persisted it.
    pub fn preload(&self, token: &str) {
        self.state.lock().token = Some(token.to_owned());
    }

    /// Make every subsequent store operation fail with this message.
    pub fn fail_with(&self, message: &str) {
        self.state.lock().failure = Some(message.to_owned());
    }

    /// Current stored token, for assertions.
    #[must_use]
    pub fn stored(&self) -> Option<String> {
        self.state.lock().token.clone()
    }

    fn check_failure(&self) -> Result<(), String> {
        match &self.state.lock().failure {
            Some(message) => Err(message.clone()),
            None => Ok(()),
        }
    }
}

#[async_trait]
impl TokenStore for MemoryTokenStore {
    async fn get(&self) -> Result<Option<String>, String> {
        self.check_failure()?;
        Ok(self.state.lock().token.clone())
    }

    async fn set(&self, token: &str) -> Result<(), String> {
        self.check_failure()?;
        self.state.lock().token = Some(token.to_owned());
        Ok(())
    }

    async fn clear(&self) -> Result<(), String> {
        self.check_failure()?;
        self.state.lock().token = None;
        Ok(())
    }
}

/// [`Notifier`] double recording every notification it receives.
#[derive(Debug, Default)]
pub struct RecordingNotifier {
    received: Mutex<Vec<(String, String)>>,
}

impl RecordingNotifier {
    /// All notifications received so far, in order.
    #[must_use]
    pub fn notifications(&self) -> Vec<(String, String)> {
        self.received.lock().clone()
    }
}

impl Notifier for RecordingNotifier {
    fn notify(&self, name: &str, message: &str) {
        self.received.lock().push((name.to_owned(), message.to_owned()));
    }
}

/// [`TokenSource`] double resolving to a fixed token.
#[derive(Debug, Clone)]
pub struct StaticTokenSource {
    token: String,
}

impl StaticTokenSource {
    /// Source that always resolves to `token`.
    #[must_use]
    pub fn new(token: impl Into<String>) -> Self {
        Self { token: token.into() }
    }
}

#[async_trait]
impl TokenSource for StaticTokenSource {
    async fn token(&self) -> Result<String, ClientError> {
        Ok(self.token.clone())
    }
}

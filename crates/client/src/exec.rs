//! Error boundary for UI-triggered operations.
//!
//! [`Executor`] wraps a fallible asynchronous action so failures never
//! escape to the caller: an `unauthenticated` failure runs a caller-supplied
//! recovery (typically a fresh login) silently, anything else is surfaced
//! once through the [`Notifier`]. A processing flag is toggled around the
//! whole operation and settles to `false` on every exit path.
//!
//! State machine per call: `Idle → Processing → {Succeeded,
//! Failed-Recovered, Failed-Reported} → Idle`.

use std::future::{self, Future};
use std::sync::Arc;

use tracing::debug;

use crate::error::ClientError;
use crate::notify::Notifier;

type NoRecovery = fn() -> future::Ready<Result<(), ClientError>>;

/// Runs fallible actions against the report-or-recover policy.
#[derive(Clone)]
pub struct Executor {
    notifier: Arc<dyn Notifier>,
}

impl Executor {
    /// Create an executor reporting to the given sink.
    #[must_use]
    pub fn new(notifier: Arc<dyn Notifier>) -> Self {
        Self { notifier }
    }

    /// Run an action; report any failure to the sink.
    ///
    /// `on_processing` receives `true` before the action starts and `false`
    /// after it settled, regardless of outcome. Returns the action's value,
    /// or `None` on failure.
    pub async fn run<T, F>(&self, action: F, on_processing: impl FnMut(bool)) -> Option<T>
    where
        F: Future<Output = Result<T, ClientError>>,
    {
        self.dispatch(action, None::<NoRecovery>, on_processing).await
    }

    /// Run an action; on an `unauthenticated` failure run `recovery`
    /// instead of reporting.
    ///
    /// The recovery runs at most once and is awaited; it is expected to
    /// restore a valid session (e.g. re-run the login exchange). A
    /// recovered failure is silent, except that a recovery which itself
    /// fails emits one notification for its own error. Returns `None` on
    /// any failure; the action is not re-run after recovery.
    pub async fn run_recovering<T, F, R, RFut>(
        &self,
        action: F,
        recovery: R,
        on_processing: impl FnMut(bool),
    ) -> Option<T>
    where
        F: Future<Output = Result<T, ClientError>>,
        R: FnOnce() -> RFut,
        RFut: Future<Output = Result<(), ClientError>>,
    {
        self.dispatch(action, Some(recovery), on_processing).await
    }

    async fn dispatch<T, F, R, RFut>(
        &self,
        action: F,
        recovery: Option<R>,
        mut on_processing: impl FnMut(bool),
    ) -> Option<T>
    where
        F: Future<Output = Result<T, ClientError>>,
        R: FnOnce() -> RFut,
        RFut: Future<Output = Result<(), ClientError>>,
    {
        on_processing(true);
        let value = match action.await {
            Ok(value) => Some(value),
            Err(err) => {
                match recovery {
                    Some(recover) if err.is_unauthenticated() => {
                        debug!("unauthenticated, running recovery");
                        // The boundary holds even for the recovery itself:
                        // its failure is reported, never propagated.
                        if let Err(recovery_err) = recover().await {
                            self.notifier.notify(recovery_err.name(), &recovery_err.to_string());
                        }
                    }
                    _ => self.notifier.notify(err.name(), &err.to_string()),
                }
                None
            }
        };
        on_processing(false);
        value
    }
}

impl std::fmt::Debug for Executor {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Executor").finish_non_exhaustive()
    }
}

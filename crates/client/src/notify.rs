//! User-visible notification sink.

use tracing::warn;

/// Sink receiving exactly one notification per reported failure.
///
/// The UI layer implements this with its toast system; the default
/// [`TracingNotifier`] routes to the log stream instead.
pub trait Notifier: Send + Sync {
    /// Surface a failure to the user as `name` plus `message`.
    fn notify(&self, name: &str, message: &str);
}

/// Notifier that logs instead of rendering.
#[derive(Debug, Default, Clone, Copy)]
pub struct TracingNotifier;

impl Notifier for TracingNotifier {
    fn notify(&self, name: &str, message: &str) {
        warn!(name = %name, message = %message, "operation failed");
    }
}

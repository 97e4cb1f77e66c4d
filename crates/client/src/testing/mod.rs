//! In-memory doubles for the crate's seams.
//!
//! These back the crate's own tests and are exported so downstream code can
//! exercise the auth flow without a keychain or a live backend.

mod mocks;

pub use mocks::{MemoryTokenStore, RecordingNotifier, StaticTokenSource};

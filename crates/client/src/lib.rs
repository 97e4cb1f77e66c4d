//! Client-side session, transport and service SDK for the Tempo backend.
//!
//! The crate owns the bearer token lifecycle and everything derived from it:
//!
//! ```text
//! ┌──────────────┐
//! │   Executor   │  UI error boundary (report or recover)
//! └──────┬───────┘
//!        │ wraps actions that call into
//! ┌──────▼───────┐      ┌────────────────┐
//! │ClientRegistry│─────►│   Transport    │  per-call authorization header
//! └──────┬───────┘      └───────┬────────┘
//!        │                      │ resolves tokens via
//! ┌──────▼───────┐      ┌───────▼────────┐
//! │   Session    │◄─────│ TokenProvider  │  store read-through + login exchange
//! └──────────────┘      └───────┬────────┘
//!                       ┌───────▼────────┐
//!                       │   TokenStore   │  durable `auth_token` key
//!                       └────────────────┘
//! ```
//!
//! [`Session`] is explicit shared state passed by `Arc`; transports and
//! client handles are derived values gated by its version counter, so a URL
//! or token change is picked up lazily without reconnecting per call. The
//! [`TokenProvider`] resolves the live token on every outgoing call, which
//! means a mid-session rotation is observed by the next call without
//! rebuilding anything.
//!
//! # Usage
//!
//! ```no_run
//! use std::sync::Arc;
//!
//! use tempo_client::{
//!     ClientRegistry, Executor, KeyringTokenStore, Session, TokenProvider, TracingNotifier,
//!     Verifier,
//! };
//!
//! # async fn example() {
//! let session = Arc::new(Session::new("https://api.tempo.example"));
//! let store = Arc::new(KeyringTokenStore::new("Tempo"));
//! let provider = Arc::new(TokenProvider::new(session.clone(), store));
//! let registry = ClientRegistry::new(session, provider.clone());
//! let executor = Executor::new(Arc::new(TracingNotifier));
//!
//! // A UI action: load the plan, re-login on an expired token.
//! let events = executor
//!     .run_recovering(
//!         async { registry.planning().get(0, i64::MAX).await },
//!         || async {
//!             provider.login(&Verifier::Empty).await?;
//!             Ok(())
//!         },
//!         |_processing| {},
//!     )
//!     .await;
//! # let _ = events;
//! # }
//! ```

#![forbid(unsafe_code)]
#![warn(rust_2018_idioms)]
#![warn(clippy::all, clippy::perf, clippy::complexity, clippy::suspicious)]

pub mod error;
pub mod exec;
pub mod notify;
pub mod registry;
pub mod services;
pub mod session;
pub mod store;
pub mod token;
pub mod transport;

pub mod testing;

// Re-export commonly used types for convenience
pub use error::ClientError;
pub use exec::Executor;
pub use notify::{Notifier, TracingNotifier};
pub use registry::ClientRegistry;
pub use services::authentication::{AuthenticationClient, Verifier};
pub use services::management::ManagementClient;
pub use services::planning::PlanningClient;
pub use services::timing::TimingClient;
pub use session::Session;
pub use store::{KeyringTokenStore, TokenStore, AUTH_TOKEN_KEY};
pub use tempo_common::{RpcCode, RpcError};
pub use token::TokenProvider;
pub use transport::{TokenSource, Transport};

//! Shared leaf utilities for Tempo crates.
//!
//! This crate holds the pieces that carry no I/O and no async machinery:
//! the RPC error taxonomy shared by every service client, and the pure
//! score/rating style decorators used by the UI layer.

#![forbid(unsafe_code)]
#![warn(rust_2018_idioms)]
#![warn(clippy::all, clippy::perf, clippy::complexity, clippy::suspicious)]

pub mod error;
pub mod style;

// Re-export commonly used types for convenience
pub use error::{RpcCode, RpcError};
pub use style::{change_decorator, score_decorator};

//! Typed service clients bound to a [`crate::Transport`].
//!
//! Each client is a thin stateless handle: it owns nothing beyond the
//! transport binding and performs no caching of its own. Message types are
//! the proto3 JSON shapes of the backend contracts, consumed as opaque
//! structures.

pub mod authentication;
pub mod management;
pub mod planning;
pub mod timing;

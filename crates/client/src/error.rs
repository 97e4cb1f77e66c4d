//! Client error type composing the shared RPC taxonomy with local failures.
//!
//! Module-specific errors compose with the shared [`RpcError`] rather than
//! duplicating it: a server-classified failure stays an `Rpc` variant so the
//! unauthenticated classification survives all the way up to the executor.

use tempo_common::{RpcCode, RpcError};
use thiserror::Error;

/// Any failure surfaced by this crate.
#[derive(Debug, Error)]
pub enum ClientError {
    /// The server answered and classified the failure.
    #[error(transparent)]
    Rpc(#[from] RpcError),

    /// The call never produced a server answer (connect, TLS, timeout).
    #[error("transport failure: {0}")]
    Transport(#[from] reqwest::Error),

    /// The server answered with a body this client cannot decode.
    #[error("malformed response: {0}")]
    Decode(#[from] serde_json::Error),

    /// The durable token store failed.
    #[error("token store failure: {0}")]
    Store(String),
}

impl ClientError {
    /// Server-side code of the failure, when the server classified it.
    #[must_use]
    pub fn code(&self) -> Option<RpcCode> {
        match self {
            Self::Rpc(err) => Some(err.code),
            _ => None,
        }
    }

    /// Whether this failure signals a missing or rejected token.
    ///
    /// Only a server-classified `unauthenticated` qualifies; local failures
    /// never trigger the recovery path.
    #[must_use]
    pub fn is_unauthenticated(&self) -> bool {
        matches!(self, Self::Rpc(err) if err.is_unauthenticated())
    }

    /// Stable error name forwarded to the notification sink.
    #[must_use]
    pub fn name(&self) -> &'static str {
        match self {
            Self::Rpc(_) => "RpcError",
            Self::Transport(_) => "TransportError",
            Self::Decode(_) => "DecodeError",
            Self::Store(_) => "StoreError",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_unauthenticated_classification() {
        let err: ClientError = RpcError::new(RpcCode::Unauthenticated, "token expired").into();
        assert!(err.is_unauthenticated());
        assert_eq!(err.code(), Some(RpcCode::Unauthenticated));
        assert_eq!(err.name(), "RpcError");
    }

    #[test]
    fn test_other_rpc_codes_are_not_recoverable() {
        let err: ClientError = RpcError::new(RpcCode::Internal, "boom").into();
        assert!(!err.is_unauthenticated());
        assert_eq!(err.code(), Some(RpcCode::Internal));
    }

    #[test]
    fn test_store_failures_carry_no_code() {
        let err = ClientError::Store("keychain locked".to_string());
        assert!(!err.is_unauthenticated());
        assert_eq!(err.code(), None);
        assert_eq!(err.name(), "StoreError");
        assert_eq!(err.to_string(), "token store failure: keychain locked");
    }
}

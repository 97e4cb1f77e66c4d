//! RPC error taxonomy shared by every service client.
//!
//! The backend speaks Connect RPC; failed unary calls carry a JSON body of
//! the form `{"code": "...", "message": "..."}`. [`RpcCode`] models the full
//! Connect code set and [`RpcError`] the decoded failure. The only code that
//! changes client control flow is [`RpcCode::Unauthenticated`]; everything
//! else is reported, not handled.

use std::fmt;

use serde::Deserialize;
use thiserror::Error;

/// Connect RPC status codes.
///
/// Wire names are the snake_case identifiers used by the Connect protocol.
/// Codes the client does not recognize decode as [`RpcCode::Unknown`] so a
/// newer server never breaks error handling.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RpcCode {
    Canceled,
    InvalidArgument,
    DeadlineExceeded,
    NotFound,
    AlreadyExists,
    PermissionDenied,
    ResourceExhausted,
    FailedPrecondition,
    Aborted,
    OutOfRange,
    Unimplemented,
    Internal,
    Unavailable,
    DataLoss,
    Unauthenticated,
    #[serde(other)]
    Unknown,
}

impl RpcCode {
    /// Wire identifier of the code.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Canceled => "canceled",
            Self::Unknown => "unknown",
            Self::InvalidArgument => "invalid_argument",
            Self::DeadlineExceeded => "deadline_exceeded",
            Self::NotFound => "not_found",
            Self::AlreadyExists => "already_exists",
            Self::PermissionDenied => "permission_denied",
            Self::ResourceExhausted => "resource_exhausted",
            Self::FailedPrecondition => "failed_precondition",
            Self::Aborted => "aborted",
            Self::OutOfRange => "out_of_range",
            Self::Unimplemented => "unimplemented",
            Self::Internal => "internal",
            Self::Unavailable => "unavailable",
            Self::DataLoss => "data_loss",
            Self::Unauthenticated => "unauthenticated",
        }
    }

    /// Infer a code from a bare HTTP status.
    ///
    /// Used as a fallback when an error response carries no parseable
    /// Connect body (e.g. a proxy answered instead of the service). The
    /// mapping mirrors the Connect HTTP-to-code table.
    #[must_use]
    pub const fn from_http_status(status: u16) -> Self {
        match status {
            400 => Self::Internal,
            401 => Self::Unauthenticated,
            403 => Self::PermissionDenied,
            404 => Self::Unimplemented,
            408 => Self::DeadlineExceeded,
            429 => Self::ResourceExhausted,
            502 | 503 | 504 => Self::Unavailable,
            _ => Self::Unknown,
        }
    }
}

impl fmt::Display for RpcCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A failed RPC as classified by the server.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{code}: {message}")]
pub struct RpcError {
    /// Connect status code of the failure.
    pub code: RpcCode,
    /// Human-readable failure description.
    pub message: String,
}

impl RpcError {
    /// Create an error from a code and message.
    #[must_use]
    pub fn new(code: RpcCode, message: impl Into<String>) -> Self {
        Self { code, message: message.into() }
    }

    /// Whether the server rejected the supplied token/credential.
    #[must_use]
    pub const fn is_unauthenticated(&self) -> bool {
        matches!(self.code, RpcCode::Unauthenticated)
    }
}

//! Authentication service client and the verifier credential union.
//!
//! This is the only client bound to the unauthenticated transport: a login
//! exchange must never itself require a token.

use serde::ser::SerializeMap;
use serde::{Deserialize, Serialize, Serializer};

use crate::error::ClientError;
use crate::transport::Transport;

const SERVICE: &str = "tempo.v1.AuthenticationService";

/// Credential material for a login attempt.
///
/// The login protocol is two-phase: phase 1 submits a contact channel and
/// the server sends a one-time code to it; phase 2 submits the received
/// code. `Empty` carries no credential and asks the server to mint a token
/// from the session's refresh state alone.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Verifier {
    /// Phase 1: contact channel (e.g. an email address) to send a code to.
    Channel(String),
    /// Phase 2: the one-time code the user received.
    Code(String),
    /// No credential; token-refresh-only attempt.
    Empty,
}

// proto3 JSON oneof: exactly one populated field, or an empty message.
impl Serialize for Verifier {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            Self::Channel(identifier) => {
                let mut map = serializer.serialize_map(Some(1))?;
                map.serialize_entry("channel", identifier)?;
                map.end()
            }
            Self::Code(value) => {
                let mut map = serializer.serialize_map(Some(1))?;
                map.serialize_entry("code", value)?;
                map.end()
            }
            Self::Empty => serializer.serialize_map(Some(0))?.end(),
        }
    }
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct LoginRequest<'a> {
    verifier: &'a Verifier,
    auto_refresh: bool,
}

/// Result of a login exchange.
///
/// The token is empty after phase 1 (the code was sent, nothing usable was
/// issued yet) and non-empty on success.
#[derive(Debug, Default, Deserialize)]
pub struct LoginResponse {
    /// Issued bearer token, empty when the exchange is not complete.
    #[serde(default)]
    pub token: String,
}

#[derive(Debug, Serialize)]
struct LogoutRequest {}

#[derive(Debug, Default, Deserialize)]
struct LogoutResponse {}

/// Handle for `tempo.v1.AuthenticationService`.
#[derive(Debug, Clone)]
pub struct AuthenticationClient {
    transport: Transport,
}

impl AuthenticationClient {
    pub(crate) fn new(transport: Transport) -> Self {
        Self { transport }
    }

    /// Run one phase of the login exchange.
    ///
    /// `auto_refresh` asks the server to issue a token that renews silently
    /// server-side; this client performs no refresh exchange of its own.
    ///
    /// # Errors
    /// Propagates the transport or server failure unchanged.
    pub async fn login(
        &self,
        verifier: &Verifier,
        auto_refresh: bool,
    ) -> Result<LoginResponse, ClientError> {
        self.transport.call(SERVICE, "Login", &LoginRequest { verifier, auto_refresh }).await
    }

    /// Invalidate the session server-side.
    ///
    /// # Errors
    /// Propagates the transport or server failure unchanged.
    pub async fn logout(&self) -> Result<(), ClientError> {
        let LogoutResponse {} = self.transport.call(SERVICE, "Logout", &LogoutRequest {}).await?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    #[test]
    fn test_verifier_serializes_as_oneof() {
        assert_eq!(
            serde_json::to_value(Verifier::Channel("user@example.com".to_string())).unwrap(),
            json!({"channel": "user@example.com"})
        );
        assert_eq!(
            serde_json::to_value(Verifier::Code("123-456".to_string())).unwrap(),
            json!({"code": "123-456"})
        );
        assert_eq!(serde_json::to_value(Verifier::Empty).unwrap(), json!({}));
    }

    #[test]
    fn test_login_request_shape() {
        let request = LoginRequest { verifier: &Verifier::Empty, auto_refresh: true };
        assert_eq!(
            serde_json::to_value(&request).unwrap(),
            json!({"verifier": {}, "autoRefresh": true})
        );
    }

    #[test]
    fn test_login_response_token_defaults_empty() {
        // proto3 JSON omits zero-valued fields entirely.
        let response: LoginResponse = serde_json::from_str("{}").unwrap();
        assert_eq!(response.token, "");

        let response: LoginResponse = serde_json::from_str(r#"{"token":"abc123"}"#).unwrap();
        assert_eq!(response.token, "abc123");
    }
}

//! Connect unary transport with per-call authorization.
//!
//! A [`Transport`] is a derived value: a pure function of the base URL and,
//! for the authenticated flavor, a [`TokenSource`]. The token is resolved on
//! every outgoing call rather than captured at construction, so a rotation
//! is observed by the next call without rebuilding the transport. The
//! unauthenticated flavor (no header injection) exists solely for the
//! authentication service itself: obtaining a token must not require one.
//!
//! No retry, no backoff, no cancellation at this layer; the single
//! `reqwest::Client` carries the connection pool across transport
//! generations.

use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use reqwest::header::AUTHORIZATION;
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use tempo_common::{RpcCode, RpcError};
use tracing::debug;

use crate::error::ClientError;

/// Resolves the bearer token attached to an outgoing call.
///
/// Resolution may suspend on network I/O (a login exchange when no cached
/// token exists). Implemented by [`crate::TokenProvider`]; tests inject
/// static sources.
#[async_trait]
pub trait TokenSource: Send + Sync {
    /// Produce a token valid for the next call.
    async fn token(&self) -> Result<String, ClientError>;
}

/// Connect error body of a failed unary call.
#[derive(Debug, Deserialize)]
struct WireError {
    code: RpcCode,
    #[serde(default)]
    message: String,
}

/// One call channel against a base URL.
#[derive(Clone)]
pub struct Transport {
    http: reqwest::Client,
    base_url: String,
    token_source: Option<Arc<dyn TokenSource>>,
}

impl Transport {
    /// Shared HTTP client with the stack-wide timeout.
    pub(crate) fn http_client() -> reqwest::Client {
        reqwest::Client::builder()
            .timeout(Duration::from_secs(30))
            .build()
            .unwrap_or_else(|_| reqwest::Client::new())
    }

    pub(crate) fn new(
        http: reqwest::Client,
        base_url: impl Into<String>,
        token_source: Option<Arc<dyn TokenSource>>,
    ) -> Self {
        Self { http, base_url: base_url.into(), token_source }
    }

    /// Whether this transport injects an `authorization` header.
    #[must_use]
    pub fn is_authenticated(&self) -> bool {
        self.token_source.is_some()
    }

    fn route(&self, service: &str, method: &str) -> String {
        format!("{}/{service}/{method}", self.base_url.trim_end_matches('/'))
    }

    /// Execute one Connect unary call.
    ///
    /// Resolves the current token first (authenticated transports only),
    /// posts the request as proto3 JSON and decodes either the response
    /// message or the Connect error body.
    ///
    /// # Errors
    /// `Rpc` when the server classified the failure, `Transport` when no
    /// answer arrived, `Decode` when the answer is not valid JSON.
    pub async fn call<Req, Res>(
        &self,
        service: &str,
        method: &str,
        request: &Req,
    ) -> Result<Res, ClientError>
    where
        Req: Serialize + Sync,
        Res: DeserializeOwned,
    {
        let url = self.route(service, method);
        debug!(url = %url, authenticated = self.is_authenticated(), "unary call");

        let mut builder = self.http.post(&url).json(request);
        if let Some(source) = &self.token_source {
            // Per-call resolution: never cache the token in the transport.
            let token = source.token().await?;
            builder = builder.header(AUTHORIZATION, token);
        }

        let response = builder.send().await?;
        let status = response.status();
        let body = response.bytes().await?;

        if status.is_success() {
            return serde_json::from_slice(&body).map_err(ClientError::from);
        }

        // Prefer the Connect error body; fall back to the HTTP status when a
        // proxy or load balancer answered instead of the service.
        let err = serde_json::from_slice::<WireError>(&body).map_or_else(
            |_| {
                RpcError::new(
                    RpcCode::from_http_status(status.as_u16()),
                    String::from_utf8_lossy(&body).into_owned(),
                )
            },
            |wire| RpcError::new(wire.code, wire.message),
        );
        Err(err.into())
    }
}

impl std::fmt::Debug for Transport {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Transport")
            .field("base_url", &self.base_url)
            .field("authenticated", &self.is_authenticated())
            .finish()
    }
}

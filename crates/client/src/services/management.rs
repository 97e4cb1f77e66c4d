//! Profile management service client.

use serde::{Deserialize, Serialize};

use super::authentication::Verifier;
use crate::error::ClientError;
use crate::transport::Transport;

const SERVICE: &str = "tempo.v1.ManagementService";

/// Account profile as held by the backend.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct User {
    pub id: String,
    pub email: String,
    pub username: String,
    pub description: String,
    /// Whether the profile participates in the public leaderboard.
    pub leaderboard: bool,
    /// Unix seconds.
    pub created_at: i64,
    pub score: i64,
    pub streak: i64,
    pub max_streak: i64,
}

#[derive(Debug, Serialize)]
struct GetRequest {}

#[derive(Debug, Default, Deserialize)]
struct GetResponse {
    #[serde(default)]
    user: User,
}

#[derive(Debug, Serialize)]
struct UpdateRequest<'a> {
    user: &'a User,
}

#[derive(Debug, Default, Deserialize)]
struct UpdateResponse {}

#[derive(Debug, Serialize)]
struct DeleteRequest<'a> {
    verifier: &'a Verifier,
}

#[derive(Debug, Default, Deserialize)]
struct DeleteResponse {}

/// Handle for `tempo.v1.ManagementService`.
#[derive(Debug, Clone)]
pub struct ManagementClient {
    transport: Transport,
}

impl ManagementClient {
    pub(crate) fn new(transport: Transport) -> Self {
        Self { transport }
    }

    /// Fetch the authenticated user's profile.
    ///
    /// # Errors
    /// Propagates the transport or server failure unchanged.
    pub async fn get(&self) -> Result<User, ClientError> {
        let response: GetResponse = self.transport.call(SERVICE, "Get", &GetRequest {}).await?;
        Ok(response.user)
    }

    /// Update the mutable profile fields (username, description,
    /// leaderboard participation).
    ///
    /// # Errors
    /// Propagates the transport or server failure unchanged.
    pub async fn update(&self, user: &User) -> Result<(), ClientError> {
        let UpdateResponse {} = self.transport.call(SERVICE, "Update", &UpdateRequest { user }).await?;
        Ok(())
    }

    /// Delete the account. Destructive, so the server re-verifies the
    /// caller with a fresh verifier exchange.
    ///
    /// # Errors
    /// Propagates the transport or server failure unchanged.
    pub async fn delete(&self, verifier: &Verifier) -> Result<(), ClientError> {
        let DeleteResponse {} =
            self.transport.call(SERVICE, "Delete", &DeleteRequest { verifier }).await?;
        Ok(())
    }
}

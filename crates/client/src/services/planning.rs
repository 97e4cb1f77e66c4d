//! Planning service client: the scheduled event calendar.

use serde::{Deserialize, Serialize};

use crate::error::ClientError;
use crate::transport::Transport;

const SERVICE: &str = "tempo.v1.PlanningService";

/// One scheduled event.
///
/// Events are indexed server-side by start time; `id` is the stringified
/// start time of the stored row. Moving an event therefore changes its id:
/// the server upserts the new row and deletes the old one.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Event {
    pub id: String,
    /// Event category discriminant as defined by the backend schema.
    #[serde(rename = "type")]
    pub kind: i32,
    pub name: String,
    /// Unix seconds.
    pub start_time: i64,
    /// Unix seconds.
    pub stop_time: i64,
    /// Unix seconds; zero until the timer ran.
    pub timer_start_time: i64,
    /// Unix seconds; zero until the timer concluded.
    pub timer_stop_time: i64,
    pub rating_change: i64,
    pub rating_algorithm: String,
    /// Concluded events are immutable.
    pub immutable: bool,
    pub description: String,
    pub music_url: String,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct GetRequest {
    since: i64,
    until: i64,
}

#[derive(Debug, Default, Deserialize)]
struct GetResponse {
    #[serde(default)]
    events: Vec<Event>,
}

#[derive(Debug, Serialize)]
struct UpsertRequest<'a> {
    event: &'a Event,
}

#[derive(Debug, Default, Deserialize)]
struct UpsertResponse {}

#[derive(Debug, Serialize)]
struct DeleteRequest<'a> {
    id: &'a str,
}

#[derive(Debug, Default, Deserialize)]
struct DeleteResponse {}

/// Handle for `tempo.v1.PlanningService`.
#[derive(Debug, Clone)]
pub struct PlanningClient {
    transport: Transport,
}

impl PlanningClient {
    pub(crate) fn new(transport: Transport) -> Self {
        Self { transport }
    }

    /// List events whose start time falls in `[since, until]` (unix seconds).
    ///
    /// # Errors
    /// Propagates the transport or server failure unchanged.
    pub async fn get(&self, since: i64, until: i64) -> Result<Vec<Event>, ClientError> {
        let response: GetResponse =
            self.transport.call(SERVICE, "Get", &GetRequest { since, until }).await?;
        Ok(response.events)
    }

    /// Create or replace an event.
    ///
    /// # Errors
    /// Propagates the transport or server failure unchanged.
    pub async fn upsert(&self, event: &Event) -> Result<(), ClientError> {
        let UpsertResponse {} =
            self.transport.call(SERVICE, "Upsert", &UpsertRequest { event }).await?;
        Ok(())
    }

    /// Delete an event by id.
    ///
    /// # Errors
    /// Propagates the transport or server failure unchanged.
    pub async fn delete(&self, id: &str) -> Result<(), ClientError> {
        let DeleteResponse {} = self.transport.call(SERVICE, "Delete", &DeleteRequest { id }).await?;
        Ok(())
    }
}

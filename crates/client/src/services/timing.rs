//! Timing service client: starts and concludes event timers.

use serde::{Deserialize, Serialize};

use crate::error::ClientError;
use crate::transport::Transport;

const SERVICE: &str = "tempo.v1.TimingService";

#[derive(Debug, Serialize)]
struct StartRequest<'a> {
    id: &'a str,
}

#[derive(Debug, Default, Deserialize)]
struct StartResponse {}

#[derive(Debug, Serialize)]
struct StopRequest<'a> {
    id: &'a str,
}

#[derive(Debug, Default, Deserialize)]
struct StopResponse {}

/// Handle for `tempo.v1.TimingService`.
#[derive(Debug, Clone)]
pub struct TimingClient {
    transport: Transport,
}

impl TimingClient {
    pub(crate) fn new(transport: Transport) -> Self {
        Self { transport }
    }

    /// Start the timer of an event.
    ///
    /// # Errors
    /// Propagates the transport or server failure unchanged; a concluded
    /// event fails with `failed_precondition`.
    pub async fn start(&self, id: &str) -> Result<(), ClientError> {
        let StartResponse {} = self.transport.call(SERVICE, "Start", &StartRequest { id }).await?;
        Ok(())
    }

    /// Conclude the timer of an event; the server computes the rating
    /// change and marks the event immutable.
    ///
    /// # Errors
    /// Propagates the transport or server failure unchanged.
    pub async fn stop(&self, id: &str) -> Result<(), ClientError> {
        let StopResponse {} = self.transport.call(SERVICE, "Stop", &StopRequest { id }).await?;
        Ok(())
    }
}

use super::request::PayloadRequest;
use super::retry::send_with_retry;
use crate::error::TelemetryResult;
use bytes::Bytes;
use reqwest::Client;
use tracing::{error, warn};

/// Counters for one pass over a sequence of payload buffers
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct DeliveryOutcome {
    /// Buffers handed to the dispatcher
    pub batches: usize,
    /// Buffers answered with a status below 300
    pub successful: usize,
    /// Bytes that left the process, whatever the response status
    pub sent_bytes: usize,
}

/// Sends every buffer in order, each with its own retry budget.
///
/// Per-payload failures are logged and counted, never returned: a transport
/// failure refunds the buffer's bytes, an error status keeps them charged.
/// Only a request that cannot be built aborts the pass.
pub async fn dispatch(
    http: &Client,
    buffers: Vec<Bytes>,
    request: &PayloadRequest,
    max_attempts: usize,
) -> TelemetryResult<DeliveryOutcome> {
    let mut outcome = DeliveryOutcome {
        batches: buffers.len(),
        ..Default::default()
    };

    for buffer in buffers {
        let len = buffer.len();
        outcome.sent_bytes += len;

        let req = request.build(http, buffer)?;

        match send_with_retry(http, req, max_attempts).await {
            Err(e) => {
                error!("Telemetry client error: {}", e);
                outcome.sent_bytes -= len;
            }
            Ok(response) if response.status.as_u16() >= 300 => {
                warn!(
                    "Telemetry client response: [{}] {}",
                    response.status, response.body
                );
            }
            Ok(_) => outcome.successful += 1,
        }
    }

    Ok(outcome)
}

use crate::error::{TelemetryError, TelemetryResult};
use reqwest::{Client, Request, StatusCode};
use tracing::{debug, warn};

/// What came back from a completed exchange
#[derive(Clone, Debug)]
pub struct SendResponse {
    pub status: StatusCode,
    pub body: String,
}

/// Performs one HTTP exchange, retrying immediately on timeouts.
///
/// At most `max_attempts` requests are made (a budget of zero still makes one).
/// Each attempt sends a fresh copy of `request`; only the payload buffer is
/// shared between them. Any non-timeout transport error ends the loop at once,
/// as does a failure to read the response body. A transport failure on the
/// last allowed attempt is reported as running out of retries.
pub async fn send_with_retry(
    http: &Client,
    request: Request,
    max_attempts: usize,
) -> TelemetryResult<SendResponse> {
    let max_attempts = max_attempts.max(1);
    let mut pending = request;
    let mut attempt = 1;

    loop {
        let next = if attempt < max_attempts {
            pending.try_clone()
        } else {
            None
        };

        let err = match http.execute(pending).await {
            Ok(response) => return read_response(response).await,
            Err(e) => TelemetryError::Network(e),
        };

        if attempt >= max_attempts {
            warn!("Request failed. Ran out of retries.");
            return Err(err);
        }

        if !err.is_retryable() {
            return Err(err);
        }

        match next {
            Some(request) => {
                debug!(
                    "Retrying after timeout (attempt {}/{}): {}",
                    attempt, max_attempts, err
                );
                pending = request;
                attempt += 1;
            }
            None => {
                debug!("Request body can't be replayed, giving up after timeout");
                return Err(err);
            }
        }
    }
}

// Consuming the body hands the connection back to the pool, or drops it on error
async fn read_response(response: reqwest::Response) -> TelemetryResult<SendResponse> {
    let status = response.status();
    let body = response.text().await.map_err(TelemetryError::BodyRead)?;
    Ok(SendResponse { status, body })
}

mod dispatch;
mod endpoints;
mod request;
mod retry;
mod telemetry_client;

#[cfg(test)]
pub(crate) mod test_server;

pub use dispatch::{dispatch, DeliveryOutcome};
pub use endpoints::{resolve_endpoint, ApiFamily};
pub use request::PayloadRequest;
pub use retry::{send_with_retry, SendResponse};
pub use telemetry_client::{DeliveryReport, TelemetryClient};

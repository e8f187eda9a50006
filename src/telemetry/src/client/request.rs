use super::endpoints::ApiFamily;
use crate::constants::{CLIENT_NAME, EVENT_SOURCE_HEADER, LICENSE_KEY_HEADER, LOGS_EVENT_SOURCE};
use crate::error::{TelemetryError, TelemetryResult};
use bytes::Bytes;
use reqwest::header::{CONTENT_ENCODING, CONTENT_TYPE, USER_AGENT};
use reqwest::{Client, Request};
use url::Url;

/// Builds the outbound POST for one compressed payload.
///
/// The telemetry and log variants differ only in the extra event-source
/// header that routes log bodies to the log ingestion pipeline.
#[derive(Clone, Debug)]
pub struct PayloadRequest {
    family: ApiFamily,
    endpoint: String,
    license_key: String,
}

impl PayloadRequest {
    pub fn new(
        family: ApiFamily,
        endpoint: impl Into<String>,
        license_key: impl Into<String>,
    ) -> Self {
        Self {
            family,
            endpoint: endpoint.into(),
            license_key: license_key.into(),
        }
    }

    pub fn telemetry(endpoint: impl Into<String>, license_key: impl Into<String>) -> Self {
        Self::new(ApiFamily::Telemetry, endpoint, license_key)
    }

    pub fn logs(endpoint: impl Into<String>, license_key: impl Into<String>) -> Self {
        Self::new(ApiFamily::Logs, endpoint, license_key)
    }

    pub fn family(&self) -> ApiFamily {
        self.family
    }

    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }

    pub fn build(&self, http: &Client, buffer: Bytes) -> TelemetryResult<Request> {
        let url = Url::parse(&self.endpoint).map_err(|e| {
            TelemetryError::InvalidRequest(format!("bad endpoint '{}': {}", self.endpoint, e))
        })?;

        let mut builder = http
            .post(url)
            .header(CONTENT_TYPE, "application/json")
            .header(CONTENT_ENCODING, "gzip")
            .header(USER_AGENT, CLIENT_NAME)
            .header(LICENSE_KEY_HEADER, self.license_key.as_str());

        if self.family == ApiFamily::Logs {
            builder = builder.header(EVENT_SOURCE_HEADER, LOGS_EVENT_SOURCE);
        }

        builder.body(buffer).build().map_err(|e| {
            TelemetryError::InvalidRequest(format!("failed to build request: {}", e))
        })
    }
}

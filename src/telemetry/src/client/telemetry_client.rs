use super::dispatch::{dispatch, DeliveryOutcome};
use super::endpoints::{resolve_endpoint, ApiFamily};
use super::request::PayloadRequest;
use crate::config::Config;
use crate::constants::{DEFAULT_HTTP_TIMEOUT, MAX_SEND_ATTEMPTS};
use crate::error::TelemetryResult;
use crate::payload::{
    compressed_payloads_for_function_logs, compressed_payloads_for_log_events, LogsEvent,
};
use crate::types::{FunctionIdentity, LogLine};
use reqwest::Client;
use std::time::{Duration, Instant};
use tracing::info;

/// Result of one public send operation, mirrored in its summary log line
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct DeliveryReport {
    pub outcome: DeliveryOutcome,
    /// Raw records or log lines handed in by the caller
    pub records: usize,
    pub total_time: Duration,
    pub transmit_time: Duration,
}

impl DeliveryReport {
    fn new(
        outcome: DeliveryOutcome,
        records: usize,
        start: Instant,
        transmit_start: Instant,
    ) -> Self {
        let end = Instant::now();
        Self {
            outcome,
            records,
            total_time: end.duration_since(start),
            transmit_time: end.duration_since(transmit_start),
        }
    }

    pub fn total_ms(&self) -> f64 {
        self.total_time.as_micros() as f64 / 1000.0
    }

    pub fn sent_kb(&self) -> f64 {
        self.outcome.sent_bytes as f64 / 1024.0
    }
}

/// Ships telemetry and function logs to New Relic.
///
/// Payloads are sent one after another; a call returns once every buffer has
/// been delivered or has used up its retries. The function name may be left
/// unset at construction, in which case the first [`send_telemetry`] derives
/// it from the invoked function ARN and keeps it for the client's lifetime.
///
/// [`send_telemetry`]: TelemetryClient::send_telemetry
pub struct TelemetryClient {
    http: Client,
    license_key: String,
    telemetry_endpoint: String,
    log_endpoint: String,
    function_identity: FunctionIdentity,
}

impl TelemetryClient {
    /// Creates a client with its own connection pool and the default 2s timeout
    pub fn new(
        function_name: Option<String>,
        license_key: &str,
        telemetry_endpoint_override: Option<&str>,
        log_endpoint_override: Option<&str>,
    ) -> TelemetryResult<Self> {
        Self::with_timeout(
            DEFAULT_HTTP_TIMEOUT,
            function_name,
            license_key,
            telemetry_endpoint_override,
            log_endpoint_override,
        )
    }

    pub fn with_timeout(
        timeout: Duration,
        function_name: Option<String>,
        license_key: &str,
        telemetry_endpoint_override: Option<&str>,
        log_endpoint_override: Option<&str>,
    ) -> TelemetryResult<Self> {
        let http = Client::builder().timeout(timeout).build()?;
        Ok(Self::with_http_client(
            http,
            function_name,
            license_key,
            telemetry_endpoint_override,
            log_endpoint_override,
        ))
    }

    /// Like [`TelemetryClient::new`], but reuses the caller's HTTP client
    pub fn with_http_client(
        http: Client,
        function_name: Option<String>,
        license_key: &str,
        telemetry_endpoint_override: Option<&str>,
        log_endpoint_override: Option<&str>,
    ) -> Self {
        Self {
            http,
            license_key: license_key.to_string(),
            telemetry_endpoint: resolve_endpoint(
                ApiFamily::Telemetry,
                license_key,
                telemetry_endpoint_override,
            ),
            log_endpoint: resolve_endpoint(ApiFamily::Logs, license_key, log_endpoint_override),
            function_identity: FunctionIdentity::new(function_name),
        }
    }

    pub fn from_config(config: &Config) -> TelemetryResult<Self> {
        Self::with_timeout(
            config.http_timeout(),
            config.function_name.clone(),
            &config.license_key,
            config.telemetry_endpoint.as_deref(),
            config.log_endpoint.as_deref(),
        )
    }

    pub fn telemetry_endpoint(&self) -> &str {
        &self.telemetry_endpoint
    }

    pub fn log_endpoint(&self) -> &str {
        &self.log_endpoint
    }

    pub fn function_name(&self) -> Option<&str> {
        self.function_identity.get()
    }

    /// Sends raw telemetry records (one CloudWatch-style event each).
    ///
    /// Fails without sending anything if the function name is unknown and
    /// can't be recovered from `invoked_function_arn`.
    pub async fn send_telemetry(
        &self,
        invoked_function_arn: &str,
        telemetry: &[Vec<u8>],
    ) -> TelemetryResult<DeliveryReport> {
        let start = Instant::now();
        let events: Vec<LogsEvent> = telemetry
            .iter()
            .map(|payload| LogsEvent::for_bytes(payload))
            .collect();

        let function_name = self.function_identity.resolve(invoked_function_arn)?;

        let payloads =
            compressed_payloads_for_log_events(&events, function_name, invoked_function_arn)?;
        let request = PayloadRequest::telemetry(&self.telemetry_endpoint, &self.license_key);

        let transmit_start = Instant::now();
        let outcome = dispatch(&self.http, payloads, &request, MAX_SEND_ATTEMPTS).await?;
        let report = DeliveryReport::new(outcome, telemetry.len(), start, transmit_start);

        info!(
            "Sent {}/{} New Relic payload batches with {} log events successfully in {:.3}ms ({}ms to transmit {:.1}kB).",
            outcome.successful,
            outcome.batches,
            report.records,
            report.total_ms(),
            report.transmit_time.as_millis(),
            report.sent_kb(),
        );

        Ok(report)
    }

    /// Sends captured function log lines to the Log API as a single batch
    pub async fn send_function_logs(&self, lines: &[LogLine]) -> TelemetryResult<DeliveryReport> {
        let start = Instant::now();

        let function_name = self.function_identity.get().unwrap_or_default();
        let payloads = compressed_payloads_for_function_logs(lines, function_name)?;
        let request = PayloadRequest::logs(&self.log_endpoint, &self.license_key);

        let transmit_start = Instant::now();
        let outcome = dispatch(&self.http, payloads, &request, MAX_SEND_ATTEMPTS).await?;
        let report = DeliveryReport::new(outcome, lines.len(), start, transmit_start);

        info!(
            "Sent {}/{} New Relic function log batches successfully in {:.3}ms ({}ms to transmit {:.1}kB).",
            outcome.successful,
            outcome.batches,
            report.total_ms(),
            report.transmit_time.as_millis(),
            report.sent_kb(),
        );

        Ok(report)
    }
}

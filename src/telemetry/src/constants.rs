use std::time::Duration;

pub const TELEMETRY_ENDPOINT_EU: &str = "https://cloud-collector.eu01.nr-data.net/aws/lambda/v1";
pub const TELEMETRY_ENDPOINT_US: &str = "https://cloud-collector.newrelic.com/aws/lambda/v1";
pub const LOG_ENDPOINT_EU: &str = "https://log-api.eu.newrelic.com/log/v1";
pub const LOG_ENDPOINT_US: &str = "https://log-api.newrelic.com/log/v1";

/// License keys issued for the EU datacenter carry this prefix.
pub const EU_LICENSE_KEY_PREFIX: &str = "eu";

/// Total attempts per payload, first try included.
pub const MAX_SEND_ATTEMPTS: usize = 3;

pub const DEFAULT_HTTP_TIMEOUT_MS: u64 = 2000;
pub const DEFAULT_HTTP_TIMEOUT: Duration = Duration::from_millis(DEFAULT_HTTP_TIMEOUT_MS);

// The ingest APIs reject request bodies over 1MB
pub const MAX_PAYLOAD_SIZE_BYTES: usize = 1_000_000;

pub const CLIENT_NAME: &str = "newrelic-lambda-extension";
pub const PLUGIN_ID: &str = "com.newrelic.lambda.extension";

pub const LICENSE_KEY_HEADER: &str = "X-License-Key";
pub const EVENT_SOURCE_HEADER: &str = "X-Event-Source";
pub const LOGS_EVENT_SOURCE: &str = "logs";

pub const FUNCTION_ARN_DELIMITER: &str = ":function:";

pub const CONFIG_ENV_PREFIX: &str = "NEW_RELIC";
pub const DEFAULT_LOG_LEVEL: &str = "info";

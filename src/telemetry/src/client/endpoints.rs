use crate::constants::{
    EU_LICENSE_KEY_PREFIX, LOG_ENDPOINT_EU, LOG_ENDPOINT_US, TELEMETRY_ENDPOINT_EU,
    TELEMETRY_ENDPOINT_US,
};

/// The two ingest APIs the client delivers to
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ApiFamily {
    /// Execution traces and metric events
    Telemetry,
    /// Raw function log lines
    Logs,
}

impl ApiFamily {
    pub fn eu_endpoint(self) -> &'static str {
        match self {
            ApiFamily::Telemetry => TELEMETRY_ENDPOINT_EU,
            ApiFamily::Logs => LOG_ENDPOINT_EU,
        }
    }

    pub fn us_endpoint(self) -> &'static str {
        match self {
            ApiFamily::Telemetry => TELEMETRY_ENDPOINT_US,
            ApiFamily::Logs => LOG_ENDPOINT_US,
        }
    }
}

/// Picks the endpoint for `family`. An override wins verbatim; otherwise the
/// license key region decides.
pub fn resolve_endpoint(
    family: ApiFamily,
    license_key: &str,
    endpoint_override: Option<&str>,
) -> String {
    if let Some(endpoint) = endpoint_override {
        return endpoint.to_string();
    }

    if license_key.starts_with(EU_LICENSE_KEY_PREFIX) {
        family.eu_endpoint().to_string()
    } else {
        family.us_endpoint().to_string()
    }
}

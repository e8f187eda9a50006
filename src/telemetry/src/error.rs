use std::fmt;

/// Errors raised while building, compressing or transmitting payloads
#[derive(Debug)]
pub enum TelemetryError {
    /// The outbound request could not be constructed (bad target URL, bad header value)
    InvalidRequest(String),

    /// Transport-level failure: DNS, connect, TLS, timeout
    Network(reqwest::Error),

    /// The exchange completed but the response body could not be read
    BodyRead(reqwest::Error),

    /// The invoked function ARN has no `:function:<name>` segment
    MalformedFunctionArn(String),

    /// Failed to serialize a payload to JSON
    Serialization(serde_json::Error),

    /// Failed to gzip a payload
    Compression(std::io::Error),
}

impl fmt::Display for TelemetryError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TelemetryError::InvalidRequest(msg) => write!(f, "Invalid request: {}", msg),
            TelemetryError::Network(e) => write!(f, "Network request failed: {}", e),
            TelemetryError::BodyRead(e) => write!(f, "Failed to read response body: {}", e),
            TelemetryError::MalformedFunctionArn(arn) => {
                write!(f, "Unable to recover function name from ARN '{}'", arn)
            }
            TelemetryError::Serialization(e) => write!(f, "Failed to serialize payload: {}", e),
            TelemetryError::Compression(e) => write!(f, "Failed to compress payload: {}", e),
        }
    }
}

impl std::error::Error for TelemetryError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            TelemetryError::Network(e) | TelemetryError::BodyRead(e) => Some(e),
            TelemetryError::Serialization(e) => Some(e),
            TelemetryError::Compression(e) => Some(e),
            TelemetryError::InvalidRequest(_) | TelemetryError::MalformedFunctionArn(_) => None,
        }
    }
}

impl From<serde_json::Error> for TelemetryError {
    fn from(err: serde_json::Error) -> Self {
        TelemetryError::Serialization(err)
    }
}

impl From<std::io::Error> for TelemetryError {
    fn from(err: std::io::Error) -> Self {
        TelemetryError::Compression(err)
    }
}

impl From<reqwest::Error> for TelemetryError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_builder() {
            TelemetryError::InvalidRequest(err.to_string())
        } else {
            TelemetryError::Network(err)
        }
    }
}

impl TelemetryError {
    /// Only transport timeouts are worth another attempt
    pub fn is_retryable(&self) -> bool {
        match self {
            TelemetryError::Network(e) => e.is_timeout(),
            _ => false,
        }
    }

    pub fn is_timeout(&self) -> bool {
        matches!(self, TelemetryError::Network(e) if e.is_timeout())
    }
}

/// Result type for payload delivery operations
pub type TelemetryResult<T> = Result<T, TelemetryError>;

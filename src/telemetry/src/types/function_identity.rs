use crate::constants::FUNCTION_ARN_DELIMITER;
use crate::error::{TelemetryError, TelemetryResult};
use once_cell::sync::OnceCell;
use tracing::debug;

/// Extracts `NAME` from `arn:aws:lambda:<region>:<account>:function:NAME[:QUALIFIER]`.
pub fn function_name_from_arn(invoked_function_arn: &str) -> TelemetryResult<&str> {
    let (_, rest) = invoked_function_arn
        .split_once(FUNCTION_ARN_DELIMITER)
        .ok_or_else(|| TelemetryError::MalformedFunctionArn(invoked_function_arn.to_string()))?;

    let name = rest.split(':').next().unwrap_or_default();
    if name.is_empty() {
        return Err(TelemetryError::MalformedFunctionArn(
            invoked_function_arn.to_string(),
        ));
    }

    Ok(name)
}

/// The short function name, set at most once.
///
/// Starts empty when the caller does not know the name up front; the first
/// telemetry send fills it from the invoked function ARN. Once set it is never
/// re-derived, and concurrent first writes resolve to a single winner.
#[derive(Debug, Default)]
pub struct FunctionIdentity {
    name: OnceCell<String>,
}

impl FunctionIdentity {
    pub fn new(name: Option<String>) -> Self {
        let cell = OnceCell::new();
        if let Some(name) = name.filter(|n| !n.is_empty()) {
            let _ = cell.set(name);
        }
        Self { name: cell }
    }

    pub fn get(&self) -> Option<&str> {
        self.name.get().map(String::as_str)
    }

    /// Returns the cached name, deriving it from `invoked_function_arn` on first use
    pub fn resolve(&self, invoked_function_arn: &str) -> TelemetryResult<&str> {
        self.name
            .get_or_try_init(|| {
                let name = function_name_from_arn(invoked_function_arn)?.to_string();
                debug!("Recovered missing function name: {}", name);
                Ok(name)
            })
            .map(String::as_str)
    }
}

use crate::constants::{CONFIG_ENV_PREFIX, DEFAULT_HTTP_TIMEOUT_MS, DEFAULT_LOG_LEVEL};
use anyhow::{ensure, Context, Result};
use config::{Config as RConfig, Environment, File, FileFormat};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::path::Path;
use std::time::Duration;

#[derive(Clone, Debug, Deserialize, Serialize)]
pub struct Config {
    pub license_key: String,
    pub telemetry_endpoint: Option<String>,
    pub log_endpoint: Option<String>,
    pub function_name: Option<String>,
    pub http_timeout_ms: u64,
    pub log_level: String,
}

impl Config {
    pub fn http_timeout(&self) -> Duration {
        Duration::from_millis(self.http_timeout_ms)
    }

    /// JSON view for diagnostics with the license key masked
    pub fn to_safe_json(&self) -> Value {
        let mut value = serde_json::to_value(self).unwrap_or(Value::Null);
        if let Some(key) = value.get_mut("license_key") {
            *key = Value::String(mask_secret(&self.license_key));
        }
        value
    }
}

// Keeps the region prefix visible, which is all that's needed to debug endpoint selection
fn mask_secret(secret: &str) -> String {
    let visible: String = secret.chars().take(4).collect();
    if secret.chars().count() <= 4 {
        "****".to_string()
    } else {
        format!("{}****", visible)
    }
}

pub struct ConfigLoader;

impl ConfigLoader {
    /// Defaults, then an optional TOML file, then `NEW_RELIC_*` environment variables
    pub fn load(config_file: Option<&Path>) -> Result<Config> {
        let mut builder = RConfig::builder()
            .set_default("license_key", "")?
            .set_default("http_timeout_ms", DEFAULT_HTTP_TIMEOUT_MS)?
            .set_default("log_level", DEFAULT_LOG_LEVEL)?;

        if let Some(path) = config_file {
            builder = builder.add_source(File::from(path).format(FileFormat::Toml).required(true));
        }

        // Values stay strings; numeric fields are converted during deserialization so
        // keys and names keep their leading zeros
        builder = builder.add_source(Environment::with_prefix(CONFIG_ENV_PREFIX));

        let config: Config = builder
            .build()?
            .try_deserialize()
            .context("failed to parse telemetry configuration")?;

        ensure!(
            !config.license_key.is_empty(),
            "a license key is required (set {}_LICENSE_KEY)",
            CONFIG_ENV_PREFIX
        );
        ensure!(config.http_timeout_ms > 0, "http_timeout_ms must be positive");

        Ok(config)
    }
}

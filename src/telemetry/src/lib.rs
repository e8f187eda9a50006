pub mod cli;
pub mod client;
pub mod config;
pub mod constants;
pub mod error;
pub mod logging;
pub mod payload;
pub mod types;

pub use client::{DeliveryOutcome, DeliveryReport, TelemetryClient};
pub use error::{TelemetryError, TelemetryResult};
pub use types::LogLine;

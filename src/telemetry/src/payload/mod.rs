//! Wire schema and compression for the two ingest APIs.
//!
//! Telemetry records are wrapped as CloudWatch-style log events and gzipped
//! into one or more buffers, split so each stays under the ingest size cap.
//! Function logs are wrapped in a single detailed-log envelope and gzipped
//! into exactly one buffer.

mod compress;
mod events;

pub use compress::{
    compressed_json_payload, compressed_payloads_for_function_logs,
    compressed_payloads_for_log_events, compressed_payloads_for_log_events_with_limit,
};
pub use events::{
    DetailedFunctionLog, FunctionLogMessage, LogsEntry, LogsEvent, RequestContext, RequestData,
};

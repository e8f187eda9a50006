use super::events::{DetailedFunctionLog, FunctionLogMessage, LogsEvent, RequestData};
use crate::constants::MAX_PAYLOAD_SIZE_BYTES;
use crate::error::TelemetryResult;
use crate::types::LogLine;
use bytes::Bytes;
use flate2::write::GzEncoder;
use flate2::Compression;
use serde::Serialize;
use std::io::Write;
use tracing::debug;

/// Serializes `value` to JSON and gzips it into one buffer
pub fn compressed_json_payload<T: Serialize + ?Sized>(value: &T) -> TelemetryResult<Bytes> {
    let json = serde_json::to_vec(value)?;
    let mut encoder = GzEncoder::new(Vec::with_capacity(json.len() / 4), Compression::default());
    encoder.write_all(&json)?;
    Ok(Bytes::from(encoder.finish()?))
}

/// Builds the telemetry bodies for `events`, splitting until each fits the ingest cap
pub fn compressed_payloads_for_log_events(
    events: &[LogsEvent],
    function_name: &str,
    invoked_function_arn: &str,
) -> TelemetryResult<Vec<Bytes>> {
    compressed_payloads_for_log_events_with_limit(
        events,
        function_name,
        invoked_function_arn,
        MAX_PAYLOAD_SIZE_BYTES,
    )
}

pub fn compressed_payloads_for_log_events_with_limit(
    events: &[LogsEvent],
    function_name: &str,
    invoked_function_arn: &str,
    max_payload_size: usize,
) -> TelemetryResult<Vec<Bytes>> {
    let mut payloads = Vec::new();
    split_and_compress(
        events,
        function_name,
        invoked_function_arn,
        max_payload_size,
        &mut payloads,
    )?;
    Ok(payloads)
}

fn split_and_compress(
    events: &[LogsEvent],
    function_name: &str,
    invoked_function_arn: &str,
    max_payload_size: usize,
    out: &mut Vec<Bytes>,
) -> TelemetryResult<()> {
    if events.is_empty() {
        return Ok(());
    }

    let data = RequestData::new(events, function_name, invoked_function_arn)?;
    let payload = compressed_json_payload(&data)?;

    // A single oversized event is sent as-is and left for the backend to reject
    if payload.len() <= max_payload_size || events.len() == 1 {
        out.push(payload);
        return Ok(());
    }

    debug!(
        "Compressed payload of {} events is {} bytes, splitting",
        events.len(),
        payload.len()
    );
    let (head, tail) = events.split_at(events.len() / 2);
    split_and_compress(head, function_name, invoked_function_arn, max_payload_size, out)?;
    split_and_compress(tail, function_name, invoked_function_arn, max_payload_size, out)
}

/// Wraps every line in one detailed-log envelope and gzips it into a single buffer.
///
/// The log server never hands over more than the Log API accepts in one
/// request, so this path does not split.
pub fn compressed_payloads_for_function_logs(
    lines: &[LogLine],
    function_name: &str,
) -> TelemetryResult<Vec<Bytes>> {
    let messages = lines
        .iter()
        .map(|line| {
            debug!("Sending function logs for request {}", line.request_id);
            FunctionLogMessage::from_line(line)
        })
        .collect();

    // The Log API expects an array of envelopes
    let envelopes = [DetailedFunctionLog::new(function_name, messages)];
    Ok(vec![compressed_json_payload(&envelopes)?])
}

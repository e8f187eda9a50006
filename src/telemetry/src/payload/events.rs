use crate::constants::PLUGIN_ID;
use crate::types::LogLine;
use chrono::Utc;
use serde::{Deserialize, Serialize};
use serde_json::{json, Map, Value};
use uuid::Uuid;

const DATA_MESSAGE: &str = "DATA_MESSAGE";

/// One raw telemetry record, shaped as a CloudWatch log event
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct LogsEvent {
    pub id: String,
    pub timestamp: i64,
    pub message: String,
}

impl LogsEvent {
    pub fn for_bytes(payload: &[u8]) -> Self {
        Self {
            id: Uuid::new_v4().to_string(),
            timestamp: Utc::now().timestamp_millis(),
            message: String::from_utf8_lossy(payload).into_owned(),
        }
    }
}

#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LogsEntry {
    pub owner: String,
    pub log_group: String,
    pub log_stream: String,
    pub message_type: String,
    pub subscription_filters: Vec<String>,
    pub log_events: Vec<LogsEvent>,
}

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct RequestContext {
    pub function_name: String,
    pub invoked_function_arn: String,
    pub log_group_name: String,
    pub log_stream_name: String,
}

/// Body of a telemetry request. `entry` holds the JSON-encoded [`LogsEntry`].
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct RequestData {
    pub context: RequestContext,
    pub entry: String,
}

impl RequestData {
    pub fn new(
        events: &[LogsEvent],
        function_name: &str,
        invoked_function_arn: &str,
    ) -> serde_json::Result<Self> {
        let log_group = format!("/aws/lambda/{}", function_name);
        let log_stream = format!(
            "{}/[$LATEST]{}",
            Utc::now().format("%Y/%m/%d"),
            Uuid::new_v4().simple()
        );

        let entry = LogsEntry {
            owner: String::new(),
            log_group: log_group.clone(),
            log_stream: log_stream.clone(),
            message_type: DATA_MESSAGE.to_string(),
            subscription_filters: vec![log_group.clone()],
            log_events: events.to_vec(),
        };

        Ok(Self {
            context: RequestContext {
                function_name: function_name.to_string(),
                invoked_function_arn: invoked_function_arn.to_string(),
                log_group_name: log_group,
                log_stream_name: log_stream,
            },
            entry: serde_json::to_string(&entry)?,
        })
    }
}

#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
pub struct FunctionLogMessage {
    pub timestamp: i64,
    pub message: String,
    pub attributes: Map<String, Value>,
}

impl FunctionLogMessage {
    pub fn new(timestamp: i64, request_id: &str, message: String) -> Self {
        let mut attributes = Map::new();
        attributes.insert("aws".to_string(), json!({ "lambda_request_id": request_id }));
        Self {
            timestamp,
            message,
            attributes,
        }
    }

    pub fn from_line(line: &LogLine) -> Self {
        Self::new(line.timestamp_ms(), &line.request_id, line.content_lossy())
    }
}

/// Log API envelope: shared attributes once, then every message
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
pub struct DetailedFunctionLog {
    pub common: Value,
    pub logs: Vec<FunctionLogMessage>,
}

impl DetailedFunctionLog {
    pub fn new(function_name: &str, logs: Vec<FunctionLogMessage>) -> Self {
        Self {
            common: json!({
                "attributes": {
                    "plugin": PLUGIN_ID,
                    "faas.name": function_name,
                }
            }),
            logs,
        }
    }
}

use chrono::{DateTime, Utc};

/// A single line captured from the function's output by the log server
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct LogLine {
    pub time: DateTime<Utc>,
    pub request_id: String,
    pub content: Vec<u8>,
}

impl LogLine {
    pub fn new(
        time: DateTime<Utc>,
        request_id: impl Into<String>,
        content: impl Into<Vec<u8>>,
    ) -> Self {
        Self {
            time,
            request_id: request_id.into(),
            content: content.into(),
        }
    }

    /// Capture time as Unix milliseconds
    pub fn timestamp_ms(&self) -> i64 {
        self.time.timestamp_millis()
    }

    pub fn content_lossy(&self) -> String {
        String::from_utf8_lossy(&self.content).into_owned()
    }
}

//! Structured JSON logger adapter.

use crate::log_sink::LogSink;
use autolog_ports::{LogEvent, LogFields, LogLevel, LoggerPort};
use autolog_shared::redact_fields;
use serde_json::Value;
use std::sync::Arc;
use std::time::{SystemTime, UNIX_EPOCH};

/// Envelope key holding the emission time in epoch milliseconds.
pub const ENVELOPE_TIMESTAMP: &str = "timestampMs";
/// Envelope key holding the log level.
pub const ENVELOPE_LEVEL: &str = "level";
/// Envelope key holding the record, untouched apart from redaction.
pub const ENVELOPE_RECORD: &str = "record";

const ENVELOPE_KEYS: [&str; 3] = [ENVELOPE_TIMESTAMP, ENVELOPE_LEVEL, ENVELOPE_RECORD];

/// JSON logger emitting one line per record.
///
/// Each line is an envelope `{timestampMs, level, ...base, record}`. The
/// record sits under its own key so none of its fields can collide with the
/// envelope. Values under secret-looking keys are redacted.
#[derive(Clone)]
pub struct JsonLogger {
    sink: Arc<dyn LogSink>,
    base_fields: LogFields,
    min_level: LogLevel,
}

impl JsonLogger {
    /// Create a JSON logger backed by the provided sink.
    #[must_use]
    pub fn new(sink: Arc<dyn LogSink>) -> Self {
        Self {
            sink,
            base_fields: LogFields::new(),
            min_level: LogLevel::Info,
        }
    }

    /// Set base fields applied to every record (e.g. `app`, `region`).
    #[must_use]
    pub fn with_base_fields(mut self, fields: LogFields) -> Self {
        self.base_fields = fields;
        self
    }

    /// Set the minimum log level.
    #[must_use]
    pub const fn with_min_level(mut self, level: LogLevel) -> Self {
        self.min_level = level;
        self
    }
}

impl LoggerPort for JsonLogger {
    fn log(&self, event: LogEvent) {
        if event.level < self.min_level {
            return;
        }

        let mut record = event.fields;
        redact_fields(&mut record);

        let mut payload = LogFields::new();
        payload.insert(ENVELOPE_TIMESTAMP.to_owned(), Value::from(now_epoch_ms()));
        payload.insert(ENVELOPE_LEVEL.to_owned(), Value::from(event.level.as_str()));
        for (key, value) in &self.base_fields {
            if !ENVELOPE_KEYS.contains(&key.as_str()) {
                payload.insert(key.clone(), value.clone());
            }
        }
        redact_fields(&mut payload);
        payload.insert(ENVELOPE_RECORD.to_owned(), Value::Object(record));

        let line = serde_json::to_string(&Value::Object(payload)).map_or_else(
            |_| {
                "{\"timestampMs\":0,\"level\":\"error\",\"record\":{\"message\":\"log serialization failed\"}}\n"
                    .to_string()
            },
            |mut encoded| {
                encoded.push('\n');
                encoded
            },
        );
        self.sink.write_line(&line);
    }
}

fn now_epoch_ms() -> u64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .ok()
        .and_then(|duration| u64::try_from(duration.as_millis()).ok())
        .unwrap_or_default()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::log_sink::BufferLogSink;
    use autolog_shared::REDACTED;
    use serde_json::json;

    fn record(value: Value) -> LogFields {
        value.as_object().cloned().unwrap_or_default()
    }

    #[test]
    fn json_logger_wraps_record_and_redacts_secrets() -> Result<(), Box<dyn std::error::Error>> {
        let sink = Arc::new(BufferLogSink::default());
        let logger = JsonLogger::new(sink.clone());

        logger.warn(record(json!({
            "action": "getUser",
            "result": "failure",
            "apiKey": "secret", // pragma: allowlist secret
            "message": { "token": "should-hide", "value": 7 }
        })));

        let lines = sink.take();
        assert_eq!(lines.len(), 1);
        let payload: Value = serde_json::from_str(lines[0].trim())?;
        let keys: Vec<&str> = payload
            .as_object()
            .ok_or("payload must be an object")?
            .keys()
            .map(String::as_str)
            .collect();
        assert_eq!(keys, vec!["timestampMs", "level", "record"]);
        assert_eq!(payload["level"], json!("warn"));
        assert_eq!(payload["record"]["action"], json!("getUser"));
        assert_eq!(payload["record"]["apiKey"], json!(REDACTED));
        assert_eq!(payload["record"]["message"]["token"], json!(REDACTED));
        assert_eq!(payload["record"]["message"]["value"], json!(7));
        Ok(())
    }

    #[test]
    fn record_fields_pass_through_unchanged() -> Result<(), Box<dyn std::error::Error>> {
        let sink = Arc::new(BufferLogSink::default());
        let logger = JsonLogger::new(sink.clone());
        let fields = json!({
            "action": "getArticle",
            "author": "Jane Doe",
            "authorId": 12,
            "keywords": "brexit",
            "level": "premium",
            "timestampMs": 5
        });

        logger.info(record(fields.clone()));

        let lines = sink.take();
        let payload: Value = serde_json::from_str(lines[0].trim())?;
        assert_eq!(payload["level"], json!("info"));
        assert_eq!(payload["record"], fields);
        Ok(())
    }

    #[test]
    fn base_fields_sit_between_envelope_and_record() -> Result<(), Box<dyn std::error::Error>> {
        let sink = Arc::new(BufferLogSink::default());
        let logger = JsonLogger::new(sink.clone())
            .with_base_fields(record(json!({ "app": "svc", "level": "debug", "secretKey": "s" })));

        logger.error(record(json!({ "operation": "getPage" })));

        let lines = sink.take();
        let payload: Value = serde_json::from_str(lines[0].trim())?;
        let keys: Vec<&str> = payload
            .as_object()
            .ok_or("payload must be an object")?
            .keys()
            .map(String::as_str)
            .collect();
        assert_eq!(keys, vec!["timestampMs", "level", "app", "secretKey", "record"]);
        assert_eq!(payload["level"], json!("error"));
        assert_eq!(payload["secretKey"], json!(REDACTED));
        assert_eq!(payload["record"], json!({ "operation": "getPage" }));
        Ok(())
    }

    #[test]
    fn min_level_filters_lower_records() {
        let sink = Arc::new(BufferLogSink::default());
        let logger = JsonLogger::new(sink.clone()).with_min_level(LogLevel::Warn);

        logger.info(record(json!({ "result": "success" })));
        logger.warn(record(json!({ "result": "failure" })));

        assert_eq!(sink.take().len(), 1);
    }
}

//! Logger adapter forwarding records to `tracing`.

use autolog_ports::{LogEvent, LogLevel, LoggerPort};
use autolog_shared::redact_fields;
use serde_json::Value;

/// Forwards each record to the active `tracing` subscriber under the
/// `autolog` target. The record travels as a JSON-encoded `record` field.
#[derive(Debug, Clone, Copy, Default)]
pub struct TracingLogger;

impl TracingLogger {
    /// Create a tracing-backed logger.
    #[must_use]
    pub const fn new() -> Self {
        Self
    }
}

impl LoggerPort for TracingLogger {
    fn log(&self, event: LogEvent) {
        let mut fields = event.fields;
        redact_fields(&mut fields);
        let summary = summary(&fields);
        let record = Value::Object(fields).to_string();

        match event.level {
            LogLevel::Info => tracing::info!(target: "autolog", record = %record, "{summary}"),
            LogLevel::Warn => tracing::warn!(target: "autolog", record = %record, "{summary}"),
            LogLevel::Error => tracing::error!(target: "autolog", record = %record, "{summary}"),
        }
    }
}

fn summary(fields: &autolog_ports::LogFields) -> String {
    let name = ["action", "operation"]
        .iter()
        .find_map(|key| fields.get(*key).and_then(Value::as_str))
        .unwrap_or("event");
    match fields.get("result").and_then(Value::as_str) {
        Some(result) => format!("{name} {result}"),
        None => format!("{name} started"),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use std::io;
    use std::sync::{Arc, Mutex, PoisonError};

    fn record(value: Value) -> autolog_ports::LogFields {
        value.as_object().cloned().unwrap_or_default()
    }

    #[test]
    fn summary_prefers_action_over_operation() {
        let fields = record(json!({ "operation": "getPage", "action": "getUser", "result": "success" }));
        assert_eq!(summary(&fields), "getUser success");

        let fields = record(json!({ "operation": "getPage" }));
        assert_eq!(summary(&fields), "getPage started");
    }

    #[test]
    fn logging_without_subscriber_is_a_no_op() {
        TracingLogger::new().warn(record(json!({ "result": "failure" })));
    }

    #[derive(Clone, Default)]
    struct CapturedOutput(Arc<Mutex<Vec<u8>>>);

    impl io::Write for CapturedOutput {
        fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
            self.0
                .lock()
                .unwrap_or_else(PoisonError::into_inner)
                .extend_from_slice(buf);
            Ok(buf.len())
        }

        fn flush(&mut self) -> io::Result<()> {
            Ok(())
        }
    }

    #[test]
    fn records_reach_the_subscriber_redacted() -> Result<(), Box<dyn std::error::Error>> {
        let output = CapturedOutput::default();
        let writer = output.clone();
        let subscriber = tracing_subscriber::fmt()
            .with_writer(move || writer.clone())
            .with_ansi(false)
            .finish();

        tracing::subscriber::with_default(subscriber, || {
            TracingLogger::new().error(record(json!({
                "action": "getUser",
                "result": "failure",
                "apiKey": "sk-live",
                "author": "Jane Doe"
            })));
        });

        let bytes = output.0.lock().unwrap_or_else(PoisonError::into_inner).clone();
        let text = String::from_utf8(bytes)?;
        assert!(text.contains("ERROR"));
        assert!(text.contains("getUser failure"));
        assert!(text.contains("[REDACTED]"));
        assert!(!text.contains("sk-live"));
        assert!(text.contains("Jane Doe"));
        Ok(())
    }
}

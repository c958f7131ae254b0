//! Event emitter: one logging context per action or operation invocation.

use crate::classify::{classify, classify_now};
use crate::context::AutoLog;
use autolog_domain::{FIELD_ACTION, FIELD_DATA, FIELD_RESULT, Outcome};
use autolog_ports::{LogEvent, LogLevel, Throwable};
use autolog_shared::{ErrorEnvelope, Fields, merge_into, remove_keys, trim_owned};
use serde_json::Value;

/// Accumulated metadata for one unit of work.
///
/// The context is trimmed and muted when the event is created and every
/// record is trimmed and muted again right before it reaches the sink.
/// `success` and the `failure` variants consume the event, so at most one
/// terminal record is emitted per event.
pub struct Event {
    autolog: AutoLog,
    context: Fields,
}

impl Event {
    /// Build an event from raw metadata; nothing is emitted.
    #[must_use]
    pub fn create(autolog: &AutoLog, meta: Fields) -> Self {
        let context = finalize(autolog, meta);
        Self {
            autolog: autolog.clone(),
            context,
        }
    }

    /// Current context.
    #[must_use]
    pub const fn context(&self) -> &Fields {
        &self.context
    }

    /// Emit the current context at info level. Calling twice logs twice.
    pub fn start(&self) {
        self.autolog.logger().info(self.context.clone());
    }

    /// Emit the success record `{...context, result: success, data}`.
    pub fn success(self, data: Option<Value>) {
        let mut record = self.context;
        record.insert(
            FIELD_RESULT.to_owned(),
            Value::from(Outcome::Success.as_str()),
        );
        record.insert(FIELD_DATA.to_owned(), data.unwrap_or(Value::Null));
        let record = finalize(&self.autolog, record);
        self.autolog.logger().info(record);
    }

    /// Classify `failure` and emit `{...context, ...failure record}` at the
    /// derived severity.
    ///
    /// A classification failure is returned and nothing is emitted.
    pub async fn failure<T: Throwable + ?Sized>(self, failure: &T) -> Result<(), ErrorEnvelope> {
        let classified = classify(failure).await?;
        self.emit_failure(classified.level, classified.record);
        Ok(())
    }

    /// Synchronous [`Event::failure`]; response bodies must be readable
    /// without awaiting.
    pub fn failure_now<T: Throwable + ?Sized>(self, failure: &T) -> Result<(), ErrorEnvelope> {
        let classified = classify_now(failure)?;
        self.emit_failure(classified.level, classified.record);
        Ok(())
    }

    /// Emit a failure without a failure value.
    pub fn failure_unspecified(self) {
        let classified = classify_now(&Value::Null);
        if let Ok(classified) = classified {
            self.emit_failure(classified.level, classified.record);
        }
    }

    /// Derive a child event scoped to `name`; this event is left untouched.
    #[must_use]
    pub fn action(&self, name: impl Into<String>) -> Self {
        let mut context = self.context.clone();
        context.insert(FIELD_ACTION.to_owned(), Value::from(name.into()));
        Self::create(&self.autolog, context)
    }

    fn emit_failure(self, level: LogLevel, failure: Fields) {
        let mut record = self.context;
        merge_into(&mut record, failure);
        let record = finalize(&self.autolog, record);
        self.autolog.logger().log(LogEvent::new(level, record));
    }
}

impl std::fmt::Debug for Event {
    fn fmt(&self, formatter: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        formatter
            .debug_struct("Event")
            .field("context", &self.context)
            .finish_non_exhaustive()
    }
}

fn finalize(autolog: &AutoLog, record: Fields) -> Fields {
    remove_keys(&trim_owned(record), autolog.muted_fields())
}

#[cfg(test)]
mod tests {
    use super::*;
    use autolog_adapters::MemoryLogger;
    use autolog_config::AutoLogConfig;
    use serde_json::json;
    use std::sync::Arc;

    fn fields(value: Value) -> Fields {
        value.as_object().cloned().unwrap_or_default()
    }

    fn setup(config: AutoLogConfig) -> (Arc<MemoryLogger>, AutoLog) {
        let logger = Arc::new(MemoryLogger::new());
        let autolog = AutoLog::new(logger.clone(), config);
        (logger, autolog)
    }

    #[test]
    fn create_trims_and_mutes_without_emitting() {
        let (logger, autolog) = setup(AutoLogConfig::default());
        let event = Event::create(
            &autolog,
            fields(json!({ "operation": "getPage", "empty": "", "user": { "id": 1 }, "_locals": {} })),
        );

        assert_eq!(Value::Object(event.context().clone()), json!({ "operation": "getPage" }));
        assert!(logger.is_empty());
    }

    #[test]
    fn start_can_log_twice() {
        let (logger, autolog) = setup(AutoLogConfig::default());
        let event = Event::create(&autolog, fields(json!({ "operation": "getPage" })));
        event.start();
        event.start();
        assert_eq!(logger.records_at(LogLevel::Info).len(), 2);
    }

    #[test]
    fn success_appends_result_and_data() {
        let (logger, autolog) = setup(AutoLogConfig::default());
        Event::create(&autolog, fields(json!({ "action": "getUser" })))
            .success(Some(json!({ "id": 7 })));
        Event::create(&autolog, fields(json!({ "action": "getUser" }))).success(None);

        let records = logger.records_at(LogLevel::Info);
        assert_eq!(
            Value::Object(records[0].clone()),
            json!({ "action": "getUser", "result": "success", "data": { "id": 7 } })
        );
        assert_eq!(
            Value::Object(records[1].clone()),
            json!({ "action": "getUser", "result": "success" })
        );
    }

    #[test]
    fn action_derivation_leaves_parent_untouched() {
        let (logger, autolog) = setup(AutoLogConfig::default());
        let event = Event::create(&autolog, fields(json!({ "operation": "getPage" })));
        let child = event.action("getUser");

        assert_eq!(
            Value::Object(child.context().clone()),
            json!({ "operation": "getPage", "action": "getUser" })
        );
        assert_eq!(Value::Object(event.context().clone()), json!({ "operation": "getPage" }));

        child.success(None);
        event.success(None);
        let records = logger.records_at(LogLevel::Info);
        assert_eq!(records[0].get("action"), Some(&json!("getUser")));
        assert!(!records[1].contains_key("action"));
    }

    #[test]
    fn failure_merges_classified_record_at_derived_level() -> Result<(), ErrorEnvelope> {
        let (logger, autolog) = setup(AutoLogConfig::default().with_mute_fields(["stack"]));
        let event = Event::create(&autolog, fields(json!({ "operation": "getPage" })));
        event.failure_now(&autolog_domain::Exception::new("boom").with_stack("trace"))?;

        let records = logger.records_at(LogLevel::Error);
        assert_eq!(
            Value::Object(records[0].clone()),
            json!({
                "operation": "getPage",
                "result": "failure",
                "category": "NODE_SYSTEM_ERROR",
                "message": "boom"
            })
        );
        Ok(())
    }

    #[test]
    fn unspecified_failure_is_warn() {
        let (logger, autolog) = setup(AutoLogConfig::default());
        Event::create(&autolog, fields(json!({ "action": "getUser" }))).failure_unspecified();
        let records = logger.records_at(LogLevel::Warn);
        assert_eq!(
            Value::Object(records[0].clone()),
            json!({ "action": "getUser", "result": "failure" })
        );
    }

    #[test]
    fn configured_mute_cannot_remove_core_fields() {
        let (logger, autolog) =
            setup(AutoLogConfig::default().with_mute_fields(["result", "action", "requestId"]));
        Event::create(&autolog, fields(json!({ "action": "getUser", "requestId": "abc" })))
            .success(None);
        let records = logger.records_at(LogLevel::Info);
        assert_eq!(
            Value::Object(records[0].clone()),
            json!({ "action": "getUser", "result": "success" })
        );
    }
}

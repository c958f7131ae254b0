//! Failure classification and formatting.
//!
//! Turns any [`Throwable`] into a severity plus a normalized failure record.
//! Shapes overlap (a response is also an object, an exception may carry a
//! status), so the checks run in a fixed order and the first match wins:
//!
//! 1. absent failure
//! 2. transport response
//! 3. transport connection failure
//! 4. exception
//! 5. plain object
//! 6. anything else
//!
//! Every branch trims empty values and drops the `user` field. The only
//! error this module raises is a classification failure while reading or
//! decoding a response body.

use autolog_domain::{
    Category, FIELD_CATEGORY, FIELD_MESSAGE, FIELD_RESULT, FIELD_STATUS, FIELD_USER, Outcome,
};
use autolog_ports::{FetchResponse, LogLevel, Throwable};
use autolog_shared::{ErrorEnvelope, Fields, merge_into, remove_keys, trim_owned};
use futures_util::FutureExt;
use serde_json::Value;

/// Message recorded when a successful response is raised as a failure.
pub const RESPONSE_OK_MESSAGE: &str =
    "FETCH_RESPONSE_OK - it shouldn't be caught as exception, please check the code";

/// Status at and above which a failure is logged as an error.
pub const SERVER_ERROR_STATUS: f64 = 500.0;

const FIELD_CONTENT_TYPE: &str = "contentType";
const FIELD_CODE: &str = "code";
const FIELD_STACK: &str = "stack";
const HEADER_CONTENT_TYPE: &str = "content-type";
const JSON_MEDIA_TYPE: &str = "application/json";

/// Severity and normalized record for one failure.
#[derive(Debug, Clone, PartialEq)]
pub struct Classified {
    /// Severity the record is emitted at.
    pub level: LogLevel,
    /// Failure record, starting with `result: failure`.
    pub record: Fields,
}

/// Classify a failure value.
pub async fn classify<T: Throwable + ?Sized>(failure: &T) -> Result<Classified, ErrorEnvelope> {
    if failure.is_absent() {
        return Ok(Classified {
            level: LogLevel::Warn,
            record: failure_record(),
        });
    }

    if let Some(response) = failure.as_response() {
        return classify_response(response).await;
    }

    if let Some(network) = failure.as_network_error() {
        let mut record = failure_record();
        record.insert(
            FIELD_CATEGORY.to_owned(),
            Value::from(Category::FetchNetworkError.as_str()),
        );
        record.insert(FIELD_MESSAGE.to_owned(), Value::from(network.message));
        record.insert(
            FIELD_CODE.to_owned(),
            network.code.map_or(Value::Null, Value::from),
        );
        return Ok(Classified {
            level: LogLevel::Error,
            record: trim_owned(record),
        });
    }

    if let Some(exception) = failure.as_exception() {
        let category = if exception.fields.is_empty() {
            Category::NodeSystemError
        } else {
            Category::CustomError
        };
        let status = status_of(&exception.fields);

        let mut record = failure_record();
        record.insert(FIELD_CATEGORY.to_owned(), Value::from(category.as_str()));
        record.insert(
            FIELD_CODE.to_owned(),
            exception.code.clone().unwrap_or(Value::Null),
        );
        record.insert(
            FIELD_MESSAGE.to_owned(),
            Value::from(exception.message.clone().into_owned()),
        );
        record.insert(
            FIELD_STACK.to_owned(),
            exception
                .stack
                .as_deref()
                .map_or(Value::Null, Value::from),
        );
        merge_into(&mut record, without_user(&exception.fields));

        return Ok(Classified {
            level: level_for_status(status, LogLevel::Error),
            record: trim_owned(record),
        });
    }

    if let Some(object) = failure.as_object() {
        let status = status_of(&object);
        let mut record = failure_record();
        record.insert(
            FIELD_CATEGORY.to_owned(),
            Value::from(Category::CustomError.as_str()),
        );
        merge_into(&mut record, without_user(&object));

        return Ok(Classified {
            level: level_for_status(status, LogLevel::Warn),
            record: trim_owned(record),
        });
    }

    let mut record = failure_record();
    record.insert(FIELD_MESSAGE.to_owned(), failure.as_value());
    Ok(Classified {
        level: LogLevel::Warn,
        record: trim_owned(record),
    })
}

/// Classify without an async runtime.
///
/// Response bodies that are not immediately readable cannot be classified
/// synchronously and yield a classification failure.
pub fn classify_now<T: Throwable + ?Sized>(failure: &T) -> Result<Classified, ErrorEnvelope> {
    classify(failure).now_or_never().unwrap_or_else(|| {
        Err(ErrorEnvelope::classification_failed(
            "response body is not readable without awaiting",
        ))
    })
}

async fn classify_response(response: &dyn FetchResponse) -> Result<Classified, ErrorEnvelope> {
    let status = response.status();
    let mut record = failure_record();

    if response.ok() {
        record.insert(
            FIELD_CATEGORY.to_owned(),
            Value::from(Category::FetchResponseOk.as_str()),
        );
        record.insert(FIELD_STATUS.to_owned(), Value::from(status));
        record.insert(FIELD_MESSAGE.to_owned(), Value::from(RESPONSE_OK_MESSAGE));
        return Ok(Classified {
            level: LogLevel::Warn,
            record,
        });
    }

    let content_type = response.header(HEADER_CONTENT_TYPE);
    let body = response.body().await.map_err(|error| {
        ErrorEnvelope::classification_failed(format!(
            "failed to read response body: {}",
            error.message
        ))
        .with_metadata("status", status.to_string())
    })?;
    let message = parse_body(content_type, body, status)?;

    record.insert(
        FIELD_CATEGORY.to_owned(),
        Value::from(Category::FetchResponseError.as_str()),
    );
    record.insert(FIELD_STATUS.to_owned(), Value::from(status));
    record.insert(
        FIELD_CONTENT_TYPE.to_owned(),
        content_type.map_or(Value::Null, Value::from),
    );
    record.insert(FIELD_MESSAGE.to_owned(), message);

    Ok(Classified {
        level: level_for_status(Some(f64::from(status)), LogLevel::Error),
        record: trim_owned(record),
    })
}

fn parse_body(
    content_type: Option<&str>,
    body: Vec<u8>,
    status: u16,
) -> Result<Value, ErrorEnvelope> {
    if content_type.is_some_and(|value| value.contains(JSON_MEDIA_TYPE)) {
        return serde_json::from_slice(&body).map_err(|error| {
            ErrorEnvelope::classification_failed(format!("invalid JSON response body: {error}"))
                .with_metadata("status", status.to_string())
        });
    }

    String::from_utf8(body).map(Value::from).map_err(|error| {
        ErrorEnvelope::classification_failed(format!("response body is not UTF-8: {error}"))
            .with_metadata("status", status.to_string())
    })
}

fn failure_record() -> Fields {
    let mut record = Fields::new();
    record.insert(
        FIELD_RESULT.to_owned(),
        Value::from(Outcome::Failure.as_str()),
    );
    record
}

fn without_user(fields: &Fields) -> Fields {
    remove_keys(fields, &[FIELD_USER])
}

/// Numeric status of a failure; numeric strings such as `"503"` count.
fn status_of(fields: &Fields) -> Option<f64> {
    match fields.get(FIELD_STATUS)? {
        Value::Number(number) => number.as_f64(),
        Value::String(text) => text
            .trim()
            .parse::<f64>()
            .ok()
            .filter(|status| status.is_finite()),
        _ => None,
    }
}

fn level_for_status(status: Option<f64>, when_absent: LogLevel) -> LogLevel {
    match status {
        Some(status) if status < SERVER_ERROR_STATUS => LogLevel::Warn,
        Some(_) => LogLevel::Error,
        None => when_absent,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use autolog_domain::{Exception, NetworkError};
    use autolog_ports::BoxFuture;
    use serde_json::json;

    struct StubResponse {
        status: u16,
        content_type: Option<&'static str>,
        body: Result<Vec<u8>, ErrorEnvelope>,
    }

    impl FetchResponse for StubResponse {
        fn status(&self) -> u16 {
            self.status
        }

        fn header(&self, name: &str) -> Option<&str> {
            name.eq_ignore_ascii_case(HEADER_CONTENT_TYPE)
                .then_some(self.content_type)
                .flatten()
        }

        fn body(&self) -> BoxFuture<'_, Result<Vec<u8>, ErrorEnvelope>> {
            let body = self.body.clone();
            Box::pin(async move { body })
        }
    }

    impl Throwable for StubResponse {
        fn as_response(&self) -> Option<&dyn FetchResponse> {
            Some(self)
        }
    }

    fn response(status: u16, content_type: Option<&'static str>, body: &str) -> StubResponse {
        StubResponse {
            status,
            content_type,
            body: Ok(body.as_bytes().to_vec()),
        }
    }

    #[test]
    fn absent_failure_is_a_bare_warn_record() -> Result<(), ErrorEnvelope> {
        let classified = classify_now(&Value::Null)?;
        assert_eq!(classified.level, LogLevel::Warn);
        assert_eq!(Value::Object(classified.record), json!({ "result": "failure" }));

        let classified = classify_now(&None::<Exception>)?;
        assert_eq!(Value::Object(classified.record), json!({ "result": "failure" }));
        Ok(())
    }

    #[test]
    fn text_response_error_under_500_is_warn() -> Result<(), ErrorEnvelope> {
        let failure = response(403, Some("text/plain; charset=utf-8"), "403 Forbidden");
        let classified = classify_now(&failure)?;

        assert_eq!(classified.level, LogLevel::Warn);
        assert_eq!(
            Value::Object(classified.record),
            json!({
                "result": "failure",
                "category": "FETCH_RESPONSE_ERROR",
                "status": 403,
                "contentType": "text/plain; charset=utf-8",
                "message": "403 Forbidden"
            })
        );
        Ok(())
    }

    #[test]
    fn json_response_error_at_500_is_error_with_parsed_message() -> Result<(), ErrorEnvelope> {
        let failure = response(
            500,
            Some("application/json; charset=utf-8"),
            r#"{"message":"some message","document":"some url"}"#,
        );
        let classified = classify_now(&failure)?;

        assert_eq!(classified.level, LogLevel::Error);
        assert_eq!(
            classified.record.get("message"),
            Some(&json!({ "message": "some message", "document": "some url" }))
        );
        assert_eq!(classified.record.get("status"), Some(&json!(500)));
        Ok(())
    }

    #[test]
    fn ok_response_is_flagged_as_misuse_without_reading_body() -> Result<(), ErrorEnvelope> {
        let failure = StubResponse {
            status: 200,
            content_type: Some("application/json"),
            body: Err(ErrorEnvelope::classification_failed("must not be read")),
        };
        let classified = classify_now(&failure)?;

        assert_eq!(classified.level, LogLevel::Warn);
        assert_eq!(
            Value::Object(classified.record),
            json!({
                "result": "failure",
                "category": "FETCH_RESPONSE_OK",
                "status": 200,
                "message": RESPONSE_OK_MESSAGE
            })
        );
        Ok(())
    }

    #[test]
    fn malformed_json_body_is_a_classification_failure() {
        let failure = response(502, Some("application/json"), "<html>bad gateway</html>");
        let error = classify_now(&failure);
        assert!(matches!(error, Err(ref envelope) if envelope.is_classification_failure()));
    }

    #[test]
    fn unreadable_body_propagates() {
        let failure = StubResponse {
            status: 503,
            content_type: None,
            body: Err(ErrorEnvelope::classification_failed("socket closed")),
        };
        let error = classify_now(&failure);
        assert!(matches!(error, Err(ref envelope) if envelope.is_classification_failure()));
    }

    #[test]
    fn network_error_is_always_error() -> Result<(), ErrorEnvelope> {
        let failure = NetworkError::new("request to https://example.com failed").with_code("ENOTFOUND");
        let classified = classify_now(&failure)?;

        assert_eq!(classified.level, LogLevel::Error);
        assert_eq!(
            Value::Object(classified.record),
            json!({
                "result": "failure",
                "category": "FETCH_NETWORK_ERROR",
                "message": "request to https://example.com failed",
                "code": "ENOTFOUND"
            })
        );
        Ok(())
    }

    #[test]
    fn plain_exception_is_node_system_error_at_error() -> Result<(), ErrorEnvelope> {
        let failure = Exception::new("some error message").with_stack("Error: some error message\n    at main");
        let classified = classify_now(&failure)?;

        assert_eq!(classified.level, LogLevel::Error);
        assert_eq!(classified.record.get("category"), Some(&json!("NODE_SYSTEM_ERROR")));
        assert_eq!(classified.record.get("message"), Some(&json!("some error message")));
        assert!(classified.record.contains_key("stack"));
        assert!(!classified.record.contains_key("status"));
        assert!(!classified.record.contains_key("code"));
        Ok(())
    }

    #[test]
    fn exception_with_custom_fields_is_custom_error() -> Result<(), ErrorEnvelope> {
        let failure = Exception::new("not found")
            .with_field("status", 404)
            .with_field("user", json!({ "email": "a@b.com" }))
            .with_field("handler", "getUser");
        let classified = classify_now(&failure)?;

        assert_eq!(classified.level, LogLevel::Warn);
        assert_eq!(classified.record.get("category"), Some(&json!("CUSTOM_ERROR")));
        assert_eq!(classified.record.get("status"), Some(&json!(404)));
        assert!(!classified.record.contains_key("user"));
        Ok(())
    }

    #[test]
    fn explicit_category_wins_but_keeps_its_position() -> Result<(), ErrorEnvelope> {
        let failure = Exception::new("bad input").with_field("category", "INPUT_ERROR");
        let classified = classify_now(&failure)?;

        let keys: Vec<&str> = classified.record.keys().map(String::as_str).collect();
        assert_eq!(keys, vec!["result", "category", "message"]);
        assert_eq!(classified.record.get("category"), Some(&json!("INPUT_ERROR")));
        Ok(())
    }

    #[test]
    fn plain_object_drops_user_and_uses_status_severity() -> Result<(), ErrorEnvelope> {
        let failure = json!({ "status": 404, "message": "x", "user": { "email": "a@b.com" } });
        let classified = classify_now(&failure)?;

        assert_eq!(classified.level, LogLevel::Warn);
        assert_eq!(
            Value::Object(classified.record),
            json!({ "result": "failure", "category": "CUSTOM_ERROR", "status": 404, "message": "x" })
        );

        let failure = json!({ "status": 503, "message": "" });
        let classified = classify_now(&failure)?;
        assert_eq!(classified.level, LogLevel::Error);
        assert!(!classified.record.contains_key("message"));
        Ok(())
    }

    #[test]
    fn plain_object_category_overrides_custom_error() -> Result<(), ErrorEnvelope> {
        let failure = json!({ "category": "INPUT_ERROR", "message": "bad input" });
        let classified = classify_now(&failure)?;

        assert_eq!(classified.level, LogLevel::Warn);
        let keys: Vec<&str> = classified.record.keys().map(String::as_str).collect();
        assert_eq!(keys, vec!["result", "category", "message"]);
        assert_eq!(
            Value::Object(classified.record),
            json!({ "result": "failure", "category": "INPUT_ERROR", "message": "bad input" })
        );
        Ok(())
    }

    #[test]
    fn numeric_string_status_sets_severity() -> Result<(), ErrorEnvelope> {
        let classified = classify_now(&json!({ "status": "503", "message": "down" }))?;
        assert_eq!(classified.level, LogLevel::Error);
        assert_eq!(classified.record.get("status"), Some(&json!("503")));

        let classified = classify_now(&json!({ "status": " 404 " }))?;
        assert_eq!(classified.level, LogLevel::Warn);

        let failure = Exception::new("timeout").with_field("status", "not-a-number");
        assert_eq!(classify_now(&failure)?.level, LogLevel::Error);
        Ok(())
    }

    #[test]
    fn plain_object_without_status_is_warn() -> Result<(), ErrorEnvelope> {
        let classified = classify_now(&json!({ "message": "bar" }))?;
        assert_eq!(classified.level, LogLevel::Warn);
        assert_eq!(classified.record.get("category"), Some(&json!("CUSTOM_ERROR")));
        Ok(())
    }

    #[test]
    fn primitives_become_the_message() -> Result<(), ErrorEnvelope> {
        let classified = classify_now("something went wrong")?;
        assert_eq!(classified.level, LogLevel::Warn);
        assert_eq!(
            Value::Object(classified.record),
            json!({ "result": "failure", "message": "something went wrong" })
        );

        let classified = classify_now(&json!(42))?;
        assert_eq!(classified.record.get("message"), Some(&json!(42)));
        Ok(())
    }
}

//! Response classifier for the simulated Woofy handler.
//!
//! Rules are evaluated in a fixed order and the first match wins:
//! 1. null event -> `NullEvent`
//! 2. empty event -> `InvalidEvent`
//! 3. simulated database failure -> `DatabaseError`
//! 4. simulated timeout -> `ServiceTimeout`
//! 5. expected success -> 200 with Woofy's greeting
//! 6. body mentions "message" and is longer than the body limit -> `MessageTooLarge`
//! 7. JSON body whose `user_id` is longer than the user-id limit -> `InvalidUserID`
//! 8. the expected label's table entry, or `UnexpectedError` when there is none
//!
//! Rules 6 and 7 fire whatever label the caller expects. A caller asking for
//! `UnsupportedAction` with an oversized body gets `MessageTooLarge`.

use serde::Serialize;
use serde_json::ser::Formatter;
use serde_json::Value;
use std::io;

use crate::context::InvocationContext;
use crate::labels::{self, ErrorLabel, USER_ID_TOO_LONG};
use crate::models::{HandlerResponse, ScenarioInput};

/// Body length (in characters) above which a message is rejected.
pub const MAX_BODY_CHARS: usize = 5000;
/// User id length (in characters) above which the id is rejected.
pub const MAX_USER_ID_CHARS: usize = 100;

/// Length thresholds used by rules 6 and 7.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ClassifierLimits {
    pub max_body_chars: usize,
    pub max_user_id_chars: usize,
}

impl Default for ClassifierLimits {
    fn default() -> Self {
        Self {
            max_body_chars: MAX_BODY_CHARS,
            max_user_id_chars: MAX_USER_ID_CHARS,
        }
    }
}

impl ClassifierLimits {
    /// Read limits from the environment.
    ///
    /// Environment:
    /// - WOOFY_MAX_BODY_CHARS     -> body length limit (usize)
    /// - WOOFY_MAX_USER_ID_CHARS  -> user id length limit (usize)
    ///
    /// Missing or unparsable values keep the defaults.
    pub fn from_env() -> Self {
        let defaults = Self::default();
        Self {
            max_body_chars: env_usize("WOOFY_MAX_BODY_CHARS").unwrap_or(defaults.max_body_chars),
            max_user_id_chars: env_usize("WOOFY_MAX_USER_ID_CHARS")
                .unwrap_or(defaults.max_user_id_chars),
        }
    }
}

fn env_usize(key: &str) -> Option<usize> {
    std::env::var(key).ok()?.trim().parse().ok()
}

/// Classify a scenario using the default limits.
pub fn classify(scenario: Option<&ScenarioInput>) -> HandlerResponse {
    classify_with_limits(scenario, &ClassifierLimits::default())
}

/// Classify a scenario. `None` stands for a scenario with a null event.
pub fn classify_with_limits(
    scenario: Option<&ScenarioInput>,
    limits: &ClassifierLimits,
) -> HandlerResponse {
    let Some(scenario) = scenario else {
        return HandlerResponse::for_label(ErrorLabel::NullEvent);
    };
    let Some(event) = scenario.event.as_ref() else {
        return HandlerResponse::for_label(ErrorLabel::NullEvent);
    };
    if event.is_empty() {
        return HandlerResponse::for_label(ErrorLabel::InvalidEvent);
    }
    if scenario.simulate_db_failure {
        return HandlerResponse::for_label(ErrorLabel::DatabaseError);
    }
    if scenario.simulate_timeout {
        return HandlerResponse::for_label(ErrorLabel::ServiceTimeout);
    }
    if scenario.should_succeed {
        return HandlerResponse::success();
    }

    let body = event.get("body");

    let body_text = body.map(stringify).unwrap_or_default();
    if body_text.contains("message") && body_text.chars().count() > limits.max_body_chars {
        return HandlerResponse::for_label(ErrorLabel::MessageTooLarge);
    }

    if let Some(user_id) = body.and_then(user_id_of) {
        if user_id.chars().count() > limits.max_user_id_chars {
            let row = ErrorLabel::InvalidUserId.canned();
            return HandlerResponse::error(row.label, row.status, USER_ID_TOO_LONG);
        }
    }

    scenario
        .expected_error_label
        .as_deref()
        .and_then(labels::lookup)
        .map(HandlerResponse::from_canned)
        .unwrap_or_else(|| HandlerResponse::for_label(ErrorLabel::UnexpectedError))
}

/// Classify inside a span tagged with the invocation's request id.
pub fn classify_in_context(
    ctx: &InvocationContext,
    scenario: Option<&ScenarioInput>,
    limits: &ClassifierLimits,
) -> HandlerResponse {
    let span = tracing::info_span!(
        "invocation",
        function = %ctx.function_name,
        request_id = %ctx.request_id
    );
    let _guard = span.enter();

    let resp = classify_with_limits(scenario, limits);
    match resp.error {
        Some(label) => tracing::info!(status = resp.status_code, error = %label, "handler rejected event"),
        None => tracing::debug!(status = resp.status_code, "handler accepted event"),
    }
    resp
}

/// Text form of a body value: strings as-is, anything else as JSON laid out with
/// `", "` and `": "` separators, matching how the handler's runtime prints a decoded body.
fn stringify(v: &Value) -> String {
    match v {
        Value::String(s) => s.clone(),
        other => spaced_json(other).unwrap_or_else(|| other.to_string()),
    }
}

fn spaced_json(v: &Value) -> Option<String> {
    let mut out = Vec::new();
    let mut ser = serde_json::Serializer::with_formatter(&mut out, SpacedFormatter);
    v.serialize(&mut ser).ok()?;
    String::from_utf8(out).ok()
}

/// Single-line JSON with a space after each `,` and `:`.
struct SpacedFormatter;

impl Formatter for SpacedFormatter {
    fn begin_array_value<W>(&mut self, writer: &mut W, first: bool) -> io::Result<()>
    where
        W: ?Sized + io::Write,
    {
        if first {
            Ok(())
        } else {
            writer.write_all(b", ")
        }
    }

    fn begin_object_key<W>(&mut self, writer: &mut W, first: bool) -> io::Result<()>
    where
        W: ?Sized + io::Write,
    {
        if first {
            Ok(())
        } else {
            writer.write_all(b", ")
        }
    }

    fn begin_object_value<W>(&mut self, writer: &mut W) -> io::Result<()>
    where
        W: ?Sized + io::Write,
    {
        writer.write_all(b": ")
    }
}

/// `user_id` of a body that is (or encodes) a JSON object. Malformed JSON is ignored.
fn user_id_of(body: &Value) -> Option<String> {
    let parsed;
    let obj = match body {
        Value::String(s) => {
            parsed = serde_json::from_str::<Value>(s).ok()?;
            parsed.as_object()?
        }
        Value::Object(map) => map,
        _ => return None,
    };
    obj.get("user_id").map(stringify)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn chat_body(user_id: &str, message: Value) -> ScenarioInput {
        ScenarioInput::with_json_body(&json!({
            "user_id": user_id,
            "message": message,
            "action": "chat"
        }))
    }

    #[test]
    fn null_scenario_and_null_event_are_equivalent() {
        assert_eq!(classify(None), classify(Some(&ScenarioInput::null_event())));
        assert_eq!(classify(None).error, Some(ErrorLabel::NullEvent));
    }

    #[test]
    fn empty_event_beats_every_flag() {
        let s = ScenarioInput::from_event(json!({}))
            .with_db_failure()
            .with_timeout()
            .succeeding();
        assert_eq!(classify(Some(&s)).error, Some(ErrorLabel::InvalidEvent));
    }

    #[test]
    fn structured_body_user_id_is_checked() {
        let s = ScenarioInput::from_event(json!({
            "body": {"user_id": "x".repeat(101), "action": "chat"}
        }))
        .expecting("EmptyMessage");
        let r = classify(Some(&s));
        assert_eq!(r.error, Some(ErrorLabel::InvalidUserId));
        assert!(r.body.contains(USER_ID_TOO_LONG));
    }

    #[test]
    fn user_id_at_the_limit_is_accepted() {
        let s = chat_body(&"x".repeat(100), json!("hi")).expecting("EmptyMessage");
        assert_eq!(classify(Some(&s)).error, Some(ErrorLabel::EmptyMessage));
    }

    #[test]
    fn numeric_user_id_uses_its_text_form() {
        let s = ScenarioInput::with_json_body(&json!({"user_id": 12345})).expecting("Unauthorized");
        assert_eq!(classify(Some(&s)).error, Some(ErrorLabel::Unauthorized));
    }

    #[test]
    fn long_body_without_message_keyword_is_not_too_large() {
        let s = ScenarioInput::from_event(json!({"body": "y".repeat(6000)})).expecting("InvalidJSON");
        assert_eq!(classify(Some(&s)).error, Some(ErrorLabel::InvalidJson));
    }

    #[test]
    fn structured_body_is_measured_with_spaced_separators() {
        // `{"message": "` + 4986 chars + `"}` is 5001 characters; compact JSON would be 5000.
        let s = ScenarioInput::from_event(json!({"body": {"message": "x".repeat(4986)}}))
            .expecting("InvalidJSON");
        let r = classify(Some(&s));
        assert_eq!(r.status_code, 413);
        assert_eq!(r.error, Some(ErrorLabel::MessageTooLarge));

        let s = ScenarioInput::from_event(json!({"body": {"message": "x".repeat(4985)}}))
            .expecting("InvalidJSON");
        assert_eq!(classify(Some(&s)).error, Some(ErrorLabel::InvalidJson));
    }

    #[test]
    fn spaced_layout_separates_keys_and_items() {
        let v = json!({"a": [1, 2], "b": {"c": null}});
        assert_eq!(stringify(&v), r#"{"a": [1, 2], "b": {"c": null}}"#);
        assert_eq!(stringify(&json!("raw text")), "raw text");
    }

    #[test]
    fn body_length_counts_characters_not_bytes() {
        // 2500 two-byte characters: over 5000 bytes, under 5000 characters.
        let text = format!("message {}", "ü".repeat(2500));
        let s = ScenarioInput::from_event(json!({ "body": text })).expecting("InvalidJSON");
        assert_eq!(classify(Some(&s)).error, Some(ErrorLabel::InvalidJson));
    }

    #[test]
    fn malformed_json_falls_through_to_the_table() {
        let s = ScenarioInput::from_event(json!({"body": r#"{"invalid": json, "missing": quotes}"#}))
            .expecting("InvalidJSON");
        assert_eq!(classify(Some(&s)).error, Some(ErrorLabel::InvalidJson));
    }

    #[test]
    fn unknown_or_missing_label_is_unexpected() {
        let s = chat_body("u-1", json!("hi"));
        assert_eq!(classify(Some(&s)).error, Some(ErrorLabel::UnexpectedError));
        let s = s.expecting("NoSuchLabel");
        let r = classify(Some(&s));
        assert_eq!(r.status_code, 500);
        assert!(r.body.contains("Unexpected error"));
    }

    #[test]
    fn custom_limits_are_honoured() {
        let limits = ClassifierLimits {
            max_body_chars: 10,
            max_user_id_chars: 3,
        };
        let s = ScenarioInput::from_event(json!({"body": "message: hello"}));
        assert_eq!(
            classify_with_limits(Some(&s), &limits).error,
            Some(ErrorLabel::MessageTooLarge)
        );
        let s = ScenarioInput::from_event(json!({"body": {"user_id": "abcd"}}));
        assert_eq!(
            classify_with_limits(Some(&s), &limits).error,
            Some(ErrorLabel::InvalidUserId)
        );
    }

    #[test]
    fn context_does_not_change_the_outcome() {
        let ctx = InvocationContext::new("woofy-handler");
        let s = chat_body("u-1", json!("hi")).expecting("InvalidToken");
        assert_eq!(
            classify_in_context(&ctx, Some(&s), &ClassifierLimits::default()),
            classify(Some(&s))
        );
    }
}

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use serde_with::skip_serializing_none;

/// Synthetic description of one handler invocation.
///
/// `event` is the raw Lambda event mapping; `None` models a null event. The remaining
/// fields are simulation switches and never appear in a real event.
///
/// Example (wire form accepted by `POST /simulate`):
/// {
///   "event": { "body": "{\"user_id\":\"u-1\",\"message\":\"hi\"}" },
///   "expectedErrorLabel": "RateLimitExceeded"
/// }
#[skip_serializing_none]
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ScenarioInput {
    #[serde(default)]
    pub event: Option<Map<String, Value>>,
    #[serde(default)]
    pub simulate_db_failure: bool,
    #[serde(default)]
    pub simulate_timeout: bool,
    #[serde(default)]
    pub should_succeed: bool,
    #[serde(default)]
    pub expected_error_label: Option<String>,
}

impl ScenarioInput {
    /// Scenario whose event is null.
    pub fn null_event() -> Self {
        Self::default()
    }

    /// Scenario built from an arbitrary JSON event. Anything other than an object is
    /// treated as a null event.
    pub fn from_event(event: Value) -> Self {
        Self {
            event: match event {
                Value::Object(map) => Some(map),
                _ => None,
            },
            ..Self::default()
        }
    }

    /// Scenario whose event carries `body` as JSON-encoded text, the way API Gateway
    /// delivers it.
    pub fn with_json_body(body: &Value) -> Self {
        let mut event = Map::new();
        event.insert("body".to_string(), Value::String(body.to_string()));
        Self {
            event: Some(event),
            ..Self::default()
        }
    }

    /// Label the caller expects the handler to report.
    pub fn expecting(mut self, label: impl Into<String>) -> Self {
        self.expected_error_label = Some(label.into());
        self
    }

    pub fn succeeding(mut self) -> Self {
        self.should_succeed = true;
        self
    }

    pub fn with_db_failure(mut self) -> Self {
        self.simulate_db_failure = true;
        self
    }

    pub fn with_timeout(mut self) -> Self {
        self.simulate_timeout = true;
        self
    }

    /// Set a header on the event, creating the event and its `headers` map as needed.
    pub fn with_header(mut self, name: &str, value: &str) -> Self {
        let event = self.event.get_or_insert_with(Map::new);
        let headers = event
            .entry("headers")
            .or_insert_with(|| Value::Object(Map::new()));
        if let Value::Object(h) = headers {
            h.insert(name.to_string(), Value::String(value.to_string()));
        }
        self
    }

    /// The `body` field of the event, if any.
    pub fn body(&self) -> Option<&Value> {
        self.event.as_ref().and_then(|e| e.get("body"))
    }

    /// Header lookup (exact name match, as Lambda events preserve client casing).
    pub fn header(&self, name: &str) -> Option<&str> {
        self.event
            .as_ref()
            .and_then(|e| e.get("headers"))
            .and_then(|h| h.get(name))
            .and_then(|v| v.as_str())
    }
}

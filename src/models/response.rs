use axum::response::{IntoResponse, Response};
use http::{header, HeaderValue, StatusCode};
use serde::{Deserialize, Serialize};
use serde_with::skip_serializing_none;

use crate::labels::{CannedResponse, ErrorLabel, SUCCESS_REPLY};

/// Header carrying the error label on simulated HTTP responses.
pub const ERROR_LABEL_HEADER: &str = "x-woofy-error";

/// Lambda proxy-integration style response.
///
/// `body` is JSON-encoded text, exactly as a handler would hand it back to API Gateway.
#[skip_serializing_none]
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HandlerResponse {
    pub status_code: u16,
    #[serde(default)]
    pub error: Option<ErrorLabel>,
    pub body: String,
}

impl HandlerResponse {
    /// Error response with `{"error": message}` as body.
    pub fn error(label: ErrorLabel, status: StatusCode, message: &str) -> Self {
        Self {
            status_code: status.as_u16(),
            error: Some(label),
            body: serde_json::json!({ "error": message }).to_string(),
        }
    }

    /// The fixed response registered for a table row.
    pub fn from_canned(row: &CannedResponse) -> Self {
        Self::error(row.label, row.status, row.message)
    }

    /// The fixed response registered for `label`.
    pub fn for_label(label: ErrorLabel) -> Self {
        Self::from_canned(label.canned())
    }

    /// 200 response carrying Woofy's greeting.
    pub fn success() -> Self {
        Self {
            status_code: StatusCode::OK.as_u16(),
            error: None,
            body: serde_json::json!({ "response": SUCCESS_REPLY }).to_string(),
        }
    }

    pub fn status(&self) -> StatusCode {
        StatusCode::from_u16(self.status_code).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR)
    }

    pub fn is_error(&self) -> bool {
        self.error.is_some()
    }

    /// Decoded body; `None` if it is not valid JSON.
    pub fn body_json(&self) -> Option<serde_json::Value> {
        serde_json::from_str(&self.body).ok()
    }
}

impl IntoResponse for HandlerResponse {
    fn into_response(self) -> Response {
        let status = self.status();
        let label = self.error;
        let mut resp = (
            status,
            [(header::CONTENT_TYPE, "application/json")],
            self.body,
        )
            .into_response();
        if let Some(label) = label {
            resp.headers_mut()
                .insert(ERROR_LABEL_HEADER, HeaderValue::from_static(label.as_str()));
        }
        resp
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn serializes_like_a_lambda_response() {
        let r = HandlerResponse::for_label(ErrorLabel::InvalidJson);
        let v = serde_json::to_value(&r).unwrap();
        assert_eq!(v["statusCode"], 400);
        assert_eq!(v["error"], "InvalidJSON");
        assert_eq!(r.body_json().unwrap(), json!({"error": "Invalid JSON"}));
    }

    #[test]
    fn success_omits_error_key() {
        let v = serde_json::to_value(HandlerResponse::success()).unwrap();
        assert_eq!(v["statusCode"], 200);
        assert!(v.get("error").is_none());
        assert!(v["body"].as_str().unwrap().contains("response"));
    }

    #[test]
    fn into_response_sets_status_and_label_header() {
        let resp = HandlerResponse::for_label(ErrorLabel::RateLimitExceeded).into_response();
        assert_eq!(resp.status(), StatusCode::TOO_MANY_REQUESTS);
        assert_eq!(
            resp.headers().get(ERROR_LABEL_HEADER).unwrap(),
            "RateLimitExceeded"
        );
        assert_eq!(
            resp.headers().get(header::CONTENT_TYPE).unwrap(),
            "application/json"
        );
    }
}

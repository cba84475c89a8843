//! Error labels and the static label -> response table.
//!
//! Every label maps to exactly one status code and one error message. The table is a
//! compile-time constant; the lookup index over it is built once on first use.

use http::StatusCode;
use once_cell::sync::Lazy;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fmt;
use std::str::FromStr;

/// Named failure conditions the Woofy handler can report.
///
/// Serializes to the exact label strings used in handler responses
/// (e.g. `"InvalidJSON"`, `"InvalidUserID"`).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ErrorLabel {
    NullEvent,
    InvalidEvent,
    #[serde(rename = "InvalidJSON")]
    InvalidJson,
    MissingFields,
    #[serde(rename = "InvalidUserID")]
    InvalidUserId,
    EmptyMessage,
    UnsupportedAction,
    MessageTooLarge,
    SecurityViolation,
    RateLimitExceeded,
    InvalidContentType,
    Unauthorized,
    InvalidToken,
    InvalidMessageFormat,
    DatabaseError,
    ServiceTimeout,
    UnexpectedError,
}

impl ErrorLabel {
    /// All labels, in table order.
    pub const ALL: [ErrorLabel; 17] = [
        ErrorLabel::NullEvent,
        ErrorLabel::InvalidEvent,
        ErrorLabel::InvalidJson,
        ErrorLabel::MissingFields,
        ErrorLabel::InvalidUserId,
        ErrorLabel::EmptyMessage,
        ErrorLabel::UnsupportedAction,
        ErrorLabel::MessageTooLarge,
        ErrorLabel::SecurityViolation,
        ErrorLabel::RateLimitExceeded,
        ErrorLabel::InvalidContentType,
        ErrorLabel::Unauthorized,
        ErrorLabel::InvalidToken,
        ErrorLabel::InvalidMessageFormat,
        ErrorLabel::DatabaseError,
        ErrorLabel::ServiceTimeout,
        ErrorLabel::UnexpectedError,
    ];

    /// Wire name of the label as it appears in responses.
    pub fn as_str(&self) -> &'static str {
        match self {
            ErrorLabel::NullEvent => "NullEvent",
            ErrorLabel::InvalidEvent => "InvalidEvent",
            ErrorLabel::InvalidJson => "InvalidJSON",
            ErrorLabel::MissingFields => "MissingFields",
            ErrorLabel::InvalidUserId => "InvalidUserID",
            ErrorLabel::EmptyMessage => "EmptyMessage",
            ErrorLabel::UnsupportedAction => "UnsupportedAction",
            ErrorLabel::MessageTooLarge => "MessageTooLarge",
            ErrorLabel::SecurityViolation => "SecurityViolation",
            ErrorLabel::RateLimitExceeded => "RateLimitExceeded",
            ErrorLabel::InvalidContentType => "InvalidContentType",
            ErrorLabel::Unauthorized => "Unauthorized",
            ErrorLabel::InvalidToken => "InvalidToken",
            ErrorLabel::InvalidMessageFormat => "InvalidMessageFormat",
            ErrorLabel::DatabaseError => "DatabaseError",
            ErrorLabel::ServiceTimeout => "ServiceTimeout",
            ErrorLabel::UnexpectedError => "UnexpectedError",
        }
    }

    /// The fixed response registered for this label.
    pub fn canned(&self) -> &'static CannedResponse {
        // The index is built from RESPONSE_TABLE, which lists every variant.
        &RESPONSE_TABLE[BY_LABEL[self]]
    }
}

impl fmt::Display for ErrorLabel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Returned when a string does not name any [`ErrorLabel`].
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown error label: {0}")]
pub struct UnknownLabel(pub String);

impl FromStr for ErrorLabel {
    type Err = UnknownLabel;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        BY_NAME
            .get(s)
            .map(|idx| RESPONSE_TABLE[*idx].label)
            .ok_or_else(|| UnknownLabel(s.to_string()))
    }
}

/// One row of the static response table.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CannedResponse {
    pub label: ErrorLabel,
    pub status: StatusCode,
    /// Human-readable message placed under `"error"` in the JSON body.
    pub message: &'static str,
}

/// Message used instead of the table entry when the user id exceeds the length limit.
pub const USER_ID_TOO_LONG: &str = "User ID too long";

/// Reply returned for scenarios that are expected to succeed.
pub const SUCCESS_REPLY: &str = "Hello! I'm Woofy, how can I help you today?";

/// The label -> response table. Never mutated.
pub static RESPONSE_TABLE: [CannedResponse; 17] = [
    canned(ErrorLabel::NullEvent, StatusCode::BAD_REQUEST, "Event cannot be null"),
    canned(ErrorLabel::InvalidEvent, StatusCode::BAD_REQUEST, "Invalid event"),
    canned(ErrorLabel::InvalidJson, StatusCode::BAD_REQUEST, "Invalid JSON"),
    canned(ErrorLabel::MissingFields, StatusCode::BAD_REQUEST, "Missing required fields"),
    canned(ErrorLabel::InvalidUserId, StatusCode::BAD_REQUEST, "Invalid user ID format"),
    canned(ErrorLabel::EmptyMessage, StatusCode::BAD_REQUEST, "Message cannot be empty"),
    canned(ErrorLabel::UnsupportedAction, StatusCode::BAD_REQUEST, "Unsupported action"),
    canned(ErrorLabel::MessageTooLarge, StatusCode::PAYLOAD_TOO_LARGE, "Message too large"),
    canned(
        ErrorLabel::SecurityViolation,
        StatusCode::BAD_REQUEST,
        "Security violation detected",
    ),
    canned(
        ErrorLabel::RateLimitExceeded,
        StatusCode::TOO_MANY_REQUESTS,
        "Rate limit exceeded",
    ),
    canned(ErrorLabel::InvalidContentType, StatusCode::BAD_REQUEST, "Invalid content type"),
    canned(ErrorLabel::Unauthorized, StatusCode::UNAUTHORIZED, "Unauthorized"),
    canned(ErrorLabel::InvalidToken, StatusCode::UNAUTHORIZED, "Invalid token"),
    canned(
        ErrorLabel::InvalidMessageFormat,
        StatusCode::BAD_REQUEST,
        "Message must be a string",
    ),
    canned(
        ErrorLabel::DatabaseError,
        StatusCode::INTERNAL_SERVER_ERROR,
        "Internal server error",
    ),
    canned(ErrorLabel::ServiceTimeout, StatusCode::GATEWAY_TIMEOUT, "Service timeout"),
    canned(
        ErrorLabel::UnexpectedError,
        StatusCode::INTERNAL_SERVER_ERROR,
        "Unexpected error",
    ),
];

const fn canned(label: ErrorLabel, status: StatusCode, message: &'static str) -> CannedResponse {
    CannedResponse {
        label,
        status,
        message,
    }
}

static BY_LABEL: Lazy<HashMap<ErrorLabel, usize>> = Lazy::new(|| {
    RESPONSE_TABLE
        .iter()
        .enumerate()
        .map(|(idx, row)| (row.label, idx))
        .collect()
});

static BY_NAME: Lazy<HashMap<&'static str, usize>> = Lazy::new(|| {
    RESPONSE_TABLE
        .iter()
        .enumerate()
        .map(|(idx, row)| (row.label.as_str(), idx))
        .collect()
});

/// Look up a label by its wire name. Unknown names yield `None`.
pub fn lookup(name: &str) -> Option<&'static CannedResponse> {
    BY_NAME.get(name).map(|idx| &RESPONSE_TABLE[*idx])
}

//! Structured errors for the API gateway.

use std::fmt;

use serde_json::Value;

/// Categories of API errors for consistent handling.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ApiErrorKind {
    /// The request never completed (connection, DNS, timeout, body read).
    Transport,
    /// Non-success HTTP status from the service.
    Status,
    /// The response decoded as JSON but not into the expected shape.
    Decode,
}

impl fmt::Display for ApiErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ApiErrorKind::Transport => write!(f, "transport"),
            ApiErrorKind::Status => write!(f, "status"),
            ApiErrorKind::Decode => write!(f, "decode"),
        }
    }
}

/// A failed API call, normalized across endpoints.
///
/// `message` prefers the service's `detail` or `message` payload field so
/// callers can show (or match on) what the server actually said.
#[derive(Debug, Clone)]
pub struct ApiError {
    pub kind: ApiErrorKind,
    /// HTTP status code, when the response got far enough to have one.
    pub status: Option<u16>,
    /// One-line summary suitable for display.
    pub message: String,
    /// Raw response body, kept for diagnostics.
    pub body: Option<String>,
}

impl ApiError {
    /// Fallback message when the service sends no usable payload.
    const GENERIC_MESSAGE: &str = "Request failed";

    pub fn transport(message: impl Into<String>) -> Self {
        Self {
            kind: ApiErrorKind::Transport,
            status: None,
            message: message.into(),
            body: None,
        }
    }

    /// Creates a non-success status error from the parsed payload.
    ///
    /// The payload has already been through the empty-object fallback, so
    /// `detail`/`message` lookups never fail, they just come up empty.
    pub fn http_status(status: u16, payload: &Value, raw_body: &str) -> Self {
        let message = payload
            .get("detail")
            .and_then(Value::as_str)
            .or_else(|| payload.get("message").and_then(Value::as_str))
            .unwrap_or(Self::GENERIC_MESSAGE)
            .to_string();

        Self {
            kind: ApiErrorKind::Status,
            status: Some(status),
            message,
            body: (!raw_body.is_empty()).then(|| raw_body.to_string()),
        }
    }

    pub fn decode(what: &str, err: &serde_json::Error) -> Self {
        Self {
            kind: ApiErrorKind::Decode,
            status: None,
            message: format!("Unexpected {what} response shape: {err}"),
            body: None,
        }
    }
}

impl fmt::Display for ApiError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.status {
            Some(status) => write!(f, "HTTP {}: {}", status, self.message),
            None => write!(f, "{}", self.message),
        }
    }
}

impl std::error::Error for ApiError {}

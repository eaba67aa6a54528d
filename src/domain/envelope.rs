//! Response envelope wire model.
//!
//! Console endpoints wrap their payload as
//! `{ "code": 0, "msg": "success", "level": "s", "data": ... }`. Legacy endpoints
//! return bare bodies without a `code` field, which are passed through untouched.
//! A `code` that is present is never ignored, even when it is `null`. The server
//! emits `code` as a number or as a numeric string depending on the endpoint, so
//! both forms are accepted; success is decided with loose zero equality, so a blank
//! string and `false` also count as `0`.

use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::fmt;

/// Message used when a business error arrives without `msg`.
pub const DEFAULT_ERROR_MESSAGE: &str = "Request failed";

/// Status code carried by an envelope.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum EnvelopeCode {
    /// Integral JSON number.
    Numeric(i64),
    /// JSON boolean.
    Flag(bool),
    /// Any other representation, kept verbatim.
    Text(String),
    /// Field present with a `null` value.
    Null,
}

impl EnvelopeCode {
    /// Builds a code from the raw JSON value of a present `code` field.
    #[must_use]
    pub fn from_value(value: &Value) -> Self {
        match value {
            Value::Null => Self::Null,
            Value::Bool(b) => Self::Flag(*b),
            Value::Number(n) => n.as_i64().map_or_else(|| Self::Text(n.to_string()), Self::Numeric),
            Value::String(s) => Self::Text(s.clone()),
            other => Self::Text(other.to_string()),
        }
    }

    /// True when the code loosely equals `0`.
    ///
    /// Numeric zero, strings that parse to zero, blank strings and `false` all
    /// qualify. `null` never does.
    #[must_use]
    pub fn is_success(&self) -> bool {
        match self {
            Self::Numeric(n) => *n == 0,
            Self::Flag(b) => !*b,
            Self::Text(s) => {
                let s = s.trim();
                s.is_empty() || s.parse::<f64>().is_ok_and(|n| n == 0.0)
            }
            Self::Null => false,
        }
    }
}

impl fmt::Display for EnvelopeCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Numeric(n) => write!(f, "{n}"),
            Self::Flag(b) => write!(f, "{b}"),
            Self::Text(s) => f.write_str(s),
            Self::Null => f.write_str("null"),
        }
    }
}

/// How loudly a business error is surfaced.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    /// Blocking dialog that needs acknowledgment.
    Error,
    /// Transient warning toast.
    Warning,
    /// Transient informational toast.
    Info,
}

impl Severity {
    /// Maps the wire `level` letter onto a severity.
    ///
    /// A missing or empty level is an error. `i` and `s` are informational.
    /// Unknown letters are treated as errors, not as info.
    #[must_use]
    pub fn from_level(level: Option<&str>) -> Self {
        match level.map(str::trim) {
            None | Some("" | "e") => Self::Error,
            Some("w") => Self::Warning,
            Some("i" | "s") => Self::Info,
            // unknown letters stay blocking; do not map them to Info
            Some(other) => {
                tracing::warn!(level = %other, "unrecognized response level, treating as error");
                Self::Error
            }
        }
    }
}

/// A decoded response body.
///
/// `code` is `None` for non-enveloped bodies, in which case `payload` holds the
/// whole body and `message`/`severity` carry no meaning.
#[derive(Debug, Clone, PartialEq)]
pub struct ResponseEnvelope {
    /// Status code, absent for raw passthrough bodies.
    pub code: Option<EnvelopeCode>,
    /// Server message, defaulted for business errors without one.
    pub message: String,
    /// Notification severity.
    pub severity: Severity,
    /// The `data` field, or the whole body when `code` is absent.
    pub payload: Value,
}

impl ResponseEnvelope {
    /// Splits a response body into its envelope fields.
    #[must_use]
    pub fn from_body(body: Value) -> Self {
        let code = body.get("code").map(EnvelopeCode::from_value);

        let Some(code) = code else {
            return Self {
                code: None,
                message: String::new(),
                severity: Severity::Info,
                payload: body,
            };
        };

        let message = body
            .get("msg")
            .and_then(Value::as_str)
            .filter(|m| !m.is_empty())
            .unwrap_or(DEFAULT_ERROR_MESSAGE)
            .to_string();
        let severity = Severity::from_level(body.get("level").and_then(Value::as_str));
        let payload = body.get("data").cloned().unwrap_or(Value::Null);

        Self {
            code: Some(code),
            message,
            severity,
            payload,
        }
    }

    /// True when this body bypasses envelope handling.
    #[must_use]
    pub const fn is_passthrough(&self) -> bool {
        self.code.is_none()
    }
}

//! Response classification.
//!
//! Every exchange ends in exactly one of three outcomes:
//!
//! 1. **Success**: a body without a `code` (passed through untouched) or an envelope
//!    whose code is zero (its `data` is returned).
//! 2. **Business error**: an envelope with a non-zero code. The severity letter
//!    picks the channel: a blocking alert for errors, a toast otherwise.
//! 3. **Transport error**: no response, or a non-2xx response without an envelope
//!    code. Always a blocking "server unavailable" alert.
//!
//! [`classify`] is pure. It decides what the user should see as a [`Notice`] but
//! does not show it; the [`ApiClient`](crate::net::ApiClient) presents the notice
//! through the host.

use crate::domain::envelope::{ResponseEnvelope, Severity};
use crate::domain::error::ConsoleError;
use crate::host::{Host, MessageKind};
use crate::net::transport::{RawResponse, TransportFailure};
use serde_json::Value;

/// Message shown for transport failures.
pub const SERVER_UNAVAILABLE: &str = "Server unavailable, please try again later.";

/// Title of the transport failure alert.
pub const SERVER_UNAVAILABLE_TITLE: &str = "Error";

/// A single user-facing notification.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Notice {
    /// Blocking dialog the user has to dismiss.
    Alert { title: String, message: String },
    /// Transient toast.
    Toast { kind: MessageKind, message: String },
}

impl Notice {
    /// Shows this notice through `host`.
    pub fn present(&self, host: &Host) {
        match self {
            Self::Alert { title, message } => host.alert(message, title),
            Self::Toast { kind, message } => host.notify(message, *kind),
        }
    }

    #[must_use]
    pub const fn is_blocking(&self) -> bool {
        matches!(self, Self::Alert { .. })
    }
}

/// Outcome of [`classify`].
#[derive(Debug)]
pub enum Classified {
    Success(Value),
    Failure { error: ConsoleError, notice: Notice },
}

/// Classifies the outcome of one exchange.
pub fn classify(outcome: Result<RawResponse, TransportFailure>) -> Classified {
    let response = match outcome {
        Ok(response) => response,
        Err(failure) => return transport_failure(failure.0),
    };

    let body = parse_body(&response.body);
    let envelope = ResponseEnvelope::from_body(body);

    match (&envelope.code, response.is_success()) {
        (None, true) => Classified::Success(envelope.payload),
        (Some(code), true) if code.is_success() => Classified::Success(envelope.payload),
        (Some(code), _) if !code.is_success() => business_failure(envelope),
        _ => transport_failure(format!("HTTP {}", response.status)),
    }
}

/// Parses a response body. Empty bodies are `null`; non-JSON bodies become a JSON
/// string holding the raw text.
fn parse_body(body: &str) -> Value {
    if body.trim().is_empty() {
        return Value::Null;
    }
    serde_json::from_str(body).unwrap_or_else(|_| Value::String(body.to_string()))
}

fn business_failure(envelope: ResponseEnvelope) -> Classified {
    let Some(code) = envelope.code else {
        return transport_failure("envelope without code".to_string());
    };
    let message = envelope.message;

    let notice = match envelope.severity {
        Severity::Error => Notice::Alert {
            title: format!("Error: {code}"),
            message: message.clone(),
        },
        Severity::Warning => Notice::Toast {
            kind: MessageKind::Warning,
            message: message.clone(),
        },
        Severity::Info => Notice::Toast {
            kind: MessageKind::Info,
            message: message.clone(),
        },
    };

    Classified::Failure {
        error: ConsoleError::Business {
            code,
            message,
            severity: envelope.severity,
        },
        notice,
    }
}

fn transport_failure(reason: String) -> Classified {
    Classified::Failure {
        error: ConsoleError::Transport(reason),
        notice: Notice::Alert {
            title: SERVER_UNAVAILABLE_TITLE.to_string(),
            message: SERVER_UNAVAILABLE.to_string(),
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::EnvelopeCode;
    use serde_json::json;

    fn ok(body: &str) -> Result<RawResponse, TransportFailure> {
        Ok(RawResponse::new(200, body))
    }

    fn success(classified: Classified) -> Value {
        match classified {
            Classified::Success(v) => v,
            Classified::Failure { error, .. } => panic!("expected success, got {error}"),
        }
    }

    fn failure(classified: Classified) -> (ConsoleError, Notice) {
        match classified {
            Classified::Failure { error, notice } => (error, notice),
            Classified::Success(v) => panic!("expected failure, got {v}"),
        }
    }

    #[test]
    fn body_without_code_passes_through() {
        let body = json!({"items": [1, 2], "total": 2});
        assert_eq!(success(classify(ok(&body.to_string()))), body);
    }

    #[test]
    fn null_code_is_business_error() {
        let (error, notice) = failure(classify(ok(r#"{"code":null,"msg":"denied","level":"e"}"#)));
        assert_eq!(
            notice,
            Notice::Alert {
                title: "Error: null".to_string(),
                message: "denied".to_string()
            }
        );
        assert!(matches!(error, ConsoleError::Business { code: EnvelopeCode::Null, .. }));
    }

    #[test]
    fn zero_code_returns_data() {
        assert_eq!(success(classify(ok(r#"{"code":0,"data":{"x":1}}"#))), json!({"x": 1}));
        assert_eq!(success(classify(ok(r#"{"code":"0","data":[1]}"#))), json!([1]));
        assert_eq!(success(classify(ok(r#"{"code":"","data":{"x":1}}"#))), json!({"x": 1}));
        assert_eq!(success(classify(ok(r#"{"code":false,"data":1}"#))), json!(1));
    }

    #[test]
    fn zero_code_without_data_is_null() {
        assert_eq!(success(classify(ok(r#"{"code":0,"msg":"saved"}"#))), Value::Null);
    }

    #[test]
    fn plain_text_and_empty_bodies() {
        assert_eq!(success(classify(ok("pong"))), json!("pong"));
        assert_eq!(success(classify(ok(""))), Value::Null);
    }

    #[test]
    fn error_level_raises_blocking_alert() {
        let (error, notice) = failure(classify(ok(r#"{"code":42,"msg":"bad","level":"e"}"#)));
        assert_eq!(
            notice,
            Notice::Alert {
                title: "Error: 42".to_string(),
                message: "bad".to_string()
            }
        );
        match error {
            ConsoleError::Business { code, message, severity } => {
                assert_eq!(code, EnvelopeCode::Numeric(42));
                assert_eq!(message, "bad");
                assert_eq!(severity, Severity::Error);
            }
            other => panic!("unexpected {other:?}"),
        }
    }

    #[test]
    fn warning_level_raises_warning_toast() {
        let (error, notice) = failure(classify(ok(r#"{"code":7,"msg":"stale","level":"w"}"#)));
        assert_eq!(
            notice,
            Notice::Toast {
                kind: MessageKind::Warning,
                message: "stale".to_string()
            }
        );
        assert!(!notice.is_blocking());
        assert!(matches!(error, ConsoleError::Business { severity: Severity::Warning, .. }));
    }

    #[test]
    fn info_and_success_levels_raise_info_toast() {
        for level in ["i", "s"] {
            let body = format!(r#"{{"code":1,"msg":"note","level":"{level}"}}"#);
            let (_, notice) = failure(classify(ok(&body)));
            assert_eq!(
                notice,
                Notice::Toast {
                    kind: MessageKind::Info,
                    message: "note".to_string()
                }
            );
        }
    }

    #[test]
    fn missing_message_and_level_default_to_error_alert() {
        let (_, notice) = failure(classify(ok(r#"{"code":"E_DENIED"}"#)));
        assert_eq!(
            notice,
            Notice::Alert {
                title: "Error: E_DENIED".to_string(),
                message: "Request failed".to_string()
            }
        );
    }

    #[test]
    fn non_2xx_with_envelope_is_business_error() {
        let (error, _) = failure(classify(Ok(RawResponse::new(400, r#"{"code":3,"msg":"invalid"}"#))));
        assert!(matches!(error, ConsoleError::Business { .. }));
    }

    #[test]
    fn non_2xx_without_envelope_is_transport_error() {
        let (error, notice) = failure(classify(Ok(RawResponse::new(502, "<html>Bad Gateway</html>"))));
        assert!(matches!(error, ConsoleError::Transport(ref r) if r == "HTTP 502"));
        assert_eq!(
            notice,
            Notice::Alert {
                title: SERVER_UNAVAILABLE_TITLE.to_string(),
                message: SERVER_UNAVAILABLE.to_string()
            }
        );
    }

    #[test]
    fn no_response_is_transport_error() {
        let (error, notice) = failure(classify(Err(TransportFailure("connection refused".into()))));
        assert!(matches!(error, ConsoleError::Transport(_)));
        assert!(notice.is_blocking());
    }
}

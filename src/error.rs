use reqwest::StatusCode;
use thiserror::Error;
use tracing::warn;

use crate::endpoint::Operation;
use crate::util::truncate_body;

/// Largest slice of an undecodable error body kept in [`Error::MalformedErrorBody`].
pub(crate) const ERROR_BODY_LIMIT: usize = 512;

/// Failure reported by the eBird API itself.
///
/// `status` is always the HTTP status of the response, never the value echoed
/// inside the error payload.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{message}")]
pub struct ApiError {
    pub message: String,
    pub status: u16,
}

/// A request option rejected at construction time.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("invalid value for option `{option}`: {reason}")]
pub struct OptionError {
    pub option: &'static str,
    pub reason: String,
}

impl OptionError {
    pub(crate) fn new(option: &'static str, reason: impl Into<String>) -> Self {
        Self {
            option,
            reason: reason.into(),
        }
    }
}

/// Errors returned by [`Client`](crate::Client).
///
/// Construction problems, local validation failures, transport failures,
/// undecodable success bodies and API-reported failures are separate
/// variants so callers can branch on them. Use [`Error::api`] or
/// [`Error::status`] to check for a particular HTTP status.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum Error {
    /// Invalid client configuration (empty key, bad base URL, missing rc values).
    #[error("invalid client configuration: {0}")]
    Config(String),

    #[error(transparent)]
    InvalidOption(#[from] OptionError),

    /// A required path parameter was empty.
    #[error("{operation}: missing required parameter `{parameter}`")]
    MissingParameter {
        operation: Operation,
        parameter: &'static str,
    },

    /// More path segments were passed than the operation has parameters.
    #[error("{operation}: expected {expected} path parameters, got {got}")]
    UnexpectedParameters {
        operation: Operation,
        expected: usize,
        got: usize,
    },

    /// A location-based operation was called without both `lat` and `lng`.
    #[error("{operation}: both `lat` and `lng` options are required")]
    MissingCoordinates { operation: Operation },

    /// Network-level failure: DNS, connect, TLS, timeout.
    #[error("{operation}: request failed")]
    Transport {
        operation: Operation,
        #[source]
        source: reqwest::Error,
    },

    /// A 200 response whose body did not match the expected shape.
    #[error("{operation}: failed to decode response body")]
    Decode {
        operation: Operation,
        #[source]
        source: serde_json::Error,
    },

    /// A non-success response whose body was not a recognizable error envelope.
    #[error("{operation}: couldn't decode error response (HTTP {status}): {body}")]
    MalformedErrorBody {
        operation: Operation,
        status: u16,
        body: String,
    },

    #[error("{operation}: API returned HTTP {}", .source.status)]
    Api {
        operation: Operation,
        #[source]
        source: ApiError,
    },
}

impl Error {
    /// The API-reported failure, if this is one.
    pub fn api(&self) -> Option<&ApiError> {
        match self {
            Error::Api { source, .. } => Some(source),
            _ => None,
        }
    }

    /// HTTP status of the failed response, if the server answered at all.
    pub fn status(&self) -> Option<u16> {
        match self {
            Error::Api { source, .. } => Some(source.status),
            Error::MalformedErrorBody { status, .. } => Some(*status),
            Error::Transport { source, .. } => source.status().map(|s| s.as_u16()),
            _ => None,
        }
    }

    /// The operation that produced this error. `None` for configuration and option errors.
    pub fn operation(&self) -> Option<Operation> {
        match self {
            Error::MissingParameter { operation, .. }
            | Error::UnexpectedParameters { operation, .. }
            | Error::MissingCoordinates { operation }
            | Error::Transport { operation, .. }
            | Error::Decode { operation, .. }
            | Error::MalformedErrorBody { operation, .. }
            | Error::Api { operation, .. } => Some(*operation),
            Error::Config(_) | Error::InvalidOption(_) => None,
        }
    }

    pub fn is_timeout(&self) -> bool {
        matches!(self, Error::Transport { source, .. } if source.is_timeout())
    }
}

pub type Result<T> = std::result::Result<T, Error>;

// {"error": {"message": "...", "status": 400}}
#[derive(Debug, serde::Deserialize)]
struct ErrorEnvelope {
    error: ErrorPayload,
}

#[derive(Debug, serde::Deserialize)]
struct ErrorPayload {
    #[serde(default)]
    message: Option<String>,
    #[allow(dead_code)]
    #[serde(default)]
    status: Option<i64>,
}

fn status_text(status: StatusCode) -> &'static str {
    status.canonical_reason().unwrap_or("Unknown Status")
}

/// Turns a non-success response into an [`Error`].
pub(crate) fn decode_error(operation: Operation, status: StatusCode, body: &[u8]) -> Error {
    let code = status.as_u16();

    if body.iter().all(u8::is_ascii_whitespace) {
        return Error::Api {
            operation,
            source: ApiError {
                message: format!("HTTP {}: {} (body empty)", code, status_text(status)),
                status: code,
            },
        };
    }

    let envelope = match serde_json::from_slice::<ErrorEnvelope>(body) {
        Ok(envelope) => envelope,
        Err(e) => {
            warn!(%operation, status = code, error = %e, "undecodable error response");
            return Error::MalformedErrorBody {
                operation,
                status: code,
                body: truncate_body(&String::from_utf8_lossy(body), ERROR_BODY_LIMIT),
            };
        }
    };

    let message = match envelope.error.message {
        Some(m) if !m.trim().is_empty() => m,
        _ => format!(
            "unexpected HTTP {}: {} (empty error)",
            code,
            status_text(status)
        ),
    };

    Error::Api {
        operation,
        source: ApiError {
            message,
            status: code,
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const OP: Operation = Operation::AdjacentRegions;

    #[test]
    fn envelope_message_is_kept() {
        let err = decode_error(
            OP,
            StatusCode::BAD_REQUEST,
            br#"{"error":{"message":"Bad Request","status":400}}"#,
        );
        let api = err.api().unwrap();
        assert_eq!(api.message, "Bad Request");
        assert_eq!(api.status, 400);
    }

    #[test]
    fn status_comes_from_the_response_not_the_payload() {
        let err = decode_error(
            OP,
            StatusCode::NOT_FOUND,
            br#"{"error":{"message":"No such region","status":400}}"#,
        );
        assert_eq!(err.status(), Some(404));
        assert_eq!(err.api().unwrap().message, "No such region");
    }

    #[test]
    fn empty_body_synthesizes_message() {
        let err = decode_error(OP, StatusCode::BAD_REQUEST, b"");
        let api = err.api().unwrap();
        assert!(api.message.contains("400"));
        assert!(api.message.contains("Bad Request"));
        assert_eq!(api.status, 400);
    }

    #[test]
    fn empty_message_synthesizes_message() {
        let err = decode_error(
            OP,
            StatusCode::FORBIDDEN,
            br#"{"error":{"message":"","status":403}}"#,
        );
        let api = err.api().unwrap();
        assert_eq!(api.message, "unexpected HTTP 403: Forbidden (empty error)");
    }

    #[test]
    fn garbage_body_is_reported_with_bounded_raw_text() {
        let body = "x".repeat(4 * ERROR_BODY_LIMIT);
        let err = decode_error(OP, StatusCode::BAD_GATEWAY, body.as_bytes());
        match err {
            Error::MalformedErrorBody { status, body, .. } => {
                assert_eq!(status, 502);
                assert!(body.len() <= ERROR_BODY_LIMIT + 3);
                assert!(body.ends_with("..."));
            }
            other => panic!("expected MalformedErrorBody, got {other:?}"),
        }
    }

    #[test]
    fn display_names_the_operation() {
        let err = Error::MissingParameter {
            operation: Operation::HotspotInfo,
            parameter: "locId",
        };
        assert_eq!(
            err.to_string(),
            "hotspot info: missing required parameter `locId`"
        );
        assert_eq!(err.operation(), Some(Operation::HotspotInfo));
        assert_eq!(err.status(), None);
    }

    #[test]
    fn display_leaves_the_cause_to_the_source_chain() {
        use std::error::Error as _;

        let err = decode_error(
            Operation::TaxonomicForms,
            StatusCode::BAD_REQUEST,
            br#"{"error":{"message":"Bad Request","status":400}}"#,
        );
        assert_eq!(err.to_string(), "taxonomic forms: API returned HTTP 400");
        assert_eq!(err.source().map(|s| s.to_string()).as_deref(), Some("Bad Request"));
    }
}

//! Conversion of every failure into the single error shape shown to users.

use std::fmt;

use serde::Serialize;
use serde_json::Value;

use crate::error::{AuthError, Error, ServerError};

/// Shown when a request was sent but no response arrived.
pub const NETWORK_ERROR_TEXT: &str = "Network error. Please check your internet connection.";

/// Shown when nothing more specific is known about a failure.
pub const GENERIC_ERROR_TEXT: &str = "Something went wrong. Please try again.";

/// Shown when the session could not be recovered after a 401.
pub const SESSION_EXPIRED_TEXT: &str = "Your session has expired. Please log in again.";

/// Shown when login is rejected without a server message.
pub const INVALID_CREDENTIALS_TEXT: &str = "Invalid email or password.";

/// Shown when client-side validation rejects a form without field messages.
pub const VALIDATION_ERROR_TEXT: &str = "Please correct the highlighted fields.";

pub const NETWORK_ERROR_CODE: &str = "NETWORK_ERROR";
pub const UNKNOWN_ERROR_CODE: &str = "UNKNOWN_ERROR";
pub const VALIDATION_ERROR_CODE: &str = "VALIDATION_ERROR";

/// Which branch of the error taxonomy a [`NormalizedError`] came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    Validation,
    Network,
    Auth,
    Server,
    Unknown,
}

/// The uniform failure shape returned by every request pipeline operation.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct NormalizedError {
    #[serde(skip)]
    pub kind: ErrorKind,
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub code: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<Value>,
}

impl NormalizedError {
    fn new(kind: ErrorKind, message: impl Into<String>, code: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
            code: Some(code.into()),
            details: None,
        }
    }

    fn with_details(mut self, details: Value) -> Self {
        self.details = Some(details);
        self
    }

    /// True for the 401 path, where the host should send the user to log in.
    pub fn is_auth(&self) -> bool {
        self.kind == ErrorKind::Auth
    }
}

impl fmt::Display for NormalizedError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.code {
            Some(ref code) => write!(f, "{} ({})", self.message, code),
            None => write!(f, "{}", self.message),
        }
    }
}

impl std::error::Error for NormalizedError {}

impl From<Error> for NormalizedError {
    fn from(err: Error) -> Self {
        normalize(&err)
    }
}

/// Convert any failure into a [`NormalizedError`]. Never panics.
///
/// A server-supplied message always wins; after that, failures without a
/// response are network errors, and everything else gets generic text.
pub fn normalize(err: &Error) -> NormalizedError {
    match err {
        Error::Server(server) => {
            from_server_body(ErrorKind::Server, server).unwrap_or_else(unknown)
        }
        Error::Auth(auth) => auth
            .response()
            .and_then(|server| from_server_body(ErrorKind::Auth, server))
            .unwrap_or_else(|| auth_fallback(auth)),
        Error::Transport(transport) if transport.is_network() => {
            NormalizedError::new(ErrorKind::Network, NETWORK_ERROR_TEXT, NETWORK_ERROR_CODE)
        }
        Error::Validation(errors) => {
            let message = errors
                .first_message()
                .unwrap_or(VALIDATION_ERROR_TEXT)
                .to_string();
            NormalizedError::new(ErrorKind::Validation, message, VALIDATION_ERROR_CODE)
                .with_details(errors.to_json())
        }
        Error::Transport(_) | Error::Protocol(_) | Error::InvalidInput(_) | Error::Storage(_) => {
            unknown()
        }
    }
}

fn from_server_body(kind: ErrorKind, server: &ServerError) -> Option<NormalizedError> {
    let message = server.message.as_ref()?;
    let mut normalized = NormalizedError::new(kind, message.clone(), server.status.to_string());
    normalized.details = server.body.clone();
    Some(normalized)
}

fn auth_fallback(auth: &AuthError) -> NormalizedError {
    let status = auth.response().map_or(401, |r| r.status);
    let text = match auth {
        AuthError::InvalidCredentials { .. } => INVALID_CREDENTIALS_TEXT,
        _ => SESSION_EXPIRED_TEXT,
    };
    NormalizedError::new(ErrorKind::Auth, text, status.to_string())
}

fn unknown() -> NormalizedError {
    NormalizedError::new(ErrorKind::Unknown, GENERIC_ERROR_TEXT, UNKNOWN_ERROR_CODE)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::{InvalidInputError, ProtocolError, StorageError, TransportError};
    use crate::resources::ValidationErrors;
    use serde_json::json;

    #[test]
    fn server_message_wins() {
        let body = json!({"success": false, "message": "Room not found", "extra": 1});
        let err = Error::Server(ServerError::new(404, Some(body.clone())));
        let normalized = normalize(&err);
        assert_eq!(normalized.message, "Room not found");
        assert_eq!(normalized.code.as_deref(), Some("404"));
        assert_eq!(normalized.details, Some(body));
        assert_eq!(normalized.kind, ErrorKind::Server);
    }

    #[test]
    fn server_error_without_message_is_unknown() {
        let err = Error::Server(ServerError::new(500, None));
        let normalized = normalize(&err);
        assert_eq!(normalized.message, GENERIC_ERROR_TEXT);
        assert_eq!(normalized.code.as_deref(), Some(UNKNOWN_ERROR_CODE));
        assert!(normalized.details.is_none());
    }

    #[test]
    fn missing_response_is_network_error() {
        for transport in [
            TransportError::Timeout { duration_ms: 10_000 },
            TransportError::Connection {
                message: "refused".into(),
            },
            TransportError::Request {
                message: "reset".into(),
            },
        ] {
            let normalized = normalize(&Error::Transport(transport));
            assert_eq!(normalized.code.as_deref(), Some(NETWORK_ERROR_CODE));
            assert_eq!(normalized.message, NETWORK_ERROR_TEXT);
            assert_eq!(normalized.kind, ErrorKind::Network);
        }
    }

    #[test]
    fn auth_without_body_is_session_expired() {
        let err = Error::Auth(AuthError::SessionExpired { response: None });
        let normalized = normalize(&err);
        assert!(normalized.is_auth());
        assert_eq!(normalized.message, SESSION_EXPIRED_TEXT);
        assert_eq!(normalized.code.as_deref(), Some("401"));
    }

    #[test]
    fn rejected_login_is_not_a_session_expiry() {
        let err = Error::Auth(AuthError::InvalidCredentials {
            response: Some(ServerError::new(401, None)),
        });
        let normalized = normalize(&err);
        assert!(normalized.is_auth());
        assert_eq!(normalized.message, INVALID_CREDENTIALS_TEXT);
        assert_eq!(normalized.code.as_deref(), Some("401"));
    }

    #[test]
    fn auth_with_server_message_keeps_it() {
        let body = json!({"success": false, "message": "Token expired"});
        let err = Error::Auth(AuthError::SessionExpired {
            response: Some(ServerError::new(401, Some(body.clone()))),
        });
        let normalized = normalize(&err);
        assert!(normalized.is_auth());
        assert_eq!(normalized.message, "Token expired");
        assert_eq!(normalized.code.as_deref(), Some("401"));
        assert_eq!(normalized.details, Some(body));
    }

    #[test]
    fn validation_errors_carry_fields() {
        let mut errors = ValidationErrors::default();
        errors.add("capacity", "Capacity must be greater than zero");
        let normalized = normalize(&Error::Validation(errors));
        assert_eq!(normalized.kind, ErrorKind::Validation);
        assert_eq!(normalized.message, "Capacity must be greater than zero");
        assert_eq!(normalized.code.as_deref(), Some(VALIDATION_ERROR_CODE));
        assert_eq!(
            normalized.details,
            Some(json!({"capacity": ["Capacity must be greater than zero"]}))
        );
    }

    #[test]
    fn everything_else_is_unknown() {
        let errors = [
            Error::Protocol(ProtocolError::MalformedResponse {
                status: 200,
                reason: "expected value".into(),
            }),
            Error::InvalidInput(InvalidInputError::Other {
                message: "bad".into(),
            }),
            Error::Storage(StorageError::Io {
                message: "read-only".into(),
            }),
            Error::Transport(TransportError::Http {
                message: "too many redirects".into(),
            }),
        ];
        for err in &errors {
            let normalized = normalize(err);
            assert_eq!(normalized.code.as_deref(), Some(UNKNOWN_ERROR_CODE));
            assert_eq!(normalized.message, GENERIC_ERROR_TEXT);
        }
    }

    #[test]
    fn serializes_without_kind() {
        let normalized = normalize(&Error::Transport(TransportError::Timeout {
            duration_ms: 10_000,
        }));
        assert_eq!(
            serde_json::to_value(&normalized).unwrap(),
            json!({"message": NETWORK_ERROR_TEXT, "code": NETWORK_ERROR_CODE})
        );
    }
}

//! Error types for the campus client.
//!
//! This module provides a unified error type with explicit variants for
//! transport, authentication, server, protocol, input validation and storage
//! errors. Callers of the request pipeline never see it directly: it is
//! converted into a [`NormalizedError`](crate::NormalizedError) first.

use std::fmt;

use serde_json::Value;
use thiserror::Error;

use crate::resources::ValidationErrors;

/// The unified error type for campus operations.
#[derive(Debug, Error)]
pub enum Error {
    /// Network transport errors (connection, timeout, request dispatch).
    #[error("transport error: {0}")]
    Transport(#[from] TransportError),

    /// Authentication errors (401 responses, expired session).
    #[error("authentication error: {0}")]
    Auth(#[from] AuthError),

    /// Error responses from the server (non-2xx, or `success: false`).
    #[error("server error: {0}")]
    Server(#[from] ServerError),

    /// Protocol errors (responses that do not follow the envelope contract).
    #[error("protocol error: {0}")]
    Protocol(#[from] ProtocolError),

    /// Invalid arguments (base URL, request path, module name).
    #[error("invalid input: {0}")]
    InvalidInput(#[from] InvalidInputError),

    /// Client-side validation of a view model failed.
    #[error("validation failed: {0}")]
    Validation(#[from] ValidationErrors),

    /// Session storage errors.
    #[error("storage error: {0}")]
    Storage(#[from] StorageError),
}

/// Transport-level errors.
#[derive(Debug, Error)]
pub enum TransportError {
    /// Network connection failed.
    #[error("connection failed: {message}")]
    Connection { message: String },

    /// Request timed out.
    #[error("request timed out after {duration_ms}ms")]
    Timeout { duration_ms: u64 },

    /// The request was sent but no response arrived.
    #[error("request failed: {message}")]
    Request { message: String },

    /// Generic HTTP error.
    #[error("HTTP error: {message}")]
    Http { message: String },
}

impl TransportError {
    /// Returns true if the request left the client but no response came back.
    pub fn is_network(&self) -> bool {
        matches!(
            self,
            TransportError::Connection { .. }
                | TransportError::Timeout { .. }
                | TransportError::Request { .. }
        )
    }
}

/// Authentication-related errors.
#[derive(Debug, Error)]
pub enum AuthError {
    /// The server rejected the credentials attached to a request.
    #[error("unauthorized")]
    Unauthorized { response: Option<ServerError> },

    /// Recovery from a 401 was impossible and the session was cleared.
    #[error("session expired")]
    SessionExpired { response: Option<ServerError> },

    /// Refresh token is missing, invalid or expired.
    #[error("refresh token invalid")]
    RefreshTokenInvalid,

    /// The login endpoint rejected the email and password.
    #[error("invalid credentials")]
    InvalidCredentials { response: Option<ServerError> },
}

impl AuthError {
    /// The 401 response that caused this error, if one was received.
    pub fn response(&self) -> Option<&ServerError> {
        match self {
            AuthError::Unauthorized { response }
            | AuthError::SessionExpired { response }
            | AuthError::InvalidCredentials { response } => response.as_ref(),
            AuthError::RefreshTokenInvalid => None,
        }
    }
}

/// An error response from the server.
#[derive(Debug, Clone)]
pub struct ServerError {
    /// HTTP status code.
    pub status: u16,
    /// The `message` field of the response body, if present.
    pub message: Option<String>,
    /// The full JSON response body, if it parsed.
    pub body: Option<Value>,
}

impl fmt::Display for ServerError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "HTTP {}", self.status)?;
        if let Some(ref message) = self.message {
            write!(f, ": {}", message)?;
        }
        Ok(())
    }
}

impl std::error::Error for ServerError {}

impl ServerError {
    /// Build a server error from a status and an optional JSON body.
    ///
    /// The message is taken from the body's `message` string field.
    pub fn new(status: u16, body: Option<Value>) -> Self {
        let message = body
            .as_ref()
            .and_then(|b| b.get("message"))
            .and_then(Value::as_str)
            .map(str::to_string);
        Self {
            status,
            message,
            body,
        }
    }

    /// Check if this is an authentication error.
    pub fn is_unauthorized(&self) -> bool {
        self.status == 401
    }
}

/// Responses that do not follow the wire contract.
#[derive(Debug, Error)]
pub enum ProtocolError {
    /// The body is not a valid response envelope.
    #[error("malformed response (HTTP {status}): {reason}")]
    MalformedResponse { status: u16, reason: String },

    /// The envelope's `data` does not match the expected type.
    #[error("unexpected payload: {reason}")]
    UnexpectedPayload { reason: String },
}

/// Input validation errors.
#[derive(Debug, Error)]
pub enum InvalidInputError {
    /// Invalid base URL.
    #[error("invalid base URL '{value}': {reason}")]
    BaseUrl { value: String, reason: String },

    /// Invalid request path.
    #[error("invalid path '{value}': {reason}")]
    Path { value: String, reason: String },

    /// Unknown module name.
    #[error("unknown module '{value}'")]
    Module { value: String },

    /// Unknown theme mode.
    #[error("unknown theme mode '{value}'")]
    ThemeMode { value: String },

    /// Invalid language code.
    #[error("invalid language code '{value}': {reason}")]
    Language { value: String, reason: String },

    /// Header name or value that cannot be sent.
    #[error("invalid header '{name}': {reason}")]
    Header { name: String, reason: String },

    /// Generic invalid input.
    #[error("invalid input: {message}")]
    Other { message: String },
}

/// Session storage errors.
#[derive(Debug, Error)]
pub enum StorageError {
    /// The backing storage could not be read or written.
    #[error("storage unavailable: {message}")]
    Io { message: String },

    /// The stored data could not be parsed.
    #[error("storage corrupt: {message}")]
    Corrupt { message: String },
}

impl From<std::io::Error> for StorageError {
    fn from(err: std::io::Error) -> Self {
        StorageError::Io {
            message: err.to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn server_error_takes_message_from_body() {
        let err = ServerError::new(422, Some(json!({"message": "Room is full"})));
        assert_eq!(err.message.as_deref(), Some("Room is full"));
        assert_eq!(err.to_string(), "HTTP 422: Room is full");
    }

    #[test]
    fn server_error_ignores_non_string_message() {
        let err = ServerError::new(500, Some(json!({"message": 42})));
        assert!(err.message.is_none());
        assert_eq!(err.to_string(), "HTTP 500");
    }

    #[test]
    fn network_transport_errors() {
        assert!(TransportError::Timeout { duration_ms: 10_000 }.is_network());
        assert!(
            TransportError::Connection {
                message: "refused".into()
            }
            .is_network()
        );
        assert!(
            !TransportError::Http {
                message: "redirect loop".into()
            }
            .is_network()
        );
    }

    #[test]
    fn unauthorized_detection() {
        assert!(ServerError::new(401, None).is_unauthorized());
        assert!(!ServerError::new(403, None).is_unauthorized());
    }
}

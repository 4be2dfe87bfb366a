//! Request path type.

use std::fmt;

use crate::error::{Error, InvalidInputError};

/// A non-empty path relative to the API base URL, e.g. `rooms/42`.
///
/// Leading and trailing slashes are stripped so paths join cleanly onto the
/// base URL.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct ApiPath(String);

impl ApiPath {
    /// Create a new path.
    ///
    /// # Errors
    ///
    /// Returns an error if the path is empty, or contains whitespace,
    /// a query string or a fragment.
    pub fn new(s: impl AsRef<str>) -> Result<Self, Error> {
        let original = s.as_ref();
        let trimmed = original.trim().trim_matches('/');

        let reject = |reason: &str| -> Error {
            InvalidInputError::Path {
                value: original.to_string(),
                reason: reason.to_string(),
            }
            .into()
        };

        if trimmed.is_empty() {
            return Err(reject("path is required"));
        }
        if trimmed.chars().any(char::is_whitespace) {
            return Err(reject("path must not contain whitespace"));
        }
        if trimmed.contains(['?', '#']) {
            return Err(reject("pass query parameters separately"));
        }
        if trimmed.contains("://") {
            return Err(reject("path must be relative to the base URL"));
        }

        Ok(Self(trimmed.to_string()))
    }

    /// Join a child segment, e.g. `rooms` + `42` → `rooms/42`.
    pub fn join(&self, segment: impl AsRef<str>) -> Result<Self, Error> {
        Self::new(format!("{}/{}", self.0, segment.as_ref()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl AsRef<str> for ApiPath {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ApiPath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "/{}", self.0)
    }
}

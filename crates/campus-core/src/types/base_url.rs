//! API base URL type.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use url::Url;

use crate::error::{Error, InvalidInputError};
use crate::types::ApiPath;

/// A validated base URL for the admin API.
///
/// This type ensures the URL is an absolute `http` or `https` URL with a
/// host and no query or fragment, ready for endpoint construction.
///
/// # Example
///
/// ```
/// use campus_core::{ApiPath, BaseUrl};
///
/// let base = BaseUrl::new("https://api.example.edu/api/").unwrap();
/// let path = ApiPath::new("/rooms").unwrap();
/// assert_eq!(base.endpoint(&path), "https://api.example.edu/api/rooms");
/// ```
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct BaseUrl(Url);

impl BaseUrl {
    /// Create a new base URL from a string, validating the format.
    ///
    /// # Errors
    ///
    /// Returns an error if the URL is not valid or doesn't meet requirements.
    pub fn new(s: impl AsRef<str>) -> Result<Self, Error> {
        let s = s.as_ref();
        let url = Url::parse(s).map_err(|e| InvalidInputError::BaseUrl {
            value: s.to_string(),
            reason: e.to_string(),
        })?;

        Self::validate(&url, s)?;

        Ok(Self(url))
    }

    /// Returns the full URL for an API path.
    pub fn endpoint(&self, path: &ApiPath) -> String {
        let base = self.0.as_str().trim_end_matches('/');
        format!("{}/{}", base, path.as_str())
    }

    /// Returns the base URL as a string.
    pub fn as_str(&self) -> &str {
        self.0.as_str()
    }

    /// Returns true if requests to this API are sent in the clear.
    pub fn is_plain_http(&self) -> bool {
        self.0.scheme() == "http"
    }

    /// Returns the host string.
    pub fn host(&self) -> Option<&str> {
        self.0.host_str()
    }

    /// Returns true if the API is served from this machine.
    pub fn is_local(&self) -> bool {
        self.host()
            .is_some_and(|h| h == "localhost" || h == "127.0.0.1" || h == "[::1]")
    }

    fn validate(url: &Url, original: &str) -> Result<(), Error> {
        if url.cannot_be_a_base() {
            return Err(InvalidInputError::BaseUrl {
                value: original.to_string(),
                reason: "must be an absolute URL".to_string(),
            }
            .into());
        }

        if url.host_str().is_none() {
            return Err(InvalidInputError::BaseUrl {
                value: original.to_string(),
                reason: "must have a host".to_string(),
            }
            .into());
        }

        if !matches!(url.scheme(), "http" | "https") {
            return Err(InvalidInputError::BaseUrl {
                value: original.to_string(),
                reason: "must use http or https".to_string(),
            }
            .into());
        }

        if url.query().is_some() || url.fragment().is_some() {
            return Err(InvalidInputError::BaseUrl {
                value: original.to_string(),
                reason: "must not carry a query or fragment".to_string(),
            }
            .into());
        }

        Ok(())
    }
}

impl fmt::Display for BaseUrl {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl FromStr for BaseUrl {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::new(s)
    }
}

impl Serialize for BaseUrl {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        serializer.serialize_str(self.0.as_str())
    }
}

impl<'de> Deserialize<'de> for BaseUrl {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        BaseUrl::new(&s).map_err(serde::de::Error::custom)
    }
}

impl AsRef<str> for BaseUrl {
    fn as_ref(&self) -> &str {
        self.0.as_str()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn path(p: &str) -> ApiPath {
        ApiPath::new(p).unwrap()
    }

    #[test]
    fn valid_https_url() {
        let base = BaseUrl::new("https://api.example.edu").unwrap();
        assert_eq!(base.host(), Some("api.example.edu"));
        assert!(!base.is_local());
        assert!(!base.is_plain_http());
    }

    #[test]
    fn valid_localhost_http() {
        let base = BaseUrl::new("http://localhost:8000/api").unwrap();
        assert!(base.is_local());
        assert!(base.is_plain_http());
    }

    #[test]
    fn plain_http_to_other_hosts_is_accepted() {
        for url in [
            "http://192.168.1.10:8000/api",
            "http://backend:8000/api",
            "http://0.0.0.0:8000/api",
        ] {
            let base = BaseUrl::new(url).unwrap();
            assert!(!base.is_local(), "{url}");
        }
    }

    #[test]
    fn endpoint_construction() {
        let base = BaseUrl::new("http://localhost:8000/api").unwrap();
        assert_eq!(
            base.endpoint(&path("rooms")),
            "http://localhost:8000/api/rooms"
        );
    }

    #[test]
    fn endpoint_ignores_duplicate_slashes() {
        let base = BaseUrl::new("https://api.example.edu/").unwrap();
        assert_eq!(
            base.endpoint(&path("/auth/login")),
            "https://api.example.edu/auth/login"
        );
    }

    #[test]
    fn invalid_scheme() {
        assert!(BaseUrl::new("ftp://api.example.edu").is_err());
        assert!(BaseUrl::new("ws://localhost:8000").is_err());
    }

    #[test]
    fn invalid_relative_url() {
        assert!(BaseUrl::new("/api").is_err());
    }

    #[test]
    fn invalid_query_string() {
        assert!(BaseUrl::new("https://api.example.edu/?x=1").is_err());
    }
}

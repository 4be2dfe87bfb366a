//! Outbound request descriptors.

use std::fmt;
use std::time::Duration;

use serde::Serialize;
use serde_json::Value;

use crate::Result;
use crate::error::InvalidInputError;
use crate::types::ApiPath;

/// HTTP methods the pipeline issues.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Method {
    Get,
    Post,
    Put,
    Patch,
    Delete,
}

impl Method {
    pub fn as_str(&self) -> &'static str {
        match self {
            Method::Get => "GET",
            Method::Post => "POST",
            Method::Put => "PUT",
            Method::Patch => "PATCH",
            Method::Delete => "DELETE",
        }
    }
}

impl fmt::Display for Method {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One outbound call: `{ method, path, body?, query?, headers? }`.
///
/// Built per call by feature code and consumed by the pipeline. Body and
/// query are held as JSON so the same descriptor can be replayed after a
/// token refresh.
#[derive(Debug, Clone)]
pub struct ApiRequest {
    pub method: Method,
    pub path: ApiPath,
    pub body: Option<Value>,
    pub query: Option<Value>,
    pub headers: Vec<(String, String)>,
}

impl ApiRequest {
    /// Create a request with no body, query or extra headers.
    ///
    /// # Errors
    ///
    /// Returns an error if `path` is empty.
    pub fn new(method: Method, path: impl AsRef<str>) -> Result<Self> {
        Ok(Self {
            method,
            path: ApiPath::new(path)?,
            body: None,
            query: None,
            headers: Vec::new(),
        })
    }

    /// Attach a JSON body.
    pub fn with_body<B: Serialize + ?Sized>(mut self, body: &B) -> Result<Self> {
        self.body = Some(to_json(body, "body")?);
        Ok(self)
    }

    /// Attach query parameters. `query` must serialize to a JSON object.
    pub fn with_query<Q: Serialize + ?Sized>(mut self, query: &Q) -> Result<Self> {
        let value = to_json(query, "query")?;
        if !value.is_object() {
            return Err(InvalidInputError::Other {
                message: "query parameters must be an object".to_string(),
            }
            .into());
        }
        self.query = Some(value);
        Ok(self)
    }

    /// Attach an extra header.
    pub fn with_header(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.headers.push((name.into(), value.into()));
        self
    }

    /// Query parameters flattened to string pairs; `null` values are skipped.
    pub fn query_pairs(&self) -> Vec<(String, String)> {
        let Some(Value::Object(map)) = &self.query else {
            return Vec::new();
        };
        map.iter()
            .filter(|(_, v)| !v.is_null())
            .map(|(k, v)| {
                let v = match v {
                    Value::String(s) => s.clone(),
                    other => other.to_string(),
                };
                (k.clone(), v)
            })
            .collect()
    }
}

fn to_json<T: Serialize + ?Sized>(value: &T, what: &str) -> Result<Value> {
    serde_json::to_value(value).map_err(|e| {
        InvalidInputError::Other {
            message: format!("{what} is not serializable: {e}"),
        }
        .into()
    })
}

/// Per-call overrides of the client defaults.
#[derive(Debug, Clone, Default)]
pub struct RequestOptions {
    pub timeout: Option<Duration>,
    pub headers: Vec<(String, String)>,
}

impl RequestOptions {
    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }

    pub fn header(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.headers.push((name.into(), value.into()));
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn empty_path_is_rejected() {
        assert!(ApiRequest::new(Method::Get, "").is_err());
        assert!(ApiRequest::new(Method::Get, "   ").is_err());
    }

    #[test]
    fn query_pairs_flatten_scalars() {
        let request = ApiRequest::new(Method::Get, "rooms")
            .unwrap()
            .with_query(&json!({"page": 2, "search": "north wing", "status": null}))
            .unwrap();
        let mut pairs = request.query_pairs();
        pairs.sort();
        assert_eq!(
            pairs,
            vec![
                ("page".to_string(), "2".to_string()),
                ("search".to_string(), "north wing".to_string()),
            ]
        );
    }

    #[test]
    fn query_must_be_object() {
        let result = ApiRequest::new(Method::Get, "rooms")
            .unwrap()
            .with_query(&json!([1, 2]));
        assert!(result.is_err());
    }

    #[test]
    fn method_names() {
        assert_eq!(Method::Patch.to_string(), "PATCH");
        assert_eq!(Method::Delete.as_str(), "DELETE");
    }
}

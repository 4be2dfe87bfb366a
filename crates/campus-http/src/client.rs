//! HTTP client for the admin API.

use std::time::Duration;

use reqwest::header::{ACCEPT, AUTHORIZATION, HeaderMap, HeaderName, HeaderValue};
use serde::de::DeserializeOwned;
use tracing::{debug, instrument, trace, warn};

use campus_core::error::{AuthError, Error, InvalidInputError, ServerError, TransportError};
use campus_core::{AccessToken, ApiConfig, ApiRequest, BaseUrl, Envelope, Method, RequestOptions};

/// Sends single requests and unwraps response envelopes.
///
/// This layer knows nothing about sessions: it attaches whatever token it
/// is given and reports a 401 as [`AuthError::Unauthorized`].
#[derive(Debug, Clone)]
pub struct HttpClient {
    client: reqwest::Client,
    base_url: BaseUrl,
    timeout: Duration,
}

impl HttpClient {
    /// Create a new client for the configured base URL.
    pub fn new(config: &ApiConfig) -> Result<Self, Error> {
        let client = reqwest::Client::builder()
            .user_agent(config.user_agent.as_str())
            .timeout(config.timeout)
            .build()
            .map_err(|e| InvalidInputError::Other {
                message: format!("failed to build HTTP client: {e}"),
            })?;

        if config.base_url.is_plain_http() && !config.base_url.is_local() {
            warn!(base_url = %config.base_url, "tokens will be sent over plain HTTP");
        }

        Ok(Self {
            client,
            base_url: config.base_url.clone(),
            timeout: config.timeout,
        })
    }

    /// Returns the base URL this client is configured for.
    pub fn base_url(&self) -> &BaseUrl {
        &self.base_url
    }

    /// Send `request` and return the envelope's `data` as `T`.
    #[instrument(
        skip(self, request, token, options),
        fields(method = %request.method, path = %request.path, authed = token.is_some())
    )]
    pub async fn execute<T: DeserializeOwned>(
        &self,
        request: &ApiRequest,
        token: Option<&AccessToken>,
        options: &RequestOptions,
    ) -> Result<T, Error> {
        let url = self.base_url.endpoint(&request.path);
        debug!(%url, "API request");

        let mut builder = self
            .client
            .request(reqwest_method(request.method), &url)
            .headers(self.headers(request, token, options)?);

        let query = request.query_pairs();
        if !query.is_empty() {
            trace!(?query, "query parameters");
            builder = builder.query(&query);
        }
        if let Some(ref body) = request.body {
            builder = builder.json(body);
        }

        let timeout = options.timeout.unwrap_or(self.timeout);
        if options.timeout.is_some() {
            builder = builder.timeout(timeout);
        }

        let response = builder
            .send()
            .await
            .map_err(|e| transport_error(e, timeout))?;

        self.handle_response(response, timeout).await
    }

    /// Build the header map: defaults, then request headers, then per-call
    /// overrides, then the bearer token.
    fn headers(
        &self,
        request: &ApiRequest,
        token: Option<&AccessToken>,
        options: &RequestOptions,
    ) -> Result<HeaderMap, Error> {
        let mut headers = HeaderMap::new();
        headers.insert(ACCEPT, HeaderValue::from_static("application/json"));

        for (name, value) in request.headers.iter().chain(options.headers.iter()) {
            let name = HeaderName::from_bytes(name.as_bytes()).map_err(|e| {
                InvalidInputError::Header {
                    name: name.clone(),
                    reason: e.to_string(),
                }
            })?;
            let value = HeaderValue::from_str(value).map_err(|e| InvalidInputError::Header {
                name: name.to_string(),
                reason: e.to_string(),
            })?;
            headers.insert(name, value);
        }

        if let Some(token) = token {
            let mut value = HeaderValue::from_str(&format!("Bearer {}", token.as_str()))
                .map_err(|_| InvalidInputError::Header {
                    name: AUTHORIZATION.to_string(),
                    reason: "token contains characters not allowed in a header".to_string(),
                })?;
            value.set_sensitive(true);
            headers.insert(AUTHORIZATION, value);
        }

        Ok(headers)
    }

    /// Handle a response, unwrapping the envelope or building the error.
    async fn handle_response<T: DeserializeOwned>(
        &self,
        response: reqwest::Response,
        timeout: Duration,
    ) -> Result<T, Error> {
        let status = response.status();
        trace!(status = %status, "API response");

        let body = response
            .bytes()
            .await
            .map_err(|e| transport_error(e, timeout))?;

        if status.is_success() {
            let envelope = if body.iter().all(u8::is_ascii_whitespace) {
                Envelope::ok(serde_json::Value::Null)
            } else {
                Envelope::parse(status.as_u16(), &body)?
            };
            return envelope.into_data(status.as_u16());
        }

        let error = ServerError::new(status.as_u16(), serde_json::from_slice(&body).ok());
        debug!(error = %error, "API error response");

        if error.is_unauthorized() {
            Err(AuthError::Unauthorized {
                response: Some(error),
            }
            .into())
        } else {
            Err(Error::Server(error))
        }
    }
}

fn reqwest_method(method: Method) -> reqwest::Method {
    match method {
        Method::Get => reqwest::Method::GET,
        Method::Post => reqwest::Method::POST,
        Method::Put => reqwest::Method::PUT,
        Method::Patch => reqwest::Method::PATCH,
        Method::Delete => reqwest::Method::DELETE,
    }
}

/// Classify a reqwest failure. Everything except builder and redirect
/// errors happened after the request left the client.
pub(crate) fn transport_error(err: reqwest::Error, timeout: Duration) -> TransportError {
    if err.is_timeout() {
        TransportError::Timeout {
            duration_ms: u64::try_from(timeout.as_millis()).unwrap_or(u64::MAX),
        }
    } else if err.is_connect() {
        TransportError::Connection {
            message: err.to_string(),
        }
    } else if err.is_request() || err.is_body() {
        TransportError::Request {
            message: err.to_string(),
        }
    } else {
        TransportError::Http {
            message: err.to_string(),
        }
    }
}

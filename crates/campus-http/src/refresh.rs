//! Refresh-token exchange over HTTP.

use async_trait::async_trait;
use tracing::{debug, instrument};

use campus_core::error::{AuthError, Error};
use campus_core::{
    AccessToken, ApiPath, ApiRequest, Method, RefreshToken, RefreshedTokens, RequestOptions,
    TokenRefresher,
};

use crate::client::HttpClient;
use crate::endpoints::{RefreshRequest, RefreshResponse};

/// Exchanges the refresh token at a fixed endpoint.
///
/// The call is made without an access token and outside the request
/// pipeline, so a rejected refresh can never trigger another refresh.
#[derive(Debug, Clone)]
pub struct HttpRefresher {
    http: HttpClient,
    path: ApiPath,
}

impl HttpRefresher {
    pub fn new(http: HttpClient, path: ApiPath) -> Self {
        Self { http, path }
    }
}

#[async_trait]
impl TokenRefresher for HttpRefresher {
    #[instrument(skip_all, fields(path = %self.path))]
    async fn refresh(&self, refresh_token: &RefreshToken) -> Result<RefreshedTokens, Error> {
        let request = ApiRequest::new(Method::Post, &self.path)?.with_body(&RefreshRequest {
            refresh_token: refresh_token.as_str(),
        })?;

        let response: RefreshResponse = self
            .http
            .execute(&request, None, &RequestOptions::default())
            .await
            .map_err(|e| match e {
                Error::Auth(AuthError::Unauthorized { .. }) => AuthError::RefreshTokenInvalid.into(),
                other => other,
            })?;

        debug!(rotated = response.refresh_token.is_some(), "refresh succeeded");
        Ok(RefreshedTokens {
            access_token: AccessToken::new(response.access_token),
            refresh_token: response.refresh_token.map(RefreshToken::new),
        })
    }
}

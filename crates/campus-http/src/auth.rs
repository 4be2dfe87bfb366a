//! Login, logout and the current user.

use tracing::{info, instrument, warn};

use campus_core::error::{AuthError, Error};
use campus_core::{
    AccessToken, ApiRequest, Credentials, Method, Module, NormalizedError, RefreshToken,
    RequestOptions,
};

use crate::endpoints::{AUTH_LOGIN, AUTH_LOGOUT, AUTH_ME, LoginResponse, UserProfile};
use crate::events::SessionEvent;
use crate::pipeline::{ApiClient, ApiResult};

/// Session lifecycle calls. Obtained from [`ApiClient::auth`].
#[derive(Debug, Clone, Copy)]
pub struct AuthApi<'a> {
    client: &'a ApiClient,
}

impl<'a> AuthApi<'a> {
    pub(crate) fn new(client: &'a ApiClient) -> Self {
        Self { client }
    }

    /// Sign in and store the new session along with the chosen module.
    ///
    /// A 401 here means wrong credentials: it is reported as
    /// [`AuthError::InvalidCredentials`] and never triggers session
    /// recovery. Tokens and module are stored in one write, so a storage
    /// failure leaves the previous session untouched.
    #[instrument(skip(self, credentials), fields(email = %credentials.email(), module = %module))]
    pub async fn login(
        &self,
        credentials: &Credentials,
        module: Module,
    ) -> ApiResult<Option<UserProfile>> {
        let request = ApiRequest::new(Method::Post, AUTH_LOGIN)?.with_body(credentials)?;
        let response: LoginResponse = self
            .client
            .http()
            .execute(&request, None, &RequestOptions::default())
            .await
            .map_err(|e| match e {
                Error::Auth(AuthError::Unauthorized { response }) => {
                    Error::from(AuthError::InvalidCredentials { response })
                }
                other => other,
            })?;

        self.client.session().start_session(
            &AccessToken::new(response.access_token),
            response.refresh_token.map(RefreshToken::new).as_ref(),
            module,
        )?;

        info!("logged in");
        self.client.emit(SessionEvent::LoggedIn { module });
        Ok(response.user)
    }

    /// Sign out. The server call is best effort; the local session is
    /// always cleared.
    #[instrument(skip(self))]
    pub async fn logout(&self) -> ApiResult<()> {
        let session = self.client.session();
        if let Some(token) = session.access_token() {
            let result: Result<serde_json::Value, Error> = async {
                let request = ApiRequest::new(Method::Post, AUTH_LOGOUT)?;
                self.client
                    .http()
                    .execute(&request, Some(&token), &RequestOptions::default())
                    .await
            }
            .await;
            if let Err(e) = result {
                warn!(error = %e, "server logout failed, clearing local session anyway");
            }
        }

        session.clear();
        self.client.emit(SessionEvent::LoggedOut);
        Ok(())
    }

    /// The signed-in user.
    pub async fn me(&self) -> ApiResult<UserProfile> {
        self.client.get(AUTH_ME).await
    }

    /// Exchange the refresh token for a new access token now.
    pub async fn refresh(&self) -> ApiResult<()> {
        self.client
            .refresh_now()
            .await
            .map_err(NormalizedError::from)
    }
}

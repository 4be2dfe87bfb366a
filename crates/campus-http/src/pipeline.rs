//! The authenticated request pipeline.

use std::sync::Arc;

use serde::Serialize;
use serde::de::DeserializeOwned;
use tokio::sync::{Mutex, broadcast};
use tracing::{debug, info, instrument, warn};

use campus_core::error::{AuthError, Error};
use campus_core::{
    AccessToken, ApiConfig, ApiRequest, Method, NormalizedError, RequestOptions, Resource,
    TokenRefresher,
};
use campus_store::SessionStore;

use crate::auth::AuthApi;
use crate::client::HttpClient;
use crate::events::SessionEvent;
use crate::refresh::HttpRefresher;
use crate::resources::ResourceClient;

/// Result of a pipeline operation.
pub type ApiResult<T> = Result<T, NormalizedError>;

const EVENT_CAPACITY: usize = 16;

/// Client for the campus admin API.
///
/// Every call reads the current access token from the [`SessionStore`],
/// unwraps the `{ success, data, message }` envelope and returns either the
/// `data` payload or a [`NormalizedError`]. A 401 triggers one recovery
/// attempt per call (see [`ApiClient::send`]).
///
/// Cloning is cheap; clones share the HTTP connection pool, session store,
/// recovery guard and event channel.
#[derive(Clone)]
pub struct ApiClient {
    inner: Arc<ClientInner>,
}

struct ClientInner {
    http: HttpClient,
    config: ApiConfig,
    session: SessionStore,
    refresher: Option<Arc<dyn TokenRefresher>>,
    /// Serializes 401 recovery across concurrent calls.
    recovery: Mutex<()>,
    events: broadcast::Sender<SessionEvent>,
}

/// Outcome of a 401 recovery.
enum Recovery {
    /// Replay the request with this token.
    Replay(AccessToken),
    /// The session is gone.
    Expired,
}

impl ApiClient {
    /// Create a client that refreshes tokens at the configured refresh
    /// endpoint, if any.
    pub fn new(config: ApiConfig, session: SessionStore) -> Result<Self, Error> {
        let http = HttpClient::new(&config)?;
        let refresher = config.refresh_path.clone().map(|path| {
            Arc::new(HttpRefresher::new(http.clone(), path)) as Arc<dyn TokenRefresher>
        });
        Ok(Self::from_parts(http, config, session, refresher))
    }

    /// Create a client with a custom refresher, or none at all.
    pub fn with_refresher(
        config: ApiConfig,
        session: SessionStore,
        refresher: Option<Arc<dyn TokenRefresher>>,
    ) -> Result<Self, Error> {
        let http = HttpClient::new(&config)?;
        Ok(Self::from_parts(http, config, session, refresher))
    }

    fn from_parts(
        http: HttpClient,
        config: ApiConfig,
        session: SessionStore,
        refresher: Option<Arc<dyn TokenRefresher>>,
    ) -> Self {
        let (events, _) = broadcast::channel(EVENT_CAPACITY);
        Self {
            inner: Arc::new(ClientInner {
                http,
                config,
                session,
                refresher,
                recovery: Mutex::new(()),
                events,
            }),
        }
    }

    pub fn config(&self) -> &ApiConfig {
        &self.inner.config
    }

    pub fn session(&self) -> &SessionStore {
        &self.inner.session
    }

    /// Subscribe to session lifecycle events.
    ///
    /// Only events sent after this call are received.
    pub fn subscribe(&self) -> broadcast::Receiver<SessionEvent> {
        self.inner.events.subscribe()
    }

    pub fn auth(&self) -> AuthApi<'_> {
        AuthApi::new(self)
    }

    /// CRUD access to one resource collection.
    pub fn resource<R: Resource>(&self) -> ResourceClient<'_, R> {
        ResourceClient::new(self)
    }

    pub async fn get<T: DeserializeOwned>(&self, path: &str) -> ApiResult<T> {
        let request = ApiRequest::new(Method::Get, path)?;
        self.send(request, RequestOptions::default()).await
    }

    pub async fn get_query<Q, T>(&self, path: &str, query: &Q) -> ApiResult<T>
    where
        Q: Serialize + ?Sized,
        T: DeserializeOwned,
    {
        let request = ApiRequest::new(Method::Get, path)?.with_query(query)?;
        self.send(request, RequestOptions::default()).await
    }

    pub async fn post<B, T>(&self, path: &str, body: &B) -> ApiResult<T>
    where
        B: Serialize + ?Sized,
        T: DeserializeOwned,
    {
        let request = ApiRequest::new(Method::Post, path)?.with_body(body)?;
        self.send(request, RequestOptions::default()).await
    }

    pub async fn put<B, T>(&self, path: &str, body: &B) -> ApiResult<T>
    where
        B: Serialize + ?Sized,
        T: DeserializeOwned,
    {
        let request = ApiRequest::new(Method::Put, path)?.with_body(body)?;
        self.send(request, RequestOptions::default()).await
    }

    pub async fn patch<B, T>(&self, path: &str, body: &B) -> ApiResult<T>
    where
        B: Serialize + ?Sized,
        T: DeserializeOwned,
    {
        let request = ApiRequest::new(Method::Patch, path)?.with_body(body)?;
        self.send(request, RequestOptions::default()).await
    }

    pub async fn delete<T: DeserializeOwned>(&self, path: &str) -> ApiResult<T> {
        let request = ApiRequest::new(Method::Delete, path)?;
        self.send(request, RequestOptions::default()).await
    }

    /// Send a request through the pipeline.
    ///
    /// On a 401 the call waits for the recovery guard. If another call has
    /// already replaced the rejected token, the request is replayed with the
    /// new one. Otherwise the refresh token is exchanged (when possible) and
    /// the request replayed; failing that, the session is cleared and
    /// [`SessionEvent::Expired`] is published. A request is replayed at most
    /// once.
    pub async fn send<T: DeserializeOwned>(
        &self,
        request: ApiRequest,
        options: RequestOptions,
    ) -> ApiResult<T> {
        self.execute(&request, &options).await.map_err(|e| {
            let normalized = NormalizedError::from(e);
            debug!(error = %normalized, "request failed");
            normalized
        })
    }

    #[instrument(skip(self, request, options), fields(method = %request.method, path = %request.path))]
    async fn execute<T: DeserializeOwned>(
        &self,
        request: &ApiRequest,
        options: &RequestOptions,
    ) -> Result<T, Error> {
        let token = self.inner.session.access_token();

        let response = match self.inner.http.execute(request, token.as_ref(), options).await {
            Err(Error::Auth(AuthError::Unauthorized { response })) => response,
            other => return other,
        };

        match self.recover(token.as_ref()).await {
            Recovery::Replay(fresh) => {
                debug!("replaying request after 401");
                match self.inner.http.execute(request, Some(&fresh), options).await {
                    Err(Error::Auth(AuthError::Unauthorized { response })) => {
                        warn!("replayed request was rejected");
                        self.expire_if_current(&fresh).await;
                        Err(AuthError::SessionExpired { response }.into())
                    }
                    other => other,
                }
            }
            Recovery::Expired => Err(AuthError::SessionExpired { response }.into()),
        }
    }

    /// Decide how to continue after `rejected` drew a 401.
    async fn recover(&self, rejected: Option<&AccessToken>) -> Recovery {
        let _guard = self.inner.recovery.lock().await;

        let current = self.inner.session.access_token();
        if current.as_ref() != rejected {
            return match current {
                Some(token) => {
                    debug!("token changed while waiting, reusing it");
                    Recovery::Replay(token)
                }
                None => Recovery::Expired,
            };
        }

        match self.try_refresh().await {
            Ok(token) => Recovery::Replay(token),
            Err(e) => {
                debug!(error = %e, "cannot recover session");
                self.expire();
                Recovery::Expired
            }
        }
    }

    /// Exchange the stored refresh token and store the new pair.
    ///
    /// Must be called with the recovery guard held.
    async fn try_refresh(&self) -> Result<AccessToken, Error> {
        let refresher = self
            .inner
            .refresher
            .as_ref()
            .ok_or(AuthError::RefreshTokenInvalid)?;
        let refresh_token = self
            .inner
            .session
            .refresh_token()
            .ok_or(AuthError::RefreshTokenInvalid)?;

        let tokens = refresher.refresh(&refresh_token).await?;
        let next_refresh = tokens.refresh_token.unwrap_or(refresh_token);
        self.inner
            .session
            .set_credentials(&tokens.access_token, Some(&next_refresh))?;

        info!("access token refreshed");
        self.emit(SessionEvent::Refreshed);
        Ok(tokens.access_token)
    }

    /// Refresh the access token now, outside of any 401.
    pub(crate) async fn refresh_now(&self) -> Result<(), Error> {
        let _guard = self.inner.recovery.lock().await;
        self.try_refresh().await.map(|_| ())
    }

    /// Expire the session unless another call has already replaced `token`.
    async fn expire_if_current(&self, token: &AccessToken) {
        let _guard = self.inner.recovery.lock().await;
        if self.inner.session.access_token().as_ref() == Some(token) {
            self.expire();
        }
    }

    fn expire(&self) {
        self.inner.session.clear();
        warn!(redirect_to = %self.inner.config.login_path, "session expired");
        self.emit(SessionEvent::Expired {
            redirect_to: self.inner.config.login_path.clone(),
        });
    }

    pub(crate) fn emit(&self, event: SessionEvent) {
        // No subscribers is fine.
        let _ = self.inner.events.send(event);
    }

    pub(crate) fn http(&self) -> &HttpClient {
        &self.inner.http
    }
}

impl std::fmt::Debug for ApiClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ApiClient")
            .field("base_url", &self.inner.config.base_url)
            .field("refresh", &self.inner.refresher.is_some())
            .field("session", &self.inner.session)
            .finish()
    }
}

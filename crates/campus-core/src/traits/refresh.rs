//! Refresh-token exchange trait.

use async_trait::async_trait;

use crate::Result;
use crate::tokens::{AccessToken, RefreshToken};

/// Tokens returned by a successful refresh.
#[derive(Debug, Clone)]
pub struct RefreshedTokens {
    pub access_token: AccessToken,
    /// A rotated refresh token; `None` keeps the current one.
    pub refresh_token: Option<RefreshToken>,
}

/// Exchanges a refresh token for a new access token.
#[async_trait]
pub trait TokenRefresher: Send + Sync {
    async fn refresh(&self, refresh_token: &RefreshToken) -> Result<RefreshedTokens>;
}

//! Client configuration.

use std::time::Duration;

use crate::Result;
use crate::error::InvalidInputError;
use crate::types::{ApiPath, BaseUrl};

/// Base URL used when neither the runtime nor the build environment sets one.
pub const DEFAULT_BASE_URL: &str = "http://localhost:8000/api";

/// Fixed request timeout.
pub const DEFAULT_TIMEOUT: Duration = Duration::from_millis(10_000);

/// Where the host should send the user after an unrecoverable 401.
pub const DEFAULT_LOGIN_PATH: &str = "/login";

/// Refresh-token exchange endpoint, relative to the base URL.
pub const DEFAULT_REFRESH_PATH: &str = "auth/refresh";

pub const BASE_URL_ENV: &str = "CAMPUS_API_URL";
pub const TIMEOUT_ENV: &str = "CAMPUS_API_TIMEOUT_MS";
pub const DISABLE_REFRESH_ENV: &str = "CAMPUS_DISABLE_REFRESH";

/// Settings resolved once when an API client is constructed.
#[derive(Debug, Clone)]
pub struct ApiConfig {
    pub base_url: BaseUrl,
    pub timeout: Duration,
    /// Redirect target carried by session-expired events.
    pub login_path: String,
    /// `None` disables the refresh-token exchange: a 401 then always ends
    /// the session.
    pub refresh_path: Option<ApiPath>,
    pub user_agent: String,
}

impl ApiConfig {
    /// Configuration with default settings for the given base URL.
    pub fn new(base_url: BaseUrl) -> Self {
        Self {
            base_url,
            timeout: DEFAULT_TIMEOUT,
            login_path: DEFAULT_LOGIN_PATH.to_string(),
            refresh_path: ApiPath::new(DEFAULT_REFRESH_PATH).ok(),
            user_agent: concat!("campus/", env!("CARGO_PKG_VERSION")).to_string(),
        }
    }

    /// Resolve configuration from the environment.
    ///
    /// The base URL comes from `CAMPUS_API_URL` at runtime, then at build
    /// time, then [`DEFAULT_BASE_URL`].
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Resolve configuration through an arbitrary variable lookup.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self> {
        let base_url = lookup(BASE_URL_ENV)
            .filter(|v| !v.trim().is_empty())
            .or_else(|| option_env!("CAMPUS_API_URL").map(str::to_string))
            .unwrap_or_else(|| DEFAULT_BASE_URL.to_string());

        let mut config = Self::new(BaseUrl::new(base_url.trim())?);

        if let Some(raw) = lookup(TIMEOUT_ENV) {
            let millis: u64 = raw.trim().parse().map_err(|_| InvalidInputError::Other {
                message: format!("{TIMEOUT_ENV} must be a number of milliseconds, got '{raw}'"),
            })?;
            config = config.with_timeout(Duration::from_millis(millis))?;
        }

        if lookup(DISABLE_REFRESH_ENV).is_some_and(|v| is_truthy(&v)) {
            config.refresh_path = None;
        }

        Ok(config)
    }

    /// Override the request timeout.
    pub fn with_timeout(mut self, timeout: Duration) -> Result<Self> {
        if timeout.is_zero() {
            return Err(InvalidInputError::Other {
                message: "timeout must be greater than zero".to_string(),
            }
            .into());
        }
        self.timeout = timeout;
        Ok(self)
    }

    /// Disable the refresh-token exchange.
    pub fn without_refresh(mut self) -> Self {
        self.refresh_path = None;
        self
    }
}

fn is_truthy(value: &str) -> bool {
    matches!(
        value.trim().to_ascii_lowercase().as_str(),
        "1" | "true" | "yes" | "on"
    )
}

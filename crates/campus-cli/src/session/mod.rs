//! Client construction and session event reporting.

pub mod storage;

use std::time::Duration;

use anyhow::{Context as _, Result};
use tokio::sync::broadcast::Receiver;
use tokio::sync::broadcast::error::TryRecvError;
use tracing::debug;

use campus_core::ApiConfig;
use campus_core::config::BASE_URL_ENV;
use campus_http::{ApiClient, SessionEvent};
use campus_store::{FileStore, SessionStore};

use crate::cli::ApiArgs;
use crate::output;

/// Everything a command needs: the API client over the on-disk session.
pub struct Context {
    pub client: ApiClient,
    events: Receiver<SessionEvent>,
}

impl Context {
    pub fn open(args: &ApiArgs) -> Result<Self> {
        let config = api_config(args)?;
        let path = storage::storage_path()?;
        debug!(path = %path.display(), base_url = %config.base_url, "opening session");

        let session = SessionStore::new(FileStore::new(path));
        let client = ApiClient::new(config, session).context("Failed to create API client")?;
        let events = client.subscribe();

        Ok(Self { client, events })
    }

    pub fn session(&self) -> &SessionStore {
        self.client.session()
    }

    /// Fail early when there is no stored session.
    pub fn require_session(&self) -> Result<()> {
        if self.session().has_session() {
            Ok(())
        } else {
            anyhow::bail!("No active session. Run 'campus session login' first.")
        }
    }

    /// Tell the user about session changes made while the command ran.
    pub fn report_session_events(&mut self) {
        loop {
            match self.events.try_recv() {
                Ok(SessionEvent::Expired { redirect_to }) => {
                    output::error("Your session has expired. Run 'campus session login' to sign in again.");
                    debug!(%redirect_to, "session expired");
                }
                Ok(SessionEvent::Refreshed) => output::note("Access token refreshed."),
                Ok(event) => debug!(?event, "session event"),
                Err(TryRecvError::Lagged(skipped)) => debug!(skipped, "missed session events"),
                Err(TryRecvError::Empty | TryRecvError::Closed) => break,
            }
        }
    }
}

fn api_config(args: &ApiArgs) -> Result<ApiConfig> {
    let mut config = ApiConfig::from_lookup(|key| match key {
        BASE_URL_ENV if args.api_url.is_some() => args.api_url.clone(),
        _ => std::env::var(key).ok(),
    })
    .context("Invalid API configuration")?;

    if let Some(ms) = args.timeout_ms {
        config = config
            .with_timeout(Duration::from_millis(ms))
            .context("Invalid timeout")?;
    }
    if args.no_refresh {
        config = config.without_refresh();
    }

    Ok(config)
}

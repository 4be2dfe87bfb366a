//! Session lifecycle notifications.

use campus_core::Module;

/// Broadcast by [`ApiClient`](crate::ApiClient) whenever the stored session
/// changes.
///
/// Hosts subscribe with [`ApiClient::subscribe`](crate::ApiClient::subscribe)
/// and react to [`SessionEvent::Expired`] by sending the user to the login
/// screen.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SessionEvent {
    LoggedIn { module: Module },
    /// A new access token was obtained with the refresh token.
    Refreshed,
    /// A 401 could not be recovered and the session was cleared.
    Expired { redirect_to: String },
    LoggedOut,
}

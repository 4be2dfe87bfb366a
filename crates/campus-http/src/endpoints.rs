//! Auth endpoint paths and wire payloads.

use serde::{Deserialize, Serialize};

pub(crate) const AUTH_LOGIN: &str = "auth/login";
pub(crate) const AUTH_LOGOUT: &str = "auth/logout";
pub(crate) const AUTH_ME: &str = "auth/me";

/// `data` of a successful `auth/login` response.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct LoginResponse {
    pub access_token: String,
    #[serde(default)]
    pub refresh_token: Option<String>,
    #[serde(default)]
    pub user: Option<UserProfile>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct RefreshRequest<'a> {
    pub refresh_token: &'a str,
}

/// `data` of a successful refresh response.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct RefreshResponse {
    pub access_token: String,
    #[serde(default)]
    pub refresh_token: Option<String>,
}

/// The signed-in user, as returned by `auth/login` and `auth/me`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserProfile {
    pub id: String,
    pub name: String,
    pub email: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub role: Option<String>,
    /// Modules this user may open.
    #[serde(default)]
    pub modules: Vec<String>,
}

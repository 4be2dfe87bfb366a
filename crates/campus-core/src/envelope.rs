//! The response envelope every backend endpoint returns.

use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::error::{Error, ProtocolError, ServerError};

/// `{ success, data, message? }`, the wire shape of every response.
///
/// `data` is kept as raw JSON until [`Envelope::into_data`] checks the
/// `success` flag, because failed envelopes often carry no data at all.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Envelope<T = Value> {
    pub success: bool,
    #[serde(default)]
    pub data: T,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
}

impl Envelope<Value> {
    /// Parse a raw response body as an envelope.
    pub fn parse(status: u16, body: &[u8]) -> Result<Self, Error> {
        serde_json::from_slice(body).map_err(|e| {
            ProtocolError::MalformedResponse {
                status,
                reason: e.to_string(),
            }
            .into()
        })
    }

    /// Unwrap `data` as `T`, or turn `success: false` into a server error.
    ///
    /// The server error carries the whole envelope as its body so the
    /// message and any extra fields reach the normalizer.
    pub fn into_data<T: DeserializeOwned>(self, status: u16) -> Result<T, Error> {
        if !self.success {
            let body = serde_json::to_value(&self).ok();
            return Err(ServerError::new(status, body).into());
        }

        serde_json::from_value(self.data).map_err(|e| {
            ProtocolError::UnexpectedPayload {
                reason: e.to_string(),
            }
            .into()
        })
    }
}

impl<T> Envelope<T> {
    /// Wrap `data` in a successful envelope.
    pub fn ok(data: T) -> Self {
        Self {
            success: true,
            data,
            message: None,
        }
    }
}

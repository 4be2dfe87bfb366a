//! campus-core - Core types and traits for the campus admin API client.

pub mod config;
pub mod credentials;
pub mod envelope;
pub mod error;
pub mod normalize;
pub mod request;
pub mod resources;
pub mod tokens;
pub mod traits;
pub mod types;

pub use config::ApiConfig;
pub use credentials::Credentials;
pub use envelope::Envelope;
pub use error::Error;
pub use normalize::{ErrorKind, NormalizedError, normalize};
pub use request::{ApiRequest, Method, RequestOptions};
pub use resources::{Resource, Validate, ValidationErrors};
pub use tokens::{AccessToken, RefreshToken};
pub use traits::{KeyValueStore, RefreshedTokens, TokenRefresher};
pub use types::{ApiPath, BaseUrl, LanguageCode, Module, ThemeMode};

/// Result type alias using the crate's Error type.
pub type Result<T> = std::result::Result<T, Error>;

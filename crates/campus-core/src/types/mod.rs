//! Validated value types.

mod api_path;
mod base_url;
mod module;
mod prefs;

pub use api_path::ApiPath;
pub use base_url::BaseUrl;
pub use module::Module;
pub use prefs::{LanguageCode, ThemeMode};

//! Core traits for campus backends.

pub mod refresh;
pub mod storage;

pub use refresh::{RefreshedTokens, TokenRefresher};
pub use storage::{Change, KeyValueStore};

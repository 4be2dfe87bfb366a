//! campus-http - Authenticated request pipeline for the campus admin API.
//!
//! All calls go through an [`ApiClient`], which attaches the stored access
//! token, unwraps the response envelope, recovers from a 401 at most once
//! per call, and converts every failure into a
//! [`NormalizedError`](campus_core::NormalizedError).
//!
//! # Example
//!
//! ```no_run
//! use campus_core::resources::{ListQuery, Room};
//! use campus_core::{ApiConfig, Credentials, Module};
//! use campus_http::ApiClient;
//! use campus_store::SessionStore;
//!
//! # async fn example() -> Result<(), campus_core::NormalizedError> {
//! let client = ApiClient::new(ApiConfig::from_env()?, SessionStore::in_memory())?;
//! client
//!     .auth()
//!     .login(&Credentials::new("warden@example.edu", "secret"), Module::Hostel)
//!     .await?;
//!
//! let rooms: Vec<Room> = client.resource::<Room>().list(&ListQuery::default()).await?;
//! for room in rooms {
//!     println!("{} ({} beds)", room.room_number, room.capacity);
//! }
//! # Ok(())
//! # }
//! ```

mod auth;
mod client;
mod endpoints;
mod events;
mod pipeline;
mod refresh;
mod resources;

pub use auth::AuthApi;
pub use client::HttpClient;
pub use endpoints::UserProfile;
pub use events::SessionEvent;
pub use pipeline::{ApiClient, ApiResult};
pub use refresh::HttpRefresher;
pub use resources::ResourceClient;

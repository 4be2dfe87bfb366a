//! View models for the admin CRUD resources.

mod boarding;
mod hostel;
mod people;
mod validate;

use serde::Serialize;
use serde::de::DeserializeOwned;

pub use boarding::{BoardingPackage, Meal, MealType};
pub use hostel::{Bed, BedStatus, Room, RoomStatus, RoomType};
pub use people::{Guardian, Staff, Student, Teacher};
pub use validate::{Rules, Validate, ValidationErrors};

/// A CRUD resource served under a fixed collection path.
pub trait Resource: Serialize + DeserializeOwned + Validate + Send + Sync {
    /// Collection path relative to the API base, e.g. `rooms`.
    const COLLECTION: &'static str;

    /// Server-assigned identifier; `None` before creation.
    fn id(&self) -> Option<&str>;
}

/// Paging and search parameters for list calls.
#[derive(Debug, Clone, Default, Serialize)]
pub struct ListQuery {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub page: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub limit: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub search: Option<String>,
}

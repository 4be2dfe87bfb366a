//! campus-store - Durable session storage.

mod file;
mod memory;
mod session;

pub use file::FileStore;
pub use memory::MemoryStore;
pub use session::{SessionStore, keys};

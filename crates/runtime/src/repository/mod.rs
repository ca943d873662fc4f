//! Session persistence.
mod error;
mod file;
mod memory;
mod traits;

pub use error::{RepositoryError, Result};
pub use file::{FORMAT_VERSION, FileSessionRepository, MAGIC};
pub use memory::InMemorySessionRepository;
pub use traits::{SessionRepository, validate_slot};

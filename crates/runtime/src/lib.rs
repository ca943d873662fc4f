//! Session runtime around `game-core`.
//!
//! The core is a synchronous, deterministic library. This crate adds what a
//! playable session needs around it: saving and resuming sessions through a
//! [`SessionRepository`], environment-driven configuration, and logging
//! bootstrap. [`Session`] ties an [`Engine`](game_core::Engine) to a
//! repository and persists it on request or automatically.
pub mod config;
pub mod error;
pub mod logging;
pub mod repository;
pub mod session;

pub use config::RuntimeConfig;
pub use error::{Result, RuntimeError};
pub use repository::{
    FileSessionRepository, InMemorySessionRepository, RepositoryError, SessionRepository,
};
pub use session::Session;

//! Unified error type surfaced by the runtime.
//!
//! Wraps failures from the core's turn sequence, floor transitions and
//! snapshots together with repository errors so callers can bubble them up
//! with `?`.
use game_core::{FloorError, GameError, SnapshotError, TurnError};
use thiserror::Error;

pub use crate::repository::RepositoryError;

pub type Result<T> = std::result::Result<T, RuntimeError>;

#[derive(Debug, Error)]
pub enum RuntimeError {
    #[error(transparent)]
    Turn(#[from] TurnError),

    #[error(transparent)]
    Floor(#[from] FloorError),

    #[error(transparent)]
    Snapshot(#[from] SnapshotError),

    #[error(transparent)]
    Repository(#[from] RepositoryError),

    #[error("no saved session in slot `{slot}`")]
    NoSavedSession { slot: String },

    #[error("logging setup failed: {0}")]
    Logging(String),
}

impl RuntimeError {
    /// Stable identifier for metrics and log filtering.
    pub fn error_code(&self) -> &'static str {
        match self {
            RuntimeError::Turn(err) => err.error_code(),
            RuntimeError::Floor(err) => err.error_code(),
            RuntimeError::Snapshot(err) => err.error_code(),
            RuntimeError::Repository(err) => err.error_code(),
            RuntimeError::NoSavedSession { .. } => "RUNTIME_NO_SAVED_SESSION",
            RuntimeError::Logging(_) => "RUNTIME_LOGGING",
        }
    }
}

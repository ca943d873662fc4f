//! Error types raised by repository implementations.

use thiserror::Error;

/// Errors surfaced by repository implementations.
#[derive(Debug, Error)]
pub enum RepositoryError {
    #[error("session repository lock was poisoned")]
    LockPoisoned,

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("serialization error: {0}")]
    Serialization(String),

    #[error("corrupted data: {0}")]
    CorruptedData(String),

    #[error("unsupported save format version {found} (expected {expected})")]
    UnsupportedVersion { found: u16, expected: u16 },

    #[error("invalid slot name `{0}`")]
    InvalidSlot(String),
}

impl RepositoryError {
    pub fn error_code(&self) -> &'static str {
        match self {
            RepositoryError::LockPoisoned => "REPOSITORY_LOCK_POISONED",
            RepositoryError::Io(_) => "REPOSITORY_IO",
            RepositoryError::Serialization(_) => "REPOSITORY_SERIALIZATION",
            RepositoryError::CorruptedData(_) => "REPOSITORY_CORRUPTED_DATA",
            RepositoryError::UnsupportedVersion { .. } => "REPOSITORY_UNSUPPORTED_VERSION",
            RepositoryError::InvalidSlot(_) => "REPOSITORY_INVALID_SLOT",
        }
    }
}

pub type Result<T> = std::result::Result<T, RepositoryError>;

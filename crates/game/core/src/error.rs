//! Error classification shared by every game-core error.
//!
//! The concrete enums (`StoreError`, `MapError`, `TurnError`, ...) sit next to
//! the code that raises them. Each one implements [`GameError`] so callers can
//! log a stable code and decide whether the turn can go on.

/// How bad an error is.
///
/// Only [`ErrorSeverity::Recoverable`] leaves the turn running; everything
/// else aborts it and reaches the session.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum ErrorSeverity {
    /// Recoverable error - the action was impossible, nothing changed.
    ///
    /// Examples: walking into a wall, attacking an empty tile
    Recoverable,

    /// Validation error - invalid input, should not retry without changes.
    ///
    /// Examples: out-of-bounds origin, component assumed present but absent
    Validation,

    /// Internal error - unexpected state inconsistency.
    ///
    /// Examples: restored tags disagree with restored components
    Internal,

    /// Fatal error - the collaborator behind the core failed.
    ///
    /// Examples: dungeon factory could not build a floor
    Fatal,
}

impl ErrorSeverity {
    /// Lowercase name, used as a log field.
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Recoverable => "recoverable",
            Self::Validation => "validation",
            Self::Internal => "internal",
            Self::Fatal => "fatal",
        }
    }

    pub const fn is_recoverable(&self) -> bool {
        matches!(self, Self::Recoverable)
    }
}

/// Implemented by every error enum in this crate.
pub trait GameError: core::fmt::Display + core::fmt::Debug {
    fn severity(&self) -> ErrorSeverity;

    /// Upper-snake code naming the variant, e.g. `STORE_UNKNOWN_ENTITY`.
    fn error_code(&self) -> &'static str;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn only_recoverable_severity_is_recoverable() {
        assert!(ErrorSeverity::Recoverable.is_recoverable());
        assert!(!ErrorSeverity::Validation.is_recoverable());
        assert_eq!(ErrorSeverity::Fatal.as_str(), "fatal");
    }
}

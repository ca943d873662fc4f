use crate::ecs::{EntityId, StoreError};
use crate::error::{ErrorSeverity, GameError};
use crate::render::RenderError;
use crate::visibility::VisibilityError;

use super::ai::ActionError;

/// Errors that abort a turn.
///
/// Impossible actions never show up here; the turn loop swallows them.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum TurnError {
    #[error("entity {entity} names unregistered behavior `{behavior}`")]
    UnknownBehavior { entity: EntityId, behavior: String },

    #[error("action of entity {entity} failed: {source}")]
    Action {
        entity: EntityId,
        #[source]
        source: ActionError,
    },

    #[error(transparent)]
    Store(#[from] StoreError),

    #[error(transparent)]
    Visibility(#[from] VisibilityError),

    #[error(transparent)]
    Render(#[from] RenderError),
}

impl GameError for TurnError {
    fn severity(&self) -> ErrorSeverity {
        match self {
            TurnError::UnknownBehavior { .. } => ErrorSeverity::Validation,
            TurnError::Action { source, .. } => source.severity(),
            TurnError::Store(err) => err.severity(),
            TurnError::Visibility(err) => err.severity(),
            TurnError::Render(err) => err.severity(),
        }
    }

    fn error_code(&self) -> &'static str {
        match self {
            TurnError::UnknownBehavior { .. } => "TURN_UNKNOWN_BEHAVIOR",
            TurnError::Action { source, .. } => source.error_code(),
            TurnError::Store(err) => err.error_code(),
            TurnError::Visibility(err) => err.error_code(),
            TurnError::Render(err) => err.error_code(),
        }
    }
}

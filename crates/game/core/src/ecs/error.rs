//! Component store errors.

use crate::error::{ErrorSeverity, GameError};

use super::component::ComponentKind;
use super::entity::EntityId;

/// Contract violations detected by the component store.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum StoreError {
    /// The entity was never spawned or has already been despawned.
    #[error("entity {entity} does not exist")]
    UnknownEntity { entity: EntityId },

    /// A caller required a component the entity does not carry.
    #[error("entity {entity} has no {kind} component")]
    ComponentAbsent {
        entity: EntityId,
        kind: ComponentKind,
    },

    /// An entity with this id is already live.
    #[error("entity {entity} already exists")]
    DuplicateEntity { entity: EntityId },
}

impl GameError for StoreError {
    fn severity(&self) -> ErrorSeverity {
        match self {
            StoreError::UnknownEntity { .. } | StoreError::ComponentAbsent { .. } => {
                ErrorSeverity::Validation
            }
            StoreError::DuplicateEntity { .. } => ErrorSeverity::Internal,
        }
    }

    fn error_code(&self) -> &'static str {
        match self {
            StoreError::UnknownEntity { .. } => "STORE_UNKNOWN_ENTITY",
            StoreError::ComponentAbsent { .. } => "STORE_COMPONENT_ABSENT",
            StoreError::DuplicateEntity { .. } => "STORE_DUPLICATE_ENTITY",
        }
    }
}

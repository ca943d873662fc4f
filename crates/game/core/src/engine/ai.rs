//! AI behavior contract and the registry the turn loop resolves it through.
//!
//! An entity opts into enemy turns by carrying an [`Ai`](crate::ecs::Ai)
//! component naming a behavior. Behaviors are stateless from the engine's
//! point of view; anything they need to remember lives in components.

use std::collections::BTreeMap;
use std::fmt;
use std::rc::Rc;

use crate::color::Rgb;
use crate::ecs::{ComponentStore, EntityId, Position, StoreError};
use crate::error::{ErrorSeverity, GameError};
use crate::map::{MapError, TileGrid};
use crate::render::MessageLog;

use super::lookup;

/// Everything a behavior may read or change while acting.
pub struct ActionContext<'a> {
    pub store: &'a mut ComponentStore,
    pub grid: &'a TileGrid,
    pub player: EntityId,
    pub log: &'a mut MessageLog,
}

impl ActionContext<'_> {
    pub fn blocking_entity_at(&self, position: Position) -> Option<EntityId> {
        lookup::blocking_entity_at(&*self.store, position)
    }

    pub fn actor_at(&self, position: Position) -> Option<EntityId> {
        lookup::actor_at(&*self.store, position)
    }

    pub fn message(&mut self, text: impl Into<String>, fg: Rgb) {
        self.log.add_message(text, fg);
    }
}

/// Decision logic for one kind of non-player actor.
pub trait AiBehavior {
    /// Takes one turn for `actor`.
    ///
    /// Return [`ActionError::Impossible`] when the chosen action cannot be
    /// carried out; the turn loop treats that as a skipped turn.
    fn perform(&self, actor: EntityId, ctx: &mut ActionContext<'_>) -> Result<(), ActionError>;
}

impl<F> AiBehavior for F
where
    F: Fn(EntityId, &mut ActionContext<'_>) -> Result<(), ActionError>,
{
    fn perform(&self, actor: EntityId, ctx: &mut ActionContext<'_>) -> Result<(), ActionError> {
        self(actor, ctx)
    }
}

/// Behaviors by name.
#[derive(Clone, Default)]
pub struct BehaviorRegistry {
    behaviors: BTreeMap<String, Rc<dyn AiBehavior>>,
}

impl BehaviorRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers `behavior` under `name`, replacing any previous one.
    pub fn register(&mut self, name: impl Into<String>, behavior: impl AiBehavior + 'static) {
        self.behaviors.insert(name.into(), Rc::new(behavior));
    }

    #[must_use]
    pub fn with(mut self, name: impl Into<String>, behavior: impl AiBehavior + 'static) -> Self {
        self.register(name, behavior);
        self
    }

    pub fn get(&self, name: &str) -> Option<Rc<dyn AiBehavior>> {
        self.behaviors.get(name).cloned()
    }

    pub fn contains(&self, name: &str) -> bool {
        self.behaviors.contains_key(name)
    }

    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.behaviors.keys().map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.behaviors.len()
    }

    pub fn is_empty(&self) -> bool {
        self.behaviors.is_empty()
    }
}

impl fmt::Debug for BehaviorRegistry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_set().entries(self.behaviors.keys()).finish()
    }
}

/// Errors raised by an actor's action.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum ActionError {
    /// The action cannot be performed; nothing changed.
    #[error("{0}")]
    Impossible(String),

    #[error(transparent)]
    Store(#[from] StoreError),

    #[error(transparent)]
    Map(#[from] MapError),
}

impl ActionError {
    pub fn impossible(reason: impl Into<String>) -> Self {
        Self::Impossible(reason.into())
    }

    pub fn is_impossible(&self) -> bool {
        matches!(self, Self::Impossible(_))
    }
}

impl GameError for ActionError {
    fn severity(&self) -> ErrorSeverity {
        match self {
            ActionError::Impossible(_) => ErrorSeverity::Recoverable,
            ActionError::Store(err) => err.severity(),
            ActionError::Map(err) => err.severity(),
        }
    }

    fn error_code(&self) -> &'static str {
        match self {
            ActionError::Impossible(_) => "ACTION_IMPOSSIBLE",
            ActionError::Store(err) => err.error_code(),
            ActionError::Map(err) => err.error_code(),
        }
    }
}

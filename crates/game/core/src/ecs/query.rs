//! Component-presence queries.

use super::component::ComponentKind;
use super::entity::EntityId;
use super::store::ComponentStore;

/// Selects entities by which component kinds they carry.
///
/// A query is a plain value: running it twice against an unchanged store
/// yields the same entities in the same (id) order.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Query {
    with: Vec<ComponentKind>,
    without: Vec<ComponentKind>,
}

impl Query {
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn with(mut self, kind: ComponentKind) -> Self {
        self.with.push(kind);
        self
    }

    #[must_use]
    pub fn without(mut self, kind: ComponentKind) -> Self {
        self.without.push(kind);
        self
    }

    pub fn matches(&self, store: &ComponentStore, entity: EntityId) -> bool {
        self.with.iter().all(|kind| store.has(entity, *kind))
            && !self.without.iter().any(|kind| store.has(entity, *kind))
    }

    /// Lazily iterates matching entities in id order.
    pub fn iter<'a>(&'a self, store: &'a ComponentStore) -> impl Iterator<Item = EntityId> + 'a {
        // Drive from the first required column when there is one; it is never
        // larger than the live set.
        let candidates: Box<dyn Iterator<Item = EntityId> + 'a> = match self.with.first() {
            Some(kind) => Box::new(store.column_entities(*kind)),
            None => Box::new(store.entities()),
        };
        candidates.filter(move |entity| self.matches(store, *entity))
    }
}

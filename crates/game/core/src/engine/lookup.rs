//! Spatial lookups over the store, shared by the engine and behaviors.
use crate::ecs::{
    BlocksMovement, ComponentKind, ComponentStore, EntityId, Fighter, Position, Query, Tag,
};

/// An entity is alive unless it carries a `Fighter` with no hit points left.
pub fn is_alive(store: &ComponentStore, entity: EntityId) -> bool {
    store.get::<Fighter>(entity).is_none_or(Fighter::is_alive)
}

/// First entity at `position` whose `BlocksMovement` is set.
pub fn blocking_entity_at(store: &ComponentStore, position: Position) -> Option<EntityId> {
    store
        .entities_with_tag(&Tag::Position(position))
        .find(|entity| store.get::<BlocksMovement>(*entity).is_some_and(|blocks| blocks.0))
}

/// First living actor at `position`.
pub fn actor_at(store: &ComponentStore, position: Position) -> Option<EntityId> {
    store
        .entities_with_tag(&Tag::Position(position))
        .find(|entity| store.has(*entity, ComponentKind::IsActor) && is_alive(store, *entity))
}

/// Living actors in id order.
pub fn actors(store: &ComponentStore) -> Vec<EntityId> {
    let query = Query::new().with(ComponentKind::IsActor);
    store
        .query(&query)
        .filter(|entity| is_alive(store, *entity))
        .collect()
}

pub fn items(store: &ComponentStore) -> Vec<EntityId> {
    let query = Query::new().with(ComponentKind::IsItem);
    store.query(&query).collect()
}

use std::collections::{BTreeMap, BTreeSet};

use strum::EnumCount;
use strum::IntoEnumIterator;

use super::component::{Component, ComponentKind, ComponentType};
use super::entity::EntityId;
use super::error::StoreError;
use super::hooks::{ComponentChange, HookTable};
use super::query::Query;
use super::tag::{Tag, TagIndex};

/// Entity → component storage with per-kind columns, tags and change hooks.
///
/// # Invariants
///
/// - At most one value per (entity, kind); `set` replaces.
/// - Hooks for a kind run inside the `set`/`remove` that changed it, so no
///   caller ever observes a component whose mirrored tag is stale.
/// - Ids are never reused, not even by the store returned from
///   [`next_floor`](Self::next_floor).
#[derive(Debug)]
pub struct ComponentStore {
    next_id: u32,
    alive: BTreeSet<EntityId>,
    columns: Vec<BTreeMap<EntityId, Component>>,
    tags: TagIndex,
    hooks: HookTable,
}

impl ComponentStore {
    /// Creates an empty store with the tag-mirroring hooks installed.
    pub fn new() -> Self {
        Self::with_hooks(HookTable::with_tag_mirrors())
    }

    pub fn with_hooks(hooks: HookTable) -> Self {
        Self {
            next_id: 0,
            alive: BTreeSet::new(),
            columns: (0..ComponentKind::COUNT).map(|_| BTreeMap::new()).collect(),
            tags: TagIndex::default(),
            hooks,
        }
    }

    /// Returns an empty store for the next floor.
    ///
    /// The new store continues this store's id counter and shares its hook
    /// table.
    pub fn next_floor(&self) -> ComponentStore {
        let mut store = Self::with_hooks(self.hooks.clone());
        store.next_id = self.next_id;
        store
    }

    pub fn hooks_mut(&mut self) -> &mut HookTable {
        &mut self.hooks
    }

    /// Allocates a new entity with no components.
    pub fn spawn(&mut self) -> EntityId {
        let id = EntityId(self.next_id);
        self.next_id += 1;
        self.alive.insert(id);
        id
    }

    /// Allocates a new entity and attaches every component in `components`.
    pub fn spawn_with<I>(&mut self, components: I) -> EntityId
    where
        I: IntoIterator<Item = Component>,
    {
        let id = self.spawn();
        for component in components {
            self.replace(id, component.kind(), Some(component));
        }
        id
    }

    /// Removes an entity and all of its components.
    ///
    /// Components are removed through the regular hook path, so mirrored tags
    /// disappear with them.
    pub fn despawn(&mut self, entity: EntityId) -> Result<(), StoreError> {
        self.ensure_alive(entity)?;
        for kind in ComponentKind::iter() {
            self.replace(entity, kind, None);
        }
        self.tags.forget(entity);
        self.alive.remove(&entity);
        Ok(())
    }

    pub fn contains(&self, entity: EntityId) -> bool {
        self.alive.contains(&entity)
    }

    pub fn len(&self) -> usize {
        self.alive.len()
    }

    pub fn is_empty(&self) -> bool {
        self.alive.is_empty()
    }

    /// Live entities in creation order.
    pub fn entities(&self) -> impl Iterator<Item = EntityId> + '_ {
        self.alive.iter().copied()
    }

    /// Attaches `value`, replacing any previous component of the same kind.
    ///
    /// Returns the replaced value.
    pub fn set(
        &mut self,
        entity: EntityId,
        value: impl Into<Component>,
    ) -> Result<Option<Component>, StoreError> {
        self.ensure_alive(entity)?;
        let value = value.into();
        Ok(self.replace(entity, value.kind(), Some(value)))
    }

    /// Detaches the component of `kind`; same hook path as `set` with no new value.
    pub fn remove(
        &mut self,
        entity: EntityId,
        kind: ComponentKind,
    ) -> Result<Option<Component>, StoreError> {
        self.ensure_alive(entity)?;
        Ok(self.replace(entity, kind, None))
    }

    pub fn get<T: ComponentType>(&self, entity: EntityId) -> Option<&T> {
        self.get_kind(entity, T::KIND).and_then(T::from_component)
    }

    pub fn get_kind(&self, entity: EntityId, kind: ComponentKind) -> Option<&Component> {
        self.columns[kind.index()].get(&entity)
    }

    /// Like [`get`](Self::get), but absence is an error.
    pub fn require<T: ComponentType>(&self, entity: EntityId) -> Result<&T, StoreError> {
        self.get::<T>(entity).ok_or(StoreError::ComponentAbsent {
            entity,
            kind: T::KIND,
        })
    }

    pub fn has(&self, entity: EntityId, kind: ComponentKind) -> bool {
        self.columns[kind.index()].contains_key(&entity)
    }

    /// Every component currently attached to `entity`, in kind order.
    pub fn components_of(&self, entity: EntityId) -> impl Iterator<Item = &Component> + '_ {
        self.columns
            .iter()
            .filter_map(move |column| column.get(&entity))
    }

    pub fn tags(&self, entity: EntityId) -> impl Iterator<Item = &Tag> + '_ {
        self.tags.tags(entity)
    }

    pub fn has_tag(&self, entity: EntityId, tag: &Tag) -> bool {
        self.tags.contains(entity, tag)
    }

    pub fn entities_with_tag<'a>(&'a self, tag: &'a Tag) -> impl Iterator<Item = EntityId> + 'a {
        self.tags.entities(tag)
    }

    pub fn query<'a>(&'a self, query: &'a Query) -> impl Iterator<Item = EntityId> + 'a {
        query.iter(self)
    }

    pub(crate) fn column_entities(
        &self,
        kind: ComponentKind,
    ) -> impl Iterator<Item = EntityId> + '_ {
        self.columns[kind.index()].keys().copied()
    }

    pub(crate) fn next_id(&self) -> u32 {
        self.next_id
    }

    /// Re-creates an entity with a known id (snapshot restore).
    pub(crate) fn revive(&mut self, entity: EntityId) -> Result<(), StoreError> {
        if !self.alive.insert(entity) {
            return Err(StoreError::DuplicateEntity { entity });
        }
        self.next_id = self.next_id.max(entity.0 + 1);
        Ok(())
    }

    pub(crate) fn set_next_id(&mut self, next_id: u32) {
        self.next_id = self.next_id.max(next_id);
    }

    /// Swaps the stored value and runs the kind's hooks in one step.
    fn replace(
        &mut self,
        entity: EntityId,
        kind: ComponentKind,
        new: Option<Component>,
    ) -> Option<Component> {
        let column = &mut self.columns[kind.index()];
        let old = match new {
            Some(value) => column.insert(entity, value),
            None => column.remove(&entity),
        };
        let change = ComponentChange {
            entity,
            old: old.as_ref(),
            new: column.get(&entity),
        };
        self.hooks.run(&mut self.tags, kind, &change);
        old
    }

    fn ensure_alive(&self, entity: EntityId) -> Result<(), StoreError> {
        if self.contains(entity) {
            Ok(())
        } else {
            Err(StoreError::UnknownEntity { entity })
        }
    }
}

impl Default for ComponentStore {
    fn default() -> Self {
        Self::new()
    }
}

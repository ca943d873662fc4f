//! Per-entity tag sets with a reverse index.
//!
//! Tags mirror selected component values (currently `Position` and `Name`) so
//! that "who is standing here" and "who is called this" are index lookups
//! instead of scans.

use std::collections::{BTreeMap, BTreeSet};

use super::component::{Component, Name, Position};
use super::entity::EntityId;

/// A value mirrored from a component into an entity's tag set.
#[derive(Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Tag {
    Position(Position),
    Name(String),
}

impl Tag {
    /// Returns the tag that mirrors `component`, if its kind is mirrored.
    pub fn mirror_of(component: &Component) -> Option<Tag> {
        match component {
            Component::Position(position) => Some(Tag::Position(*position)),
            Component::Name(name) => Some(Tag::Name(name.0.clone())),
            _ => None,
        }
    }
}

impl From<Position> for Tag {
    fn from(position: Position) -> Self {
        Tag::Position(position)
    }
}

impl From<Name> for Tag {
    fn from(name: Name) -> Self {
        Tag::Name(name.0)
    }
}

/// Forward (entity → tags) and reverse (tag → entities) tag bookkeeping.
///
/// Both directions are updated together by [`add`](Self::add) and
/// [`discard`](Self::discard); there is no way to touch one without the other.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct TagIndex {
    by_entity: BTreeMap<EntityId, BTreeSet<Tag>>,
    by_tag: BTreeMap<Tag, BTreeSet<EntityId>>,
}

impl TagIndex {
    pub fn add(&mut self, entity: EntityId, tag: Tag) {
        self.by_tag.entry(tag.clone()).or_default().insert(entity);
        self.by_entity.entry(entity).or_default().insert(tag);
    }

    pub fn discard(&mut self, entity: EntityId, tag: &Tag) {
        if let Some(tags) = self.by_entity.get_mut(&entity) {
            tags.remove(tag);
            if tags.is_empty() {
                self.by_entity.remove(&entity);
            }
        }
        if let Some(entities) = self.by_tag.get_mut(tag) {
            entities.remove(&entity);
            if entities.is_empty() {
                self.by_tag.remove(tag);
            }
        }
    }

    pub fn tags(&self, entity: EntityId) -> impl Iterator<Item = &Tag> + '_ {
        self.by_entity.get(&entity).into_iter().flatten()
    }

    pub fn contains(&self, entity: EntityId, tag: &Tag) -> bool {
        self.by_entity
            .get(&entity)
            .is_some_and(|tags| tags.contains(tag))
    }

    pub fn entities(&self, tag: &Tag) -> impl Iterator<Item = EntityId> + '_ {
        self.by_tag.get(tag).into_iter().flatten().copied()
    }

    /// Drops every tag of `entity`.
    pub fn forget(&mut self, entity: EntityId) {
        if let Some(tags) = self.by_entity.remove(&entity) {
            for tag in &tags {
                if let Some(entities) = self.by_tag.get_mut(tag) {
                    entities.remove(&entity);
                    if entities.is_empty() {
                        self.by_tag.remove(tag);
                    }
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn add_and_discard_keep_both_directions_in_sync() {
        let mut index = TagIndex::default();
        let a = EntityId(1);
        let b = EntityId(2);
        let here = Tag::Position(Position::new(1, 1));

        index.add(a, here.clone());
        index.add(b, here.clone());
        assert_eq!(index.entities(&here).collect::<Vec<_>>(), vec![a, b]);

        index.discard(a, &here);
        assert!(!index.contains(a, &here));
        assert_eq!(index.entities(&here).collect::<Vec<_>>(), vec![b]);

        index.forget(b);
        assert_eq!(index.entities(&here).count(), 0);
        assert_eq!(index, TagIndex::default());
    }

    #[test]
    fn only_position_and_name_are_mirrored() {
        assert_eq!(
            Tag::mirror_of(&Component::Name(Name::new("orc"))),
            Some(Tag::Name("orc".into()))
        );
        assert_eq!(
            Tag::mirror_of(&Component::BlocksMovement(Default::default())),
            None
        );
    }
}

//! Component-changed hooks.
//!
//! Hooks are registered per [`ComponentKind`] in a [`HookTable`] owned by the
//! store and run synchronously inside the `set`/`remove` call that changed the
//! component. A hook only receives a [`TagEditor`], never the store itself, so
//! it cannot write components and therefore cannot start another round of
//! hooks.

use std::collections::BTreeMap;
use std::fmt;
use std::rc::Rc;

use super::component::{Component, ComponentKind};
use super::entity::EntityId;
use super::tag::{Tag, TagIndex};

/// Arguments passed to every hook: the entity and its old/new values.
#[derive(Clone, Copy, Debug)]
pub struct ComponentChange<'a> {
    pub entity: EntityId,
    pub old: Option<&'a Component>,
    pub new: Option<&'a Component>,
}

impl ComponentChange<'_> {
    /// True when old and new compare equal (including both absent).
    pub fn is_noop(&self) -> bool {
        self.old == self.new
    }
}

/// Restricted view of the store handed to hooks.
pub struct TagEditor<'a> {
    tags: &'a mut TagIndex,
}

impl<'a> TagEditor<'a> {
    pub(crate) fn new(tags: &'a mut TagIndex) -> Self {
        Self { tags }
    }

    pub fn add(&mut self, entity: EntityId, tag: Tag) {
        self.tags.add(entity, tag);
    }

    pub fn discard(&mut self, entity: EntityId, tag: &Tag) {
        self.tags.discard(entity, tag);
    }

    pub fn contains(&self, entity: EntityId, tag: &Tag) -> bool {
        self.tags.contains(entity, tag)
    }
}

pub type ChangeHook = Rc<dyn Fn(&mut TagEditor<'_>, &ComponentChange<'_>)>;

/// Hooks keyed by the component kind they observe.
///
/// Cloning shares the registered closures.
#[derive(Clone, Default)]
pub struct HookTable {
    hooks: BTreeMap<ComponentKind, Vec<ChangeHook>>,
}

impl HookTable {
    /// Empty table; no component writes have side effects.
    pub fn new() -> Self {
        Self::default()
    }

    /// Table with the `Position` and `Name` tag mirrors installed.
    pub fn with_tag_mirrors() -> Self {
        let mut table = Self::new();
        table.register(ComponentKind::Position, mirror_tag);
        table.register(ComponentKind::Name, mirror_tag);
        table
    }

    pub fn register<F>(&mut self, kind: ComponentKind, hook: F)
    where
        F: Fn(&mut TagEditor<'_>, &ComponentChange<'_>) + 'static,
    {
        self.hooks.entry(kind).or_default().push(Rc::new(hook));
    }

    pub fn hooks_for(&self, kind: ComponentKind) -> &[ChangeHook] {
        self.hooks.get(&kind).map(Vec::as_slice).unwrap_or_default()
    }

    pub fn len(&self) -> usize {
        self.hooks.values().map(Vec::len).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub(crate) fn run(&self, tags: &mut TagIndex, kind: ComponentKind, change: &ComponentChange<'_>) {
        let mut editor = TagEditor::new(tags);
        for hook in self.hooks_for(kind) {
            hook(&mut editor, change);
        }
    }
}

impl fmt::Debug for HookTable {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_map()
            .entries(self.hooks.iter().map(|(kind, hooks)| (kind, hooks.len())))
            .finish()
    }
}

/// Mirrors a component value as a tag: drop the old value, add the new one.
pub fn mirror_tag(editor: &mut TagEditor<'_>, change: &ComponentChange<'_>) {
    if change.is_noop() {
        return;
    }
    if let Some(old) = change.old.and_then(Tag::mirror_of) {
        editor.discard(change.entity, &old);
    }
    if let Some(new) = change.new.and_then(Tag::mirror_of) {
        editor.add(change.entity, new);
    }
}

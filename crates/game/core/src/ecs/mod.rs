//! Component store.
//!
//! Entities are bare ids; all of their data lives here as components keyed by
//! (entity, kind). The store also maintains a tag set per entity that mirrors
//! selected component values, kept in sync by hooks that run inside the write
//! that changed the component.
mod attributes;
mod component;
mod entity;
mod error;
mod hooks;
mod query;
mod store;
mod tag;

pub use attributes::{Attribute, AttributeKind, Attributes};
pub use component::{
    Ai, BlocksMovement, Component, ComponentKind, ComponentType, Description, Fighter, Graphic,
    IsActor, IsItem, IsPlayer, LightEmitter, Name, Position, RenderOrder,
};
pub use entity::EntityId;
pub use error::StoreError;
pub use hooks::{ChangeHook, ComponentChange, HookTable, TagEditor, mirror_tag};
pub use query::Query;
pub use store::ComponentStore;
pub use tag::{Tag, TagIndex};

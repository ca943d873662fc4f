//! Deterministic core of a tile-based, turn-driven dungeon game.
//!
//! `game-core` owns the spatial world state (tile grid, visibility and
//! exploration masks), derives wall glyphs from what has been seen, stores
//! entity data as components with tag mirroring, and drives the per-turn
//! sequence that follows a player action. Dungeon generation, AI decisions,
//! field of view and console drawing are supplied by callers through the
//! [`DungeonFactory`], [`AiBehavior`], [`FovProvider`] and [`Blit`] traits.
pub mod color;
pub mod config;
pub mod ecs;
pub mod engine;
pub mod error;
pub mod map;
pub mod render;
pub mod snapshot;
pub mod visibility;

pub use config::{GameConfig, HudLayout};
pub use ecs::{
    Ai, Attribute, AttributeKind, Attributes, BlocksMovement, Component, ComponentKind,
    ComponentStore, ComponentType, Description, EntityId, Fighter, Graphic, HookTable, IsActor,
    IsItem, IsPlayer, LightEmitter, Name, Position, Query, RenderOrder, StoreError, Tag,
};
pub use engine::{
    ActionContext, ActionError, AiBehavior, BehaviorRegistry, DungeonFactory, Engine, Floor,
    FloorError, FloorRequest, GameWorld, TurnError, TurnReport,
};
pub use error::{ErrorSeverity, GameError};
pub use map::{EdgePolicy, Glyph, Grid, MapError, Tile, TileGrid};
pub use render::{Blit, Canvas, CellRegion, MessageLog, RenderError};
pub use snapshot::{EntityRecord, SessionSnapshot, SnapshotError};
pub use visibility::{FovProvider, RayCastFov, VisibilityError};

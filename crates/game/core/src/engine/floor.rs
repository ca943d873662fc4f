//! Dungeon floors and the contract for building new ones.
use crate::ecs::{Component, ComponentKind, ComponentStore, EntityId, Position, StoreError};
use crate::error::{ErrorSeverity, GameError};
use crate::map::{MapError, TileGrid};

/// Dungeon-wide generation parameters plus the current depth.
///
/// Only `current_floor` changes during a session, and only through
/// [`Engine::advance_floor`](super::Engine::advance_floor).
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct GameWorld {
    pub map_width: u32,
    pub map_height: u32,
    pub max_rooms: u32,
    pub room_min_size: u32,
    pub room_max_size: u32,
    pub current_floor: u32,
}

impl GameWorld {
    pub fn new(
        map_width: u32,
        map_height: u32,
        max_rooms: u32,
        room_min_size: u32,
        room_max_size: u32,
    ) -> Self {
        Self {
            map_width,
            map_height,
            max_rooms,
            room_min_size,
            room_max_size,
            current_floor: 0,
        }
    }

    #[must_use]
    pub fn with_current_floor(mut self, current_floor: u32) -> Self {
        self.current_floor = current_floor;
        self
    }
}

/// One generated level: its map, its entities and which of them is the player.
#[derive(Debug)]
pub struct Floor {
    pub grid: TileGrid,
    pub store: ComponentStore,
    pub player: EntityId,
}

impl Floor {
    pub fn new(grid: TileGrid, store: ComponentStore, player: EntityId) -> Self {
        Self {
            grid,
            store,
            player,
        }
    }

    /// Checks that the player exists and, if placed, stands on the map.
    pub fn validate(&self) -> Result<(), FloorError> {
        if !self.store.contains(self.player) {
            return Err(StoreError::UnknownEntity {
                entity: self.player,
            }
            .into());
        }
        if let Some(position) = self.store.get::<Position>(self.player) {
            if !self.grid.in_bounds(*position) {
                return Err(MapError::OutOfBounds {
                    position: *position,
                    width: self.grid.width(),
                    height: self.grid.height(),
                }
                .into());
            }
        }
        Ok(())
    }

    /// Checks that every entity on this floor, the player included, was
    /// spawned at or after `first_fresh`.
    pub(crate) fn check_fresh(&self, first_fresh: u32) -> Result<(), FloorError> {
        let stale = self
            .store
            .entities()
            .chain(std::iter::once(self.player))
            .find(|entity| entity.0 < first_fresh);
        match stale {
            Some(entity) => Err(FloorError::StaleEntity {
                entity,
                first_fresh: EntityId(first_fresh),
            }),
            None => Ok(()),
        }
    }
}

/// What a [`DungeonFactory`] gets to build the next floor from.
#[derive(Debug)]
pub struct FloorRequest<'a> {
    /// World parameters, with `current_floor` already set to the floor being
    /// built.
    pub world: &'a GameWorld,
    /// Empty store continuing the previous floor's id counter.
    pub store: ComponentStore,
    /// The player's components minus `Position`, to re-attach on the new floor.
    pub carried: Vec<Component>,
}

impl FloorRequest<'_> {
    pub fn floor_number(&self) -> u32 {
        self.world.current_floor
    }
}

/// Builds floors. Room and corridor layout is entirely up to the implementor.
pub trait DungeonFactory {
    fn generate(&mut self, request: FloorRequest<'_>) -> Result<Floor, FloorError>;
}

impl<F> DungeonFactory for F
where
    F: FnMut(FloorRequest<'_>) -> Result<Floor, FloorError>,
{
    fn generate(&mut self, request: FloorRequest<'_>) -> Result<Floor, FloorError> {
        self(request)
    }
}

/// Collects the components the player brings to the next floor.
pub(crate) fn carried_components(store: &ComponentStore, player: EntityId) -> Vec<Component> {
    store
        .components_of(player)
        .filter(|component| component.kind() != ComponentKind::Position)
        .cloned()
        .collect()
}

#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum FloorError {
    /// The factory could not produce a floor.
    #[error("floor generation failed: {0}")]
    Generation(String),

    /// The new floor holds an id issued before it was requested, so it was
    /// not built from [`FloorRequest::store`].
    #[error("entity {entity} predates the floor (first fresh id is {first_fresh})")]
    StaleEntity {
        entity: EntityId,
        first_fresh: EntityId,
    },

    #[error(transparent)]
    Store(#[from] StoreError),

    #[error(transparent)]
    Map(#[from] MapError),
}

impl GameError for FloorError {
    fn severity(&self) -> ErrorSeverity {
        match self {
            FloorError::Generation(_) => ErrorSeverity::Fatal,
            FloorError::StaleEntity { .. } => ErrorSeverity::Validation,
            FloorError::Store(err) => err.severity(),
            FloorError::Map(err) => err.severity(),
        }
    }

    fn error_code(&self) -> &'static str {
        match self {
            FloorError::Generation(_) => "FLOOR_GENERATION",
            FloorError::StaleEntity { .. } => "FLOOR_STALE_ENTITY",
            FloorError::Store(err) => err.error_code(),
            FloorError::Map(err) => err.error_code(),
        }
    }
}

//! Session snapshots.
//!
//! A [`SessionSnapshot`] captures everything needed to resume a session:
//! world parameters, the tile grid with both masks, every entity with its
//! components and tags, the id counter and the HUD state. Restoring rebuilds
//! the tag index by replaying the components through the store, then checks
//! the result against the recorded tags.

use crate::config::GameConfig;
use crate::ecs::{Component, ComponentStore, EntityId, Position, StoreError, Tag};
use crate::engine::{BehaviorRegistry, Engine, Floor, FloorError, GameWorld};
use crate::error::{ErrorSeverity, GameError};
use crate::map::{MapError, TileGrid};
use crate::render::MessageLog;
use crate::visibility::FovProvider;

/// Serialized form of one entity.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct EntityRecord {
    pub id: EntityId,
    pub components: Vec<Component>,
    pub tags: Vec<Tag>,
}

#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SessionSnapshot {
    pub world: GameWorld,
    pub grid: TileGrid,
    pub entities: Vec<EntityRecord>,
    pub next_entity: u32,
    pub player: EntityId,
    pub mouse: Position,
    pub messages: MessageLog,
}

#[cfg(feature = "serde")]
impl SessionSnapshot {
    pub fn to_bytes(&self) -> Result<Vec<u8>, SnapshotError> {
        bincode::serialize(self).map_err(|e| SnapshotError::Encode(e.to_string()))
    }

    pub fn from_bytes(bytes: &[u8]) -> Result<Self, SnapshotError> {
        bincode::deserialize(bytes).map_err(|e| SnapshotError::Decode(e.to_string()))
    }
}

#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum SnapshotError {
    #[error(transparent)]
    Store(#[from] StoreError),

    #[error(transparent)]
    Map(#[from] MapError),

    #[error(transparent)]
    Floor(#[from] FloorError),

    /// Tags rebuilt from the components differ from the recorded ones.
    #[error("entity {entity}: recorded tags {recorded:?} but components yield {rebuilt:?}")]
    TagMismatch {
        entity: EntityId,
        recorded: Vec<Tag>,
        rebuilt: Vec<Tag>,
    },

    #[error("snapshot encoding failed: {0}")]
    Encode(String),

    #[error("snapshot decoding failed: {0}")]
    Decode(String),
}

impl GameError for SnapshotError {
    fn severity(&self) -> ErrorSeverity {
        match self {
            SnapshotError::Encode(_) | SnapshotError::Decode(_) => ErrorSeverity::Fatal,
            _ => ErrorSeverity::Internal,
        }
    }

    fn error_code(&self) -> &'static str {
        match self {
            SnapshotError::Store(_) => "SNAPSHOT_STORE",
            SnapshotError::Map(_) => "SNAPSHOT_MAP",
            SnapshotError::Floor(_) => "SNAPSHOT_FLOOR",
            SnapshotError::TagMismatch { .. } => "SNAPSHOT_TAG_MISMATCH",
            SnapshotError::Encode(_) => "SNAPSHOT_ENCODE",
            SnapshotError::Decode(_) => "SNAPSHOT_DECODE",
        }
    }
}

impl Engine {
    pub fn snapshot(&self) -> SessionSnapshot {
        let store = self.store();
        let entities = store
            .entities()
            .map(|id| EntityRecord {
                id,
                components: store.components_of(id).cloned().collect(),
                tags: store.tags(id).cloned().collect(),
            })
            .collect();

        SessionSnapshot {
            world: self.world().clone(),
            grid: self.grid().clone(),
            entities,
            next_entity: store.next_id(),
            player: self.player(),
            mouse: self.mouse_location(),
            messages: self.message_log().clone(),
        }
    }

    /// Rebuilds an engine from `snapshot`.
    ///
    /// Configuration, field of view and behaviors are not part of the snapshot
    /// and are supplied by the caller.
    pub fn restore(
        snapshot: SessionSnapshot,
        config: GameConfig,
        fov: Box<dyn FovProvider>,
        behaviors: BehaviorRegistry,
    ) -> Result<Engine, SnapshotError> {
        snapshot.grid.check_masks()?;

        let mut store = ComponentStore::new();
        for record in snapshot.entities {
            store.revive(record.id)?;
            for component in record.components {
                store.set(record.id, component)?;
            }

            let mut rebuilt: Vec<Tag> = store.tags(record.id).cloned().collect();
            let mut recorded = record.tags;
            rebuilt.sort();
            recorded.sort();
            if rebuilt != recorded {
                return Err(SnapshotError::TagMismatch {
                    entity: record.id,
                    recorded,
                    rebuilt,
                });
            }
        }
        store.set_next_id(snapshot.next_entity);

        let floor = Floor::new(snapshot.grid, store, snapshot.player);
        floor.validate()?;

        tracing::debug!(
            target: "game_core::snapshot",
            floor = snapshot.world.current_floor,
            entities = floor.store.len(),
            "session restored"
        );

        Ok(Engine::from_parts(
            config,
            snapshot.world,
            floor,
            fov,
            behaviors,
            snapshot.messages,
            snapshot.mouse,
        ))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::color;
    use crate::ecs::{Fighter, IsPlayer, Name};
    use crate::map::{Grid, Tile};
    use crate::visibility::RayCastFov;

    fn engine() -> Engine {
        let mut store = ComponentStore::new();
        let player = store.spawn_with([
            Position::new(2, 2).into(),
            Name::new("player").into(),
            IsPlayer.into(),
            Fighter::new(30, 2, 5).into(),
        ]);
        let gone = store.spawn();
        store.despawn(gone).unwrap();
        store.spawn_with([Position::new(3, 3).into(), Name::new("potion").into()]);

        let grid = TileGrid::from_tiles(Grid::filled(6, 6, Tile::floor()));
        let mut engine = Engine::new(
            GameConfig::new(),
            GameWorld::new(6, 6, 2, 2, 3).with_current_floor(3),
            Floor::new(grid, store, player),
            Box::new(RayCastFov),
            BehaviorRegistry::new(),
        )
        .unwrap();
        engine.update_fov().unwrap();
        engine.message_log_mut().add_message("Hello", color::WELCOME_TEXT);
        engine.set_mouse_location(Position::new(3, 3));
        engine
    }

    #[test]
    fn restore_reproduces_the_session() {
        let original = engine();
        let snapshot = original.snapshot();

        let restored = Engine::restore(
            snapshot.clone(),
            GameConfig::new(),
            Box::new(RayCastFov),
            BehaviorRegistry::new(),
        )
        .unwrap();

        assert_eq!(restored.snapshot(), snapshot);
        assert_eq!(restored.current_floor(), 3);
        assert_eq!(
            restored
                .store()
                .entities_with_tag(&Tag::Name("potion".into()))
                .count(),
            1
        );
    }

    #[test]
    fn ids_are_not_reused_after_restore() {
        let snapshot = engine().snapshot();
        let mut restored = Engine::restore(
            snapshot,
            GameConfig::new(),
            Box::new(RayCastFov),
            BehaviorRegistry::new(),
        )
        .unwrap();

        // Ids 0..=2 were handed out before the snapshot, 1 was despawned.
        assert_eq!(restored.store_mut().spawn(), EntityId(3));
    }

    #[test]
    fn tampered_tags_are_rejected() {
        let mut snapshot = engine().snapshot();
        snapshot.entities[1].tags = vec![Tag::Name("elixir".into())];

        let err = Engine::restore(
            snapshot,
            GameConfig::new(),
            Box::new(RayCastFov),
            BehaviorRegistry::new(),
        )
        .unwrap_err();
        assert!(matches!(err, SnapshotError::TagMismatch { entity, .. } if entity == EntityId(2)));
    }

    #[test]
    fn repeated_recorded_tags_are_rejected() {
        let mut snapshot = engine().snapshot();
        let name = Tag::Name("potion".into());
        snapshot.entities[1].tags.push(name.clone());

        let err = Engine::restore(
            snapshot,
            GameConfig::new(),
            Box::new(RayCastFov),
            BehaviorRegistry::new(),
        )
        .unwrap_err();
        let SnapshotError::TagMismatch { entity, recorded, .. } = err else {
            panic!("expected a tag mismatch, got {err:?}");
        };
        assert_eq!(entity, EntityId(2));
        assert_eq!(recorded.iter().filter(|tag| **tag == name).count(), 2);
    }

    #[test]
    fn grids_missing_cells_are_rejected() {
        let mut snapshot = engine().snapshot();
        snapshot.grid = TileGrid::from_tiles(Grid::from_raw_parts(6, 6, vec![Tile::floor()]));

        let err = Engine::restore(
            snapshot,
            GameConfig::new(),
            Box::new(RayCastFov),
            BehaviorRegistry::new(),
        )
        .unwrap_err();
        assert_eq!(
            err,
            SnapshotError::Map(MapError::CellCount {
                width: 6,
                height: 6,
                cells: 1,
            })
        );
    }

    #[test]
    fn duplicate_entities_are_rejected() {
        let mut snapshot = engine().snapshot();
        let copy = snapshot.entities[0].clone();
        snapshot.entities.push(copy);

        let err = Engine::restore(
            snapshot,
            GameConfig::new(),
            Box::new(RayCastFov),
            BehaviorRegistry::new(),
        )
        .unwrap_err();
        assert_eq!(
            err,
            SnapshotError::Store(StoreError::DuplicateEntity {
                entity: EntityId(0)
            })
        );
    }

    #[cfg(feature = "serde")]
    #[test]
    fn bytes_round_trip() {
        let snapshot = engine().snapshot();
        let bytes = snapshot.to_bytes().unwrap();
        assert_eq!(SessionSnapshot::from_bytes(&bytes).unwrap(), snapshot);
        assert!(matches!(
            SessionSnapshot::from_bytes(&bytes[..bytes.len() / 2]),
            Err(SnapshotError::Decode(_))
        ));
    }

    #[cfg(feature = "serde")]
    #[test]
    fn decoding_rejects_grids_missing_cells() {
        let mut snapshot = engine().snapshot();
        snapshot.grid = TileGrid::from_tiles(Grid::from_raw_parts(6, 6, vec![Tile::floor()]));
        let bytes = snapshot.to_bytes().unwrap();

        let Err(SnapshotError::Decode(message)) = SessionSnapshot::from_bytes(&bytes) else {
            panic!("short grid decoded");
        };
        assert!(message.contains("6x6 grid holds 1 cells"), "{message}");
    }
}

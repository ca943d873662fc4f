//! Shared fixtures: a one-room dungeon, a player and a hunting orc.
#![allow(dead_code)]

use game_core::color;
use game_core::{
    ActionContext, ActionError, Ai, BehaviorRegistry, BlocksMovement, Component, ComponentStore,
    DungeonFactory, Engine, EntityId, Fighter, Floor, FloorError, FloorRequest, GameConfig,
    GameWorld, Graphic, Grid, IsActor, IsPlayer, Name, Position, RayCastFov, RenderOrder, Tile,
    TileGrid,
};

pub const WIDTH: u32 = 12;
pub const HEIGHT: u32 = 8;

pub fn room() -> TileGrid {
    let tiles = Grid::from_fn(WIDTH, HEIGHT, |p| {
        let border = p.x == 0 || p.y == 0 || p.x == WIDTH as i32 - 1 || p.y == HEIGHT as i32 - 1;
        if border { Tile::wall() } else { Tile::floor() }
    });
    let mut grid = TileGrid::from_tiles(tiles);
    grid.set_downstairs(Position::new(10, 6)).unwrap();
    grid
}

pub fn player_components() -> Vec<Component> {
    vec![
        Name::new("player").into(),
        IsPlayer.into(),
        IsActor.into(),
        BlocksMovement(true).into(),
        Graphic::new('@', color::WHITE).into(),
        RenderOrder::Actor.into(),
        Fighter::new(30, 2, 5).into(),
    ]
}

pub fn spawn_orc(store: &mut ComponentStore, at: Position, behavior: &str) -> EntityId {
    store.spawn_with([
        at.into(),
        Name::new("orc").into(),
        IsActor.into(),
        BlocksMovement(true).into(),
        Graphic::new('o', color::ENEMY_ATK).into(),
        RenderOrder::Actor.into(),
        Fighter::new(10, 0, 3).into(),
        Ai::new(behavior).into(),
    ])
}

/// Walks one orthogonal step toward the player; snarls when adjacent.
pub fn hunter(actor: EntityId, ctx: &mut ActionContext<'_>) -> Result<(), ActionError> {
    let here = *ctx.store.require::<Position>(actor)?;
    let target = *ctx.store.require::<Position>(ctx.player)?;
    let (dx, dy) = (target.x - here.x, target.y - here.y);
    let step = if dx != 0 {
        (dx.signum(), 0)
    } else {
        (0, dy.signum())
    };
    let next = here + step;
    if next == target {
        ctx.message("The orc snarls.", color::ENEMY_ATK);
        return Ok(());
    }
    if !ctx.grid.is_walkable(next) || ctx.blocking_entity_at(next).is_some() {
        return Err(ActionError::impossible("blocked"));
    }
    ctx.store.set(actor, next)?;
    Ok(())
}

pub fn behaviors() -> BehaviorRegistry {
    BehaviorRegistry::new().with("hunter", hunter)
}

/// One room per floor; the player arrives in the top-left corner.
pub struct RoomFactory;

impl DungeonFactory for RoomFactory {
    fn generate(&mut self, request: FloorRequest<'_>) -> Result<Floor, FloorError> {
        let mut store = request.store;
        let player = store.spawn_with(
            request
                .carried
                .into_iter()
                .chain([Position::new(1, 1).into()]),
        );
        spawn_orc(&mut store, Position::new(8, 5), "hunter");
        Ok(Floor::new(room(), store, player))
    }
}

pub fn new_engine() -> Engine {
    let mut store = ComponentStore::new();
    let player = store.spawn_with(
        player_components()
            .into_iter()
            .chain([Position::new(1, 1).into()]),
    );
    spawn_orc(&mut store, Position::new(8, 5), "hunter");

    let mut engine = Engine::new(
        GameConfig::new(),
        GameWorld::new(WIDTH, HEIGHT, 1, 4, 6).with_current_floor(1),
        Floor::new(room(), store, player),
        Box::new(RayCastFov),
        behaviors(),
    )
    .unwrap();
    engine.update_fov().unwrap();
    engine
}

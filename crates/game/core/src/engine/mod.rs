//! World and turn controller.
//!
//! [`Engine`] owns the current [`Floor`] and drives the per-turn sequence that
//! follows a player action: enemy turns, visibility recompute, render. Player
//! input is resolved by the caller before [`Engine::end_turn`] is invoked.
mod ai;
mod error;
mod floor;
mod lookup;

pub use ai::{ActionContext, ActionError, AiBehavior, BehaviorRegistry};
pub use error::TurnError;
pub use floor::{DungeonFactory, Floor, FloorError, FloorRequest, GameWorld};
pub use lookup::is_alive;

use tracing::{debug, info, warn};

use crate::color;
use crate::config::GameConfig;
use crate::ecs::{
    Ai, ComponentKind, ComponentStore, EntityId, Fighter, Graphic, Position, Query, RenderOrder,
};
use crate::map::{Glyph, Grid, SHROUD, TileGrid};
use crate::render::{Blit, CellRegion, MessageLog, RenderError, hud};
use crate::visibility::{self, FovProvider};

/// Outcome counters of one round of enemy turns.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct TurnReport {
    /// Actors whose behavior completed an action.
    pub acted: usize,
    /// Actors whose action was impossible.
    pub skipped: usize,
}

pub struct Engine {
    config: GameConfig,
    world: GameWorld,
    floor: Floor,
    fov: Box<dyn FovProvider>,
    behaviors: BehaviorRegistry,
    message_log: MessageLog,
    mouse_location: Position,
}

impl Engine {
    pub fn new(
        config: GameConfig,
        world: GameWorld,
        floor: Floor,
        fov: Box<dyn FovProvider>,
        behaviors: BehaviorRegistry,
    ) -> Result<Self, FloorError> {
        floor.validate()?;
        let message_log = MessageLog::new(config.message_capacity);
        Ok(Self {
            config,
            world,
            floor,
            fov,
            behaviors,
            message_log,
            mouse_location: Position::ORIGIN,
        })
    }

    pub(crate) fn from_parts(
        config: GameConfig,
        world: GameWorld,
        floor: Floor,
        fov: Box<dyn FovProvider>,
        behaviors: BehaviorRegistry,
        message_log: MessageLog,
        mouse_location: Position,
    ) -> Self {
        Self {
            config,
            world,
            floor,
            fov,
            behaviors,
            message_log,
            mouse_location,
        }
    }

    // ===== accessors =====

    pub fn config(&self) -> &GameConfig {
        &self.config
    }

    pub fn world(&self) -> &GameWorld {
        &self.world
    }

    pub fn current_floor(&self) -> u32 {
        self.world.current_floor
    }

    pub fn grid(&self) -> &TileGrid {
        &self.floor.grid
    }

    pub fn store(&self) -> &ComponentStore {
        &self.floor.store
    }

    /// Mutable store access for resolving the player's own action.
    pub fn store_mut(&mut self) -> &mut ComponentStore {
        &mut self.floor.store
    }

    pub fn player(&self) -> EntityId {
        self.floor.player
    }

    pub fn behaviors(&self) -> &BehaviorRegistry {
        &self.behaviors
    }

    pub fn message_log(&self) -> &MessageLog {
        &self.message_log
    }

    pub fn message_log_mut(&mut self) -> &mut MessageLog {
        &mut self.message_log
    }

    pub fn mouse_location(&self) -> Position {
        self.mouse_location
    }

    pub fn set_mouse_location(&mut self, location: Position) {
        self.mouse_location = location;
    }

    /// Context for resolving the player's action with the same tools
    /// behaviors get.
    pub fn action_context(&mut self) -> ActionContext<'_> {
        ActionContext {
            store: &mut self.floor.store,
            grid: &self.floor.grid,
            player: self.floor.player,
            log: &mut self.message_log,
        }
    }

    // ===== spatial queries =====

    pub fn in_bounds(&self, position: Position) -> bool {
        self.floor.grid.in_bounds(position)
    }

    pub fn blocking_entity_at(&self, position: Position) -> Option<EntityId> {
        lookup::blocking_entity_at(&self.floor.store, position)
    }

    pub fn actor_at(&self, position: Position) -> Option<EntityId> {
        lookup::actor_at(&self.floor.store, position)
    }

    pub fn actors(&self) -> Vec<EntityId> {
        lookup::actors(&self.floor.store)
    }

    pub fn items(&self) -> Vec<EntityId> {
        lookup::items(&self.floor.store)
    }

    // ===== turn sequence =====

    /// Lets every living non-player actor with an `Ai` act once, in id order.
    ///
    /// An actor killed or stripped of its `Ai` by an earlier actor in the same
    /// round does not act.
    pub fn handle_enemy_turns(&mut self) -> Result<TurnReport, TurnError> {
        let player = self.floor.player;
        let query = Query::new()
            .with(ComponentKind::IsActor)
            .with(ComponentKind::Ai);
        let actors: Vec<EntityId> = self
            .floor
            .store
            .query(&query)
            .filter(|entity| *entity != player && is_alive(&self.floor.store, *entity))
            .collect();

        let mut report = TurnReport::default();
        for actor in actors {
            if !self.floor.store.contains(actor) || !is_alive(&self.floor.store, actor) {
                continue;
            }
            let Some(ai) = self.floor.store.get::<Ai>(actor) else {
                continue;
            };
            let behavior = self
                .behaviors
                .get(&ai.behavior)
                .ok_or_else(|| TurnError::UnknownBehavior {
                    entity: actor,
                    behavior: ai.behavior.clone(),
                })?;

            let mut ctx = self.action_context();
            match behavior.perform(actor, &mut ctx) {
                Ok(()) => report.acted += 1,
                Err(ActionError::Impossible(reason)) => {
                    debug!(target: "game_core::engine", entity = %actor, %reason, "impossible action skipped");
                    report.skipped += 1;
                }
                Err(source) => {
                    warn!(target: "game_core::engine", entity = %actor, error = %source, "action failed");
                    return Err(TurnError::Action {
                        entity: actor,
                        source,
                    });
                }
            }
        }
        Ok(report)
    }

    /// Recomputes visibility from the player's position.
    pub fn update_fov(&mut self) -> Result<(), TurnError> {
        let origin = *self.floor.store.require::<Position>(self.floor.player)?;
        visibility::recompute(
            &mut self.floor.grid,
            self.fov.as_ref(),
            origin,
            self.config.fov_radius,
            self.config.edge_policy,
        )?;
        Ok(())
    }

    /// Enemy turns, then visibility, then a fresh frame on `console`.
    pub fn end_turn(&mut self, console: &mut dyn Blit) -> Result<TurnReport, TurnError> {
        let report = self.handle_enemy_turns()?;
        self.update_fov()?;
        self.render(console)?;
        Ok(report)
    }

    // ===== render =====

    /// Draws the map, the visible entities and the HUD.
    pub fn render(&self, console: &mut dyn Blit) -> Result<(), RenderError> {
        let grid = &self.floor.grid;
        let store = &self.floor.store;

        let terrain = Grid::from_fn(grid.width(), grid.height(), |position| {
            match grid.tile(position) {
                Some(tile) if grid.is_visible(position) => tile.light,
                Some(tile) if grid.is_explored(position) => tile.dark,
                _ => SHROUD,
            }
        });
        console.blit(0, 0, &CellRegion::from_grid(&terrain))?;

        for (position, graphic) in self.visible_sprites() {
            let bg = grid.tile(position).map_or(color::BLACK, |tile| tile.light.bg);
            let cell = CellRegion::single(Glyph::new(graphic.ch, graphic.fg, bg));
            console.blit(position.x, position.y, &cell)?;
        }

        let hud = &self.config.hud;
        console.blit(
            hud.log_x,
            hud.log_y,
            &self.message_log.render(hud.log_width, hud.log_height),
        )?;

        let fighter = store.require::<Fighter>(self.floor.player)?;
        console.blit(
            hud.bar_x,
            hud.bar_y,
            &hud::render_bar(fighter.hp, fighter.max_hp, hud.bar_width),
        )?;

        console.blit(
            hud.level_x,
            hud.level_y,
            &hud::render_dungeon_level(self.world.current_floor),
        )?;

        let names = hud::names_at(store, grid, self.mouse_location);
        if !names.is_empty() {
            console.blit(
                hud.names_x,
                hud.names_y,
                &CellRegion::text(&names, color::WHITE, color::BLACK),
            )?;
        }
        Ok(())
    }

    /// Placed entities on visible cells, in draw order.
    fn visible_sprites(&self) -> Vec<(Position, Graphic)> {
        let store = &self.floor.store;
        let query = Query::new()
            .with(ComponentKind::Position)
            .with(ComponentKind::Graphic);
        let mut sprites: Vec<(RenderOrder, EntityId, Position, Graphic)> = store
            .query(&query)
            .filter_map(|entity| {
                let position = *store.get::<Position>(entity)?;
                let graphic = *store.get::<Graphic>(entity)?;
                let order = store.get::<RenderOrder>(entity).copied().unwrap_or_default();
                self.floor
                    .grid
                    .is_visible(position)
                    .then_some((order, entity, position, graphic))
            })
            .collect();
        sprites.sort_by_key(|(order, entity, _, _)| (*order, *entity));
        sprites
            .into_iter()
            .map(|(_, _, position, graphic)| (position, graphic))
            .collect()
    }

    // ===== floors =====

    /// Replaces the current floor with one built by `factory`.
    ///
    /// Nothing changes unless the factory succeeds and its floor validates;
    /// then grid, store, player id and floor counter are swapped together.
    /// A floor carrying any id issued before the request is rejected with
    /// [`FloorError::StaleEntity`].
    pub fn advance_floor(&mut self, factory: &mut dyn DungeonFactory) -> Result<(), FloorError> {
        let mut next_world = self.world.clone();
        next_world.current_floor += 1;

        let first_fresh = self.floor.store.next_id();
        let request = FloorRequest {
            world: &next_world,
            store: self.floor.store.next_floor(),
            carried: floor::carried_components(&self.floor.store, self.floor.player),
        };
        let floor = factory.generate(request).inspect_err(|err| {
            warn!(target: "game_core::engine", floor = next_world.current_floor, error = %err, "floor generation failed");
        })?;
        floor.validate()?;
        floor.check_fresh(first_fresh)?;

        self.floor = floor;
        self.world = next_world;
        info!(
            target: "game_core::engine",
            floor = self.world.current_floor,
            player = %self.floor.player,
            entities = self.floor.store.len(),
            "entered floor"
        );
        Ok(())
    }
}

impl std::fmt::Debug for Engine {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Engine")
            .field("world", &self.world)
            .field("player", &self.floor.player)
            .field("entities", &self.floor.store.len())
            .field("behaviors", &self.behaviors)
            .finish_non_exhaustive()
    }
}

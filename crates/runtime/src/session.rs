//! A playable session: an engine plus the repository it is saved to.
use game_core::{
    BehaviorRegistry, Blit, DungeonFactory, Engine, FovProvider, GameConfig, GameError, TurnReport,
};
use tracing::{info, warn};

use crate::repository::SessionRepository;
use crate::{Result, RuntimeError};

pub struct Session<R: SessionRepository> {
    engine: Engine,
    repository: R,
    slot: String,
    autosave: bool,
}

impl<R: SessionRepository> Session<R> {
    pub fn new(engine: Engine, repository: R, slot: impl Into<String>) -> Self {
        Self {
            engine,
            repository,
            slot: slot.into(),
            autosave: false,
        }
    }

    #[must_use]
    pub fn with_autosave(mut self, autosave: bool) -> Self {
        self.autosave = autosave;
        self
    }

    /// Rebuilds the session saved in `slot`.
    pub fn resume(
        repository: R,
        slot: impl Into<String>,
        config: GameConfig,
        fov: Box<dyn FovProvider>,
        behaviors: BehaviorRegistry,
    ) -> Result<Self> {
        let slot = slot.into();
        let snapshot = repository
            .load(&slot)?
            .ok_or_else(|| RuntimeError::NoSavedSession { slot: slot.clone() })?;
        let engine = Engine::restore(snapshot, config, fov, behaviors)?;
        info!(
            target: "runtime::session",
            slot = %slot,
            floor = engine.current_floor(),
            "session resumed"
        );
        Ok(Self::new(engine, repository, slot))
    }

    pub fn engine(&self) -> &Engine {
        &self.engine
    }

    pub fn engine_mut(&mut self) -> &mut Engine {
        &mut self.engine
    }

    pub fn repository(&self) -> &R {
        &self.repository
    }

    pub fn slot(&self) -> &str {
        &self.slot
    }

    /// Runs the post-action turn sequence.
    ///
    /// With autosave on, the session is saved after a successful turn and
    /// also before a turn error is returned, so a crash in a later frame does
    /// not lose the run.
    pub fn end_turn(&mut self, console: &mut dyn Blit) -> Result<TurnReport> {
        match self.engine.end_turn(console) {
            Ok(report) => {
                if self.autosave {
                    self.save()?;
                }
                Ok(report)
            }
            Err(err) => {
                warn!(
                    target: "runtime::session",
                    error = %err,
                    code = err.error_code(),
                    severity = err.severity().as_str(),
                    "turn failed"
                );
                if self.autosave
                    && let Err(save_err) = self.save()
                {
                    warn!(target: "runtime::session", error = %save_err, "emergency save failed");
                }
                Err(err.into())
            }
        }
    }

    /// Takes the stairs down to a freshly generated floor.
    pub fn descend(&mut self, factory: &mut dyn DungeonFactory) -> Result<()> {
        self.engine.advance_floor(factory)?;
        self.engine.update_fov()?;
        if self.autosave {
            self.save()?;
        }
        Ok(())
    }

    pub fn save(&self) -> Result<()> {
        let snapshot = self.engine.snapshot();
        self.repository.save(&self.slot, &snapshot)?;
        info!(
            target: "runtime::session",
            slot = %self.slot,
            floor = snapshot.world.current_floor,
            "session saved"
        );
        Ok(())
    }

    /// Deletes the saved copy of this session, e.g. after the player dies.
    pub fn forget_save(&self) -> Result<()> {
        self.repository.delete(&self.slot)?;
        Ok(())
    }

    pub fn into_parts(self) -> (Engine, R) {
        (self.engine, self.repository)
    }
}

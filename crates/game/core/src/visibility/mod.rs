//! Per-turn visibility recompute.
//!
//! Field-of-view itself is an external primitive behind [`FovProvider`]. This
//! module owns what happens around it: validate the origin, replace the
//! visible mask, fold it into the explored mask, and refresh wall glyphs.
mod raycast;

pub use raycast::RayCastFov;

use crate::ecs::Position;
use crate::error::{ErrorSeverity, GameError};
use crate::map::{EdgePolicy, Grid, MapError, TileGrid, derive_glyphs};

/// Field-of-view primitive.
///
/// Implementations must be pure and deterministic: the same transparency
/// grid, origin and radius always produce the same visible grid, which has the
/// same dimensions as `transparency`.
pub trait FovProvider {
    fn compute(&self, transparency: &Grid<bool>, origin: Position, radius: u32) -> Grid<bool>;
}

impl<F> FovProvider for F
where
    F: Fn(&Grid<bool>, Position, u32) -> Grid<bool>,
{
    fn compute(&self, transparency: &Grid<bool>, origin: Position, radius: u32) -> Grid<bool> {
        self(transparency, origin, radius)
    }
}

#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum VisibilityError {
    #[error("field-of-view origin {origin:?} is outside the {width}x{height} map")]
    OriginOutOfBounds {
        origin: Position,
        width: u32,
        height: u32,
    },

    #[error("field-of-view result rejected: {0}")]
    InvalidResult(#[source] MapError),
}

impl GameError for VisibilityError {
    fn severity(&self) -> ErrorSeverity {
        match self {
            VisibilityError::OriginOutOfBounds { .. } => ErrorSeverity::Validation,
            VisibilityError::InvalidResult(_) => ErrorSeverity::Internal,
        }
    }

    fn error_code(&self) -> &'static str {
        match self {
            VisibilityError::OriginOutOfBounds { .. } => "VISIBILITY_ORIGIN_OUT_OF_BOUNDS",
            VisibilityError::InvalidResult(_) => "VISIBILITY_INVALID_RESULT",
        }
    }
}

/// Recomputes what is visible from `origin`.
///
/// 1. `visible` is replaced by the provider's result (cells seen last turn
///    but not now drop out immediately).
/// 2. `explored |= visible`.
/// 3. Wall glyphs are re-derived, since the set of revealed walls may have
///    changed.
pub fn recompute(
    grid: &mut TileGrid,
    fov: &dyn FovProvider,
    origin: Position,
    radius: u32,
    policy: EdgePolicy,
) -> Result<(), VisibilityError> {
    if !grid.in_bounds(origin) {
        return Err(VisibilityError::OriginOutOfBounds {
            origin,
            width: grid.width(),
            height: grid.height(),
        });
    }

    let visible = fov.compute(&grid.transparency(), origin, radius);
    grid.reveal(visible).map_err(VisibilityError::InvalidResult)?;
    derive_glyphs(grid, policy);

    tracing::trace!(
        target: "game_core::visibility",
        x = origin.x,
        y = origin.y,
        radius,
        visible = grid.visible().marked().count(),
        "visibility recomputed"
    );
    Ok(())
}

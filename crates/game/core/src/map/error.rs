use crate::ecs::Position;
use crate::error::{ErrorSeverity, GameError};

/// Errors raised by grid access.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum MapError {
    /// Position is outside the map bounds.
    #[error("position {position:?} is out of bounds (map size: {width}x{height})")]
    OutOfBounds {
        position: Position,
        width: u32,
        height: u32,
    },

    /// A mask did not have the same dimensions as the tile grid.
    #[error("mask is {actual:?} but the map is {expected:?}")]
    DimensionMismatch {
        expected: (u32, u32),
        actual: (u32, u32),
    },

    /// A grid's cell vector does not hold `width * height` cells.
    #[error("{width}x{height} grid holds {cells} cells")]
    CellCount {
        width: u32,
        height: u32,
        cells: usize,
    },
}

impl GameError for MapError {
    fn severity(&self) -> ErrorSeverity {
        ErrorSeverity::Validation
    }

    fn error_code(&self) -> &'static str {
        match self {
            MapError::OutOfBounds { .. } => "MAP_OUT_OF_BOUNDS",
            MapError::DimensionMismatch { .. } => "MAP_DIMENSION_MISMATCH",
            MapError::CellCount { .. } => "MAP_CELL_COUNT",
        }
    }
}

use crate::ecs::StoreError;
use crate::error::{ErrorSeverity, GameError};

#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum RenderError {
    /// The drawing target refused the blit.
    #[error("console error: {0}")]
    Console(String),

    /// An entity the HUD reads from lacks a component it needs.
    #[error(transparent)]
    Store(#[from] StoreError),
}

impl GameError for RenderError {
    fn severity(&self) -> ErrorSeverity {
        match self {
            RenderError::Console(_) => ErrorSeverity::Fatal,
            RenderError::Store(err) => err.severity(),
        }
    }

    fn error_code(&self) -> &'static str {
        match self {
            RenderError::Console(_) => "RENDER_CONSOLE",
            RenderError::Store(err) => err.error_code(),
        }
    }
}

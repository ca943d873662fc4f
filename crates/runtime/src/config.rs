//! Runtime configuration structures and loaders.
use std::env;
use std::path::PathBuf;

use game_core::{EdgePolicy, GameConfig};

/// Configuration for a playable session.
#[derive(Clone, Debug)]
pub struct RuntimeConfig {
    /// Save slot used by [`Session`](crate::Session).
    pub session_id: String,
    /// Directory holding save files.
    pub save_data_dir: PathBuf,
    /// Directory holding log files.
    pub log_dir: PathBuf,
    /// Save after every completed turn and before surfacing a turn error.
    pub autosave: bool,
    /// Core settings handed to the engine.
    pub game: GameConfig,
}

impl RuntimeConfig {
    pub const DEFAULT_SESSION_ID: &'static str = "savegame";

    /// Loads a `.env` file from the working directory (if any), then reads the
    /// environment with [`RuntimeConfig::from_env`].
    pub fn load() -> Self {
        if let Err(err) = dotenvy::dotenv()
            && !err.not_found()
        {
            tracing::warn!(target: "runtime::config", error = %err, "ignoring unreadable .env file");
        }
        Self::from_env()
    }

    /// Construct configuration from process environment variables.
    ///
    /// Environment variables:
    /// - `GAME_SESSION_ID` - Save slot name (default: `savegame`)
    /// - `SAVE_DATA_DIR` - Directory for save data (default: platform-specific)
    /// - `LOG_DIR` - Directory for log files (default: platform-specific)
    /// - `FOV_RADIUS` - Field-of-view radius in tiles (default: 8)
    /// - `AUTOSAVE` - Save after every turn (default: true)
    /// - `EDGE_WRAP` - Whether autotiling wraps at map edges (default: true)
    pub fn from_env() -> Self {
        let mut config = Self::default();

        if let Ok(session_id) = env::var("GAME_SESSION_ID")
            && !session_id.is_empty()
        {
            config.session_id = session_id;
        }

        if let Ok(dir) = env::var("SAVE_DATA_DIR") {
            config.save_data_dir = PathBuf::from(dir);
        }

        if let Ok(dir) = env::var("LOG_DIR") {
            config.log_dir = PathBuf::from(dir);
        }

        if let Some(radius) = read_env::<u32>("FOV_RADIUS") {
            config.game = config.game.with_fov_radius(radius);
        }

        if let Some(autosave) = read_env::<bool>("AUTOSAVE") {
            config.autosave = autosave;
        }

        if let Some(wrap) = read_env::<bool>("EDGE_WRAP") {
            let policy = if wrap {
                EdgePolicy::Wrap
            } else {
                EdgePolicy::Open
            };
            config.game = config.game.with_edge_policy(policy);
        }

        config
    }

    #[must_use]
    pub fn with_session_id(mut self, session_id: impl Into<String>) -> Self {
        self.session_id = session_id.into();
        self
    }

    #[must_use]
    pub fn with_save_data_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.save_data_dir = dir.into();
        self
    }
}

impl Default for RuntimeConfig {
    fn default() -> Self {
        Self {
            session_id: Self::DEFAULT_SESSION_ID.to_owned(),
            save_data_dir: default_data_dir().join("saves"),
            log_dir: default_cache_dir().join("logs"),
            autosave: true,
            game: GameConfig::default(),
        }
    }
}

fn project_dirs() -> Option<directories::ProjectDirs> {
    directories::ProjectDirs::from("", "", "dungeon")
}

fn default_data_dir() -> PathBuf {
    project_dirs()
        .map(|dirs| dirs.data_dir().to_path_buf())
        .unwrap_or_else(|| env::temp_dir().join("dungeon"))
}

fn default_cache_dir() -> PathBuf {
    project_dirs()
        .map(|dirs| dirs.cache_dir().to_path_buf())
        .unwrap_or_else(|| env::temp_dir().join("dungeon"))
}

fn read_env<T>(key: &str) -> Option<T>
where
    T: std::str::FromStr,
{
    env::var(key).ok()?.parse().ok()
}

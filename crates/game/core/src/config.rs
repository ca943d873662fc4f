use crate::map::EdgePolicy;

/// Game configuration constants and tunable parameters.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct GameConfig {
    /// Radius of the player's field of view, in tiles.
    pub fov_radius: u32,
    /// How the autotiler treats neighbors beyond the map edge.
    pub edge_policy: EdgePolicy,
    /// Number of messages retained by the message log.
    pub message_capacity: usize,
    /// Screen placement of the HUD widgets.
    pub hud: HudLayout,
}

impl GameConfig {
    // ===== runtime-tunable defaults =====
    pub const DEFAULT_FOV_RADIUS: u32 = 8;
    pub const DEFAULT_MESSAGE_CAPACITY: usize = 64;

    pub fn new() -> Self {
        Self {
            fov_radius: Self::DEFAULT_FOV_RADIUS,
            edge_policy: EdgePolicy::default(),
            message_capacity: Self::DEFAULT_MESSAGE_CAPACITY,
            hud: HudLayout::default(),
        }
    }

    pub fn with_fov_radius(mut self, fov_radius: u32) -> Self {
        self.fov_radius = fov_radius;
        self
    }

    pub fn with_edge_policy(mut self, edge_policy: EdgePolicy) -> Self {
        self.edge_policy = edge_policy;
        self
    }
}

impl Default for GameConfig {
    fn default() -> Self {
        Self::new()
    }
}

/// Absolute console coordinates of each HUD widget.
///
/// Defaults match an 80×50 console with the map occupying the top rows.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct HudLayout {
    pub log_x: i32,
    pub log_y: i32,
    pub log_width: usize,
    pub log_height: usize,
    pub bar_x: i32,
    pub bar_y: i32,
    pub bar_width: usize,
    pub level_x: i32,
    pub level_y: i32,
    pub names_x: i32,
    pub names_y: i32,
}

impl Default for HudLayout {
    fn default() -> Self {
        Self {
            log_x: 21,
            log_y: 45,
            log_width: 40,
            log_height: 5,
            bar_x: 0,
            bar_y: 45,
            bar_width: 20,
            level_x: 0,
            level_y: 47,
            names_x: 21,
            names_y: 44,
        }
    }
}

//! Cavern - a block-grid arena game
//!
//! Core modules:
//! - `sim`: Deterministic simulation (movement, entities, level progression)
//! - `app`: Menu / play / game-over shell around one `World`
//! - `input`: Per-tick input snapshots with edge detection
//! - `audio`: Sound request playback through a pluggable backend
//! - `render`: Serializable render frames (sprite identifiers + HUD)
//! - `settings`: Persisted preferences
//! - `demo`: Autopilot input for headless runs

pub mod app;
pub mod audio;
pub mod demo;
pub mod input;
pub mod render;
pub mod settings;
pub mod sim;

pub use app::App;
pub use settings::Settings;

/// Game configuration constants
pub mod consts {
    /// Screen dimensions
    pub const WIDTH: i32 = 800;
    pub const HEIGHT: i32 = 480;

    /// Level grid
    pub const NUM_ROWS: usize = 18;
    pub const NUM_COLUMNS: usize = 28;
    pub const LEVEL_X_OFFSET: i32 = 50;
    pub const GRID_BLOCK_SIZE: i32 = 25;

    /// Horizontal limits for anything using the stepped mover
    pub const MIN_X: i32 = 70;
    pub const MAX_X: i32 = 730;

    /// Terminal fall speed (pixels per tick)
    pub const MAX_FALL_SPEED: i32 = 10;
}

/// Sign of a value, with zero counting as positive
#[inline]
pub fn sign(v: f32) -> i32 {
    if v < 0.0 { -1 } else { 1 }
}

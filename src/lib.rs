//! Marshmallow Roast - an arcade clicker around a campfire
//!
//! Core modules:
//! - `sim`: Deterministic simulation (roast timers, hit tests, scoring)
//! - `renderer`: Display list, CPU canvas and wgpu presentation
//! - `assets`: Sprite, font and sound loading
//! - `audio`: Sound cues and background music
//! - `settings`: JSON settings with defaults
//! - `app`: Window, input sampling and frame pacing

pub mod app;
pub mod assets;
pub mod audio;
pub mod renderer;
pub mod settings;
pub mod sim;

pub use settings::Settings;

use glam::Vec2;

/// Game configuration constants
pub mod consts {
    /// Window size in logical pixels
    pub const SCREEN_WIDTH: u32 = 800;
    pub const SCREEN_HEIGHT: u32 = 600;

    /// Target frame rate
    pub const TARGET_FPS: u32 = 60;
    /// Largest frame delta fed to the simulation (seconds)
    pub const MAX_FRAME_DT: f32 = 0.25;

    /// Marshmallow sprite edge / hit square side (pixels)
    pub const MARSHMALLOW_SIZE: f32 = 40.0;

    /// Roast thresholds, seconds since last reset (upper bounds, inclusive)
    pub const RAW_UNTIL: f32 = 2.0;
    pub const TOASTED_UNTIL: f32 = 4.0;
    pub const PERFECT_UNTIL: f32 = 6.0;

    /// Score that ends a round when a winning score is enabled
    pub const DEFAULT_WIN_SCORE: i64 = 50;

    /// Marshmallow centres: two levels of the tower, one on each side
    pub const MARSHMALLOW_POSITIONS: [(f32, f32); 4] =
        [(200.0, 150.0), (600.0, 150.0), (200.0, 300.0), (600.0, 300.0)];

    /// Score readout origin (top-left)
    pub const SCORE_POS: (f32, f32) = (10.0, 10.0);
    pub const SCORE_FONT_PX: f32 = 28.0;
}

/// Centre of the playfield in logical pixels
#[inline]
pub fn screen_center() -> Vec2 {
    Vec2::new(
        consts::SCREEN_WIDTH as f32 / 2.0,
        consts::SCREEN_HEIGHT as f32 / 2.0,
    )
}

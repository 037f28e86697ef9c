//! Game settings and preferences
//!
//! Read once at startup from an optional `settings.json` in the working
//! directory. Never written back.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::sim::{ClickMode, HitShape, Rules};

/// Game settings/preferences
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    // === Gameplay ===
    /// Score once per press (`edge`) or every held frame (`level`)
    pub click_mode: ClickMode,
    /// Marshmallow hit area
    pub hit_shape: HitShape,
    /// Score that ends a round; `null` for endless play
    pub win_score: Option<i64>,
    /// Start straight in a round instead of on the title screen
    pub skip_title: bool,

    // === Assets ===
    /// Directory sprites, sounds and the font are loaded from
    pub asset_dir: PathBuf,
    /// Optional looping background track, relative to `asset_dir`
    pub music: Option<String>,

    // === Audio ===
    /// Master volume (0.0 - 1.0)
    pub master_volume: f32,
    /// Sound effects volume (0.0 - 1.0)
    pub sfx_volume: f32,
    /// Music volume (0.0 - 1.0)
    pub music_volume: f32,

    // === HUD ===
    /// Show FPS counter under the score
    pub show_fps: bool,
}

impl Default for Settings {
    fn default() -> Self {
        let rules = Rules::default();
        Self {
            click_mode: rules.click_mode,
            hit_shape: rules.hit_shape,
            win_score: rules.win_score,
            skip_title: false,

            asset_dir: PathBuf::from("."),
            music: None,

            master_volume: 0.8,
            sfx_volume: 1.0,
            music_volume: 0.7,

            show_fps: false,
        }
    }
}

impl Settings {
    /// Settings file looked up in the working directory
    pub const FILE_NAME: &'static str = "settings.json";

    /// Gameplay rules for a new `GameState`
    pub fn rules(&self) -> Rules {
        Rules {
            click_mode: self.click_mode,
            hit_shape: self.hit_shape,
            win_score: self.win_score,
        }
    }

    /// Parse settings JSON; missing fields take their defaults
    pub fn from_json(json: &str) -> serde_json::Result<Self> {
        serde_json::from_str(json)
    }

    /// Load settings from `settings.json` in the working directory
    pub fn load() -> Self {
        Self::load_from(Path::new(Self::FILE_NAME))
    }

    /// Load settings from `path`, falling back to defaults when the file is
    /// absent or malformed
    pub fn load_from(path: &Path) -> Self {
        let json = match std::fs::read_to_string(path) {
            Ok(json) => json,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                log::info!("No {} found, using default settings", path.display());
                return Self::default();
            }
            Err(e) => {
                log::warn!("Failed to read {}: {e}; using default settings", path.display());
                return Self::default();
            }
        };

        match Self::from_json(&json) {
            Ok(settings) => {
                log::info!("Loaded settings from {}", path.display());
                settings
            }
            Err(e) => {
                log::warn!("Ignoring malformed {}: {e}", path.display());
                Self::default()
            }
        }
    }
}

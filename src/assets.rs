//! Startup asset loading
//!
//! Every asset is read and decoded once before the window opens. A missing
//! or broken file is fatal; nothing is loaded lazily during play.

use std::io::Cursor;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use fontdue::{Font, FontSettings};
use image::RgbaImage;
use thiserror::Error;

use crate::sim::{RoastState, SoundCue};

#[derive(Debug, Error)]
pub enum AssetError {
    #[error("asset not found: {}", path.display())]
    Missing { path: PathBuf },
    #[error("failed to read {}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("failed to decode image {}", path.display())]
    Image {
        path: PathBuf,
        #[source]
        source: image::ImageError,
    },
    #[error("failed to parse font {}: {reason}", path.display())]
    Font { path: PathBuf, reason: String },
    #[error("failed to decode sound {}", path.display())]
    Sound {
        path: PathBuf,
        #[source]
        source: rodio::decoder::DecoderError,
    },
}

/// Every sprite the scene can draw
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SpriteId {
    MarshmallowWhite,
    MarshmallowYellow,
    MarshmallowBrown,
    MarshmallowBlack,
    Platform,
    Bonfire,
    Background,
}

impl SpriteId {
    pub const ALL: [SpriteId; 7] = [
        SpriteId::MarshmallowWhite,
        SpriteId::MarshmallowYellow,
        SpriteId::MarshmallowBrown,
        SpriteId::MarshmallowBlack,
        SpriteId::Platform,
        SpriteId::Bonfire,
        SpriteId::Background,
    ];

    pub fn file_name(self) -> &'static str {
        match self {
            SpriteId::MarshmallowWhite => "marshmallow_white.png",
            SpriteId::MarshmallowYellow => "marshmallow_yellow.png",
            SpriteId::MarshmallowBrown => "marshmallow_brown.png",
            SpriteId::MarshmallowBlack => "marshmallow_black.png",
            SpriteId::Platform => "wooden_platform.png",
            SpriteId::Bonfire => "bonfire.png",
            SpriteId::Background => "background.png",
        }
    }

    /// Marshmallow sprite for a roast state
    pub fn for_roast(state: RoastState) -> Self {
        match state {
            RoastState::Raw => SpriteId::MarshmallowWhite,
            RoastState::Toasted => SpriteId::MarshmallowYellow,
            RoastState::Perfect => SpriteId::MarshmallowBrown,
            RoastState::Burnt => SpriteId::MarshmallowBlack,
        }
    }

    fn index(self) -> usize {
        self as usize
    }
}

/// Decoded RGBA images, one per `SpriteId`
pub struct SpriteSet {
    images: Vec<RgbaImage>,
}

impl SpriteSet {
    /// Build a set by producing each sprite in `SpriteId::ALL` order
    pub fn try_from_fn<E>(mut f: impl FnMut(SpriteId) -> Result<RgbaImage, E>) -> Result<Self, E> {
        let images = SpriteId::ALL
            .iter()
            .map(|&id| f(id))
            .collect::<Result<Vec<_>, E>>()?;
        Ok(Self { images })
    }

    pub fn load(dir: &Path) -> Result<Self, AssetError> {
        Self::try_from_fn(|id| load_sprite(&dir.join(id.file_name())))
    }

    pub fn get(&self, id: SpriteId) -> &RgbaImage {
        &self.images[id.index()]
    }
}

/// Glyph source for on-screen text
pub struct Typeface {
    font: Font,
}

impl Typeface {
    pub const FILE_NAME: &'static str = "font.ttf";

    pub fn from_bytes(path: &Path, bytes: Vec<u8>) -> Result<Self, AssetError> {
        let font = Font::from_bytes(bytes, FontSettings::default()).map_err(|reason| {
            AssetError::Font {
                path: path.to_path_buf(),
                reason: reason.to_string(),
            }
        })?;
        Ok(Self { font })
    }

    pub fn load(dir: &Path) -> Result<Self, AssetError> {
        let path = dir.join(Self::FILE_NAME);
        let bytes = read_asset(&path)?;
        Self::from_bytes(&path, bytes)
    }

    pub fn font(&self) -> &Font {
        &self.font
    }
}

/// Encoded sound files, checked to decode at load time
pub struct SoundBank {
    click: Arc<[u8]>,
    burn: Arc<[u8]>,
    music: Option<Arc<[u8]>>,
}

impl SoundBank {
    pub const CLICK_FILE: &'static str = "click-sound.mp3";
    pub const BURN_FILE: &'static str = "burn-sound.mp3";

    pub fn load(dir: &Path, music: Option<&str>) -> Result<Self, AssetError> {
        let click = load_sound(&dir.join(Self::CLICK_FILE))?;
        let burn = load_sound(&dir.join(Self::BURN_FILE))?;
        let music = music.map(|name| load_sound(&dir.join(name))).transpose()?;
        Ok(Self { click, burn, music })
    }

    pub fn cue(&self, cue: SoundCue) -> Arc<[u8]> {
        match cue {
            SoundCue::Click => Arc::clone(&self.click),
            SoundCue::Burn => Arc::clone(&self.burn),
        }
    }

    pub fn music(&self) -> Option<Arc<[u8]>> {
        self.music.clone()
    }
}

/// Everything loaded from the asset directory
pub struct Assets {
    pub sprites: SpriteSet,
    pub typeface: Typeface,
    pub sounds: SoundBank,
}

impl Assets {
    pub fn load(dir: &Path, music: Option<&str>) -> Result<Self, AssetError> {
        log::info!("Loading assets from {}", dir.display());
        let sprites = SpriteSet::load(dir)?;
        let typeface = Typeface::load(dir)?;
        let sounds = SoundBank::load(dir, music)?;
        log::info!(
            "Loaded {} sprites, font and {} sounds",
            SpriteId::ALL.len(),
            if music.is_some() { 3 } else { 2 }
        );
        Ok(Self {
            sprites,
            typeface,
            sounds,
        })
    }
}

fn read_asset(path: &Path) -> Result<Vec<u8>, AssetError> {
    if !path.is_file() {
        return Err(AssetError::Missing {
            path: path.to_path_buf(),
        });
    }
    log::debug!("Reading {}", path.display());
    std::fs::read(path).map_err(|source| AssetError::Io {
        path: path.to_path_buf(),
        source,
    })
}

pub fn load_sprite(path: &Path) -> Result<RgbaImage, AssetError> {
    let bytes = read_asset(path)?;
    let image = image::load_from_memory(&bytes).map_err(|source| AssetError::Image {
        path: path.to_path_buf(),
        source,
    })?;
    Ok(image.to_rgba8())
}

pub fn load_sound(path: &Path) -> Result<Arc<[u8]>, AssetError> {
    let bytes: Arc<[u8]> = read_asset(path)?.into();
    rodio::Decoder::new(Cursor::new(Arc::clone(&bytes))).map_err(|source| AssetError::Sound {
        path: path.to_path_buf(),
        source,
    })?;
    Ok(bytes)
}

//! Audio output using rodio
//!
//! Sound cues are decoded from the in-memory `SoundBank` and played on
//! detached sinks so overlapping clicks don't cut each other off.

use std::io::Cursor;
use std::sync::Arc;

use rodio::{Decoder, OutputStream, OutputStreamHandle, Sink};
use thiserror::Error;

use crate::assets::SoundBank;
use crate::settings::Settings;
use crate::sim::SoundCue;

#[derive(Debug, Error)]
pub enum AudioError {
    #[error("no audio output device available")]
    Device(#[from] rodio::StreamError),
    #[error("failed to decode sound")]
    Decode(#[from] rodio::decoder::DecoderError),
    #[error("failed to start playback")]
    Play(#[from] rodio::PlayError),
}

/// Volume state, kept apart from the device so it can be reasoned about alone
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Volumes {
    pub master: f32,
    pub sfx: f32,
    pub music: f32,
    pub muted: bool,
}

impl Volumes {
    pub fn from_settings(settings: &Settings) -> Self {
        Self {
            master: settings.master_volume.clamp(0.0, 1.0),
            sfx: settings.sfx_volume.clamp(0.0, 1.0),
            music: settings.music_volume.clamp(0.0, 1.0),
            muted: false,
        }
    }

    pub fn effective_sfx(&self) -> f32 {
        if self.muted { 0.0 } else { self.master * self.sfx }
    }

    pub fn effective_music(&self) -> f32 {
        if self.muted { 0.0 } else { self.master * self.music }
    }
}

/// Audio manager for the game
pub struct AudioManager {
    // Dropping the stream stops all sound
    _stream: OutputStream,
    handle: OutputStreamHandle,
    volumes: Volumes,
    music: Option<Sink>,
}

impl AudioManager {
    /// Open the default output device
    pub fn new(settings: &Settings) -> Result<Self, AudioError> {
        let (stream, handle) = OutputStream::try_default()?;
        log::info!("Audio output opened");
        Ok(Self {
            _stream: stream,
            handle,
            volumes: Volumes::from_settings(settings),
            music: None,
        })
    }

    /// Mute/unmute all audio
    pub fn set_muted(&mut self, muted: bool) {
        self.volumes.muted = muted;
        if let Some(music) = &self.music {
            music.set_volume(self.volumes.effective_music());
        }
    }

    pub fn toggle_muted(&mut self) {
        self.set_muted(!self.volumes.muted);
        log::info!("Audio {}", if self.volumes.muted { "muted" } else { "unmuted" });
    }

    /// Play a sound cue. Playback failures are logged, never fatal.
    pub fn play(&self, cue: SoundCue, sounds: &SoundBank) {
        let vol = self.volumes.effective_sfx();
        if vol <= 0.0 {
            return;
        }
        if let Err(e) = self.one_shot(sounds.cue(cue), vol) {
            log::warn!("Failed to play {cue:?}: {e}");
        }
    }

    /// Loop the background track until the manager is dropped
    pub fn start_music(&mut self, sounds: &SoundBank) -> Result<(), AudioError> {
        let Some(track) = sounds.music() else {
            return Ok(());
        };
        let source = Decoder::new_looped(Cursor::new(track))?;
        let sink = Sink::try_new(&self.handle)?;
        sink.set_volume(self.volumes.effective_music());
        sink.append(source);
        self.music = Some(sink);
        log::info!("Background music started");
        Ok(())
    }

    fn one_shot(&self, bytes: Arc<[u8]>, volume: f32) -> Result<(), AudioError> {
        let source = Decoder::new(Cursor::new(bytes))?;
        let sink = Sink::try_new(&self.handle)?;
        sink.set_volume(volume);
        sink.append(source);
        sink.detach();
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_volumes_from_settings() {
        let settings = Settings {
            master_volume: 0.5,
            sfx_volume: 0.5,
            music_volume: 3.0,
            ..Settings::default()
        };
        let volumes = Volumes::from_settings(&settings);
        assert_eq!(volumes.effective_sfx(), 0.25);
        assert_eq!(volumes.effective_music(), 0.5);
    }

    #[test]
    fn test_muted_is_silent() {
        let mut volumes = Volumes::from_settings(&Settings::default());
        assert!(volumes.effective_sfx() > 0.0);
        volumes.muted = true;
        assert_eq!(volumes.effective_sfx(), 0.0);
        assert_eq!(volumes.effective_music(), 0.0);
    }
}

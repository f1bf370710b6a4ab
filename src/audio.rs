//! Audio playback boundary
//!
//! The simulation only queues [`SoundRequest`]s. The shell hands them to an
//! [`AudioManager`], which applies volume settings and forwards them to an
//! [`AudioBackend`]. Playback failures are logged here and go no further.

use thiserror::Error;

use crate::settings::Settings;
use crate::sim::SoundRequest;

/// Background music track started with the application
pub const MUSIC_TRACK: &str = "theme";

#[derive(Debug, Error)]
pub enum AudioError {
    #[error("unknown sound asset '{0}'")]
    MissingAsset(String),
    #[error("audio device unavailable: {0}")]
    Device(String),
}

/// Something that can actually make noise
pub trait AudioBackend {
    fn play_sound(&mut self, key: &str, volume: f32) -> Result<(), AudioError>;
    fn play_music(&mut self, track: &str, volume: f32) -> Result<(), AudioError>;
}

/// Backend for headless runs; accepts everything and plays nothing
#[derive(Debug, Default)]
pub struct NullBackend;

impl AudioBackend for NullBackend {
    fn play_sound(&mut self, key: &str, volume: f32) -> Result<(), AudioError> {
        log::trace!("sound {key} at {volume:.2}");
        Ok(())
    }

    fn play_music(&mut self, track: &str, volume: f32) -> Result<(), AudioError> {
        log::trace!("music {track} at {volume:.2}");
        Ok(())
    }
}

/// Audio manager for the game
pub struct AudioManager {
    backend: Box<dyn AudioBackend>,
    master_volume: f32,
    sfx_volume: f32,
    music_volume: f32,
    muted: bool,
}

impl Default for AudioManager {
    fn default() -> Self {
        Self::new(Box::new(NullBackend))
    }
}

impl AudioManager {
    pub fn new(backend: Box<dyn AudioBackend>) -> Self {
        let defaults = Settings::default();
        Self {
            backend,
            master_volume: defaults.master_volume,
            sfx_volume: defaults.sfx_volume,
            music_volume: defaults.music_volume,
            muted: defaults.muted,
        }
    }

    pub fn apply_settings(&mut self, settings: &Settings) {
        self.set_master_volume(settings.master_volume);
        self.set_sfx_volume(settings.sfx_volume);
        self.music_volume = settings.music_volume.clamp(0.0, 1.0);
        self.set_muted(settings.muted);
    }

    /// Set master volume (0.0 - 1.0)
    pub fn set_master_volume(&mut self, vol: f32) {
        self.master_volume = vol.clamp(0.0, 1.0);
    }

    /// Set SFX volume (0.0 - 1.0)
    pub fn set_sfx_volume(&mut self, vol: f32) {
        self.sfx_volume = vol.clamp(0.0, 1.0);
    }

    /// Mute/unmute all audio
    pub fn set_muted(&mut self, muted: bool) {
        self.muted = muted;
    }

    fn effective_volume(&self, channel: f32) -> f32 {
        if self.muted {
            0.0
        } else {
            self.master_volume * channel
        }
    }

    /// Play one queued sound effect
    pub fn play(&mut self, request: &SoundRequest) {
        let vol = self.effective_volume(self.sfx_volume);
        if vol <= 0.0 {
            return;
        }
        let key = request.key();
        if let Err(e) = self.backend.play_sound(&key, vol) {
            log::warn!("Sound error: {e}");
        }
    }

    pub fn play_all(&mut self, requests: &[SoundRequest]) {
        for request in requests {
            self.play(request);
        }
    }

    pub fn start_music(&mut self) {
        let vol = self.effective_volume(self.music_volume);
        if let Err(e) = self.backend.play_music(MUSIC_TRACK, vol) {
            log::warn!("Music error: {e}");
        }
    }
}

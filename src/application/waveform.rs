//! Waveform display bound to one clip reference

use std::sync::Arc;

use thiserror::Error;
use tracing::{debug, warn};

use super::ports::{AudioPlayback, PlaybackError, PlaybackHandle};
use crate::domain::audio::wav;
use crate::domain::error::AudioCodecError;
use crate::domain::recording::AudioRef;
use crate::domain::waveform::Waveform;

/// Errors building a waveform surface
#[derive(Debug, Error)]
pub enum WaveformError {
    #[error("Failed to read clip {reference}: {message}")]
    ReadFailed { reference: String, message: String },

    #[error(transparent)]
    Decode(#[from] AudioCodecError),
}

/// Peaks plus the player for one reference
struct Surface {
    reference: AudioRef,
    waveform: Waveform,
    player: Option<Box<dyn PlaybackHandle>>,
}

impl Surface {
    fn release(&mut self) {
        if let Some(mut player) = self.player.take() {
            player.release();
        }
    }
}

pub struct WaveformDisplay {
    playback: Arc<dyn AudioPlayback>,
    bins: usize,
    surface: Option<Surface>,
}

impl WaveformDisplay {
    pub fn new(
        reference: &AudioRef,
        playback: Arc<dyn AudioPlayback>,
        bins: usize,
    ) -> Result<Self, WaveformError> {
        let mut display = Self {
            playback,
            bins,
            surface: None,
        };
        display.surface = Some(display.build_surface(reference)?);
        Ok(display)
    }

    fn build_surface(&self, reference: &AudioRef) -> Result<Surface, WaveformError> {
        let bytes = std::fs::read(reference.path()).map_err(|e| WaveformError::ReadFailed {
            reference: reference.to_string(),
            message: e.to_string(),
        })?;
        let clip = wav::decode(&bytes)?;
        let waveform = Waveform::from_clip(&clip, self.bins);

        // The waveform is still worth showing without an output device
        let player = match self.playback.load(reference) {
            Ok(player) => Some(player),
            Err(e) => {
                warn!(%reference, error = %e, "playback unavailable");
                None
            }
        };

        debug!(%reference, bins = waveform.peaks().len(), "waveform surface created");
        Ok(Surface {
            reference: reference.clone(),
            waveform,
            player,
        })
    }

    /// Rebind to a new reference; the old surface is released first
    pub fn set_reference(&mut self, reference: &AudioRef) -> Result<(), WaveformError> {
        if self.reference() == Some(reference) {
            return Ok(());
        }
        self.release();
        self.surface = Some(self.build_surface(reference)?);
        Ok(())
    }

    pub fn reference(&self) -> Option<&AudioRef> {
        self.surface.as_ref().map(|s| &s.reference)
    }

    /// Flip play/pause; returns the new playing state
    pub fn toggle(&mut self) -> Result<bool, PlaybackError> {
        let surface = self.surface.as_mut().ok_or(PlaybackError::Released)?;
        let player = surface.player.as_mut().ok_or_else(|| {
            PlaybackError::DeviceUnavailable("no audio output for this clip".into())
        })?;
        player.toggle()
    }

    pub fn is_playing(&self) -> bool {
        self.surface
            .as_ref()
            .and_then(|s| s.player.as_ref())
            .map(|p| p.is_playing())
            .unwrap_or(false)
    }

    #[cfg(test)]
    pub(crate) fn can_play(&self) -> bool {
        self.surface
            .as_ref()
            .map(|s| s.player.is_some())
            .unwrap_or(false)
    }

    /// Sparkline of `width` columns followed by the play/pause label
    pub fn render(&self, width: usize) -> String {
        let Some(surface) = &self.surface else {
            return String::new();
        };
        let label = match (surface.player.is_some(), self.is_playing()) {
            (false, _) => "no output",
            (true, true) => "Pause",
            (true, false) => "Play",
        };
        format!("{} [{}]", surface.waveform.render(width), label)
    }

    pub fn release(&mut self) {
        if let Some(mut surface) = self.surface.take() {
            surface.release();
            debug!(reference = %surface.reference, "waveform surface released");
        }
    }
}

impl Drop for WaveformDisplay {
    fn drop(&mut self) {
        self.release();
    }
}

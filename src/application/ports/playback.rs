//! Clip playback port interfaces

use thiserror::Error;

use crate::domain::recording::AudioRef;

/// Playback errors
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum PlaybackError {
    #[error("Audio output not available: {0}")]
    DeviceUnavailable(String),

    #[error("Failed to load clip: {0}")]
    LoadFailed(String),

    #[error("Playback has been released")]
    Released,
}

/// Player bound to one clip
pub trait PlaybackHandle: Send {
    /// Flip between playing and paused; returns the new playing state.
    /// A finished clip starts again from the beginning.
    fn toggle(&mut self) -> Result<bool, PlaybackError>;

    /// Current state, turning false once the clip plays to its end
    fn is_playing(&self) -> bool;

    /// Stop and free the output. Safe to call more than once.
    ///
    /// May block briefly while the output device shuts down.
    fn release(&mut self);
}

/// Port for loading clips into a player
pub trait AudioPlayback: Send + Sync {
    fn load(&self, reference: &AudioRef) -> Result<Box<dyn PlaybackHandle>, PlaybackError>;
}

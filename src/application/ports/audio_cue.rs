//! Audio cue port for capture feedback

use async_trait::async_trait;
use thiserror::Error;

/// Moments that get an audible cue
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AudioCueType {
    /// Rising chime before the microphone opens
    CaptureStart,
    /// Falling chime after the microphone closes
    CaptureStop,
    /// Short arpeggio when recommendations arrive
    ResultsReady,
}

/// Errors that can occur during audio cue playback
#[derive(Error, Debug)]
pub enum AudioCueError {
    #[error("Playback failed: {0}")]
    PlaybackFailed(String),

    #[error("Audio device not available: {0}")]
    DeviceNotAvailable(String),
}

/// Port trait for audio cue playback
#[async_trait]
pub trait AudioCue: Send + Sync {
    async fn play(&self, cue_type: AudioCueType) -> Result<(), AudioCueError>;
}

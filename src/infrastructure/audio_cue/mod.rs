//! Audio cue adapters
//!
//! Chimes around each capture and when recommendations arrive. Disabled
//! by default.

mod noop;
mod rodio;

pub use noop::NoOpAudioCue;
pub use rodio::RodioAudioCue;

use crate::application::ports::AudioCue;

/// Pick the cue adapter for the configured setting
pub fn create_audio_cue(enabled: bool) -> Box<dyn AudioCue> {
    if enabled {
        Box::new(RodioAudioCue::new())
    } else {
        Box::new(NoOpAudioCue)
    }
}

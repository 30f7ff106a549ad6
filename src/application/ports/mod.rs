//! Port interfaces (traits) for external systems
//!
//! These traits define the boundaries between the application
//! and infrastructure layers.

pub mod audio_cue;
pub mod capture;
pub mod clip_store;
pub mod config;
pub mod playback;
pub mod recommender;

// Re-export common types
pub use audio_cue::{AudioCue, AudioCueError, AudioCueType};
pub use capture::{CaptureError, MicStream, Microphone, SampleSink};
pub use clip_store::{ClipStore, ClipStoreError};
pub use config::ConfigStore;
pub use playback::{AudioPlayback, PlaybackError, PlaybackHandle};
pub use recommender::{RecommendationError, SongRecommender};

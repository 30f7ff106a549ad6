//! Infrastructure layer - Adapter implementations
//!
//! Concrete implementations of the port interfaces: cpal capture, rodio
//! playback and cues, the temp-dir clip store, the HTTP recommender and the
//! XDG config file.

pub mod audio_cue;
pub mod capture;
pub mod config;
pub mod playback;
pub mod recommendation;
pub mod storage;

// Re-export adapters
pub use audio_cue::{create_audio_cue, NoOpAudioCue, RodioAudioCue};
pub use capture::CpalMicrophone;
pub use config::XdgConfigStore;
pub use playback::RodioPlayback;
pub use recommendation::HttpRecommender;
pub use storage::TempClipStore;

//! Domain layer - Core business logic
//!
//! Contains value objects, entities, the session state machine and domain
//! errors. This layer has no dependencies on external systems.

pub mod audio;
pub mod config;
pub mod error;
pub mod recommendation;
pub mod recording;
pub mod session;
pub mod waveform;

// Re-export common types
pub use audio::{AudioData, PcmClip};
pub use config::AppConfig;
pub use error::*;
pub use recommendation::Recommendation;
pub use recording::{AudioRef, CaptureTimestamp, Duration, Recording, RecordingId, SampleSlot};
pub use session::{InvalidStateTransition, RecordingSession, SessionState, VoiceSamples};
pub use waveform::Waveform;

//! Application layer - Use cases and port interfaces
//!
//! Contains the capture controller, the waveform display and the session
//! orchestrator, plus the trait definitions for external systems.

pub mod capture;
pub mod ports;
pub mod session;
pub mod waveform;

#[cfg(test)]
pub(crate) mod testing;

// Re-export use cases
pub use capture::{CaptureController, CapturedClip};
pub use session::{RecordingSessionUseCase, SessionError};
pub use waveform::{WaveformDisplay, WaveformError};

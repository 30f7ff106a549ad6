//! Recording session domain module

mod session;

pub use session::{InvalidStateTransition, RecordingSession, SessionState, VoiceSamples};

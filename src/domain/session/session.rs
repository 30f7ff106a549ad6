//! Recording session state machine

use std::fmt;
use thiserror::Error;

use crate::domain::audio::AudioData;
use crate::domain::recommendation::Recommendation;
use crate::domain::recording::{Recording, SampleSlot};

/// Session states.
///
/// State machine:
///   CAPTURING(high) -> CAPTURING(low) -> CAPTURING(normal) -> READY (record_captured)
///   READY -> SUBMITTING (begin_submit)
///   SUBMITTING -> RESULT (complete_submit)
///   SUBMITTING -> ERROR (fail_submit)
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SessionState {
    /// Waiting for the capture of `next`
    Capturing { next: SampleSlot },
    ReadyToSubmit,
    Submitting,
    ResultShown(Vec<Recommendation>),
    Error(String),
}

impl SessionState {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Capturing {
                next: SampleSlot::HighPitch,
            } => "capturing-0",
            Self::Capturing {
                next: SampleSlot::LowPitch,
            } => "capturing-1",
            Self::Capturing {
                next: SampleSlot::Normal,
            } => "capturing-2",
            Self::ReadyToSubmit => "ready-to-submit",
            Self::Submitting => "submitting",
            Self::ResultShown(_) => "result-shown",
            Self::Error(_) => "error",
        }
    }

    pub fn is_capturing(&self) -> bool {
        matches!(self, Self::Capturing { .. })
    }

    /// Whether the flow has ended and can only be restarted
    pub fn is_finished(&self) -> bool {
        matches!(self, Self::ResultShown(_) | Self::Error(_))
    }
}

impl Default for SessionState {
    fn default() -> Self {
        Self::Capturing {
            next: SampleSlot::HighPitch,
        }
    }
}

impl fmt::Display for SessionState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Error when an invalid state transition is attempted
#[derive(Debug, Clone, Error)]
#[error("Invalid state transition: cannot {action} while in {current_state} state")]
pub struct InvalidStateTransition {
    pub current_state: &'static str,
    pub action: String,
}

/// The three clips of a complete session, in slot order
#[derive(Debug, Clone)]
pub struct VoiceSamples {
    pub high: AudioData,
    pub low: AudioData,
    pub normal: AudioData,
}

impl VoiceSamples {
    /// Clips paired with the slot they fill
    pub fn parts(&self) -> [(SampleSlot, &AudioData); 3] {
        [
            (SampleSlot::HighPitch, &self.high),
            (SampleSlot::LowPitch, &self.low),
            (SampleSlot::Normal, &self.normal),
        ]
    }
}

/// Recording session entity.
///
/// Owns the ordered recording list and the tagged state. The list never
/// holds more than three entries, and capture slots always match its
/// length.
#[derive(Debug, Default)]
pub struct RecordingSession {
    recordings: Vec<Recording>,
    state: SessionState,
}

impl RecordingSession {
    /// Create an empty session waiting for the high-pitch sample
    pub fn new() -> Self {
        Self::default()
    }

    pub fn state(&self) -> &SessionState {
        &self.state
    }

    pub fn recordings(&self) -> &[Recording] {
        &self.recordings
    }

    /// Slot the next capture will fill, if capture is still offered
    pub fn next_slot(&self) -> Option<SampleSlot> {
        match self.state {
            SessionState::Capturing { next } => Some(next),
            _ => None,
        }
    }

    /// Whether the submit action is reachable
    pub fn can_submit(&self) -> bool {
        self.state == SessionState::ReadyToSubmit
    }

    /// Append a finished capture and advance to the next slot
    pub fn record_captured(&mut self, recording: Recording) -> Result<SampleSlot, InvalidStateTransition> {
        let SessionState::Capturing { next } = self.state else {
            return Err(self.invalid("record a sample"));
        };

        self.recordings.push(recording);
        self.state = match next.next() {
            Some(following) => SessionState::Capturing { next: following },
            None => SessionState::ReadyToSubmit,
        };
        Ok(next)
    }

    /// Transition from READY to SUBMITTING and hand out the clips to send
    pub fn begin_submit(&mut self) -> Result<VoiceSamples, InvalidStateTransition> {
        if self.state != SessionState::ReadyToSubmit {
            return Err(self.invalid("submit"));
        }

        let samples = match &self.recordings[..] {
            [high, low, normal] => VoiceSamples {
                high: high.audio().clone(),
                low: low.audio().clone(),
                normal: normal.audio().clone(),
            },
            _ => return Err(self.invalid("submit")),
        };

        self.state = SessionState::Submitting;
        Ok(samples)
    }

    /// Transition from SUBMITTING to RESULT
    pub fn complete_submit(
        &mut self,
        recommendations: Vec<Recommendation>,
    ) -> Result<(), InvalidStateTransition> {
        if self.state != SessionState::Submitting {
            return Err(self.invalid("show results"));
        }
        self.state = SessionState::ResultShown(recommendations);
        Ok(())
    }

    /// Transition from SUBMITTING to ERROR
    pub fn fail_submit(&mut self, message: impl Into<String>) -> Result<(), InvalidStateTransition> {
        if self.state != SessionState::Submitting {
            return Err(self.invalid("record a submission failure"));
        }
        let message = message.into();
        self.state = SessionState::Error(if message.trim().is_empty() {
            "Submission failed".to_string()
        } else {
            message
        });
        Ok(())
    }

    fn invalid(&self, action: &str) -> InvalidStateTransition {
        InvalidStateTransition {
            current_state: self.state.as_str(),
            action: action.to_string(),
        }
    }
}

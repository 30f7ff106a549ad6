//! Recording session use case
//!
//! Drives one session: three capture cycles, one submission, then either
//! the recommendations or an error message. All mutation goes through
//! `&mut self` from the single UI loop.

use std::sync::Arc;
use std::time::Duration;

use thiserror::Error;
use tracing::{info, warn};

use super::capture::CaptureController;
use super::ports::{CaptureError, ClipStore, Microphone, RecommendationError, SongRecommender};
use crate::domain::recording::{CaptureTimestamp, Recording, SampleSlot};
use crate::domain::session::{InvalidStateTransition, RecordingSession, SessionState};

/// Errors from the session use case
#[derive(Debug, Error)]
pub enum SessionError {
    #[error("Capture failed: {0}")]
    Capture(#[from] CaptureError),

    #[error("Submission failed: {0}")]
    Recommendation(#[from] RecommendationError),

    #[error(transparent)]
    InvalidState(#[from] InvalidStateTransition),
}

pub struct RecordingSessionUseCase<M, R>
where
    M: Microphone,
    R: SongRecommender,
{
    capture: CaptureController<M>,
    recommender: R,
    clips: Arc<dyn ClipStore>,
    session: RecordingSession,
    capture_error: Option<String>,
}

impl<M, R> RecordingSessionUseCase<M, R>
where
    M: Microphone,
    R: SongRecommender,
{
    pub fn new(microphone: M, recommender: R, clips: Arc<dyn ClipStore>) -> Self {
        Self {
            capture: CaptureController::new(microphone, Arc::clone(&clips)),
            recommender,
            clips,
            session: RecordingSession::new(),
            capture_error: None,
        }
    }

    pub fn state(&self) -> &SessionState {
        self.session.state()
    }

    pub fn recordings(&self) -> &[Recording] {
        self.session.recordings()
    }

    /// Last capture failure, shown until the next successful start
    pub fn capture_error(&self) -> Option<&str> {
        self.capture_error.as_deref()
    }

    pub fn is_capturing(&self) -> bool {
        self.capture.is_capturing()
    }

    pub fn capture_elapsed(&self) -> Option<Duration> {
        self.capture.elapsed()
    }

    /// Open the microphone for the next slot.
    ///
    /// A failure is kept as the displayed capture error; the session stays
    /// in the same capturing state so the user can try again.
    pub async fn start_capture(&mut self) -> Result<SampleSlot, SessionError> {
        let Some(slot) = self.session.next_slot() else {
            return Err(self.invalid("start a capture").into());
        };

        match self.capture.start().await {
            Ok(()) => {
                self.capture_error = None;
                info!(%slot, "capturing sample");
                Ok(slot)
            }
            Err(e) => {
                warn!(%slot, error = %e, "capture could not start");
                self.capture_error = Some(e.to_string());
                Err(e.into())
            }
        }
    }

    /// Finish the running capture and append it to the session.
    ///
    /// Returns `Ok(None)` if nothing was being captured.
    pub async fn stop_capture(&mut self) -> Result<Option<SampleSlot>, SessionError> {
        let clip = match self.capture.stop().await {
            Ok(Some(clip)) => clip,
            Ok(None) => return Ok(None),
            Err(e) => {
                self.capture_error = Some(e.to_string());
                return Err(e.into());
            }
        };

        let recording = Recording::new(clip.id, clip.reference, clip.audio, CaptureTimestamp::now());
        self.record_captured(recording).await.map(Some)
    }

    /// Append a finished recording and advance the state
    pub async fn record_captured(&mut self, recording: Recording) -> Result<SampleSlot, SessionError> {
        let reference = recording.reference().clone();
        match self.session.record_captured(recording) {
            Ok(slot) => {
                info!(%slot, state = %self.session.state(), "sample recorded");
                Ok(slot)
            }
            Err(e) => {
                // Rejected clips are not part of the session; drop their file now
                if let Err(revoke_err) = self.clips.revoke(&reference).await {
                    warn!(%reference, error = %revoke_err, "failed to revoke rejected clip");
                }
                Err(e.into())
            }
        }
    }

    /// Send the three samples once and record the outcome.
    ///
    /// On failure the session moves to the error state; the recordings are
    /// left untouched and no retry is attempted.
    pub async fn submit(&mut self) -> Result<(), SessionError> {
        let samples = self.session.begin_submit()?;
        info!("submitting voice samples");

        match self.recommender.recommend(&samples).await {
            Ok(recommendations) => {
                info!(count = recommendations.len(), "recommendations received");
                self.session.complete_submit(recommendations)?;
                Ok(())
            }
            Err(e) => {
                warn!(error = %e, "submission failed");
                self.session.fail_submit(e.to_string())?;
                Err(e.into())
            }
        }
    }

    /// Discard a finished session and begin a new one
    pub async fn restart(&mut self) -> Result<(), SessionError> {
        if !self.session.state().is_finished() {
            return Err(self.invalid("restart").into());
        }
        self.teardown().await;
        self.session = RecordingSession::new();
        self.capture_error = None;
        info!("session restarted");
        Ok(())
    }

    /// Release the microphone and revoke every clip reference
    pub async fn teardown(&mut self) {
        self.capture.release();
        for recording in self.session.recordings() {
            if let Err(e) = self.clips.revoke(recording.reference()).await {
                warn!(reference = %recording.reference(), error = %e, "failed to revoke clip");
            }
        }
    }

    fn invalid(&self, action: &str) -> InvalidStateTransition {
        InvalidStateTransition {
            current_state: self.session.state().as_str(),
            action: action.to_string(),
        }
    }
}

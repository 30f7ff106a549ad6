//! Capture controller: one microphone stream per capture cycle
//!
//! The controller owns at most one live stream. `start` releases any stale
//! stream before opening a new one, `stop` closes the stream before it
//! encodes anything, and `release` (also run on drop) covers abandoned
//! cycles.

use std::sync::Arc;
use std::time::{Duration, Instant};

use tracing::{debug, info, warn};

use super::ports::{CaptureError, ClipStore, MicStream, Microphone, SampleSink};
use crate::domain::audio::{AudioData, PcmClip};
use crate::domain::recording::{AudioRef, RecordingId};

/// Result of a finished capture cycle
#[derive(Debug, Clone)]
pub struct CapturedClip {
    pub id: RecordingId,
    pub audio: AudioData,
    pub reference: AudioRef,
}

struct ActiveCapture {
    stream: Box<dyn MicStream>,
    sink: SampleSink,
    started: Instant,
}

impl ActiveCapture {
    fn close(&mut self) {
        self.stream.close();
    }
}

pub struct CaptureController<M>
where
    M: Microphone,
{
    microphone: M,
    clips: Arc<dyn ClipStore>,
    active: Option<ActiveCapture>,
}

impl<M> CaptureController<M>
where
    M: Microphone,
{
    pub fn new(microphone: M, clips: Arc<dyn ClipStore>) -> Self {
        Self {
            microphone,
            clips,
            active: None,
        }
    }

    /// Open the microphone and start buffering.
    ///
    /// # Errors
    /// `AlreadyCapturing` if a stream is live, otherwise whatever the
    /// microphone reports (permission, device, backend).
    pub async fn start(&mut self) -> Result<(), CaptureError> {
        if self.is_capturing() {
            return Err(CaptureError::AlreadyCapturing);
        }

        // A stream that died on its own still holds its buffer
        self.release();

        let sink = SampleSink::new();
        let stream = self.microphone.open(sink.clone()).await?;
        info!(sample_rate = stream.sample_rate(), "capture started");

        self.active = Some(ActiveCapture {
            stream,
            sink,
            started: Instant::now(),
        });
        Ok(())
    }

    /// Close the stream and turn the buffered audio into a clip.
    ///
    /// Returns `Ok(None)` when no capture is active.
    pub async fn stop(&mut self) -> Result<Option<CapturedClip>, CaptureError> {
        let Some(mut active) = self.active.take() else {
            debug!("stop requested without an active capture");
            return Ok(None);
        };

        // Closing joins the device thread; keep that off the async worker
        let active = tokio::task::spawn_blocking(move || {
            active.close();
            active
        })
        .await
        .map_err(|e| CaptureError::FinalizeFailed(format!("Close task error: {}", e)))?;
        let sample_rate = active.stream.sample_rate();
        let samples = active.sink.take();
        let elapsed = active.started.elapsed();
        drop(active);

        if samples.is_empty() {
            warn!(?elapsed, "capture ended without samples");
            return Err(CaptureError::NoAudio);
        }

        let clip = PcmClip {
            samples,
            sample_rate,
        };
        let audio = tokio::task::spawn_blocking(move || AudioData::from_pcm(&clip))
            .await
            .map_err(|e| CaptureError::FinalizeFailed(format!("Encode task error: {}", e)))?
            .map_err(|e| CaptureError::FinalizeFailed(e.to_string()))?;

        let id = RecordingId::new();
        let reference = self
            .clips
            .publish(id, &audio)
            .await
            .map_err(|e| CaptureError::FinalizeFailed(e.to_string()))?;

        info!(
            id = %id.short(),
            size = %audio.human_readable_size(),
            duration_ms = audio.duration().as_millis() as u64,
            "capture finished"
        );

        Ok(Some(CapturedClip {
            id,
            audio,
            reference,
        }))
    }

    /// Close any live stream and drop its samples.
    ///
    /// Blocks until the stream has released the device.
    pub fn release(&mut self) {
        if let Some(mut active) = self.active.take() {
            active.close();
            active.sink.clear();
            debug!("capture resource released");
        }
    }

    pub fn is_capturing(&self) -> bool {
        self.active
            .as_ref()
            .map(|a| a.stream.is_open())
            .unwrap_or(false)
    }

    /// Time since the current capture started
    pub fn elapsed(&self) -> Option<Duration> {
        self.active.as_ref().map(|a| a.started.elapsed())
    }

    #[cfg(test)]
    pub(crate) fn microphone(&self) -> &M {
        &self.microphone
    }
}

impl<M> Drop for CaptureController<M>
where
    M: Microphone,
{
    fn drop(&mut self) {
        self.release();
    }
}

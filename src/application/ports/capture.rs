//! Microphone port interfaces

use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use thiserror::Error;

/// Capture errors
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum CaptureError {
    #[error("Microphone access was denied: {0}")]
    PermissionDenied(String),

    #[error("No usable input device: {0}")]
    DeviceUnavailable(String),

    #[error("Failed to start capture: {0}")]
    StartFailed(String),

    #[error("A capture is already in progress")]
    AlreadyCapturing,

    #[error("No audio was captured")]
    NoAudio,

    #[error("Failed to finalize capture: {0}")]
    FinalizeFailed(String),
}

/// Shared buffer an input stream pushes mono samples into.
///
/// Cloning shares the same buffer; the audio callback holds one clone and
/// the capture controller holds another.
#[derive(Debug, Clone, Default)]
pub struct SampleSink {
    buffer: Arc<Mutex<Vec<i16>>>,
}

impl SampleSink {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&self, samples: &[i16]) {
        if let Ok(mut buffer) = self.buffer.lock() {
            buffer.extend_from_slice(samples);
        }
    }

    /// Drain everything buffered so far
    pub fn take(&self) -> Vec<i16> {
        self.buffer
            .lock()
            .map(|mut buffer| std::mem::take(&mut *buffer))
            .unwrap_or_default()
    }

    pub fn clear(&self) {
        if let Ok(mut buffer) = self.buffer.lock() {
            buffer.clear();
        }
    }

    pub fn len(&self) -> usize {
        self.buffer.lock().map(|b| b.len()).unwrap_or(0)
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// A live input stream. Holding it keeps the device open.
pub trait MicStream: Send {
    /// Rate of the samples pushed into the sink
    fn sample_rate(&self) -> u32;

    /// Stop the stream and release the device. Safe to call more than once.
    ///
    /// Blocks until the device is released; async callers should run it
    /// on a blocking thread.
    fn close(&mut self);

    fn is_open(&self) -> bool;
}

/// Port for acquiring the microphone
#[async_trait]
pub trait Microphone: Send + Sync {
    /// Open the default input and start pushing mono samples into `sink`.
    ///
    /// # Errors
    /// `PermissionDenied` when access is refused, `DeviceUnavailable` when
    /// there is no input device, `StartFailed` for anything else.
    async fn open(&self, sink: SampleSink) -> Result<Box<dyn MicStream>, CaptureError>;
}

//! Microphone adapter using cpal
//!
//! `cpal::Stream` is not `Send`, so each open stream lives on its own thread.
//! The thread reports the negotiated sample rate (or the open error) back
//! through a oneshot channel, then parks until the handle is closed.

use std::sync::mpsc;
use std::thread::JoinHandle;

use async_trait::async_trait;
use cpal::traits::{DeviceTrait, HostTrait, StreamTrait};
use cpal::{SampleFormat, StreamConfig};
use tokio::sync::oneshot;
use tracing::{debug, warn};

use crate::application::ports::{CaptureError, MicStream, Microphone, SampleSink};
use crate::domain::audio::wav::{f32_to_i16, mix_to_mono};

/// Default-input microphone
#[derive(Debug, Default, Clone, Copy)]
pub struct CpalMicrophone;

impl CpalMicrophone {
    pub fn new() -> Self {
        Self
    }

    fn input_device() -> Result<cpal::Device, CaptureError> {
        cpal::default_host()
            .default_input_device()
            .ok_or_else(|| CaptureError::DeviceUnavailable("no default input device".into()))
    }

    fn input_config(device: &cpal::Device) -> Result<(StreamConfig, SampleFormat), CaptureError> {
        let supported = device
            .default_input_config()
            .map_err(|e| classify(e.to_string()))?;
        let format = supported.sample_format();
        Ok((supported.config(), format))
    }

    /// Build and start the input stream, pushing mono i16 into `sink`
    fn build_stream(sink: SampleSink) -> Result<(cpal::Stream, u32), CaptureError> {
        let device = Self::input_device()?;
        let (config, format) = Self::input_config(&device)?;
        let sample_rate = config.sample_rate.0;
        let channels = config.channels;

        let on_error = |err: cpal::StreamError| warn!(error = %err, "input stream error");

        let stream = match format {
            SampleFormat::I16 => device.build_input_stream(
                &config,
                move |data: &[i16], _: &cpal::InputCallbackInfo| {
                    sink.push(&mix_to_mono(data, channels));
                },
                on_error,
                None,
            ),
            SampleFormat::F32 => device.build_input_stream(
                &config,
                move |data: &[f32], _: &cpal::InputCallbackInfo| {
                    let converted: Vec<i16> = data.iter().copied().map(f32_to_i16).collect();
                    sink.push(&mix_to_mono(&converted, channels));
                },
                on_error,
                None,
            ),
            other => {
                return Err(CaptureError::StartFailed(format!(
                    "unsupported sample format {:?}",
                    other
                )))
            }
        }
        .map_err(|e| classify(e.to_string()))?;

        stream.play().map_err(|e| classify(e.to_string()))?;
        debug!(sample_rate, channels, ?format, "input stream playing");
        Ok((stream, sample_rate))
    }
}

/// Sort a backend error message into the capture error kinds
fn classify(message: String) -> CaptureError {
    let lower = message.to_lowercase();
    if lower.contains("permission") || lower.contains("denied") || lower.contains("not authorized")
    {
        CaptureError::PermissionDenied(message)
    } else if lower.contains("device") && (lower.contains("not available") || lower.contains("no longer")) {
        CaptureError::DeviceUnavailable(message)
    } else {
        CaptureError::StartFailed(message)
    }
}

/// Handle to a stream thread; closing it drops the cpal stream
struct CpalStream {
    sample_rate: u32,
    stop: Option<mpsc::Sender<()>>,
    thread: Option<JoinHandle<()>>,
}

impl MicStream for CpalStream {
    fn sample_rate(&self) -> u32 {
        self.sample_rate
    }

    fn close(&mut self) {
        // Dropping the sender wakes the stream thread
        self.stop.take();
        if let Some(thread) = self.thread.take() {
            if thread.join().is_err() {
                warn!("capture thread panicked");
            }
            debug!("input stream closed");
        }
    }

    fn is_open(&self) -> bool {
        self.thread.is_some()
    }
}

impl Drop for CpalStream {
    fn drop(&mut self) {
        self.close();
    }
}

#[async_trait]
impl Microphone for CpalMicrophone {
    async fn open(&self, sink: SampleSink) -> Result<Box<dyn MicStream>, CaptureError> {
        let (ready_tx, ready_rx) = oneshot::channel::<Result<u32, CaptureError>>();
        let (stop_tx, stop_rx) = mpsc::channel::<()>();

        let thread = std::thread::Builder::new()
            .name("mic-capture".into())
            .spawn(move || match Self::build_stream(sink) {
                Ok((stream, sample_rate)) => {
                    let _ = ready_tx.send(Ok(sample_rate));
                    // Blocks until the handle sends or is dropped
                    let _ = stop_rx.recv();
                    drop(stream);
                }
                Err(e) => {
                    let _ = ready_tx.send(Err(e));
                }
            })
            .map_err(|e| CaptureError::StartFailed(format!("failed to spawn capture thread: {}", e)))?;

        let sample_rate = match ready_rx.await {
            Ok(Ok(rate)) => rate,
            Ok(Err(e)) => {
                let _ = thread.join();
                return Err(e);
            }
            Err(_) => {
                let _ = thread.join();
                return Err(CaptureError::StartFailed(
                    "capture thread exited before the stream started".into(),
                ));
            }
        };

        Ok(Box::new(CpalStream {
            sample_rate,
            stop: Some(stop_tx),
            thread: Some(thread),
        }))
    }
}

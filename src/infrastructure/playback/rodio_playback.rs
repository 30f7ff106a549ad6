//! Clip playback using rodio
//!
//! `OutputStream` is not `Send`, so each player keeps it on a dedicated
//! thread. The sink itself is shared with the handle, which drives
//! play/pause directly.

use std::io::Cursor;
use std::sync::{mpsc, Arc};
use std::thread::JoinHandle;

use rodio::{Decoder, OutputStream, Sink};
use tracing::{debug, warn};

use crate::application::ports::{AudioPlayback, PlaybackError, PlaybackHandle};
use crate::domain::recording::AudioRef;

/// Default-output playback backend
#[derive(Debug, Default, Clone, Copy)]
pub struct RodioPlayback;

impl RodioPlayback {
    pub fn new() -> Self {
        Self
    }
}

impl AudioPlayback for RodioPlayback {
    fn load(&self, reference: &AudioRef) -> Result<Box<dyn PlaybackHandle>, PlaybackError> {
        let bytes = std::fs::read(reference.path())
            .map_err(|e| PlaybackError::LoadFailed(format!("{}: {}", reference, e)))?;
        // Fail early on undecodable clips rather than on first toggle
        Decoder::new(Cursor::new(bytes.clone()))
            .map_err(|e| PlaybackError::LoadFailed(e.to_string()))?;

        let (sink_tx, sink_rx) = mpsc::channel::<Result<Arc<Sink>, PlaybackError>>();
        let (stop_tx, stop_rx) = mpsc::channel::<()>();

        let thread = std::thread::Builder::new()
            .name("clip-playback".into())
            .spawn(move || {
                let (_stream, handle) = match OutputStream::try_default() {
                    Ok(pair) => pair,
                    Err(e) => {
                        let _ = sink_tx.send(Err(PlaybackError::DeviceUnavailable(e.to_string())));
                        return;
                    }
                };
                match Sink::try_new(&handle) {
                    Ok(sink) => {
                        let _ = sink_tx.send(Ok(Arc::new(sink)));
                        // Keep the output alive until the handle lets go
                        let _ = stop_rx.recv();
                    }
                    Err(e) => {
                        let _ = sink_tx.send(Err(PlaybackError::DeviceUnavailable(e.to_string())));
                    }
                }
            })
            .map_err(|e| PlaybackError::DeviceUnavailable(e.to_string()))?;

        let sink = match sink_rx.recv() {
            Ok(Ok(sink)) => sink,
            Ok(Err(e)) => {
                let _ = thread.join();
                return Err(e);
            }
            Err(_) => {
                let _ = thread.join();
                return Err(PlaybackError::DeviceUnavailable(
                    "playback thread exited early".into(),
                ));
            }
        };

        debug!(%reference, "player loaded");
        Ok(Box::new(RodioPlayer {
            bytes,
            sink: Some(sink),
            stop: Some(stop_tx),
            thread: Some(thread),
        }))
    }
}

struct RodioPlayer {
    bytes: Vec<u8>,
    sink: Option<Arc<Sink>>,
    stop: Option<mpsc::Sender<()>>,
    thread: Option<JoinHandle<()>>,
}

impl PlaybackHandle for RodioPlayer {
    fn toggle(&mut self) -> Result<bool, PlaybackError> {
        let sink = self.sink.as_ref().ok_or(PlaybackError::Released)?;

        if sink.empty() {
            // Nothing queued: first play, or the clip ran to its end
            let source = Decoder::new(Cursor::new(self.bytes.clone()))
                .map_err(|e| PlaybackError::LoadFailed(e.to_string()))?;
            sink.append(source);
            sink.play();
            return Ok(true);
        }

        if sink.is_paused() {
            sink.play();
            Ok(true)
        } else {
            sink.pause();
            Ok(false)
        }
    }

    fn is_playing(&self) -> bool {
        self.sink
            .as_ref()
            .map(|sink| !sink.empty() && !sink.is_paused())
            .unwrap_or(false)
    }

    fn release(&mut self) {
        if let Some(sink) = self.sink.take() {
            sink.stop();
        }
        self.stop.take();
        if let Some(thread) = self.thread.take() {
            if thread.join().is_err() {
                warn!("playback thread panicked");
            }
        }
    }
}

impl Drop for RodioPlayer {
    fn drop(&mut self) {
        self.release();
    }
}

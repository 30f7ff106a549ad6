//! In-memory port implementations shared by the application tests

use std::collections::HashMap;
use std::path::PathBuf;
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

use async_trait::async_trait;

use super::ports::{
    AudioPlayback, CaptureError, ClipStore, ClipStoreError, MicStream, Microphone, PlaybackError,
    PlaybackHandle, RecommendationError, SampleSink, SongRecommender,
};
use crate::domain::audio::AudioData;
use crate::domain::recommendation::Recommendation;
use crate::domain::recording::{AudioRef, RecordingId};
use crate::domain::session::VoiceSamples;

/// Counts streams so tests can assert nothing is left open
#[derive(Debug, Default)]
pub struct StreamCounter {
    pub opened: AtomicUsize,
    pub live: AtomicUsize,
    /// Thread the most recent stream was closed on
    pub closed_on: Mutex<Option<std::thread::ThreadId>>,
}

impl StreamCounter {
    pub fn opened(&self) -> usize {
        self.opened.load(Ordering::SeqCst)
    }

    pub fn live(&self) -> usize {
        self.live.load(Ordering::SeqCst)
    }

    pub fn closed_on(&self) -> Option<std::thread::ThreadId> {
        *self.closed_on.lock().unwrap()
    }
}

/// Microphone that "hears" a fixed block of samples on every open
pub struct FakeMicrophone {
    pub counter: Arc<StreamCounter>,
    pub samples: Vec<i16>,
    pub sample_rate: u32,
    pub fail_with: Mutex<Option<CaptureError>>,
}

impl FakeMicrophone {
    pub fn new(samples: Vec<i16>) -> Self {
        Self {
            counter: Arc::new(StreamCounter::default()),
            samples,
            sample_rate: 8000,
            fail_with: Mutex::new(None),
        }
    }

    /// Make the next `open` fail once
    pub fn fail_next(&self, err: CaptureError) {
        *self.fail_with.lock().unwrap() = Some(err);
    }
}

struct FakeStream {
    counter: Arc<StreamCounter>,
    sample_rate: u32,
    open: bool,
}

impl MicStream for FakeStream {
    fn sample_rate(&self) -> u32 {
        self.sample_rate
    }

    fn close(&mut self) {
        if self.open {
            self.open = false;
            self.counter.live.fetch_sub(1, Ordering::SeqCst);
            *self.counter.closed_on.lock().unwrap() = Some(std::thread::current().id());
        }
    }

    fn is_open(&self) -> bool {
        self.open
    }
}

impl Drop for FakeStream {
    fn drop(&mut self) {
        self.close();
    }
}

#[async_trait]
impl Microphone for FakeMicrophone {
    async fn open(&self, sink: SampleSink) -> Result<Box<dyn MicStream>, CaptureError> {
        if let Some(err) = self.fail_with.lock().unwrap().take() {
            return Err(err);
        }
        self.counter.opened.fetch_add(1, Ordering::SeqCst);
        self.counter.live.fetch_add(1, Ordering::SeqCst);
        sink.push(&self.samples);
        Ok(Box::new(FakeStream {
            counter: Arc::clone(&self.counter),
            sample_rate: self.sample_rate,
            open: true,
        }))
    }
}

/// Clip store keeping bytes in a map keyed by a fake path
#[derive(Default)]
pub struct MemoryClipStore {
    pub clips: Mutex<HashMap<AudioRef, Vec<u8>>>,
    pub revoked: AtomicUsize,
}

impl MemoryClipStore {
    pub fn live(&self) -> usize {
        self.clips.lock().unwrap().len()
    }
}

#[async_trait]
impl ClipStore for MemoryClipStore {
    async fn publish(&self, id: RecordingId, audio: &AudioData) -> Result<AudioRef, ClipStoreError> {
        let reference = AudioRef::new(PathBuf::from(format!("/memory/{}.wav", id)));
        self.clips
            .lock()
            .unwrap()
            .insert(reference.clone(), audio.data().to_vec());
        Ok(reference)
    }

    async fn revoke(&self, reference: &AudioRef) -> Result<(), ClipStoreError> {
        if self.clips.lock().unwrap().remove(reference).is_some() {
            self.revoked.fetch_add(1, Ordering::SeqCst);
        }
        Ok(())
    }
}

/// Recommender returning a canned outcome and remembering what it was sent
pub struct FakeRecommender {
    pub outcome: Result<Vec<Recommendation>, RecommendationError>,
    pub received: Mutex<Vec<VoiceSamples>>,
}

impl FakeRecommender {
    pub fn ok(recommendations: Vec<Recommendation>) -> Self {
        Self {
            outcome: Ok(recommendations),
            received: Mutex::new(Vec::new()),
        }
    }

    pub fn failing(err: RecommendationError) -> Self {
        Self {
            outcome: Err(err),
            received: Mutex::new(Vec::new()),
        }
    }
}

#[async_trait]
impl SongRecommender for FakeRecommender {
    async fn recommend(
        &self,
        samples: &VoiceSamples,
    ) -> Result<Vec<Recommendation>, RecommendationError> {
        self.received.lock().unwrap().push(samples.clone());
        self.outcome.clone()
    }
}

/// Playback backend counting live players
#[derive(Default)]
pub struct FakePlayback {
    pub loads: AtomicUsize,
    pub live: Arc<AtomicUsize>,
    pub unavailable: AtomicBool,
    /// Every loaded player refuses to toggle while set
    pub stuck: Arc<AtomicBool>,
}

impl FakePlayback {
    pub fn loads(&self) -> usize {
        self.loads.load(Ordering::SeqCst)
    }

    pub fn live(&self) -> usize {
        self.live.load(Ordering::SeqCst)
    }
}

struct FakePlayer {
    live: Arc<AtomicUsize>,
    stuck: Arc<AtomicBool>,
    playing: bool,
    released: bool,
}

impl PlaybackHandle for FakePlayer {
    fn toggle(&mut self) -> Result<bool, PlaybackError> {
        if self.released {
            return Err(PlaybackError::Released);
        }
        if self.stuck.load(Ordering::SeqCst) {
            return Err(PlaybackError::DeviceUnavailable("stuck".into()));
        }
        self.playing = !self.playing;
        Ok(self.playing)
    }

    fn is_playing(&self) -> bool {
        self.playing
    }

    fn release(&mut self) {
        if !self.released {
            self.released = true;
            self.playing = false;
            self.live.fetch_sub(1, Ordering::SeqCst);
        }
    }
}

impl Drop for FakePlayer {
    fn drop(&mut self) {
        self.release();
    }
}

impl AudioPlayback for FakePlayback {
    fn load(&self, _reference: &AudioRef) -> Result<Box<dyn PlaybackHandle>, PlaybackError> {
        if self.unavailable.load(Ordering::SeqCst) {
            return Err(PlaybackError::DeviceUnavailable("no output".into()));
        }
        self.loads.fetch_add(1, Ordering::SeqCst);
        self.live.fetch_add(1, Ordering::SeqCst);
        Ok(Box::new(FakePlayer {
            live: Arc::clone(&self.live),
            stuck: Arc::clone(&self.stuck),
            playing: false,
            released: false,
        }))
    }
}

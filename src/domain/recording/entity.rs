//! Recording entity and its identity/reference value objects

use std::fmt;
use std::path::{Path, PathBuf};

use chrono::{DateTime, Datelike, Local, Timelike};
use uuid::Uuid;

use crate::domain::audio::AudioData;

/// Opaque identifier, unique within a session
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct RecordingId(Uuid);

impl RecordingId {
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }

    /// Short form used in clip file names and log lines
    pub fn short(&self) -> String {
        self.0.simple().to_string()[..8].to_string()
    }
}

impl Default for RecordingId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for RecordingId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0.simple())
    }
}

/// Playable reference to a clip: a WAV file that lives as long as the session
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct AudioRef(PathBuf);

impl AudioRef {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self(path.into())
    }

    pub fn path(&self) -> &Path {
        &self.0
    }
}

impl fmt::Display for AudioRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "file://{}", self.0.display())
    }
}

/// Wall-clock time a capture cycle completed
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub struct CaptureTimestamp(DateTime<Local>);

impl CaptureTimestamp {
    pub fn now() -> Self {
        Self(Local::now())
    }

    pub fn from_datetime(at: DateTime<Local>) -> Self {
        Self(at)
    }

    pub fn as_datetime(&self) -> DateTime<Local> {
        self.0
    }
}

impl fmt::Display for CaptureTimestamp {
    /// `YYYY/M/D H:M:S`, no zero padding
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let t = &self.0;
        write!(
            f,
            "{}/{}/{} {}:{}:{}",
            t.year(),
            t.month(),
            t.day(),
            t.hour(),
            t.minute(),
            t.second()
        )
    }
}

/// One completed capture cycle.
///
/// Immutable once created; owned by the session list.
#[derive(Debug, Clone)]
pub struct Recording {
    id: RecordingId,
    reference: AudioRef,
    audio: AudioData,
    captured_at: CaptureTimestamp,
}

impl Recording {
    pub fn new(
        id: RecordingId,
        reference: AudioRef,
        audio: AudioData,
        captured_at: CaptureTimestamp,
    ) -> Self {
        Self {
            id,
            reference,
            audio,
            captured_at,
        }
    }

    pub fn id(&self) -> RecordingId {
        self.id
    }

    pub fn reference(&self) -> &AudioRef {
        &self.reference
    }

    pub fn audio(&self) -> &AudioData {
        &self.audio
    }

    pub fn captured_at(&self) -> CaptureTimestamp {
        self.captured_at
    }
}

//! Audio data value object

use std::time::Duration;

use super::wav::{self, PcmClip};
use crate::domain::error::AudioCodecError;

/// MIME type of every clip the application produces
pub const WAV_MIME_TYPE: &str = "audio/wav";

/// Encoded clip bytes plus the facts about them the UI needs.
///
/// The bytes are a complete WAV file and are sent to the service unchanged.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AudioData {
    data: Vec<u8>,
    sample_rate: u32,
    frames: usize,
}

impl AudioData {
    /// Encode mono PCM samples as a WAV clip
    pub fn from_pcm(clip: &PcmClip) -> Result<Self, AudioCodecError> {
        let data = wav::encode(clip)?;
        Ok(Self {
            data,
            sample_rate: clip.sample_rate,
            frames: clip.samples.len(),
        })
    }

    /// Wrap existing WAV bytes, reading the header for metadata
    pub fn from_wav_bytes(data: Vec<u8>) -> Result<Self, AudioCodecError> {
        let clip = wav::decode(&data)?;
        Ok(Self {
            sample_rate: clip.sample_rate,
            frames: clip.samples.len(),
            data,
        })
    }

    pub fn data(&self) -> &[u8] {
        &self.data
    }

    pub fn into_data(self) -> Vec<u8> {
        self.data
    }

    pub fn mime_type(&self) -> &'static str {
        WAV_MIME_TYPE
    }

    pub fn sample_rate(&self) -> u32 {
        self.sample_rate
    }

    /// Playback length of the clip
    pub fn duration(&self) -> Duration {
        if self.sample_rate == 0 {
            return Duration::ZERO;
        }
        Duration::from_secs_f64(self.frames as f64 / self.sample_rate as f64)
    }

    pub fn size_bytes(&self) -> usize {
        self.data.len()
    }

    pub fn human_readable_size(&self) -> String {
        let bytes = self.size_bytes();
        if bytes < 1024 {
            format!("{} B", bytes)
        } else if bytes < 1024 * 1024 {
            format!("{:.1} KB", bytes as f64 / 1024.0)
        } else {
            format!("{:.1} MB", bytes as f64 / (1024.0 * 1024.0))
        }
    }
}

//! Rodio audio cues: short synthesized chimes

use std::time::Duration;

use async_trait::async_trait;
use rodio::source::{SineWave, Source};
use rodio::{OutputStream, Sink};

use crate::application::ports::{AudioCue, AudioCueError, AudioCueType};

const AMP: f32 = 0.3;

// (frequency Hz, duration ms)
const START_NOTES: [(f32, u64); 2] = [(523.0, 80), (659.0, 120)];
const STOP_NOTES: [(f32, u64); 2] = [(659.0, 80), (523.0, 120)];
const RESULT_NOTES: [(f32, u64); 3] = [(523.0, 70), (659.0, 70), (784.0, 140)];

#[derive(Debug, Default, Clone, Copy)]
pub struct RodioAudioCue;

impl RodioAudioCue {
    pub fn new() -> Self {
        Self
    }
}

#[async_trait]
impl AudioCue for RodioAudioCue {
    async fn play(&self, cue_type: AudioCueType) -> Result<(), AudioCueError> {
        tokio::task::spawn_blocking(move || play_blocking(cue_type))
            .await
            .map_err(|e| AudioCueError::PlaybackFailed(format!("Task join error: {}", e)))?
    }
}

fn notes(cue_type: AudioCueType) -> &'static [(f32, u64)] {
    match cue_type {
        AudioCueType::CaptureStart => &START_NOTES,
        AudioCueType::CaptureStop => &STOP_NOTES,
        AudioCueType::ResultsReady => &RESULT_NOTES,
    }
}

/// Sine tone with a short fade in
fn tone(freq: f32, duration_ms: u64) -> impl Source<Item = f32> + Send {
    let fade_ms = (duration_ms / 5).min(30);
    SineWave::new(freq)
        .take_duration(Duration::from_millis(duration_ms))
        .fade_in(Duration::from_millis(fade_ms))
        .amplify(AMP)
}

fn play_blocking(cue_type: AudioCueType) -> Result<(), AudioCueError> {
    let (_stream, handle) =
        OutputStream::try_default().map_err(|e| AudioCueError::DeviceNotAvailable(e.to_string()))?;
    let sink = Sink::try_new(&handle).map_err(|e| AudioCueError::PlaybackFailed(e.to_string()))?;

    for &(freq, ms) in notes(cue_type) {
        sink.append(tone(freq, ms));
    }
    sink.sleep_until_end();
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn start_and_stop_mirror_each_other() {
        let start: Vec<_> = notes(AudioCueType::CaptureStart).iter().map(|n| n.0).collect();
        let mut stop: Vec<_> = notes(AudioCueType::CaptureStop).iter().map(|n| n.0).collect();
        stop.reverse();
        assert_eq!(start, stop);
    }

    #[tokio::test]
    #[ignore = "Requires audio hardware"]
    async fn plays_results_cue() {
        assert!(RodioAudioCue::new().play(AudioCueType::ResultsReady).await.is_ok());
    }
}

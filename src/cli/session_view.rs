//! Plain-text views of the session and its results
//!
//! Pure functions of session state; the presenter adds color and decides
//! where each line goes.

use crate::domain::recording::{Recording, SampleSlot};
use crate::domain::session::SessionState;

pub const LOADING_TEXT: &str = "Finding songs that match your voice...";
pub const EMPTY_RESULT_TEXT: &str = "The service returned no recommendations.";

/// One row of the recording list: position, label, capture time, waveform
pub fn recording_line(index: usize, recording: &Recording, waveform: &str) -> String {
    let label = SampleSlot::from_index(index)
        .map(|slot| slot.label())
        .unwrap_or("Sample");
    format!(
        "{}. {:<14} {}  {}",
        index + 1,
        label,
        recording.captured_at(),
        waveform
    )
}

/// What the user should do next, or `None` while a request is in flight
pub fn next_step(state: &SessionState, capturing: bool) -> Option<String> {
    match state {
        SessionState::Capturing { next } if capturing => Some(format!(
            "Recording {} - press Enter to stop",
            next.label().to_lowercase()
        )),
        SessionState::Capturing { next } => Some(format!(
            "[{}/{}] {}, then press Enter to start recording",
            next.index() + 1,
            SampleSlot::COUNT,
            next.prompt()
        )),
        SessionState::ReadyToSubmit => {
            Some("All three samples recorded. Type 's' to submit them.".to_string())
        }
        SessionState::Submitting => None,
        SessionState::ResultShown(_) | SessionState::Error(_) => {
            Some("Type 'n' for a new session or 'q' to quit.".to_string())
        }
    }
}

/// The result view: loading line, numbered list, empty notice or error
pub fn result_lines(state: &SessionState) -> Vec<String> {
    match state {
        SessionState::Submitting => vec![LOADING_TEXT.to_string()],
        SessionState::ResultShown(songs) if songs.is_empty() => {
            vec![EMPTY_RESULT_TEXT.to_string()]
        }
        SessionState::ResultShown(songs) => songs
            .iter()
            .enumerate()
            .map(|(i, song)| format!("{:>2}. {}", i + 1, song))
            .collect(),
        SessionState::Error(message) => vec![message.clone()],
        _ => Vec::new(),
    }
}

/// Elapsed/limit line shown while a capture runs
pub fn capture_progress(elapsed_ms: u64, limit_ms: u64) -> String {
    let elapsed = elapsed_ms.min(limit_ms);
    format!("{}.{}s / {}s", elapsed / 1000, (elapsed % 1000) / 100, limit_ms / 1000)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::audio::{AudioData, PcmClip};
    use crate::domain::recommendation::Recommendation;
    use crate::domain::recording::{AudioRef, CaptureTimestamp, RecordingId};
    use chrono::{Local, TimeZone};

    fn recording() -> Recording {
        let audio = AudioData::from_pcm(&PcmClip {
            samples: vec![1, 2, 3],
            sample_rate: 8000,
        })
        .unwrap();
        let at = Local.with_ymd_and_hms(2024, 3, 5, 9, 7, 2).unwrap();
        Recording::new(
            RecordingId::new(),
            AudioRef::new("/tmp/a.wav"),
            audio,
            CaptureTimestamp::from_datetime(at),
        )
    }

    #[test]
    fn recording_line_has_label_and_unpadded_time() {
        let line = recording_line(1, &recording(), "▁▂▃ [Play]");
        assert!(line.starts_with("2. Lowest voice"));
        assert!(line.contains("2024/3/5 9:7:2"));
        assert!(line.ends_with("▁▂▃ [Play]"));
    }

    #[test]
    fn next_step_follows_slot() {
        let state = SessionState::Capturing {
            next: SampleSlot::Normal,
        };
        let idle = next_step(&state, false).unwrap();
        assert!(idle.starts_with("[3/3]"));
        assert!(idle.contains(SampleSlot::Normal.prompt()));

        let busy = next_step(&state, true).unwrap();
        assert!(busy.contains("press Enter to stop"));
    }

    #[test]
    fn next_step_offers_submit_then_nothing() {
        assert!(next_step(&SessionState::ReadyToSubmit, false)
            .unwrap()
            .contains("'s'"));
        assert!(next_step(&SessionState::Submitting, false).is_none());
    }

    #[test]
    fn loading_line_while_submitting() {
        assert_eq!(result_lines(&SessionState::Submitting), vec![LOADING_TEXT]);
    }

    #[test]
    fn results_are_numbered_in_order() {
        let state = SessionState::ResultShown(vec![
            Recommendation::new("A", "X"),
            Recommendation::new("B", "Y"),
        ]);
        assert_eq!(result_lines(&state), vec![" 1. A - X", " 2. B - Y"]);
    }

    #[test]
    fn empty_results_say_so() {
        let state = SessionState::ResultShown(Vec::new());
        assert_eq!(result_lines(&state), vec![EMPTY_RESULT_TEXT]);
    }

    #[test]
    fn error_shows_message() {
        let state = SessionState::Error("Request failed: timeout".into());
        assert_eq!(result_lines(&state), vec!["Request failed: timeout"]);
    }

    #[test]
    fn nothing_before_submission() {
        assert!(result_lines(&SessionState::ReadyToSubmit).is_empty());
    }

    #[test]
    fn progress_is_clamped_to_limit() {
        assert_eq!(capture_progress(2_345, 15_000), "2.3s / 15s");
        assert_eq!(capture_progress(20_000, 15_000), "15.0s / 15s");
    }
}

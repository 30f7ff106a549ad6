//! Interactive session runner

use std::env;
use std::process::ExitCode;
use std::sync::Arc;
use std::time::Duration as StdDuration;

use tokio::time::timeout;
use tracing::{debug, warn};

use crate::application::ports::{
    AudioCue, AudioCueType, AudioPlayback, ConfigStore, Microphone, SongRecommender,
};
use crate::application::{RecordingSessionUseCase, WaveformDisplay};
use crate::domain::config::AppConfig;
use crate::domain::session::SessionState;
use crate::domain::waveform::DEFAULT_BINS;
use crate::infrastructure::{
    create_audio_cue, CpalMicrophone, HttpRecommender, RodioPlayback, TempClipStore,
    XdgConfigStore,
};

use super::args::SessionOptions;
use super::events::{SessionEvent, SessionEvents};
use super::input::{UserCommand, HELP_TEXT};
use super::presenter::Presenter;
use super::session_view;

/// Exit codes
pub const EXIT_SUCCESS: u8 = 0;
pub const EXIT_ERROR: u8 = 1;
pub const EXIT_USAGE_ERROR: u8 = 2;

/// Environment variable overriding the configured endpoint
pub const ENDPOINT_ENV: &str = "VOICE_SAMPLER_ENDPOINT";

/// How often the capture progress line refreshes
const PROGRESS_TICK: StdDuration = StdDuration::from_millis(200);

/// Run one interactive session against the real devices and service
pub async fn run_session(options: SessionOptions) -> ExitCode {
    let mut presenter = Presenter::new();

    let recommender = match HttpRecommender::new(&options.endpoint) {
        Ok(r) => r,
        Err(e) => {
            presenter.error(&e.to_string());
            return ExitCode::from(EXIT_USAGE_ERROR);
        }
    };
    let clips = match TempClipStore::new() {
        Ok(store) => Arc::new(store),
        Err(e) => {
            presenter.error(&e.to_string());
            return ExitCode::from(EXIT_ERROR);
        }
    };

    let use_case = RecordingSessionUseCase::new(CpalMicrophone::new(), recommender, clips);
    let mut screen = Screen {
        use_case,
        playback: Arc::new(RodioPlayback::new()),
        cue: create_audio_cue(options.audio_cues),
        displays: Vec::new(),
        options,
    };

    presenter.heading("voice-sampler");
    presenter.info(&format!("Service: {}", screen.options.endpoint));
    presenter.output(HELP_TEXT);
    screen.show_next_step(&presenter);

    let mut events = SessionEvents::start();
    screen.run(&mut events, &mut presenter).await;

    screen.close().await;
    ExitCode::from(EXIT_SUCCESS)
}

/// Session use case plus one waveform display per recording
struct Screen<M, R>
where
    M: Microphone,
    R: SongRecommender,
{
    use_case: RecordingSessionUseCase<M, R>,
    playback: Arc<dyn AudioPlayback>,
    cue: Box<dyn AudioCue>,
    displays: Vec<Option<WaveformDisplay>>,
    options: SessionOptions,
}

enum Flow {
    Continue,
    Quit,
}

impl<M, R> Screen<M, R>
where
    M: Microphone,
    R: SongRecommender,
{
    /// Event loop; returns when the user quits, interrupts or closes stdin
    async fn run(&mut self, events: &mut SessionEvents, presenter: &mut Presenter) {
        let limit_ms = self.options.max_duration.as_millis();

        loop {
            let event = if self.use_case.is_capturing() {
                let elapsed_ms = self
                    .use_case
                    .capture_elapsed()
                    .map(|d| d.as_millis() as u64)
                    .unwrap_or(0);
                let remaining_ms = limit_ms.saturating_sub(elapsed_ms);
                if remaining_ms == 0 {
                    presenter.warn("Capture limit reached, stopping");
                    self.stop_capture(presenter).await;
                    continue;
                }

                let wait = PROGRESS_TICK.min(StdDuration::from_millis(remaining_ms));
                match timeout(wait, events.recv()).await {
                    Ok(event) => event,
                    Err(_) => {
                        presenter.update_spinner(&format!(
                            "Recording... {}",
                            session_view::capture_progress(elapsed_ms, limit_ms)
                        ));
                        continue;
                    }
                }
            } else {
                events.recv().await
            };

            let flow = match event {
                Some(SessionEvent::Command(command)) => self.handle(command, presenter).await,
                Some(SessionEvent::Unknown(unknown)) => {
                    presenter.warn(&unknown.to_string());
                    Flow::Continue
                }
                Some(SessionEvent::Interrupt) => {
                    presenter.stop_spinner();
                    presenter.info("Interrupted");
                    return;
                }
                Some(SessionEvent::InputClosed) | None => {
                    presenter.stop_spinner();
                    debug!("input closed");
                    return;
                }
            };

            if let Flow::Quit = flow {
                return;
            }
        }
    }

    async fn handle(&mut self, command: UserCommand, presenter: &mut Presenter) -> Flow {
        match command {
            UserCommand::Record => {
                if self.use_case.is_capturing() {
                    self.stop_capture(presenter).await;
                } else {
                    self.start_capture(presenter).await;
                }
            }
            UserCommand::Play(n) => self.toggle_playback(n, presenter),
            UserCommand::List => {
                presenter.recordings(&self.recording_lines());
                self.show_next_step(presenter);
            }
            UserCommand::Submit => self.submit(presenter).await,
            UserCommand::NewSession => self.restart(presenter).await,
            UserCommand::Help => presenter.output(HELP_TEXT),
            UserCommand::Quit => {
                if self.use_case.is_capturing() {
                    presenter.stop_spinner();
                }
                return Flow::Quit;
            }
        }
        Flow::Continue
    }

    async fn start_capture(&mut self, presenter: &mut Presenter) {
        if !self.use_case.state().is_capturing() {
            presenter.warn("All three samples are recorded.");
            self.show_next_step(presenter);
            return;
        }

        self.play_cue(AudioCueType::CaptureStart).await;
        match self.use_case.start_capture().await {
            Ok(slot) => {
                presenter.start_spinner(&format!("Recording {}...", slot.label().to_lowercase()));
            }
            Err(_) => {
                let message = self.use_case.capture_error().unwrap_or("Capture failed");
                presenter.error(message);
                presenter.info("Press Enter to try again.");
            }
        }
    }

    async fn stop_capture(&mut self, presenter: &mut Presenter) {
        let result = self.use_case.stop_capture().await;
        self.play_cue(AudioCueType::CaptureStop).await;

        match result {
            Ok(Some(slot)) => {
                presenter.spinner_success(&format!("{} recorded", slot.label()));
                self.attach_display(presenter);
                presenter.recordings(&self.recording_lines());
            }
            Ok(None) => presenter.stop_spinner(),
            Err(e) => {
                presenter.spinner_fail(&e.to_string());
                presenter.info("Press Enter to record this sample again.");
            }
        }
        self.show_next_step(presenter);
    }

    /// Bind a display to the newest recording
    fn attach_display(&mut self, presenter: &Presenter) {
        let Some(recording) = self.use_case.recordings().last() else {
            return;
        };
        let display = match WaveformDisplay::new(
            recording.reference(),
            Arc::clone(&self.playback),
            DEFAULT_BINS,
        ) {
            Ok(display) => Some(display),
            Err(e) => {
                presenter.warn(&format!("Waveform unavailable: {}", e));
                None
            }
        };
        self.displays.push(display);
    }

    fn toggle_playback(&mut self, n: usize, presenter: &Presenter) {
        let count = self.use_case.recordings().len();
        if n == 0 || n > count {
            presenter.warn(&format!("No recording {} (have {})", n, count));
            return;
        }

        // Only one clip plays at a time
        pause_playing(&mut self.displays, Some(n - 1));

        match self.displays.get_mut(n - 1).and_then(|d| d.as_mut()) {
            Some(display) => {
                if let Err(e) = display.toggle() {
                    presenter.warn(&e.to_string());
                }
            }
            None => presenter.warn("Playback is not available for this recording"),
        }
        presenter.recordings(&self.recording_lines());
    }

    async fn submit(&mut self, presenter: &mut Presenter) {
        if *self.use_case.state() != SessionState::ReadyToSubmit {
            presenter.warn("Record all three samples before submitting.");
            self.show_next_step(presenter);
            return;
        }

        self.pause_all();
        presenter.start_spinner(session_view::LOADING_TEXT);
        match self.use_case.submit().await {
            Ok(()) => {
                presenter.spinner_success("Recommendations received");
                self.play_cue(AudioCueType::ResultsReady).await;
            }
            Err(e) => {
                debug!(error = %e, "submit failed");
                presenter.spinner_fail("Submission failed");
            }
        }
        presenter.results(self.use_case.state());
        self.show_next_step(presenter);
    }

    async fn restart(&mut self, presenter: &mut Presenter) {
        if !self.use_case.state().is_finished() {
            presenter.warn("A new session can be started once results or an error are shown.");
            self.show_next_step(presenter);
            return;
        }

        self.release_displays();
        match self.use_case.restart().await {
            Ok(()) => presenter.success("New session started"),
            Err(e) => presenter.error(&e.to_string()),
        }
        self.show_next_step(presenter);
    }

    fn recording_lines(&self) -> Vec<String> {
        let width = self.options.waveform_width as usize;
        self.use_case
            .recordings()
            .iter()
            .enumerate()
            .map(|(i, recording)| {
                let waveform = self
                    .displays
                    .get(i)
                    .and_then(|d| d.as_ref())
                    .map(|d| d.render(width))
                    .unwrap_or_else(|| "(no waveform)".to_string());
                session_view::recording_line(i, recording, &waveform)
            })
            .collect()
    }

    fn show_next_step(&self, presenter: &Presenter) {
        if let Some(step) = session_view::next_step(self.use_case.state(), self.use_case.is_capturing()) {
            presenter.info(&step);
        }
    }

    fn pause_all(&mut self) {
        pause_playing(&mut self.displays, None);
    }

    fn release_displays(&mut self) {
        for display in self.displays.iter_mut().flatten() {
            display.release();
        }
        self.displays.clear();
    }

    async fn play_cue(&self, cue_type: AudioCueType) {
        if let Err(e) = self.cue.play(cue_type).await {
            warn!(?cue_type, error = %e, "audio cue failed");
        }
    }

    async fn close(&mut self) {
        self.release_displays();
        self.use_case.teardown().await;
    }
}

/// Pause every playing display except `keep`; returns how many refused
fn pause_playing(displays: &mut [Option<WaveformDisplay>], keep: Option<usize>) -> usize {
    let mut failed = 0;
    for (i, slot) in displays.iter_mut().enumerate() {
        let Some(display) = slot else { continue };
        if Some(i) == keep || !display.is_playing() {
            continue;
        }
        if let Err(e) = display.toggle() {
            warn!(recording = i + 1, error = %e, "failed to pause playback");
            failed += 1;
        }
    }
    failed
}

/// Load and merge configuration from file, env, and CLI
pub async fn load_merged_config(cli_config: AppConfig) -> AppConfig {
    let store = XdgConfigStore::new();
    let file_config = store.load_or_empty().await;
    merge_config(file_config, env_config(), cli_config)
}

fn env_config() -> AppConfig {
    AppConfig {
        endpoint: env::var(ENDPOINT_ENV).ok().filter(|s| !s.is_empty()),
        ..Default::default()
    }
}

/// defaults < file < env < cli
fn merge_config(file: AppConfig, env: AppConfig, cli: AppConfig) -> AppConfig {
    AppConfig::defaults().merge(file).merge(env).merge(cli)
}

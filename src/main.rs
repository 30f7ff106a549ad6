//! voice-sampler CLI entry point

use std::process::ExitCode;

use clap::Parser;
use tracing_subscriber::EnvFilter;

use voice_sampler::cli::{
    app::{load_merged_config, run_session, EXIT_ERROR, EXIT_USAGE_ERROR},
    args::{Cli, Commands, SessionOptions},
    config_cmd::handle_config_command,
    presenter::Presenter,
};
use voice_sampler::domain::config::AppConfig;
use voice_sampler::infrastructure::XdgConfigStore;

/// Diagnostics go to stderr; `RUST_LOG` wins over `-v`
fn init_tracing(verbose: u8) {
    let default_level = match verbose {
        0 => "warn",
        1 => "debug",
        _ => "trace",
    };
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(format!("voice_sampler={}", default_level)));

    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .try_init();
}

#[tokio::main(flavor = "multi_thread", worker_threads = 2)]
async fn main() -> ExitCode {
    let cli = Cli::parse();
    init_tracing(cli.verbose);
    let presenter = Presenter::new();

    if let Some(Commands::Config { action }) = cli.command {
        let store = XdgConfigStore::new();
        if let Err(e) = handle_config_command(action, &store, &presenter).await {
            presenter.error(&e.to_string());
            return ExitCode::from(EXIT_ERROR);
        }
        return ExitCode::SUCCESS;
    }

    let cli_config = AppConfig {
        endpoint: cli.endpoint.clone(),
        max_duration: cli.max_duration.clone(),
        audio_cues: if cli.cues { Some(true) } else { None },
        waveform_width: cli.width,
    };
    let config = load_merged_config(cli_config).await;

    let max_duration = match config.max_duration_or_default() {
        Ok(d) => d,
        Err(e) => {
            presenter.error(&format!("Invalid max-duration: {}", e));
            return ExitCode::from(EXIT_USAGE_ERROR);
        }
    };

    let options = SessionOptions {
        endpoint: config.endpoint_or_default().to_string(),
        max_duration,
        audio_cues: config.audio_cues_or_default(),
        waveform_width: config.waveform_width_or_default(),
    };

    run_session(options).await
}

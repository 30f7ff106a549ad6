//! CLI argument definitions using Clap

use clap::{ArgAction, Parser, Subcommand};

use crate::domain::recording::Duration;

/// voice-sampler - record your vocal range, get song recommendations
#[derive(Parser, Debug)]
#[command(name = "voice-sampler")]
#[command(version)]
#[command(about = "Record three voice samples and get song recommendations for your range")]
#[command(long_about = None)]
pub struct Cli {
    /// Recommendation service URL
    #[arg(short = 'e', long, value_name = "URL")]
    pub endpoint: Option<String>,

    /// Auto-stop each capture after this long (e.g., 10s, 1m, 1m30s)
    #[arg(short = 'm', long, value_name = "TIME")]
    pub max_duration: Option<String>,

    /// Play a chime when capture starts and stops
    #[arg(short = 'c', long)]
    pub cues: bool,

    /// Waveform width in terminal columns
    #[arg(short = 'w', long, value_name = "COLUMNS")]
    pub width: Option<u16>,

    /// Diagnostic logging on stderr (-v debug, -vv trace)
    #[arg(short = 'v', long, action = ArgAction::Count)]
    pub verbose: u8,

    /// Config subcommand
    #[command(subcommand)]
    pub command: Option<Commands>,
}

/// Subcommands
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Manage configuration
    Config {
        #[command(subcommand)]
        action: ConfigAction,
    },
}

/// Config action subcommands
#[derive(Subcommand, Debug)]
pub enum ConfigAction {
    /// Create config file with defaults
    Init,
    /// Set a config value
    Set {
        /// Config key
        key: String,
        /// Config value
        value: String,
    },
    /// Get a config value
    Get {
        /// Config key
        key: String,
    },
    /// List all config values
    List,
    /// Show config file path
    Path,
}

/// Resolved options for an interactive session
#[derive(Debug, Clone)]
pub struct SessionOptions {
    pub endpoint: String,
    pub max_duration: Duration,
    pub audio_cues: bool,
    pub waveform_width: u16,
}

pub const VALID_CONFIG_KEYS: &[&str] = &["endpoint", "max_duration", "audio_cues", "waveform_width"];

pub fn is_valid_config_key(key: &str) -> bool {
    VALID_CONFIG_KEYS.contains(&key)
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn cli_parses_defaults() {
        let cli = Cli::parse_from(["voice-sampler"]);
        assert!(cli.endpoint.is_none());
        assert!(cli.max_duration.is_none());
        assert!(!cli.cues);
        assert!(cli.width.is_none());
        assert_eq!(cli.verbose, 0);
        assert!(cli.command.is_none());
    }

    #[test]
    fn cli_parses_session_flags() {
        let cli = Cli::parse_from([
            "voice-sampler",
            "--endpoint",
            "http://localhost:9000",
            "-m",
            "20s",
            "--cues",
            "-w",
            "64",
        ]);
        assert_eq!(cli.endpoint.as_deref(), Some("http://localhost:9000"));
        assert_eq!(cli.max_duration.as_deref(), Some("20s"));
        assert!(cli.cues);
        assert_eq!(cli.width, Some(64));
    }

    #[test]
    fn cli_counts_verbosity() {
        let cli = Cli::parse_from(["voice-sampler", "-vv"]);
        assert_eq!(cli.verbose, 2);
    }

    #[test]
    fn cli_rejects_non_numeric_width() {
        assert!(Cli::try_parse_from(["voice-sampler", "--width", "wide"]).is_err());
    }

    #[test]
    fn cli_parses_config_set() {
        let cli = Cli::parse_from(["voice-sampler", "config", "set", "endpoint", "http://x"]);
        if let Some(Commands::Config {
            action: ConfigAction::Set { key, value },
        }) = cli.command
        {
            assert_eq!(key, "endpoint");
            assert_eq!(value, "http://x");
        } else {
            panic!("Expected Config Set command");
        }
    }

    #[test]
    fn cli_parses_config_path() {
        let cli = Cli::parse_from(["voice-sampler", "config", "path"]);
        assert!(matches!(
            cli.command,
            Some(Commands::Config {
                action: ConfigAction::Path
            })
        ));
    }

    #[test]
    fn valid_config_keys() {
        assert!(is_valid_config_key("endpoint"));
        assert!(is_valid_config_key("waveform_width"));
        assert!(!is_valid_config_key("api_key"));
    }

    #[test]
    fn verify_cli() {
        Cli::command().debug_assert();
    }
}

//! CLI layer - Command-line interface
//!
//! Argument parsing, output formatting, the interactive session loop and
//! the `config` subcommand.

pub mod app;
pub mod args;
pub mod config_cmd;
pub mod events;
pub mod input;
pub mod presenter;
pub mod session_view;

// Re-export commonly used types
pub use app::{load_merged_config, run_session, EXIT_ERROR, EXIT_SUCCESS, EXIT_USAGE_ERROR};
pub use args::{Cli, Commands, ConfigAction, SessionOptions};
pub use presenter::Presenter;

//! Domain error types

use thiserror::Error;

/// Error when parsing a duration string
#[derive(Debug, Clone, Error)]
#[error("Invalid duration format: \"{input}\". Expected format: <number>s, <number>m, or <number>m<number>s (e.g., 15s, 1m, 1m30s)")]
pub struct DurationParseError {
    pub input: String,
}

/// Error when WAV bytes cannot be encoded or decoded
#[derive(Debug, Clone, Error)]
pub enum AudioCodecError {
    #[error("Failed to encode WAV: {0}")]
    Encode(String),

    #[error("Failed to decode WAV: {0}")]
    Decode(String),

    #[error("Unsupported WAV layout: {0}")]
    Unsupported(String),
}

/// Error when configuration fails
#[derive(Debug, Clone, Error)]
pub enum ConfigError {
    #[error("Failed to read config file: {0}")]
    ReadError(String),

    #[error("Failed to parse config file: {0}")]
    ParseError(String),

    #[error("Failed to write config file: {0}")]
    WriteError(String),

    #[error("Invalid config value for '{key}': {message}")]
    ValidationError { key: String, message: String },

    #[error("Config file already exists at: {0}")]
    AlreadyExists(String),
}

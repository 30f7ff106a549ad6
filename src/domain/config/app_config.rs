//! Application configuration value object

use serde::{Deserialize, Serialize};

use crate::domain::error::DurationParseError;
use crate::domain::recording::Duration;

/// Recommendation service used when nothing is configured
pub const DEFAULT_ENDPOINT: &str = "http://127.0.0.1:8000";

/// Terminal columns used for a waveform when nothing is configured
pub const DEFAULT_WAVEFORM_WIDTH: u16 = 48;

/// Application configuration.
/// All fields are optional to support partial configs and merging.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AppConfig {
    pub endpoint: Option<String>,
    pub max_duration: Option<String>,
    pub audio_cues: Option<bool>,
    pub waveform_width: Option<u16>,
}

impl AppConfig {
    /// Create config with default values
    pub fn defaults() -> Self {
        Self {
            endpoint: Some(DEFAULT_ENDPOINT.to_string()),
            max_duration: Some(Duration::default_capture_limit().to_string()),
            audio_cues: Some(false),
            waveform_width: Some(DEFAULT_WAVEFORM_WIDTH),
        }
    }

    /// Create an empty config (all None)
    pub fn empty() -> Self {
        Self::default()
    }

    /// Merge this config with another, where other takes precedence.
    /// Only non-None values from other will override this.
    pub fn merge(self, other: Self) -> Self {
        Self {
            endpoint: other.endpoint.or(self.endpoint),
            max_duration: other.max_duration.or(self.max_duration),
            audio_cues: other.audio_cues.or(self.audio_cues),
            waveform_width: other.waveform_width.or(self.waveform_width),
        }
    }

    pub fn endpoint_or_default(&self) -> &str {
        self.endpoint.as_deref().unwrap_or(DEFAULT_ENDPOINT)
    }

    /// Parsed max_duration, or the default capture limit if not set
    pub fn max_duration_or_default(&self) -> Result<Duration, DurationParseError> {
        match self.max_duration.as_deref() {
            Some(s) => s.parse(),
            None => Ok(Duration::default_capture_limit()),
        }
    }

    pub fn audio_cues_or_default(&self) -> bool {
        self.audio_cues.unwrap_or(false)
    }

    /// Waveform width in columns; zero falls back to the default
    pub fn waveform_width_or_default(&self) -> u16 {
        self.waveform_width
            .filter(|w| *w > 0)
            .unwrap_or(DEFAULT_WAVEFORM_WIDTH)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_have_expected_values() {
        let config = AppConfig::defaults();
        assert_eq!(config.endpoint.as_deref(), Some("http://127.0.0.1:8000"));
        assert_eq!(config.max_duration.as_deref(), Some("15s"));
        assert_eq!(config.audio_cues, Some(false));
        assert_eq!(config.waveform_width, Some(48));
    }

    #[test]
    fn empty_has_all_none() {
        let config = AppConfig::empty();
        assert!(config.endpoint.is_none());
        assert!(config.max_duration.is_none());
        assert!(config.audio_cues.is_none());
        assert!(config.waveform_width.is_none());
    }

    #[test]
    fn merge_other_takes_precedence() {
        let base = AppConfig {
            endpoint: Some("http://base:1".to_string()),
            max_duration: Some("10s".to_string()),
            ..Default::default()
        };
        let other = AppConfig {
            endpoint: Some("http://other:2".to_string()),
            max_duration: None,
            audio_cues: Some(true),
            ..Default::default()
        };

        let merged = base.merge(other);

        assert_eq!(merged.endpoint.as_deref(), Some("http://other:2"));
        assert_eq!(merged.max_duration.as_deref(), Some("10s"));
        assert_eq!(merged.audio_cues, Some(true));
    }

    #[test]
    fn layered_merge_order() {
        let file = AppConfig {
            endpoint: Some("http://file".to_string()),
            waveform_width: Some(30),
            ..Default::default()
        };
        let env = AppConfig {
            endpoint: Some("http://env".to_string()),
            ..Default::default()
        };
        let cli = AppConfig {
            waveform_width: Some(80),
            ..Default::default()
        };

        let merged = AppConfig::defaults().merge(file).merge(env).merge(cli);

        assert_eq!(merged.endpoint_or_default(), "http://env");
        assert_eq!(merged.waveform_width_or_default(), 80);
        assert_eq!(merged.max_duration_or_default().unwrap().as_secs(), 15);
    }

    #[test]
    fn invalid_max_duration_is_an_error() {
        let config = AppConfig {
            max_duration: Some("forever".to_string()),
            ..Default::default()
        };
        let err = config.max_duration_or_default().unwrap_err();
        assert!(err.to_string().contains("forever"));
    }

    #[test]
    fn unset_max_duration_uses_capture_limit() {
        assert_eq!(
            AppConfig::empty().max_duration_or_default().unwrap(),
            Duration::default_capture_limit()
        );
    }

    #[test]
    fn fallbacks_on_empty() {
        let config = AppConfig::empty();
        assert_eq!(config.endpoint_or_default(), DEFAULT_ENDPOINT);
        assert!(!config.audio_cues_or_default());
        assert_eq!(config.waveform_width_or_default(), DEFAULT_WAVEFORM_WIDTH);
    }

    #[test]
    fn zero_width_uses_default() {
        let config = AppConfig {
            waveform_width: Some(0),
            ..Default::default()
        };
        assert_eq!(config.waveform_width_or_default(), DEFAULT_WAVEFORM_WIDTH);
    }
}

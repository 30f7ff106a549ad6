//! Duration value object used for the capture limit

use std::fmt;
use std::str::FromStr;
use std::time::Duration as StdDuration;

use crate::domain::error::DurationParseError;

/// Default upper bound for a single capture cycle (15 seconds)
pub const DEFAULT_CAPTURE_LIMIT_SECS: u64 = 15;

/// A positive, whole-second time span.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub struct Duration {
    milliseconds: u64,
}

impl Duration {
    /// Saturates at `u64::MAX` milliseconds
    pub const fn from_secs(secs: u64) -> Self {
        Self {
            milliseconds: secs.saturating_mul(1000),
        }
    }

    /// Capture limit applied when none is configured
    pub const fn default_capture_limit() -> Self {
        Self::from_secs(DEFAULT_CAPTURE_LIMIT_SECS)
    }

    pub const fn as_secs(&self) -> u64 {
        self.milliseconds / 1000
    }

    pub const fn as_millis(&self) -> u64 {
        self.milliseconds
    }

    pub const fn as_std(&self) -> StdDuration {
        StdDuration::from_millis(self.milliseconds)
    }
}

impl FromStr for Duration {
    type Err = DurationParseError;

    /// Accepts "30s", "1m", "1m30s" (case-insensitive, surrounding whitespace ignored).
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let invalid = || DurationParseError {
            input: s.to_string(),
        };
        let input = s.trim().to_lowercase();

        let mut minutes: Option<u64> = None;
        let mut seconds: Option<u64> = None;
        let mut digits = String::new();

        for ch in input.chars() {
            match ch {
                '0'..='9' => digits.push(ch),
                'm' if !digits.is_empty() && minutes.is_none() && seconds.is_none() => {
                    minutes = Some(digits.parse().map_err(|_| invalid())?);
                    digits.clear();
                }
                's' if !digits.is_empty() && seconds.is_none() => {
                    seconds = Some(digits.parse().map_err(|_| invalid())?);
                    digits.clear();
                }
                _ => return Err(invalid()),
            }
        }

        if !digits.is_empty() || (minutes.is_none() && seconds.is_none()) {
            return Err(invalid());
        }

        let total_secs = minutes
            .unwrap_or(0)
            .checked_mul(60)
            .and_then(|m| m.checked_add(seconds.unwrap_or(0)))
            .ok_or_else(invalid)?;

        if total_secs == 0 {
            return Err(invalid());
        }

        let milliseconds = total_secs.checked_mul(1000).ok_or_else(invalid)?;
        Ok(Self { milliseconds })
    }
}

impl fmt::Display for Duration {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let total_secs = self.as_secs();
        let minutes = total_secs / 60;
        let seconds = total_secs % 60;

        match (minutes, seconds) {
            (0, s) => write!(f, "{}s", s),
            (m, 0) => write!(f, "{}m", m),
            (m, s) => write!(f, "{}m{}s", m, s),
        }
    }
}

impl Default for Duration {
    fn default() -> Self {
        Self::default_capture_limit()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_seconds_only() {
        let d: Duration = "30s".parse().unwrap();
        assert_eq!(d.as_secs(), 30);
        assert_eq!(d.as_millis(), 30000);
    }

    #[test]
    fn parse_minutes_and_seconds() {
        let d: Duration = "1m30s".parse().unwrap();
        assert_eq!(d.as_secs(), 90);
    }

    #[test]
    fn parse_ignores_case_and_whitespace() {
        let d: Duration = "  1M5S ".parse().unwrap();
        assert_eq!(d.as_secs(), 65);
    }

    #[test]
    fn parse_rejects_zero_and_garbage() {
        assert!("".parse::<Duration>().is_err());
        assert!("0s".parse::<Duration>().is_err());
        assert!("15".parse::<Duration>().is_err());
        assert!("15x".parse::<Duration>().is_err());
    }

    #[test]
    fn parse_rejects_repeated_units() {
        assert!("10s5s".parse::<Duration>().is_err());
        assert!("5s1m".parse::<Duration>().is_err());
    }

    #[test]
    fn parse_rejects_overflowing_values() {
        assert!("99999999999999999s".parse::<Duration>().is_err());
        assert!("99999999999999999m".parse::<Duration>().is_err());
        assert!("999999999999999999999s".parse::<Duration>().is_err());
    }

    #[test]
    fn from_secs_saturates() {
        assert_eq!(Duration::from_secs(u64::MAX).as_millis(), u64::MAX);
    }

    #[test]
    fn display_round_trips_common_values() {
        assert_eq!(Duration::from_secs(15).to_string(), "15s");
        assert_eq!(Duration::from_secs(120).to_string(), "2m");
        assert_eq!(Duration::from_secs(75).to_string(), "1m15s");
    }

    #[test]
    fn default_is_capture_limit() {
        assert_eq!(Duration::default().as_secs(), DEFAULT_CAPTURE_LIMIT_SECS);
        assert_eq!(
            Duration::default_capture_limit().as_std(),
            StdDuration::from_secs(15)
        );
    }
}

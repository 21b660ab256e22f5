//! Turn timer configuration.

use derive_getters::Getters;
use derive_more::{Display, Error};
use derive_setters::Setters;
use serde::{Deserialize, Serialize};
use tracing::instrument;

/// Countdown settings for every turn of a session.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Getters, Setters, Serialize, Deserialize)]
#[setters(prefix = "with_")]
pub struct TimerConfig {
    /// Ticks a side has to move before forfeiting.
    #[serde(default = "default_turn_seconds")]
    turn_seconds: u32,

    /// Remaining ticks at which the hurry warning fires.
    #[serde(default = "default_hurry_threshold")]
    hurry_threshold: u32,
}

#[instrument]
fn default_turn_seconds() -> u32 {
    10
}

#[instrument]
fn default_hurry_threshold() -> u32 {
    3
}

impl TimerConfig {
    /// Checks that the countdown can run and the warning fires before expiry.
    #[instrument]
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.turn_seconds == 0 {
            return Err(ConfigError::new("turn_seconds must be at least 1".to_string()));
        }
        if self.hurry_threshold >= self.turn_seconds {
            return Err(ConfigError::new(format!(
                "hurry_threshold ({}) must be below turn_seconds ({})",
                self.hurry_threshold, self.turn_seconds
            )));
        }
        Ok(())
    }
}

impl Default for TimerConfig {
    fn default() -> Self {
        Self {
            turn_seconds: default_turn_seconds(),
            hurry_threshold: default_hurry_threshold(),
        }
    }
}

/// Configuration error.
#[derive(Debug, Clone, Display, Error)]
#[display("Config error: {} at {}:{}", message, file, line)]
pub struct ConfigError {
    /// Error message.
    pub message: String,
    /// Line number where error occurred.
    pub line: u32,
    /// Source file where error occurred.
    pub file: &'static str,
}

impl ConfigError {
    /// Creates a new configuration error.
    #[track_caller]
    #[instrument(skip(message))]
    pub fn new(message: String) -> Self {
        let loc = std::panic::Location::caller();
        Self {
            message,
            line: loc.line(),
            file: loc.file(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = TimerConfig::default();
        assert_eq!(*config.turn_seconds(), 10);
        assert_eq!(*config.hurry_threshold(), 3);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_zero_turn_rejected() {
        let config = TimerConfig::default()
            .with_turn_seconds(0)
            .with_hurry_threshold(0);
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_threshold_must_be_below_turn() {
        let config = TimerConfig::default().with_turn_seconds(3);
        let err = config.validate().unwrap_err();
        assert!(err.message.contains("hurry_threshold"));
    }
}

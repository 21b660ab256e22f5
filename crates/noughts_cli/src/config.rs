//! Application configuration: timer settings plus driver options.

use crate::cli::SessionArgs;
use derive_getters::Getters;
use noughts_crosses::{ConfigError, TimerConfig};
use serde::{Deserialize, Serialize};
use std::path::Path;
use std::time::Duration;
use tracing::{debug, info, instrument};

/// How events are written to stdout.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum EventFormat {
    /// Human-readable lines.
    #[default]
    Text,
    /// One JSON object per line.
    Json,
}

/// Configuration for a play session.
#[derive(Debug, Clone, Getters, Serialize, Deserialize)]
pub struct AppConfig {
    /// Length of one countdown tick in milliseconds.
    #[serde(default = "default_tick_millis")]
    tick_millis: u64,

    /// Output format for game events.
    #[serde(default)]
    events: EventFormat,

    /// Turn countdown settings.
    #[serde(default)]
    timer: TimerConfig,
}

#[instrument]
fn default_tick_millis() -> u64 {
    1000
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            timer: TimerConfig::default(),
            tick_millis: default_tick_millis(),
            events: EventFormat::default(),
        }
    }
}

impl AppConfig {
    /// Loads configuration from a TOML file.
    #[instrument(skip(path), fields(path = %path.as_ref().display()))]
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        debug!("Loading config from file");
        let content = std::fs::read_to_string(path.as_ref())
            .map_err(|e| ConfigError::new(format!("Failed to read config file: {}", e)))?;

        let config: Self = toml::from_str(&content)
            .map_err(|e| ConfigError::new(format!("Failed to parse config: {}", e)))?;

        info!(?config, "Config loaded successfully");
        Ok(config)
    }

    /// Builds the effective configuration: file (if any), then flag
    /// overrides, then validation.
    #[instrument(skip(args))]
    pub fn resolve(args: &SessionArgs) -> Result<Self, ConfigError> {
        let mut config = match &args.config {
            Some(path) => Self::from_file(path)?,
            None => Self::default(),
        };

        if let Some(turn_seconds) = args.turn_seconds {
            config.timer = config.timer.with_turn_seconds(turn_seconds);
        }
        if let Some(hurry_threshold) = args.hurry_threshold {
            config.timer = config.timer.with_hurry_threshold(hurry_threshold);
        }
        if let Some(tick_millis) = args.tick_millis {
            config.tick_millis = tick_millis;
        }
        if let Some(events) = args.events {
            config.events = events;
        }

        config.validate()?;
        Ok(config)
    }

    /// Checks timer settings and tick length.
    #[instrument(skip(self))]
    pub fn validate(&self) -> Result<(), ConfigError> {
        self.timer.validate()?;
        if self.tick_millis == 0 {
            return Err(ConfigError::new("tick_millis must be at least 1".to_string()));
        }
        Ok(())
    }

    /// One countdown tick.
    pub fn tick_interval(&self) -> Duration {
        Duration::from_millis(self.tick_millis)
    }

    /// Renders the configuration as TOML.
    #[instrument(skip(self))]
    pub fn to_toml(&self) -> Result<String, ConfigError> {
        toml::to_string_pretty(self)
            .map_err(|e| ConfigError::new(format!("Failed to render config: {}", e)))
    }
}

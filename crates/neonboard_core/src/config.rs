//! Runtime configuration for a dashboard session.
//!
//! # Responsibility
//! - Hold simulation periods, notification bounds and the settings policy.
//! - Parse JSON configuration and validate it before use.
//!
//! # Invariants
//! - A `DashboardConfig` returned by `from_json_str`/`load` is validated.
//! - Missing JSON keys fall back to the documented defaults.

use serde::{Deserialize, Serialize};
use std::error::Error;
use std::fmt::{Display, Formatter};
use std::path::Path;

/// Default stats tick period.
pub const DEFAULT_STATS_INTERVAL_MS: u64 = 5_000;
/// Default notification tick period.
pub const DEFAULT_NOTIFICATION_INTERVAL_MS: u64 = 10_000;
/// Default chance that a notification tick enqueues an entry.
pub const DEFAULT_NOTIFICATION_PROBABILITY: f64 = 0.3;
/// Default notification ring capacity.
pub const DEFAULT_NOTIFICATION_CAPACITY: usize = 50;
/// Default frame period (~60 FPS).
pub const DEFAULT_FRAME_INTERVAL_MS: u64 = 16;

/// How the store treats out-of-range settings patches.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SettingsPolicy {
    /// Store whatever the caller sends.
    #[default]
    Permissive,
    /// Reject patches that leave settings outside slider bounds.
    Strict,
}

/// Session configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DashboardConfig {
    pub stats_interval_ms: u64,
    pub notification_interval_ms: u64,
    pub notification_probability: f64,
    pub notification_capacity: usize,
    pub settings_policy: SettingsPolicy,
    pub frame_interval_ms: u64,
    /// Fixed RNG seed; `None` seeds from OS entropy.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub seed: Option<u64>,
}

impl Default for DashboardConfig {
    fn default() -> Self {
        Self {
            stats_interval_ms: DEFAULT_STATS_INTERVAL_MS,
            notification_interval_ms: DEFAULT_NOTIFICATION_INTERVAL_MS,
            notification_probability: DEFAULT_NOTIFICATION_PROBABILITY,
            notification_capacity: DEFAULT_NOTIFICATION_CAPACITY,
            settings_policy: SettingsPolicy::Permissive,
            frame_interval_ms: DEFAULT_FRAME_INTERVAL_MS,
            seed: None,
        }
    }
}

impl DashboardConfig {
    /// Parses and validates a JSON configuration document.
    pub fn from_json_str(json: &str) -> Result<Self, ConfigError> {
        let config: Self =
            serde_json::from_str(json).map_err(|err| ConfigError::Parse(err.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    /// Reads, parses and validates a JSON configuration file.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let raw = std::fs::read_to_string(path).map_err(|err| ConfigError::Io {
            path: path.display().to_string(),
            message: err.to_string(),
        })?;
        Self::from_json_str(raw.as_str())
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.stats_interval_ms == 0 {
            return Err(ConfigError::ZeroInterval("stats_interval_ms"));
        }
        if self.notification_interval_ms == 0 {
            return Err(ConfigError::ZeroInterval("notification_interval_ms"));
        }
        if self.frame_interval_ms == 0 {
            return Err(ConfigError::ZeroInterval("frame_interval_ms"));
        }
        if !(0.0..=1.0).contains(&self.notification_probability) {
            return Err(ConfigError::InvalidProbability(
                self.notification_probability,
            ));
        }
        if self.notification_capacity == 0 {
            return Err(ConfigError::ZeroCapacity);
        }
        Ok(())
    }
}

/// Configuration load/validation errors.
#[derive(Debug, Clone, PartialEq)]
pub enum ConfigError {
    Io { path: String, message: String },
    Parse(String),
    ZeroInterval(&'static str),
    InvalidProbability(f64),
    ZeroCapacity,
}

impl Display for ConfigError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Io { path, message } => write!(f, "failed to read config `{path}`: {message}"),
            Self::Parse(message) => write!(f, "invalid config json: {message}"),
            Self::ZeroInterval(field) => write!(f, "{field} must be greater than zero"),
            Self::InvalidProbability(value) => {
                write!(f, "notification_probability must be in [0, 1], got {value}")
            }
            Self::ZeroCapacity => write!(f, "notification_capacity must be greater than zero"),
        }
    }
}

impl Error for ConfigError {}

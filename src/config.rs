//! Configuration management for the gesture control pipeline

use crate::{
    constants::{
        DEFAULT_CONFIDENCE_THRESHOLD, DEFAULT_JUMP_FACTOR, DEFAULT_JUMP_THRESHOLD, DEFAULT_LANDMARK_SMOOTHING,
        DEFAULT_NO_HANDS_DELAY_SECS, DEFAULT_PARAMETER_SMOOTHING, DEFAULT_PITCH_LIMIT_CENTS,
        MAX_NO_HANDS_DELAY_SECS,
    },
    mapping::Sensitivity,
    Error, Result,
};
use serde::{Deserialize, Serialize};
use std::path::Path;
use std::time::Duration;

/// Application configuration
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Landmark filter configuration
    pub filter: FilterConfig,

    /// Gesture controller configuration
    pub control: ControlConfig,
}

/// Landmark filter parameters
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FilterConfig {
    /// Thumb and index confidence must exceed this (0.0-1.0)
    pub confidence_threshold: f32,

    /// Per-axis displacement treated as a tracking jump
    pub jump_threshold: f64,

    /// EMA factor for ordinary motion
    pub smoothing_factor: f64,

    /// EMA factor applied on a jump
    pub jump_factor: f64,
}

/// Gesture controller parameters. Sensitivity, smoothing and delay are the
/// user-facing settings; the pitch limit is an install-time bound.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ControlConfig {
    /// Gesture sensitivity level
    pub sensitivity: Sensitivity,

    /// Parameter smoothing factor in (0, 1]
    pub smoothing: f64,

    /// Seconds both hands may be absent before auto-pause
    pub no_hands_delay_secs: f64,

    /// Symmetric bound on the pitch offset in cents
    pub pitch_limit_cents: f64,
}

impl Default for FilterConfig {
    fn default() -> Self {
        Self {
            confidence_threshold: DEFAULT_CONFIDENCE_THRESHOLD,
            jump_threshold: DEFAULT_JUMP_THRESHOLD,
            smoothing_factor: DEFAULT_LANDMARK_SMOOTHING,
            jump_factor: DEFAULT_JUMP_FACTOR,
        }
    }
}

impl Default for ControlConfig {
    fn default() -> Self {
        Self {
            sensitivity: Sensitivity::default(),
            smoothing: DEFAULT_PARAMETER_SMOOTHING,
            no_hands_delay_secs: DEFAULT_NO_HANDS_DELAY_SECS,
            pitch_limit_cents: DEFAULT_PITCH_LIMIT_CENTS,
        }
    }
}

impl ControlConfig {
    /// The no-hands debounce as a duration
    pub fn no_hands_delay(&self) -> Duration {
        Duration::from_secs_f64(self.no_hands_delay_secs)
    }
}

impl Config {
    /// Load configuration from a YAML file
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;

        let config: Self = serde_yaml::from_str(&content)
            .map_err(|e| Error::ConfigError(format!("Failed to parse config: {}", e)))?;
        config.validate()?;
        Ok(config)
    }

    /// Save configuration to a YAML file
    pub fn to_file<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        let content = serde_yaml::to_string(self)
            .map_err(|e| Error::ConfigError(format!("Failed to serialize config: {}", e)))?;

        std::fs::write(path, content)?;

        Ok(())
    }

    /// Validate configuration
    pub fn validate(&self) -> Result<()> {
        self.filter.validate()?;
        self.control.validate()
    }
}

impl FilterConfig {
    pub fn validate(&self) -> Result<()> {
        if !(0.0..=1.0).contains(&self.confidence_threshold) {
            return Err(Error::ConfigError(
                "Confidence threshold must be between 0.0 and 1.0".to_string(),
            ));
        }
        if !(self.jump_threshold > 0.0) {
            return Err(Error::ConfigError("Jump threshold must be positive".to_string()));
        }
        if !unit_factor(self.smoothing_factor) {
            return Err(Error::ConfigError(
                "Landmark smoothing factor must be in (0, 1]".to_string(),
            ));
        }
        if !unit_factor(self.jump_factor) {
            return Err(Error::ConfigError("Jump factor must be in (0, 1]".to_string()));
        }
        Ok(())
    }
}

impl ControlConfig {
    pub fn validate(&self) -> Result<()> {
        if !unit_factor(self.smoothing) {
            return Err(Error::ConfigError(
                "Parameter smoothing must be in (0, 1]".to_string(),
            ));
        }
        if !(self.no_hands_delay_secs > 0.0 && self.no_hands_delay_secs <= MAX_NO_HANDS_DELAY_SECS) {
            return Err(Error::ConfigError(format!(
                "No-hands delay must be in (0, {}] seconds",
                MAX_NO_HANDS_DELAY_SECS
            )));
        }
        if !(self.pitch_limit_cents > 0.0) {
            return Err(Error::ConfigError("Pitch limit must be positive".to_string()));
        }
        Ok(())
    }
}

fn unit_factor(value: f64) -> bool {
    value > 0.0 && value <= 1.0
}

/// Example configuration file content
pub const EXAMPLE_CONFIG: &str = r#"# Gesture Flow Configuration

# Landmark filter
filter:
  confidence_threshold: 0.3
  jump_threshold: 0.15
  smoothing_factor: 0.6
  jump_factor: 0.1

# Gesture controller
control:
  sensitivity: standard   # standard, high, extreme
  smoothing: 0.2
  no_hands_delay_secs: 1.0
  pitch_limit_cents: 2400.0
"#;

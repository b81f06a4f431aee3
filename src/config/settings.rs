//! Configuration settings for the tracker.
//!
//! Settings are loaded from `~/.correspondence_tracker/config.yaml`.

use serde::{Deserialize, Serialize};

use crate::cli::args::OutputFormat;
use crate::error::TrackerError;

/// Main configuration structure.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct Config {
    /// General settings.
    pub general: GeneralConfig,
    /// Follow-up and activity heuristics.
    pub tracker: TrackerConfig,
}

/// General application settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct GeneralConfig {
    /// Default output format.
    #[serde(default = "default_output_format")]
    pub default_output: OutputFormat,
}

/// Heuristic settings used by the tracker service.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct TrackerConfig {
    /// Trailing window, in days, for the active-contacts report.
    #[serde(default = "default_active_window_days")]
    pub active_window_days: u32,
    /// Days added to the last interaction when suggesting a follow-up.
    #[serde(default = "default_follow_up_offset_days")]
    pub follow_up_offset_days: u32,
    /// Response status recorded when none is given.
    #[serde(default = "default_response_status")]
    pub default_response_status: String,
}

// Default value functions for serde
const fn default_output_format() -> OutputFormat {
    OutputFormat::Pretty
}

const fn default_active_window_days() -> u32 {
    30
}

const fn default_follow_up_offset_days() -> u32 {
    14
}

fn default_response_status() -> String {
    "pending".to_string()
}

impl Default for GeneralConfig {
    fn default() -> Self {
        Self {
            default_output: default_output_format(),
        }
    }
}

impl Default for TrackerConfig {
    fn default() -> Self {
        Self {
            active_window_days: default_active_window_days(),
            follow_up_offset_days: default_follow_up_offset_days(),
            default_response_status: default_response_status(),
        }
    }
}

impl Config {
    /// Load configuration from a specific path.
    ///
    /// If the config file doesn't exist, returns default configuration.
    ///
    /// # Errors
    ///
    /// Returns an error if the config file exists but cannot be parsed.
    pub fn load_from_path(path: &std::path::Path) -> Result<Self, TrackerError> {
        if !path.exists() {
            return Ok(Self::default());
        }

        let contents = std::fs::read_to_string(path).map_err(|e| {
            TrackerError::Config(format!(
                "Failed to read config file {}: {e}",
                path.display()
            ))
        })?;

        serde_yaml::from_str(&contents).map_err(|e| {
            TrackerError::Config(format!(
                "Failed to parse config file {}: {e}",
                path.display()
            ))
        })
    }
}

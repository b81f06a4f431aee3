//! Configuration management for the tracker.
//!
//! This module handles loading configuration from `~/.correspondence_tracker/`.

mod paths;
mod settings;

pub use paths::Paths;
pub use settings::{Config, GeneralConfig, TrackerConfig};

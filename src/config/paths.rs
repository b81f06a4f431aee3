//! Path resolution for tracker configuration and data files.
//!
//! All tracker data is stored in `~/.correspondence_tracker/`:
//! - `config.yaml` - Main configuration file
//! - `tracker.db` - SQLite database with contacts and correspondence

use std::path::PathBuf;

use crate::error::TrackerError;

/// Paths to tracker configuration and data files.
#[derive(Debug, Clone)]
pub struct Paths {
    /// Root directory: `~/.correspondence_tracker/`
    pub root: PathBuf,
    /// Config file: `~/.correspondence_tracker/config.yaml`
    pub config_file: PathBuf,
    /// Database file: `~/.correspondence_tracker/tracker.db`
    pub database: PathBuf,
}

impl Paths {
    /// Create paths based on the user's home directory.
    ///
    /// # Errors
    ///
    /// Returns an error if the home directory cannot be determined.
    pub fn new() -> Result<Self, TrackerError> {
        let home = std::env::var("HOME").map_err(|_| {
            TrackerError::Config("Could not determine home directory".to_string())
        })?;

        Ok(Self::with_root(PathBuf::from(home).join(".correspondence_tracker")))
    }

    /// Create paths with a custom root directory (useful for testing).
    #[must_use]
    pub fn with_root(root: PathBuf) -> Self {
        Self {
            config_file: root.join("config.yaml"),
            database: root.join("tracker.db"),
            root,
        }
    }
}

impl Default for Paths {
    fn default() -> Self {
        Self::new().unwrap_or_else(|_| {
            // Fallback to current directory if home cannot be determined
            Self::with_root(PathBuf::from(".correspondence_tracker"))
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_paths_with_root() {
        let root = PathBuf::from("/tmp/test-tracker");
        let paths = Paths::with_root(root.clone());

        assert_eq!(paths.root, root);
        assert_eq!(paths.config_file, root.join("config.yaml"));
        assert_eq!(paths.database, root.join("tracker.db"));
    }
}

//! correspondence-tracker - a personal relationship tracker
//!
//! Records contacts and the correspondence exchanged with them in a local
//! SQLite database, and derives follow-up reminders and simple insights.

#![deny(unsafe_code)]
#![deny(clippy::unwrap_used)]
#![deny(clippy::expect_used)]
#![warn(clippy::pedantic)]
#![warn(clippy::nursery)]
#![allow(clippy::module_name_repetitions)]

pub mod cli;
pub mod config;
pub mod core;
pub mod error;
pub mod logging;
pub mod output;
pub mod storage;
pub mod tracker;

pub use cli::args::{Cli, Commands, OutputFormat};
pub use error::TrackerError;
pub use logging::init_logging;
pub use storage::Database;
pub use tracker::TrackerService;

//! Storage layer for the tracker.
//!
//! This module provides SQLite-based persistence for:
//! - Contacts
//! - Correspondence history
//! - Schema version bookkeeping

mod database;
pub mod migrations;

pub use database::{Database, Executed};

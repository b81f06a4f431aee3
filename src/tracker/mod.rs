//! Contact and correspondence tracking.
//!
//! Provides the domain model and the service built on the storage layer:
//! - Contact and correspondence CRUD
//! - Active-contact and pending follow-up queries
//! - Per-contact insights and reminders

pub mod insights;
pub mod model;
pub mod reminders;
mod rows;
pub mod service;

pub use insights::{average_gap_days, InsightSummary, Insights};
pub use model::{
    parse_tag_list, Contact, ContactId, Correspondence, CorrespondenceId, Direction, NewContact,
    NewCorrespondence, PENDING_STATUS,
};
pub use reminders::Reminder;
pub use service::{TrackerService, TrackerSettings};

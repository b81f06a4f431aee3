use std::path::PathBuf;

use chrono::NaiveDateTime;
use clap::{Args, Parser, Subcommand, ValueEnum};
use serde::{Deserialize, Serialize};

use crate::core::parse_timestamp;
use crate::tracker::{ContactId, CorrespondenceId, Direction};

#[derive(Parser)]
#[command(name = "ctrack")]
#[command(about = "Track contacts, correspondence, and follow-ups from the command line")]
#[command(long_about = "ctrack - a personal correspondence tracker

Records the people you correspond with and the messages you exchange,
then derives follow-up reminders and simple relationship insights.

QUICK START:
  ctrack add-contact \"Ada Lovelace\" --email ada@example.com
  ctrack log 1 outgoing 2024-06-01T09:30:00 --subject \"Catch up\" --follow-up 2024-06-15T09:00:00
  ctrack reminders          Show follow-ups that are due
  ctrack insights 1         Summarize a relationship

TIMESTAMPS:
  YYYY-MM-DDTHH:MM:SS (also YYYY-MM-DD HH:MM:SS, or YYYY-MM-DD for midnight)

OUTPUT FORMATS:
  --output pretty    Human-readable colored output (default)
  --output json      Machine-readable JSON for scripting")]
#[command(version, propagate_version = true)]
pub struct Cli {
    /// Output format for command results
    ///
    /// Defaults to the `general.default_output` config setting.
    #[arg(short, long, value_enum, global = true)]
    pub output: Option<OutputFormat>,

    /// Path to the SQLite database file
    ///
    /// Defaults to ~/.correspondence_tracker/tracker.db
    #[arg(long, global = true, env = "CTRACK_DB")]
    pub db: Option<PathBuf>,

    /// Path to the YAML config file
    ///
    /// Defaults to ~/.correspondence_tracker/config.yaml
    #[arg(long, global = true, env = "CTRACK_CONFIG")]
    pub config: Option<PathBuf>,

    /// Enable debug logging on stderr
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Commands,
}

/// Output format for command results.
#[derive(ValueEnum, Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    /// Human-readable colored output.
    #[default]
    Pretty,
    /// Machine-readable JSON output.
    Json,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Create a new contact
    ///
    /// # Examples
    ///
    ///   ctrack add-contact "Ada Lovelace"
    ///   ctrack add-contact "Grace Hopper" --email grace@example.com --preferred-channel email
    AddContact(AddContactArgs),

    /// List all contacts
    #[command(alias = "contacts")]
    ListContacts,

    /// Log an incoming or outgoing message
    ///
    /// # Examples
    ///
    ///   ctrack log 1 incoming 2024-06-01T09:30:00 --medium email --subject "Hello"
    ///   ctrack log 1 outgoing 2024-06-02 --tags work,urgent --follow-up 2024-06-16
    Log(LogArgs),

    /// Show correspondence history, most recent first
    History {
        /// Only show correspondence with this contact
        #[arg(long)]
        contact_id: Option<ContactId>,
    },

    /// Set the response status of a correspondence
    ///
    /// # Examples
    ///
    ///   ctrack status 12 resolved
    Status {
        /// Correspondence ID
        correspondence_id: CorrespondenceId,

        /// New response status (e.g. pending, resolved)
        status: String,
    },

    /// Show pending follow-ups that have come due
    Reminders {
        /// Only show follow-ups that are past their due date
        #[arg(long)]
        overdue_only: bool,
    },

    /// Summarize the relationship with one contact
    Insights {
        /// Contact ID
        contact_id: ContactId,
    },

    /// List contacts with recent correspondence
    Active {
        /// Window in days (default: `tracker.active_window_days`, 30)
        #[arg(long, short = 'd')]
        days: Option<u32>,
    },
}

/// Arguments for creating a contact.
#[derive(Args)]
pub struct AddContactArgs {
    /// Contact name
    pub name: String,

    #[arg(long)]
    pub email: Option<String>,

    #[arg(long)]
    pub phone: Option<String>,

    /// Preferred channel (email, phone, signal, ...)
    #[arg(long)]
    pub preferred_channel: Option<String>,

    #[arg(long)]
    pub notes: Option<String>,
}

/// Arguments for logging a correspondence.
#[derive(Args)]
pub struct LogArgs {
    /// Contact ID the message was exchanged with
    pub contact_id: ContactId,

    /// incoming or outgoing
    pub direction: Direction,

    /// When the message was sent (YYYY-MM-DDTHH:MM:SS)
    #[arg(value_parser = parse_timestamp)]
    pub sent_at: NaiveDateTime,

    #[arg(long)]
    pub medium: Option<String>,

    #[arg(long)]
    pub subject: Option<String>,

    #[arg(long)]
    pub body: Option<String>,

    /// Path to an attachment
    #[arg(long)]
    pub attachment: Option<String>,

    #[arg(long)]
    pub sentiment: Option<String>,

    /// Comma-separated tags
    #[arg(long)]
    pub tags: Option<String>,

    /// Related topic
    #[arg(long)]
    pub topic: Option<String>,

    /// Follow-up due date (YYYY-MM-DDTHH:MM:SS)
    #[arg(long, value_parser = parse_timestamp)]
    pub follow_up: Option<NaiveDateTime>,

    /// Response status (default: pending)
    #[arg(long)]
    pub status: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    #[test]
    fn test_cli_add_contact() {
        let cli = Cli::try_parse_from([
            "ctrack",
            "add-contact",
            "Ada Lovelace",
            "--email",
            "ada@example.com",
            "--preferred-channel",
            "email",
        ])
        .unwrap();
        if let Commands::AddContact(args) = cli.command {
            assert_eq!(args.name, "Ada Lovelace");
            assert_eq!(args.email.as_deref(), Some("ada@example.com"));
            assert_eq!(args.preferred_channel.as_deref(), Some("email"));
            assert!(args.phone.is_none());
        } else {
            panic!("Expected AddContact command");
        }
    }

    #[test]
    fn test_cli_log() {
        let cli = Cli::try_parse_from([
            "ctrack",
            "log",
            "3",
            "outgoing",
            "2024-06-01T09:30:00",
            "--tags",
            "work,urgent",
            "--follow-up",
            "2024-06-15",
        ])
        .unwrap();
        if let Commands::Log(args) = cli.command {
            assert_eq!(args.contact_id, 3);
            assert_eq!(args.direction, Direction::Outgoing);
            assert_eq!(
                args.sent_at,
                NaiveDate::from_ymd_opt(2024, 6, 1)
                    .unwrap()
                    .and_hms_opt(9, 30, 0)
                    .unwrap()
            );
            assert_eq!(args.tags.as_deref(), Some("work,urgent"));
            assert_eq!(
                args.follow_up,
                NaiveDate::from_ymd_opt(2024, 6, 15)
                    .unwrap()
                    .and_hms_opt(0, 0, 0)
            );
        } else {
            panic!("Expected Log command");
        }
    }

    #[test]
    fn test_cli_log_rejects_bad_direction() {
        let result = Cli::try_parse_from(["ctrack", "log", "1", "sideways", "2024-06-01T09:30:00"]);
        assert!(result.is_err());
    }

    #[test]
    fn test_cli_log_rejects_bad_timestamp() {
        let result = Cli::try_parse_from(["ctrack", "log", "1", "incoming", "last tuesday"]);
        assert!(result.is_err());
    }

    #[test]
    fn test_cli_history_filter() {
        let cli = Cli::try_parse_from(["ctrack", "history", "--contact-id", "5"]).unwrap();
        if let Commands::History { contact_id } = cli.command {
            assert_eq!(contact_id, Some(5));
        } else {
            panic!("Expected History command");
        }
    }

    #[test]
    fn test_cli_reminders_overdue_only() {
        let cli = Cli::try_parse_from(["ctrack", "reminders", "--overdue-only"]).unwrap();
        assert!(matches!(
            cli.command,
            Commands::Reminders { overdue_only: true }
        ));
    }

    #[test]
    fn test_cli_global_options() {
        let cli = Cli::try_parse_from([
            "ctrack", "active", "--db", "/tmp/t.db", "-o", "json", "-d", "7",
        ])
        .unwrap();
        assert_eq!(cli.db, Some(PathBuf::from("/tmp/t.db")));
        assert_eq!(cli.output, Some(OutputFormat::Json));
        assert!(matches!(cli.command, Commands::Active { days: Some(7) }));
    }
}

use anyhow::{Context, Result};
use clap::Parser;
use colored::Colorize;

use correspondence_tracker::cli::args::{Cli, Commands};
use correspondence_tracker::cli::commands;
use correspondence_tracker::config::{Config, Paths};
use correspondence_tracker::init_logging;
use correspondence_tracker::storage::Database;
use correspondence_tracker::tracker::{TrackerService, TrackerSettings};

fn main() {
    if let Err(e) = run() {
        eprintln!("{}: {:#}", "error".red().bold(), e);
        std::process::exit(1);
    }
}

fn run() -> Result<()> {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    let paths = Paths::default();
    let config_path = cli.config.unwrap_or(paths.config_file);
    let config = Config::load_from_path(&config_path)
        .with_context(|| format!("loading config from {}", config_path.display()))?;

    let db_path = cli.db.unwrap_or(paths.database);
    tracing::debug!(db = %db_path.display(), config = %config_path.display(), "starting");

    let format = cli.output.unwrap_or(config.general.default_output);
    let mut service = TrackerService::new(Database::new(db_path))
        .with_settings(TrackerSettings::from(&config.tracker));

    let output = match cli.command {
        Commands::AddContact(args) => commands::add_contact(&service, args, format)?,
        Commands::ListContacts => commands::list_contacts(&service, format)?,
        Commands::Log(args) => commands::log(&service, args, format)?,
        Commands::History { contact_id } => commands::history(&service, contact_id, format)?,
        Commands::Status {
            correspondence_id,
            status,
        } => commands::set_status(&service, correspondence_id, &status, format)?,
        Commands::Reminders { overdue_only } => {
            commands::reminders(&service, overdue_only, format)?
        }
        Commands::Insights { contact_id } => commands::insights(&service, contact_id, format)?,
        Commands::Active { days } => commands::active(&service, days, format)?,
    };

    service.close()?;

    if !output.is_empty() {
        println!("{output}");
    }
    Ok(())
}

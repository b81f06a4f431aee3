use chrono::NaiveDateTime;
use colored::Colorize;

use crate::core::format_timestamp;
use crate::tracker::{Contact, Correspondence, Direction, Insights, Reminder};

const BODY_PREVIEW_CHARS: usize = 200;

/// Format a list of contacts as pretty output
pub fn format_contacts_pretty(contacts: &[Contact], title: &str) -> String {
    if contacts.is_empty() {
        return format!("{title} (0)\n  No contacts");
    }

    let mut output = format!("{} ({})\n", title, contacts.len());
    output.push_str(&"─".repeat(60));
    output.push('\n');

    for contact in contacts {
        let mut line = format!("[{}] {}", contact.id, contact.name.bold());
        if let Some(channel) = &contact.preferred_channel {
            line.push_str(&format!("  {}", format!("prefers {channel}").dimmed()));
        }
        output.push_str(&line);
        output.push('\n');

        for (label, value) in [
            ("email", &contact.email),
            ("phone", &contact.phone),
            ("notes", &contact.notes),
        ] {
            if let Some(value) = value {
                output.push_str(&format!("    {}: {}\n", label.dimmed(), value));
            }
        }
    }

    output
}

/// Format correspondence history as pretty output
pub fn format_history_pretty(items: &[Correspondence]) -> String {
    if items.is_empty() {
        return "History (0)\n  No correspondence".to_string();
    }

    let mut output = format!("History ({})\n", items.len());
    output.push_str(&"─".repeat(60));
    output.push('\n');

    for item in items {
        let arrow = match item.direction {
            Direction::Incoming => "<-".blue(),
            Direction::Outgoing => "->".green(),
        };
        let follow_up = item
            .follow_up_date
            .as_ref()
            .map_or_else(|| "-".to_string(), format_timestamp);

        output.push_str(&format!(
            "[{}] {} contact={} {}  medium={} status={} follow_up={}\n",
            item.id,
            arrow,
            item.contact_id,
            format_timestamp(&item.sent_at).yellow(),
            item.medium.as_deref().unwrap_or("-"),
            item.response_status.as_deref().unwrap_or("-"),
            follow_up,
        ));

        if let Some(subject) = &item.subject {
            output.push_str(&format!("    {}: {}\n", "subject".dimmed(), subject));
        }
        if !item.tags.is_empty() {
            let tags = item
                .tags
                .iter()
                .map(|t| format!("#{t}"))
                .collect::<Vec<_>>()
                .join(" ");
            output.push_str(&format!("    {}: {}\n", "tags".dimmed(), tags.cyan()));
        }
        if let Some(topic) = &item.related_topic {
            output.push_str(&format!("    {}: {}\n", "topic".dimmed(), topic));
        }
        if let Some(sentiment) = &item.sentiment {
            output.push_str(&format!("    {}: {}\n", "sentiment".dimmed(), sentiment));
        }
        if let Some(body) = &item.body {
            output.push_str(&format!("    {}: {}\n", "body".dimmed(), preview(body)));
        }
        if let Some(path) = &item.attachment_path {
            output.push_str(&format!("    {}: {}\n", "attachment".dimmed(), path));
        }
    }

    output
}

/// Format reminders as pretty output
pub fn format_reminders_pretty(reminders: &[Reminder], now: NaiveDateTime) -> String {
    if reminders.is_empty() {
        return "Reminders (0)\n  Nothing due".to_string();
    }

    let mut output = format!("Reminders ({})\n", reminders.len());
    output.push_str(&"─".repeat(60));
    output.push('\n');

    for reminder in reminders {
        let status = if reminder.is_overdue(now) {
            "OVERDUE".red().bold()
        } else {
            "due".yellow()
        };

        output.push_str(&format!(
            "{} {} -> {} (correspondence #{}, subject={})\n",
            status,
            format_timestamp(&reminder.due),
            reminder.contact.name.bold(),
            reminder.correspondence.id,
            reminder.correspondence.subject.as_deref().unwrap_or("-"),
        ));
    }

    output
}

/// Format contact insights as pretty output
pub fn format_insights_pretty(contact: &Contact, insights: &Insights) -> String {
    let mut output = format!("Insights for {}\n", contact.name.bold());
    output.push_str(&"─".repeat(40));
    output.push('\n');

    let summary = match insights {
        Insights::NoData { message } => {
            output.push_str(&format!("  {message}\n"));
            return output;
        }
        Insights::Summary(summary) => summary,
    };

    let average_gap = summary
        .average_gap_days
        .map_or_else(|| "-".to_string(), |gap| format!("{gap:.2} days"));

    let rows = [
        ("Total messages", summary.total_messages.to_string()),
        ("Incoming", summary.incoming.to_string()),
        ("Outgoing", summary.outgoing.to_string()),
        ("Last interaction", format_timestamp(&summary.last_interaction)),
        (
            "Latest sentiment",
            summary.latest_sentiment.clone().unwrap_or_else(|| "-".to_string()),
        ),
        ("Average gap", average_gap),
        (
            "Suggested follow-up",
            format_timestamp(&summary.suggested_follow_up),
        ),
    ];

    for (label, value) in rows {
        output.push_str(&format!("  {}: {}\n", label.dimmed(), value));
    }

    output
}

fn preview(body: &str) -> String {
    if body.chars().count() > BODY_PREVIEW_CHARS {
        let cut: String = body.chars().take(BODY_PREVIEW_CHARS).collect();
        format!("{cut}...")
    } else {
        body.to_string()
    }
}

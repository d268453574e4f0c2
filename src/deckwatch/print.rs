use chrono::Utc;
use colored::{ColoredString, Colorize};
use deckwatch::api::{CmdMessage, CmdResult, MessageLevel};
use deckwatch::config::Preferences;
use deckwatch::hierarchy::SEPARATOR;
use deckwatch::project::{ColorClass, DeckRow};
use unicode_width::{UnicodeWidthChar, UnicodeWidthStr};

const NAME_WIDTH: usize = 44;
const STATUS_WIDTH: usize = 26;

pub(super) fn print_messages(messages: &[CmdMessage]) {
    for message in messages {
        match message.level {
            MessageLevel::Info => println!("{}", message.content.dimmed()),
            MessageLevel::Success => println!("{}", message.content.green()),
            MessageLevel::Warning => println!("{}", message.content.yellow()),
            MessageLevel::Error => println!("{}", message.content.red()),
        }
    }
}

pub(super) fn print_report(title: &str, result: &CmdResult) {
    if let Some(summary) = &result.summary {
        println!("{}", title.bold());
        println!(
            "{}",
            format!(
                "Decks: {}  |  Limits: {}  |  Availability: {}  |  Normal: {}",
                summary.decks, summary.limits, summary.availability, summary.normal
            )
            .dimmed()
        );
    }

    if result.rows.is_empty() {
        return;
    }

    println!();
    println!(
        "{}",
        format!(
            "{:<name$} {:<status$} {:>7} {:>7} {:>7}",
            "Deck",
            "Status",
            "New/day",
            "Unsusp",
            "Susp",
            name = NAME_WIDTH,
            status = STATUS_WIDTH
        )
        .dimmed()
    );

    for row in &result.rows {
        println!("{}", format_row(row));
    }
}

fn format_row(row: &DeckRow) -> String {
    // Show only the last path segment, indented to its depth.
    let segment = row.name.rsplit(SEPARATOR).next().unwrap_or(&row.name);
    let label = format!("{}{}", "  ".repeat(row.depth), segment);
    let label = truncate_to_width(&label, NAME_WIDTH);
    let padding = " ".repeat(NAME_WIDTH.saturating_sub(label.width()));

    let status = format!("{:<width$}", row.status.label(), width = STATUS_WIDTH);
    let counts = format!(
        "{:>7} {:>7} {:>7}",
        row.limit_label, row.agg_unsuspended_new, row.agg_suspended_new
    );

    if row.context_only {
        // Context-only ancestors are muted whole.
        return format!("{}{} {} {}", label.dimmed(), padding, status.dimmed(), counts.dimmed());
    }

    format!("{}{} {} {}", label, padding, colorize_status(row, status), counts)
}

fn colorize_status(row: &DeckRow, status: String) -> ColoredString {
    match row.color {
        ColorClass::Limits => status.red(),
        ColorClass::Availability => status.yellow(),
        ColorClass::Normal => status.green(),
        ColorClass::Filtered => status.blue(),
        ColorClass::Context => status.dimmed(),
    }
}

pub(super) fn print_preferences(prefs: &Preferences) {
    for (key, value) in prefs.entries() {
        if key == "last_opened_at" && prefs.last_opened_at > 0 {
            let elapsed = Utc::now().timestamp() - prefs.last_opened_at;
            let ago = timeago::Formatter::new()
                .convert(std::time::Duration::from_secs(elapsed.max(0) as u64));
            println!("{} = {} ({})", key, value, ago);
        } else {
            println!("{} = {}", key, value);
        }
    }
}

fn truncate_to_width(s: &str, max_width: usize) -> String {
    let mut result = String::new();
    let mut current_width = 0;

    for c in s.chars() {
        let char_width = c.width().unwrap_or(0);
        if current_width + char_width > max_width.saturating_sub(1) {
            result.push('…');
            return result;
        }
        result.push(c);
        current_width += char_width;
    }

    result
}

//! Git-log-style rendering of fetched entries.

use ansi_term::Colour;
use chrono::format::{Item, StrftimeItems};
use chrono::{DateTime, Local};

use crate::config::Config;
use crate::db::models::{Tag, WorkEntry};

/// Render one entry in full, git-log style.
pub fn render_entry(entry: &WorkEntry, cfg: &Config) -> String {
    let local = entry.timestamp.with_timezone(&Local);
    let format = if cfg.datetime_format.is_empty() {
        format!("{} {}", cfg.date_format, cfg.time_format)
    } else {
        cfg.datetime_format.clone()
    };
    let timestamp = format_timestamp(local, &format);

    let tags_line = if entry.tags.is_empty() {
        String::new()
    } else {
        format!("Tags: {}\n", entry.tags.join(", "))
    };

    let duration_line = match entry.duration {
        Some(minutes) => {
            let (value, unit) = display_duration(minutes, &cfg.duration_unit);
            format!("Duration: {} {}\n", value, unit)
        }
        None => String::new(),
    };

    let body = textwrap::indent(&textwrap::fill(&entry.work, 80), "\t");

    format!(
        "{}\nDate: {}\n{}{}\n{}\n\n",
        Colour::Green.paint(format!("id: {}", entry.uuid)),
        timestamp,
        tags_line,
        duration_line,
        Colour::White.bold().paint(body.trim_end()),
    )
}

/// Render just the work text.
pub fn render_entry_text(entry: &WorkEntry) -> String {
    format!("{}\n", Colour::White.bold().paint(format!("* {}", entry.work)))
}

pub fn render_tag(tag: &Tag) -> String {
    format!("{}\n", Colour::White.paint(format!("* {}", tag.name)))
}

/// chrono's Display panics on an invalid strftime specifier, so a bad
/// user-configured format falls back to the default layout.
fn format_timestamp(local: DateTime<Local>, fmt: &str) -> String {
    if StrftimeItems::new(fmt).any(|item| matches!(item, Item::Error)) {
        return local.format("%m-%d-%Y %H:%M").to_string();
    }
    local.format(fmt).to_string()
}

fn display_duration(minutes: f64, unit: &str) -> (f64, &'static str) {
    match unit {
        "h" | "hr" | "hrs" | "hours" => ((minutes / 60.0 * 100.0).round() / 100.0, "h"),
        _ => (minutes, "min"),
    }
}

//! Terminal output: colored messages and the record list.

use chrono::{DateTime, Utc};
use colored::Colorize;
use scratchapp::commands::{CmdMessage, MessageLevel};
use scratchapp::config::ScratchConfig;
use scratchapp::store::RecordInfo;
use timeago::Formatter;
use unicode_width::{UnicodeWidthChar, UnicodeWidthStr};

const LINE_WIDTH: usize = 80;
const SIZE_WIDTH: usize = 10;
const TIME_WIDTH: usize = 16;

pub fn print_messages(messages: &[CmdMessage]) {
    for message in messages {
        match message.level {
            MessageLevel::Info => println!("{}", message.content.dimmed()),
            MessageLevel::Success => println!("{}", message.content.green()),
            MessageLevel::Warning => println!("{}", message.content.yellow()),
            MessageLevel::Error => println!("{}", message.content.red()),
        }
    }
}

/// For commands whose stdout is data: only problems are shown, on stderr.
pub fn eprint_problems(messages: &[CmdMessage]) {
    for message in messages {
        match message.level {
            MessageLevel::Warning => eprintln!("{}", message.content.yellow()),
            MessageLevel::Error => eprintln!("{}", message.content.red()),
            MessageLevel::Info | MessageLevel::Success => {}
        }
    }
}

pub fn print_records(records: &[RecordInfo]) {
    let now = Utc::now();
    for record in records {
        let (name, details) = record_columns(record, now);
        println!("{}{}", name, details.dimmed());
    }
}

/// The name column (truncated and padded) and the size/age column.
fn record_columns(record: &RecordInfo, now: DateTime<Utc>) -> (String, String) {
    let available = LINE_WIDTH.saturating_sub(SIZE_WIDTH + TIME_WIDTH);
    let name = truncate_to_width(record.name.as_str(), available);
    let padding = available.saturating_sub(name.width());

    let age = record
        .modified
        .map(|modified| format_time_ago(modified, now))
        .unwrap_or_default();
    let details = format!(
        "{:>size$}{:>time$}",
        format_size(record.size),
        age,
        size = SIZE_WIDTH,
        time = TIME_WIDTH
    );

    (format!("{}{}", name, " ".repeat(padding)), details)
}

fn format_size(bytes: u64) -> String {
    const KB: u64 = 1024;
    const MB: u64 = KB * 1024;
    if bytes < KB {
        format!("{} B", bytes)
    } else if bytes < MB {
        format!("{:.1} KB", bytes as f64 / KB as f64)
    } else {
        format!("{:.1} MB", bytes as f64 / MB as f64)
    }
}

fn truncate_to_width(s: &str, max_width: usize) -> String {
    if s.width() <= max_width {
        return s.to_string();
    }

    let mut result = String::new();
    let mut current_width = 0;
    for c in s.chars() {
        let char_width = c.width().unwrap_or(0);
        if current_width + char_width > max_width.saturating_sub(1) {
            break;
        }
        result.push(c);
        current_width += char_width;
    }
    result.push('…');
    result
}

fn format_time_ago(timestamp: DateTime<Utc>, now: DateTime<Utc>) -> String {
    let duration = now.signed_duration_since(timestamp);
    let mut formatter = Formatter::new();
    formatter.num_items(1);
    formatter.convert(duration.to_std().unwrap_or_default())
}

pub fn print_config(config: &ScratchConfig, root_dir: &str) {
    let fixed_mode = config.fixed_mode.as_deref().unwrap_or("-");
    let rows = [
        ("root_dir", root_dir.to_string()),
        ("suffix", config.suffix()),
        ("default_name", config.default_name.clone()),
        ("initial_mode", config.initial_mode.as_str().to_string()),
        ("fixed_mode", fixed_mode.to_string()),
        ("fallback_mode", config.fallback_mode.clone()),
        ("enabled", config.enabled.to_string()),
    ];
    for (key, value) in rows {
        println!("{:<14} {}", key.bold(), value);
    }
}

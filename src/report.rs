use std::fmt::Write;

use chrono::NaiveDate;

use crate::models::{JournalEntry, Notification, Priority};
use crate::streak;
use crate::trend;

pub const RECENT_ENTRIES: usize = 3;

pub fn mood_marker(sentiment_score: Option<i32>) -> &'static str {
    match sentiment_score.unwrap_or(0) {
        score if score > 0 => "positive",
        score if score < 0 => "negative",
        _ => "neutral",
    }
}

pub fn build_dashboard(
    user_id: &str,
    reference_date: NaiveDate,
    entries: &[JournalEntry],
    notifications: &[Notification],
) -> String {
    let summary = streak::streak_summary(entries, reference_date);
    let mood = trend::trend(entries);

    let mut output = String::new();

    let _ = writeln!(output, "# MoodMind Dashboard");
    let _ = writeln!(output, "Generated for {} on {}", user_id, reference_date);
    let _ = writeln!(output);
    let _ = writeln!(output, "## Overview");
    let _ = writeln!(output, "- Total entries: {}", entries.len());

    let streak_state = match summary.last_entry_day {
        Some(_) if summary.current => "active".to_string(),
        Some(day) => format!("last entry {day}"),
        None => "no entries yet".to_string(),
    };
    let _ = writeln!(
        output,
        "- Writing streak: {} days ({})",
        summary.days, streak_state
    );
    let _ = writeln!(output, "- Mood trend: {} ({:.2})", mood.label, mood.score);

    let mut recent: Vec<&JournalEntry> = entries.iter().collect();
    recent.sort_by(|a, b| b.date_created.cmp(&a.date_created));
    let _ = writeln!(output);
    let _ = writeln!(output, "## Recent Entries");

    if recent.is_empty() {
        let _ = writeln!(output, "No journal entries yet.");
    } else {
        for entry in recent.iter().take(RECENT_ENTRIES) {
            let _ = writeln!(
                output,
                "- {} on {}: mood {}",
                entry.title,
                entry.day(),
                mood_marker(entry.sentiment_score)
            );
        }
    }

    let _ = writeln!(output);
    let _ = writeln!(output, "## Notifications");

    if notifications.is_empty() {
        let _ = writeln!(output, "Nothing to flag this week.");
    } else {
        for notification in notifications {
            let priority = match notification.priority {
                Priority::High => "high",
                Priority::Medium => "medium",
            };
            let _ = writeln!(output, "- [{}] {}", priority, notification.message);
        }
    }

    output
}

/// Every entry, newest first, with the id needed to delete it.
pub fn build_history(user_id: &str, entries: &[JournalEntry]) -> String {
    let mut sorted: Vec<&JournalEntry> = entries.iter().collect();
    sorted.sort_by(|a, b| b.date_created.cmp(&a.date_created));

    let mut output = String::new();
    let _ = writeln!(output, "# Journal History");
    let _ = writeln!(output, "{} entries for {}", sorted.len(), user_id);

    if sorted.is_empty() {
        let _ = writeln!(output);
        let _ = writeln!(output, "No journal entries found.");
        return output;
    }

    for entry in sorted {
        let title = if entry.title.trim().is_empty() {
            "Untitled"
        } else {
            entry.title.as_str()
        };
        let _ = writeln!(output);
        let _ = writeln!(output, "## {}", title);
        let _ = writeln!(
            output,
            "{} | {} | mood {}",
            entry.id,
            entry.date_created.format("%Y-%m-%d %H:%M UTC"),
            mood_marker(entry.sentiment_score)
        );
        let _ = writeln!(output);
        let _ = writeln!(output, "{}", entry.content.trim());
    }

    output
}

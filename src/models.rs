use std::fmt;

use chrono::{DateTime, NaiveDate, NaiveDateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::error::AnalyticsError;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct JournalEntry {
    pub id: Uuid,
    pub user_id: String,
    pub title: String,
    pub content: String,
    pub date_created: DateTime<Utc>,
    /// Scored once at write time. `None` only for legacy rows.
    pub sentiment_score: Option<i32>,
}

impl JournalEntry {
    pub fn day(&self) -> NaiveDate {
        self.date_created.date_naive()
    }

    pub fn score_or_zero(&self) -> i32 {
        self.sentiment_score.unwrap_or(0)
    }
}

/// Write-path input; the store assigns `id` and `date_created`.
#[derive(Debug, Clone)]
pub struct NewEntry {
    pub user_id: String,
    pub title: String,
    pub content: String,
}

/// An entry as it arrives from an untyped source (CSV, legacy rows) before
/// its timestamp has been validated.
#[derive(Debug, Clone, Deserialize)]
pub struct RawEntry {
    pub id: Option<Uuid>,
    pub user_id: String,
    #[serde(default)]
    pub title: String,
    pub content: String,
    pub date_created: Option<String>,
    pub sentiment_score: Option<i32>,
}

impl TryFrom<RawEntry> for JournalEntry {
    type Error = AnalyticsError;

    fn try_from(raw: RawEntry) -> Result<Self, Self::Error> {
        let label = raw
            .id
            .map(|id| id.to_string())
            .unwrap_or_else(|| format!("without id for {}", raw.user_id));
        let value = raw
            .date_created
            .filter(|value| !value.trim().is_empty())
            .ok_or_else(|| AnalyticsError::MissingTimestamp {
                entry_id: label.clone(),
            })?;
        let date_created =
            parse_timestamp(&value).ok_or_else(|| AnalyticsError::InvalidTimestamp {
                entry_id: label.clone(),
                value: value.clone(),
            })?;
        let id = raw
            .id
            .unwrap_or_else(|| derived_entry_id(&raw.user_id, date_created, &raw.content));

        Ok(JournalEntry {
            id,
            user_id: raw.user_id,
            title: raw.title,
            content: raw.content,
            date_created,
            sentiment_score: raw.sentiment_score,
        })
    }
}

/// Stable id for rows imported without one, so re-importing a file is a no-op.
pub fn derived_entry_id(user_id: &str, date_created: DateTime<Utc>, content: &str) -> Uuid {
    let key = format!("{user_id}\n{}\n{content}", date_created.to_rfc3339());
    Uuid::new_v5(&Uuid::NAMESPACE_OID, key.as_bytes())
}

/// Accepts RFC 3339, or a naive `YYYY-MM-DD HH:MM:SS` / `YYYY-MM-DD` read as UTC.
pub fn parse_timestamp(value: &str) -> Option<DateTime<Utc>> {
    let value = value.trim();
    if let Ok(parsed) = DateTime::parse_from_rfc3339(value) {
        return Some(parsed.with_timezone(&Utc));
    }
    if let Ok(parsed) = NaiveDateTime::parse_from_str(value, "%Y-%m-%d %H:%M:%S") {
        return Some(parsed.and_utc());
    }
    NaiveDate::parse_from_str(value, "%Y-%m-%d")
        .ok()
        .and_then(|date| date.and_hms_opt(0, 0, 0))
        .map(|datetime| datetime.and_utc())
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum MoodLabel {
    VeryNegative,
    Negative,
    Neutral,
    Positive,
    VeryPositive,
}

impl fmt::Display for MoodLabel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            MoodLabel::VeryNegative => "Very Negative",
            MoodLabel::Negative => "Negative",
            MoodLabel::Neutral => "Neutral",
            MoodLabel::Positive => "Positive",
            MoodLabel::VeryPositive => "Very Positive",
        };
        f.write_str(label)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct MoodTrend {
    pub score: f64,
    pub label: MoodLabel,
}

impl Default for MoodTrend {
    fn default() -> Self {
        MoodTrend {
            score: 0.0,
            label: MoodLabel::Neutral,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum NotificationKind {
    MissedDays,
    LowMood,
    Achievement,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Priority {
    High,
    Medium,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Notification {
    #[serde(rename = "type")]
    pub kind: NotificationKind,
    pub message: String,
    pub priority: Priority,
}

#[derive(Debug, Clone)]
pub struct ReminderUser {
    pub user_id: String,
    pub email: String,
    pub first_name: String,
    pub reminders_enabled: bool,
    /// UTC hour, 0..=23.
    pub preferred_hour: u32,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReminderEmail {
    pub from: String,
    pub to: String,
    pub subject: String,
    pub html: String,
}

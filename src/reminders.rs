use chrono::{DateTime, Timelike, Utc};

use crate::error::AnalyticsError;
use crate::models::{ReminderEmail, ReminderUser};

pub const REMINDER_SUBJECT: &str = "Time for Your Daily Journal Entry!";

/// Users opted in to reminders whose preferred hour is the current UTC hour.
pub fn due_reminders(users: &[ReminderUser], now: DateTime<Utc>) -> Vec<&ReminderUser> {
    let hour = now.hour();
    users
        .iter()
        .filter(|user| user.reminders_enabled && user.preferred_hour == hour)
        .collect()
}

pub fn render_reminder(user: &ReminderUser, from: &str, app_url: &str) -> ReminderEmail {
    let link = format!("{}/new-journal", app_url.trim_end_matches('/'));
    let greeting = if user.first_name.trim().is_empty() {
        "there"
    } else {
        user.first_name.trim()
    };

    let html = format!(
        "<h2>Hello {greeting}!</h2>\n\
         <p>It's time to reflect on your day and write in your journal.</p>\n\
         <p>Taking a few minutes to journal can help improve your mental well-being.</p>\n\
         <a href=\"{link}\">Write Now</a>\n"
    );

    ReminderEmail {
        from: from.to_string(),
        to: user.email.clone(),
        subject: REMINDER_SUBJECT.to_string(),
        html,
    }
}

/// Accepts `HH:MM` (minutes are dropped) or a bare hour.
pub fn parse_preferred_time(value: &str) -> Result<u32, AnalyticsError> {
    let invalid = || AnalyticsError::InvalidPreferredTime(value.to_string());
    let trimmed = value.trim();
    let (hour, minute) = match trimmed.split_once(':') {
        Some((hour, minute)) => (hour, Some(minute)),
        None => (trimmed, None),
    };

    let hour: u32 = hour.parse().map_err(|_| invalid())?;
    if hour > 23 {
        return Err(invalid());
    }
    if let Some(minute) = minute {
        let minute: u32 = minute.parse().map_err(|_| invalid())?;
        if minute > 59 {
            return Err(invalid());
        }
    }
    Ok(hour)
}

use chrono::{DateTime, Duration, Utc};

use crate::models::{JournalEntry, Notification, NotificationKind, Priority};
use crate::streak;

pub const WINDOW_DAYS: i64 = 7;
pub const MIN_ENTRIES_PER_WINDOW: usize = 3;
pub const ACHIEVEMENT_STREAK: u32 = 7;

/// Entries created within the trailing seven days ending at `now`.
pub fn trailing_window(entries: &[JournalEntry], now: DateTime<Utc>) -> Vec<JournalEntry> {
    let since = now - Duration::days(WINDOW_DAYS);
    entries
        .iter()
        .filter(|entry| entry.date_created >= since)
        .cloned()
        .collect()
}

/// Advisory notifications for a trailing-window slice of entries, in the
/// order missed days, low mood, achievement.
pub fn advise(entries: &[JournalEntry]) -> Vec<Notification> {
    let mut notifications = Vec::new();

    if entries.len() < MIN_ENTRIES_PER_WINDOW {
        notifications.push(Notification {
            kind: NotificationKind::MissedDays,
            message: "Missing your thoughts! Take 5 minutes to reflect?".to_string(),
            priority: Priority::High,
        });
    }

    if let Some(mean) = mean_sentiment(entries) {
        if mean < 0.0 {
            notifications.push(Notification {
                kind: NotificationKind::LowMood,
                message: "Noticed you've been feeling down. Want to write about it?".to_string(),
                priority: Priority::High,
            });
        }
    }

    let days = streak::consecutive_days(entries);
    if days >= ACHIEVEMENT_STREAK {
        notifications.push(Notification {
            kind: NotificationKind::Achievement,
            message: format!("Amazing! You've written for {days} days straight!"),
            priority: Priority::Medium,
        });
    }

    notifications
}

fn mean_sentiment(entries: &[JournalEntry]) -> Option<f64> {
    if entries.is_empty() {
        return None;
    }
    let total: i64 = entries.iter().map(|entry| entry.score_or_zero() as i64).sum();
    Some(total as f64 / entries.len() as f64)
}

#[cfg(test)]
mod tests {
    use super::*;
    use uuid::Uuid;

    fn entry_at(now: DateTime<Utc>, days_ago: i64, sentiment_score: Option<i32>) -> JournalEntry {
        JournalEntry {
            id: Uuid::new_v4(),
            user_id: "uid-1".to_string(),
            title: "Entry".to_string(),
            content: String::new(),
            date_created: now - Duration::days(days_ago),
            sentiment_score,
        }
    }

    fn kinds(notifications: &[Notification]) -> Vec<NotificationKind> {
        notifications.iter().map(|n| n.kind).collect()
    }

    #[test]
    fn sparse_window_gets_missed_days_only() {
        let now = Utc::now();
        let entries = vec![entry_at(now, 0, Some(1)), entry_at(now, 3, Some(0))];
        let notifications = advise(&entries);
        assert_eq!(kinds(&notifications), vec![NotificationKind::MissedDays]);
        assert_eq!(notifications[0].priority, Priority::High);
    }

    #[test]
    fn empty_window_only_misses_days() {
        assert_eq!(kinds(&advise(&[])), vec![NotificationKind::MissedDays]);
    }

    #[test]
    fn negative_mean_flags_low_mood() {
        let now = Utc::now();
        let entries = vec![
            entry_at(now, 0, Some(-2)),
            entry_at(now, 2, Some(1)),
            entry_at(now, 4, None),
        ];
        let notifications = advise(&entries);
        assert_eq!(kinds(&notifications), vec![NotificationKind::LowMood]);
    }

    #[test]
    fn seven_day_streak_earns_achievement() {
        let now = Utc::now();
        let entries: Vec<JournalEntry> = (0..7).map(|d| entry_at(now, d, Some(1))).collect();
        let notifications = advise(&entries);
        assert_eq!(kinds(&notifications), vec![NotificationKind::Achievement]);
        assert_eq!(notifications[0].priority, Priority::Medium);
        assert_eq!(
            notifications[0].message,
            "Amazing! You've written for 7 days straight!"
        );
    }

    #[test]
    fn all_conditions_keep_their_order() {
        let now = Utc::now();
        let entries = vec![entry_at(now, 0, Some(-3)), entry_at(now, 1, Some(-1))];
        assert_eq!(
            kinds(&advise(&entries)),
            vec![NotificationKind::MissedDays, NotificationKind::LowMood]
        );
    }

    #[test]
    fn low_mood_comes_before_achievement() {
        let now = Utc::now();
        let entries: Vec<JournalEntry> = (0..7).map(|d| entry_at(now, d, Some(-1))).collect();
        assert_eq!(
            kinds(&advise(&entries)),
            vec![NotificationKind::LowMood, NotificationKind::Achievement]
        );
    }

    #[test]
    fn trailing_window_drops_older_entries() {
        let now = Utc::now();
        let entries = vec![
            entry_at(now, 0, Some(1)),
            entry_at(now, 6, Some(1)),
            entry_at(now, 8, Some(1)),
            entry_at(now, 30, Some(1)),
        ];
        assert_eq!(trailing_window(&entries, now).len(), 2);
    }
}

use chrono::{Duration, NaiveDate};

use crate::models::JournalEntry;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StreakSummary {
    pub days: u32,
    pub last_entry_day: Option<NaiveDate>,
    /// The streak ends on the reference day or the day before it.
    pub current: bool,
}

/// Consecutive UTC calendar days with at least one entry, counted back from
/// the most recent entry's day.
pub fn streak(entries: &[JournalEntry], reference_date: NaiveDate) -> u32 {
    streak_summary(entries, reference_date).days
}

pub fn streak_summary(entries: &[JournalEntry], reference_date: NaiveDate) -> StreakSummary {
    let days = distinct_days_desc(entries);
    let last_entry_day = days.first().copied();
    let current = last_entry_day
        .map(|day| day == reference_date || day == reference_date - Duration::days(1))
        .unwrap_or(false);

    StreakSummary {
        days: count_consecutive(&days),
        last_entry_day,
        current,
    }
}

pub(crate) fn consecutive_days(entries: &[JournalEntry]) -> u32 {
    count_consecutive(&distinct_days_desc(entries))
}

fn distinct_days_desc(entries: &[JournalEntry]) -> Vec<NaiveDate> {
    let mut sorted: Vec<&JournalEntry> = entries.iter().collect();
    sorted.sort_by(|a, b| b.date_created.cmp(&a.date_created));

    let mut days: Vec<NaiveDate> = sorted.into_iter().map(JournalEntry::day).collect();
    days.dedup();
    days
}

fn count_consecutive(days_desc: &[NaiveDate]) -> u32 {
    let Some(first) = days_desc.first() else {
        return 0;
    };

    let mut streak = 1;
    let mut previous = *first;
    for day in &days_desc[1..] {
        if *day != previous - Duration::days(1) {
            break;
        }
        streak += 1;
        previous = *day;
    }
    streak
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{TimeZone, Utc};
    use uuid::Uuid;

    fn entry_at(year: i32, month: u32, day: u32, hour: u32) -> JournalEntry {
        JournalEntry {
            id: Uuid::new_v4(),
            user_id: "uid-1".to_string(),
            title: "Entry".to_string(),
            content: "words".to_string(),
            date_created: Utc.with_ymd_and_hms(year, month, day, hour, 0, 0).unwrap(),
            sentiment_score: Some(0),
        }
    }

    fn today() -> NaiveDate {
        NaiveDate::from_ymd_opt(2026, 5, 10).unwrap()
    }

    #[test]
    fn empty_history_has_no_streak() {
        assert_eq!(streak(&[], today()), 0);
        let summary = streak_summary(&[], today());
        assert_eq!(summary.last_entry_day, None);
        assert!(!summary.current);
    }

    #[test]
    fn three_consecutive_days() {
        let entries = vec![
            entry_at(2026, 5, 10, 9),
            entry_at(2026, 5, 9, 9),
            entry_at(2026, 5, 8, 9),
        ];
        assert_eq!(streak(&entries, today()), 3);
    }

    #[test]
    fn gap_stops_the_walk() {
        let entries = vec![
            entry_at(2026, 5, 10, 9),
            entry_at(2026, 5, 8, 9),
            entry_at(2026, 5, 7, 9),
        ];
        assert_eq!(streak(&entries, today()), 1);
    }

    #[test]
    fn same_day_entries_count_once() {
        let entries = vec![entry_at(2026, 5, 10, 8), entry_at(2026, 5, 10, 21)];
        assert_eq!(streak(&entries, today()), 1);

        let entries = vec![
            entry_at(2026, 5, 10, 8),
            entry_at(2026, 5, 10, 21),
            entry_at(2026, 5, 9, 23),
            entry_at(2026, 5, 9, 1),
            entry_at(2026, 5, 8, 12),
        ];
        assert_eq!(streak(&entries, today()), 3);
    }

    #[test]
    fn unsorted_input_is_ordered_first() {
        let entries = vec![
            entry_at(2026, 5, 8, 9),
            entry_at(2026, 5, 10, 9),
            entry_at(2026, 5, 9, 9),
        ];
        assert_eq!(streak(&entries, today()), 3);
    }

    #[test]
    fn stale_streak_still_counts_from_latest_entry() {
        let entries = vec![
            entry_at(2026, 5, 2, 9),
            entry_at(2026, 5, 1, 9),
            entry_at(2026, 4, 30, 9),
        ];
        let summary = streak_summary(&entries, today());
        assert_eq!(summary.days, 3);
        assert_eq!(summary.last_entry_day, NaiveDate::from_ymd_opt(2026, 5, 2));
        assert!(!summary.current);
    }

    #[test]
    fn yesterday_keeps_streak_current() {
        let entries = vec![entry_at(2026, 5, 9, 22), entry_at(2026, 5, 8, 7)];
        let summary = streak_summary(&entries, today());
        assert_eq!(summary.days, 2);
        assert!(summary.current);
    }

    #[test]
    fn crosses_month_boundary() {
        let entries = vec![
            entry_at(2026, 3, 1, 9),
            entry_at(2026, 2, 28, 9),
            entry_at(2026, 2, 27, 9),
        ];
        assert_eq!(streak(&entries, NaiveDate::from_ymd_opt(2026, 3, 1).unwrap()), 3);
    }

    #[test]
    fn repeated_calls_agree() {
        let entries = vec![entry_at(2026, 5, 10, 9), entry_at(2026, 5, 9, 9)];
        let first = streak(&entries, today());
        let second = streak(&entries, today());
        assert_eq!(first, second);
        assert_eq!(consecutive_days(&entries), first);
    }
}

use crate::models::{JournalEntry, MoodLabel, MoodTrend};

pub const TREND_WINDOW: usize = 5;

/// Mean sentiment of the most recent entries, with its mood label.
pub fn trend(entries: &[JournalEntry]) -> MoodTrend {
    let mut recent: Vec<&JournalEntry> = entries.iter().collect();
    recent.sort_by(|a, b| b.date_created.cmp(&a.date_created));
    recent.truncate(TREND_WINDOW);

    if recent.is_empty() {
        return MoodTrend::default();
    }

    let total: i64 = recent.iter().map(|entry| entry.score_or_zero() as i64).sum();
    let score = total as f64 / recent.len() as f64;

    MoodTrend {
        score,
        label: classify(score),
    }
}

pub fn classify(score: f64) -> MoodLabel {
    if score > 0.5 {
        MoodLabel::VeryPositive
    } else if score > 0.0 {
        MoodLabel::Positive
    } else if score < -0.5 {
        MoodLabel::VeryNegative
    } else if score < 0.0 {
        MoodLabel::Negative
    } else {
        MoodLabel::Neutral
    }
}

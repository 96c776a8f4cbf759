use anyhow::Context;
use chrono::{DateTime, Duration, Utc};
use sqlx::{postgres::PgRow, PgExecutor, PgPool, Row};
use tracing::{debug, info, warn};
use uuid::Uuid;

use crate::models::{JournalEntry, NewEntry, Notification, RawEntry, ReminderUser};
use crate::sentiment::SentimentScorer;

pub async fn init_db(pool: &PgPool) -> anyhow::Result<()> {
    sqlx::migrate!("./migrations").run(pool).await?;
    info!("moodmind schema is up to date");
    Ok(())
}

pub async fn seed(pool: &PgPool, scorer: &impl SentimentScorer) -> anyhow::Result<()> {
    let users = vec![
        ("seed-avery", "avery.lee@moodmind.app", "Avery", true, 20),
        ("seed-jules", "jules.moreno@moodmind.app", "Jules", false, 8),
    ];

    for (user_id, email, first_name, enabled, hour) in users {
        set_reminder_preferences(pool, user_id, email, first_name, enabled, hour).await?;
    }

    let entries = vec![
        (
            Uuid::parse_str("6f1c2a9e-3b4d-4e5f-8a6b-7c8d9e0f1a2b")?,
            "seed-avery",
            0,
            "Evening walk",
            "A good walk and a great sunset, happy to be outside.",
        ),
        (
            Uuid::parse_str("0b7e4d21-9c3a-4f6e-b2d8-1a5c7e9f3b60")?,
            "seed-avery",
            1,
            "Deadline",
            "Work was terrible and I felt upset all afternoon.",
        ),
        (
            Uuid::parse_str("c3a95f0e-7d12-4b8a-9e64-5f2b1d8c7a43")?,
            "seed-avery",
            2,
            "Family call",
            "Love talking to my sister, wonderful news.",
        ),
        (
            Uuid::parse_str("8e2d6b14-5a7f-4c39-a1e0-3d9b7f6c2e85")?,
            "seed-jules",
            3,
            "Rainy day",
            "Sad and a bit angry about the cancelled trip.",
        ),
        (
            Uuid::parse_str("4a9f1c73-e8b2-4d05-96c7-b3e1a2f8d9c4")?,
            "seed-jules",
            9,
            "New plant",
            "Bought a fern. Good joy.",
        ),
    ];

    let now = Utc::now();
    for (id, user_id, days_ago, title, content) in entries {
        let sentiment_score = scorer.score(content);
        sqlx::query(
            r#"
            INSERT INTO moodmind.journals
            (id, user_id, title, content, date_created, sentiment_score)
            VALUES ($1, $2, $3, $4, $5, $6)
            ON CONFLICT (id) DO NOTHING
            "#,
        )
        .bind(id)
        .bind(user_id)
        .bind(title)
        .bind(content)
        .bind(now - Duration::days(days_ago))
        .bind(sentiment_score)
        .execute(pool)
        .await?;
    }

    Ok(())
}

async fn ensure_user<'e>(executor: impl PgExecutor<'e>, user_id: &str) -> anyhow::Result<()> {
    sqlx::query(
        r#"
        INSERT INTO moodmind.users (id)
        VALUES ($1)
        ON CONFLICT (id) DO NOTHING
        "#,
    )
    .bind(user_id)
    .execute(executor)
    .await?;
    Ok(())
}

/// Scores `content` once and stores it alongside the entry.
pub async fn insert_entry(
    pool: &PgPool,
    scorer: &impl SentimentScorer,
    entry: &NewEntry,
) -> anyhow::Result<JournalEntry> {
    ensure_user(pool, &entry.user_id).await?;

    let sentiment_score = scorer.score(&entry.content);
    debug!(user_id = %entry.user_id, sentiment_score, "scored new journal entry");

    let row = sqlx::query(
        r#"
        INSERT INTO moodmind.journals (id, user_id, title, content, sentiment_score)
        VALUES ($1, $2, $3, $4, $5)
        RETURNING id, user_id, title, content, date_created, sentiment_score
        "#,
    )
    .bind(Uuid::new_v4())
    .bind(&entry.user_id)
    .bind(&entry.title)
    .bind(&entry.content)
    .bind(sentiment_score)
    .fetch_one(pool)
    .await
    .context("failed to insert journal entry")?;

    row_to_entry(&row)
}

/// Hard delete, restricted to the entry's owner. Returns whether a row went away.
pub async fn delete_entry(pool: &PgPool, user_id: &str, id: Uuid) -> anyhow::Result<bool> {
    let result = sqlx::query("DELETE FROM moodmind.journals WHERE id = $1 AND user_id = $2")
        .bind(id)
        .bind(user_id)
        .execute(pool)
        .await?;

    Ok(result.rows_affected() > 0)
}

pub async fn fetch_entries(pool: &PgPool, user_id: &str) -> anyhow::Result<Vec<JournalEntry>> {
    let rows = sqlx::query(
        r#"
        SELECT id, user_id, title, content, date_created, sentiment_score
        FROM moodmind.journals
        WHERE user_id = $1
        ORDER BY date_created DESC
        "#,
    )
    .bind(user_id)
    .fetch_all(pool)
    .await
    .with_context(|| format!("failed to fetch journal entries for {user_id}"))?;

    rows.iter().map(row_to_entry).collect()
}

pub async fn fetch_entries_since(
    pool: &PgPool,
    user_id: &str,
    since: DateTime<Utc>,
) -> anyhow::Result<Vec<JournalEntry>> {
    let rows = sqlx::query(
        r#"
        SELECT id, user_id, title, content, date_created, sentiment_score
        FROM moodmind.journals
        WHERE user_id = $1 AND date_created >= $2
        ORDER BY date_created DESC
        "#,
    )
    .bind(user_id)
    .bind(since)
    .fetch_all(pool)
    .await
    .with_context(|| format!("failed to fetch recent journal entries for {user_id}"))?;

    rows.iter().map(row_to_entry).collect()
}

fn row_to_entry(row: &PgRow) -> anyhow::Result<JournalEntry> {
    Ok(JournalEntry {
        id: row.try_get("id")?,
        user_id: row.try_get("user_id")?,
        title: row.try_get("title")?,
        content: row.try_get("content")?,
        date_created: row.try_get("date_created")?,
        sentiment_score: row.try_get("sentiment_score")?,
    })
}

/// Validates and scores every CSV row up front. Rows without a stored score
/// are scored on the way in; the first bad row fails the whole batch.
pub fn parse_csv_entries<R: std::io::Read>(
    mut reader: csv::Reader<R>,
    scorer: &impl SentimentScorer,
) -> anyhow::Result<Vec<JournalEntry>> {
    let mut entries = Vec::new();

    for (line, result) in reader.deserialize::<RawEntry>().enumerate() {
        let raw = result.with_context(|| format!("malformed row {}", line + 1))?;
        let mut entry =
            JournalEntry::try_from(raw).with_context(|| format!("rejected row {}", line + 1))?;
        if entry.sentiment_score.is_none() {
            entry.sentiment_score = Some(scorer.score(&entry.content));
        }
        entries.push(entry);
    }

    Ok(entries)
}

/// Imports legacy entries in a single transaction. Re-importing a file skips
/// rows that are already stored.
pub async fn import_csv(
    pool: &PgPool,
    scorer: &impl SentimentScorer,
    csv_path: &std::path::Path,
) -> anyhow::Result<usize> {
    let reader = csv::Reader::from_path(csv_path)
        .with_context(|| format!("failed to open {}", csv_path.display()))?;
    let entries = parse_csv_entries(reader, scorer)
        .with_context(|| format!("nothing imported from {}", csv_path.display()))?;

    let mut tx = pool.begin().await?;
    let mut inserted = 0usize;

    for entry in &entries {
        ensure_user(&mut *tx, &entry.user_id).await?;

        let result = sqlx::query(
            r#"
            INSERT INTO moodmind.journals
            (id, user_id, title, content, date_created, sentiment_score)
            VALUES ($1, $2, $3, $4, $5, $6)
            ON CONFLICT (id) DO NOTHING
            "#,
        )
        .bind(entry.id)
        .bind(&entry.user_id)
        .bind(&entry.title)
        .bind(&entry.content)
        .bind(entry.date_created)
        .bind(entry.sentiment_score)
        .execute(&mut *tx)
        .await?;

        if result.rows_affected() > 0 {
            inserted += 1;
        } else {
            warn!(id = %entry.id, "skipping already imported entry");
        }
    }

    tx.commit().await?;
    Ok(inserted)
}

pub async fn set_reminder_preferences(
    pool: &PgPool,
    user_id: &str,
    email: &str,
    first_name: &str,
    enabled: bool,
    preferred_hour: u32,
) -> anyhow::Result<()> {
    let preferred_hour = i32::try_from(preferred_hour)?;
    sqlx::query(
        r#"
        INSERT INTO moodmind.users (id, email, first_name, reminders_enabled, preferred_hour)
        VALUES ($1, $2, $3, $4, $5)
        ON CONFLICT (id) DO UPDATE
        SET email = EXCLUDED.email,
            first_name = EXCLUDED.first_name,
            reminders_enabled = EXCLUDED.reminders_enabled,
            preferred_hour = EXCLUDED.preferred_hour,
            updated_at = now()
        "#,
    )
    .bind(user_id)
    .bind(email)
    .bind(first_name)
    .bind(enabled)
    .bind(preferred_hour)
    .execute(pool)
    .await?;

    Ok(())
}

/// Users with reminders switched on and an email address to send to.
pub async fn fetch_reminder_users(pool: &PgPool) -> anyhow::Result<Vec<ReminderUser>> {
    let rows = sqlx::query(
        r#"
        SELECT id, email, first_name, reminders_enabled, preferred_hour
        FROM moodmind.users
        WHERE reminders_enabled AND email IS NOT NULL
        "#,
    )
    .fetch_all(pool)
    .await?;

    let mut users = Vec::with_capacity(rows.len());
    for row in rows {
        let preferred_hour: i32 = row.try_get("preferred_hour")?;
        users.push(ReminderUser {
            user_id: row.try_get("id")?,
            email: row.try_get("email")?,
            first_name: row
                .try_get::<Option<String>, _>("first_name")?
                .unwrap_or_default(),
            reminders_enabled: row.try_get("reminders_enabled")?,
            preferred_hour: u32::try_from(preferred_hour)?,
        });
    }

    Ok(users)
}

/// Caches the latest advisory notifications on the user record for display.
pub async fn store_notifications(
    pool: &PgPool,
    user_id: &str,
    notifications: &[Notification],
) -> anyhow::Result<()> {
    let payload = serde_json::to_value(notifications)?;
    sqlx::query(
        r#"
        INSERT INTO moodmind.users (id, notifications, updated_at)
        VALUES ($1, $2, now())
        ON CONFLICT (id) DO UPDATE
        SET notifications = EXCLUDED.notifications, updated_at = now()
        "#,
    )
    .bind(user_id)
    .bind(payload)
    .execute(pool)
    .await?;

    Ok(())
}

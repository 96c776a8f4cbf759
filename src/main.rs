use std::path::PathBuf;

use anyhow::Context;
use chrono::{Duration, Timelike, Utc};
use clap::{Parser, Subcommand};
use sqlx::postgres::PgPoolOptions;
use tracing::{info, warn};
use tracing_subscriber::{fmt, EnvFilter};
use uuid::Uuid;

use moodmind::config::Config;
use moodmind::models::NewEntry;
use moodmind::{advisor, db, reminders, report, trend, KeywordScorer};

#[derive(Parser)]
#[command(name = "moodmind")]
#[command(about = "Journal mood analytics for MoodMind", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Create or upgrade the database schema
    InitDb,
    /// Load demo users and entries
    Seed,
    /// Import journal entries from a CSV file
    Import {
        #[arg(long)]
        csv: PathBuf,
    },
    /// Write a new journal entry
    Write {
        #[arg(long)]
        user: String,
        #[arg(long, default_value = "")]
        title: String,
        #[arg(long)]
        content: String,
    },
    /// Delete one of a user's entries
    Delete {
        #[arg(long)]
        user: String,
        #[arg(long)]
        id: Uuid,
    },
    /// List every entry a user has written
    History {
        #[arg(long)]
        user: String,
    },
    /// Render a user's dashboard as markdown
    Dashboard {
        #[arg(long)]
        user: String,
        #[arg(long)]
        out: Option<PathBuf>,
    },
    /// Compute advisory notifications from the last seven days
    Notify {
        #[arg(long)]
        user: String,
        /// Cache the result on the user record
        #[arg(long)]
        store: bool,
        #[arg(long)]
        json: bool,
    },
    /// Render reminder emails for users due this hour
    Remind {
        /// UTC hour to match instead of the current one
        #[arg(long, value_parser = clap::value_parser!(u32).range(0..24))]
        hour: Option<u32>,
        #[arg(long, default_value = "outbox")]
        outbox: PathBuf,
    },
    /// Update a user's reminder preferences
    Preferences {
        #[arg(long)]
        user: String,
        #[arg(long)]
        email: String,
        #[arg(long, default_value = "")]
        first_name: String,
        #[arg(long)]
        enabled: bool,
        /// Preferred reminder time in UTC, HH:MM
        #[arg(long, default_value = "20:00")]
        time: String,
    },
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    fmt().with_env_filter(EnvFilter::from_default_env()).init();

    let cli = Cli::parse();
    let config = Config::from_env()?;

    let pool = PgPoolOptions::new()
        .max_connections(config.max_connections)
        .connect(&config.database_url)
        .await
        .context("failed to connect to Postgres")?;

    let scorer = KeywordScorer;

    match cli.command {
        Commands::InitDb => {
            db::init_db(&pool).await?;
            println!("Schema ready.");
        }
        Commands::Seed => {
            db::seed(&pool, &scorer).await?;
            println!("Seed data inserted.");
        }
        Commands::Import { csv } => {
            let inserted = db::import_csv(&pool, &scorer, &csv).await?;
            println!("Inserted {inserted} entries from {}.", csv.display());
        }
        Commands::Write {
            user,
            title,
            content,
        } => {
            let entry = db::insert_entry(
                &pool,
                &scorer,
                &NewEntry {
                    user_id: user,
                    title,
                    content,
                },
            )
            .await?;
            println!(
                "Saved entry {} with mood {}.",
                entry.id,
                report::mood_marker(entry.sentiment_score)
            );
        }
        Commands::Delete { user, id } => {
            if db::delete_entry(&pool, &user, id).await? {
                println!("Deleted entry {id}.");
            } else {
                warn!(%id, %user, "no matching entry to delete");
                println!("No entry {id} found for {user}.");
            }
        }
        Commands::History { user } => {
            let entries = db::fetch_entries(&pool, &user).await?;
            print!("{}", report::build_history(&user, &entries));
        }
        Commands::Dashboard { user, out } => {
            let now = Utc::now();
            let entries = db::fetch_entries(&pool, &user).await?;
            let notifications = advisor::advise(&advisor::trailing_window(&entries, now));
            let dashboard =
                report::build_dashboard(&user, now.date_naive(), &entries, &notifications);

            match out {
                Some(path) => {
                    std::fs::write(&path, dashboard)
                        .with_context(|| format!("failed to write {}", path.display()))?;
                    println!("Dashboard written to {}.", path.display());
                }
                None => print!("{dashboard}"),
            }
        }
        Commands::Notify { user, store, json } => {
            let since = Utc::now() - Duration::days(advisor::WINDOW_DAYS);
            let window = db::fetch_entries_since(&pool, &user, since).await?;
            let notifications = advisor::advise(&window);
            info!(
                user = %user,
                entries = window.len(),
                notifications = notifications.len(),
                "analyzed recent activity"
            );

            if store {
                db::store_notifications(&pool, &user, &notifications).await?;
            }

            if json {
                println!("{}", serde_json::to_string_pretty(&notifications)?);
            } else if notifications.is_empty() {
                let mood = trend::trend(&window);
                println!("Nothing to flag. Mood trend: {}.", mood.label);
            } else {
                for notification in &notifications {
                    println!("- {}", notification.message);
                }
            }
        }
        Commands::Remind { hour, outbox } => {
            let mut now = Utc::now();
            if let Some(hour) = hour {
                now = now.with_hour(hour).context("invalid hour")?;
            }

            let users = db::fetch_reminder_users(&pool).await?;
            let due = reminders::due_reminders(&users, now);
            std::fs::create_dir_all(&outbox)
                .with_context(|| format!("failed to create {}", outbox.display()))?;

            for user in &due {
                let email = reminders::render_reminder(user, &config.reminder_from, &config.app_url);
                let path = outbox.join(format!("{}.eml", user.user_id));
                let message = format!(
                    "From: {}\nTo: {}\nSubject: {}\nContent-Type: text/html; charset=utf-8\n\n{}",
                    email.from, email.to, email.subject, email.html
                );
                std::fs::write(&path, message)
                    .with_context(|| format!("failed to write {}", path.display()))?;
            }

            println!("Queued {} reminders in {}.", due.len(), outbox.display());
        }
        Commands::Preferences {
            user,
            email,
            first_name,
            enabled,
            time,
        } => {
            let hour = reminders::parse_preferred_time(&time)?;
            db::set_reminder_preferences(&pool, &user, &email, &first_name, enabled, hour).await?;
            println!("Preferences saved for {user}.");
        }
    }

    Ok(())
}

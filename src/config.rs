use std::{env, fmt::Display, str::FromStr};

use anyhow::Context;
use tracing::{info, warn};

pub const DEFAULT_MAX_CONNECTIONS: u32 = 5;
pub const DEFAULT_APP_URL: &str = "https://moodmind.app";
pub const DEFAULT_REMINDER_FROM: &str = "MoodMind <noreply@moodmind.com>";

#[derive(Debug, Clone)]
pub struct Config {
    pub database_url: String,
    pub max_connections: u32,
    pub app_url: String,
    pub reminder_from: String,
}

impl Config {
    pub fn from_env() -> anyhow::Result<Self> {
        let database_url = env::var("DATABASE_URL")
            .context("DATABASE_URL must be set to a Postgres instance")?;

        Ok(Self {
            database_url,
            max_connections: load_or("MOODMIND_MAX_CONNECTIONS", DEFAULT_MAX_CONNECTIONS),
            app_url: load_or("MOODMIND_APP_URL", DEFAULT_APP_URL.to_string()),
            reminder_from: load_or("MOODMIND_REMINDER_FROM", DEFAULT_REMINDER_FROM.to_string()),
        })
    }
}

fn load_or<T>(key: &str, default: T) -> T
where
    T: FromStr + Display,
    T::Err: Display,
{
    parse_or(key, env::var(key).ok(), default)
}

fn parse_or<T>(key: &str, value: Option<String>, default: T) -> T
where
    T: FromStr + Display,
    T::Err: Display,
{
    let Some(value) = value else {
        info!("{key} not set, using default: {default}");
        return default;
    };

    value.trim().parse().unwrap_or_else(|e| {
        warn!("Invalid {key} value {value:?}: {e}, using default: {default}");
        default
    })
}

pub mod advisor;
pub mod config;
pub mod db;
pub mod error;
pub mod models;
pub mod reminders;
pub mod report;
pub mod sentiment;
pub mod streak;
pub mod trend;

pub use advisor::advise;
pub use error::AnalyticsError;
pub use sentiment::{score, KeywordScorer, SentimentScorer};
pub use streak::streak;
pub use trend::trend;

use thiserror::Error;

/// Data-integrity failures raised while turning external records into
/// analytics input.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum AnalyticsError {
    #[error("entry {entry_id} has no creation timestamp")]
    MissingTimestamp { entry_id: String },

    #[error("entry {entry_id} has an unparseable creation timestamp: {value:?}")]
    InvalidTimestamp { entry_id: String, value: String },

    #[error("invalid reminder time {0:?}, expected HH:MM or an hour between 0 and 23")]
    InvalidPreferredTime(String),
}

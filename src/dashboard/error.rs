use chrono::{DateTime, Utc};

/// Errors returned to callers of the dashboard API
#[derive(Debug, thiserror::Error)]
pub enum DashboardError {
    #[error("Unknown period: {0} (expected day, week, month, quarter or year)")]
    InvalidPeriod(String),

    #[error("Invalid period range: {start} is not before {end}")]
    InvalidRange {
        start: DateTime<Utc>,
        end: DateTime<Utc>,
    },
}

/// Failure of a record store fetch
///
/// Never shown to users as-is: the loader logs it and replaces it with a
/// generic message.
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    #[error("Database error: {0}")]
    Database(#[from] rusqlite::Error),

    #[error("Storage backend error: {0}")]
    Backend(String),

    #[error("Background task failed: {0}")]
    Task(String),
}

impl From<tokio::task::JoinError> for StoreError {
    fn from(err: tokio::task::JoinError) -> Self {
        StoreError::Task(err.to_string())
    }
}

//! Repository layer over the `users` and `completions` tables

pub mod completion_repo;
pub mod user_repo;

pub use completion_repo::CompletionRepo;
pub use user_repo::UserRepo;

use chrono::{DateTime, Utc};

pub(crate) fn to_millis(at: DateTime<Utc>) -> i64 {
    at.timestamp_millis()
}

pub(crate) fn from_millis(millis: i64) -> DateTime<Utc> {
    DateTime::from_timestamp_millis(millis).unwrap_or_default()
}

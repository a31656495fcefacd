use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

use super::user::UserId;

/// "User X completed their goal on day D"
///
/// At most one exists per (user_id, date); the store enforces this with a
/// unique constraint.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Completion {
    pub user_id: UserId,
    pub date: NaiveDate,
    /// When the record was first written
    pub recorded_at: DateTime<Utc>,
}

/// Result of `mark_complete`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MarkOutcome {
    /// The stored completion (the pre-existing one on a repeat mark)
    pub completion: Completion,
    /// false when the (user, date) pair was already marked
    pub newly_recorded: bool,
}

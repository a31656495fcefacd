use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Platform user id (the chat platform's numeric account id)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct UserId(pub i64);

impl UserId {
    pub fn get(self) -> i64 {
        self.0
    }
}

impl fmt::Display for UserId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<i64> for UserId {
    fn from(id: i64) -> Self {
        Self(id)
    }
}

/// A registered participant
///
/// One row per platform user id. Re-registration replaces the display name,
/// goal and emoji but keeps `user_id`, `created_at` and the store's row id.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
    /// Platform user id (unique)
    pub user_id: UserId,

    /// Name shown in reports
    pub display_name: String,

    /// Free-text goal, one line
    pub goal: String,

    /// Single glyph used as the user's marker in reports
    pub emoji: String,

    /// First registration
    pub created_at: DateTime<Utc>,

    /// Last re-registration (equals `created_at` until `/start` is re-run)
    pub updated_at: DateTime<Utc>,
}

impl User {
    /// `<emoji> <name>`, the label used on every report line
    pub fn label(&self) -> String {
        format!("{} {}", self.emoji, self.display_name)
    }
}

/// Validated input to `register`
///
/// Build with [`NewRegistration::new`], which runs the validation rules;
/// the fields hold trimmed values.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewRegistration {
    pub user_id: UserId,
    pub display_name: String,
    pub goal: String,
    pub emoji: String,
}

impl NewRegistration {
    pub fn new(
        user_id: UserId,
        display_name: &str,
        goal: &str,
        emoji: &str,
    ) -> crate::errors::Result<Self> {
        use crate::rules::validation;

        Ok(Self {
            user_id,
            display_name: validation::validate_display_name(display_name)?,
            goal: validation::validate_goal(goal)?,
            emoji: validation::validate_emoji(emoji)?,
        })
    }
}

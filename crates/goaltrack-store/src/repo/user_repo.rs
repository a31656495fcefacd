//! Registry persistence

use crate::errors::{from_rusqlite, Result};
use crate::repo::{from_millis, to_millis};
use chrono::{DateTime, Utc};
use goaltrack_core::model::{NewRegistration, User, UserId};
use rusqlite::{Connection, OptionalExtension, Row};

const USER_COLUMNS: &str =
    "platform_user_id, display_name, goal, emoji, created_at, updated_at";

/// SQLite repository for registered users
pub struct UserRepo;

impl UserRepo {
    /// Insert a user, or update name/goal/emoji of an existing one
    ///
    /// A single `INSERT .. ON CONFLICT DO UPDATE`, so concurrent
    /// registrations of the same platform id cannot create two rows.
    /// `created_at` and the row id survive re-registration.
    pub fn upsert_user(
        conn: &Connection,
        registration: &NewRegistration,
        now: DateTime<Utc>,
    ) -> Result<User> {
        let now_ms = to_millis(now);
        conn.execute(
            "INSERT INTO users (platform_user_id, display_name, goal, emoji, created_at, updated_at)
             VALUES (?1, ?2, ?3, ?4, ?5, ?5)
             ON CONFLICT(platform_user_id) DO UPDATE SET
                display_name = excluded.display_name,
                goal = excluded.goal,
                emoji = excluded.emoji,
                updated_at = excluded.updated_at",
            rusqlite::params![
                registration.user_id.get(),
                registration.display_name,
                registration.goal,
                registration.emoji,
                now_ms,
            ],
        )
        .map_err(from_rusqlite)?;

        tracing::debug!(user_id = registration.user_id.get(), "user upserted");

        Self::get_user(conn, registration.user_id)?.ok_or_else(|| {
            crate::errors::from_rusqlite(rusqlite::Error::QueryReturnedNoRows)
                .with_entity_id(registration.user_id.to_string())
        })
    }

    /// Get a user by platform id
    pub fn get_user(conn: &Connection, user_id: UserId) -> Result<Option<User>> {
        conn.query_row(
            &format!(
                "SELECT {} FROM users WHERE platform_user_id = ?1",
                USER_COLUMNS
            ),
            [user_id.get()],
            user_from_row,
        )
        .optional()
        .map_err(from_rusqlite)
    }

    /// All registered users in registration order
    pub fn list_users(conn: &Connection) -> Result<Vec<User>> {
        let mut stmt = conn
            .prepare(&format!(
                "SELECT {} FROM users ORDER BY created_at ASC, id ASC",
                USER_COLUMNS
            ))
            .map_err(from_rusqlite)?;

        let users = stmt
            .query_map([], user_from_row)
            .map_err(from_rusqlite)?
            .collect::<std::result::Result<Vec<_>, _>>()
            .map_err(from_rusqlite)?;

        Ok(users)
    }

    pub fn count_users(conn: &Connection) -> Result<i64> {
        conn.query_row("SELECT COUNT(*) FROM users", [], |row| row.get(0))
            .map_err(from_rusqlite)
    }
}

fn user_from_row(row: &Row<'_>) -> rusqlite::Result<User> {
    Ok(User {
        user_id: UserId(row.get(0)?),
        display_name: row.get(1)?,
        goal: row.get(2)?,
        emoji: row.get(3)?,
        created_at: from_millis(row.get(4)?),
        updated_at: from_millis(row.get(5)?),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db;
    use crate::migrations::apply_migrations;
    use chrono::Duration;

    fn setup() -> Connection {
        let mut conn = db::open_in_memory().unwrap();
        apply_migrations(&mut conn).unwrap();
        conn
    }

    fn reg(id: i64, goal: &str) -> NewRegistration {
        NewRegistration::new(UserId(id), "Ann", goal, "🏃").unwrap()
    }

    #[test]
    fn test_upsert_then_get() {
        let conn = setup();
        let user = UserRepo::upsert_user(&conn, &reg(1, "run"), Utc::now()).unwrap();
        assert_eq!(user.goal, "run");
        assert_eq!(UserRepo::get_user(&conn, UserId(1)).unwrap(), Some(user));
    }

    #[test]
    fn test_upsert_updates_goal_and_keeps_created_at() {
        let conn = setup();
        let t0 = Utc::now();
        let first = UserRepo::upsert_user(&conn, &reg(1, "run"), t0).unwrap();
        let second =
            UserRepo::upsert_user(&conn, &reg(1, "swim"), t0 + Duration::minutes(5)).unwrap();

        assert_eq!(second.goal, "swim");
        assert_eq!(second.created_at, first.created_at);
        assert!(second.updated_at > first.updated_at);
        assert_eq!(UserRepo::count_users(&conn).unwrap(), 1);
    }

    #[test]
    fn test_get_missing_user_is_none() {
        let conn = setup();
        assert_eq!(UserRepo::get_user(&conn, UserId(404)).unwrap(), None);
    }

    #[test]
    fn test_list_users_in_registration_order() {
        let conn = setup();
        let t0 = Utc::now();
        UserRepo::upsert_user(&conn, &reg(20, "b"), t0).unwrap();
        UserRepo::upsert_user(&conn, &reg(10, "a"), t0 + Duration::seconds(1)).unwrap();

        let ids: Vec<_> = UserRepo::list_users(&conn)
            .unwrap()
            .into_iter()
            .map(|u| u.user_id)
            .collect();
        assert_eq!(ids, vec![UserId(20), UserId(10)]);
    }
}

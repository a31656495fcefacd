//! Ledger persistence

use crate::errors::{from_rusqlite, Result};
use crate::repo::{from_millis, to_millis};
use chrono::{DateTime, NaiveDate, Utc};
use goaltrack_core::model::{Completion, UserId};
use rusqlite::{Connection, OptionalExtension, Row};

const COMPLETION_SELECT: &str = "SELECT u.platform_user_id, c.date, c.recorded_at
     FROM completions c
     JOIN users u ON u.id = c.user_id";

/// SQLite repository for completion records
pub struct CompletionRepo;

impl CompletionRepo {
    /// Record a completion for (user, date) unless one exists
    ///
    /// Returns true when a row was written. Relies on the
    /// `UNIQUE(user_id, date)` constraint, so two racing calls for the same
    /// pair write exactly one row. Writes nothing for an unknown user.
    pub fn insert_completion(
        conn: &Connection,
        user_id: UserId,
        date: NaiveDate,
        now: DateTime<Utc>,
    ) -> Result<bool> {
        let written = conn
            .execute(
                "INSERT INTO completions (user_id, date, recorded_at)
                 SELECT id, ?2, ?3 FROM users WHERE platform_user_id = ?1
                 ON CONFLICT(user_id, date) DO NOTHING",
                rusqlite::params![user_id.get(), date, to_millis(now)],
            )
            .map_err(from_rusqlite)?;

        tracing::debug!(user_id = user_id.get(), %date, written, "completion insert");
        Ok(written == 1)
    }

    /// The completion for one (user, date) pair
    pub fn get_completion(
        conn: &Connection,
        user_id: UserId,
        date: NaiveDate,
    ) -> Result<Option<Completion>> {
        conn.query_row(
            &format!(
                "{} WHERE u.platform_user_id = ?1 AND c.date = ?2",
                COMPLETION_SELECT
            ),
            rusqlite::params![user_id.get(), date],
            completion_from_row,
        )
        .optional()
        .map_err(from_rusqlite)
    }

    /// Every completion on `date`, in user registration order
    pub fn completions_on(conn: &Connection, date: NaiveDate) -> Result<Vec<Completion>> {
        Self::query(
            conn,
            &format!(
                "{} WHERE c.date = ?1 ORDER BY u.created_at ASC, u.id ASC",
                COMPLETION_SELECT
            ),
            rusqlite::params![date],
        )
    }

    /// One user's completions, oldest day first
    pub fn completions_for_user(conn: &Connection, user_id: UserId) -> Result<Vec<Completion>> {
        Self::query(
            conn,
            &format!(
                "{} WHERE u.platform_user_id = ?1 ORDER BY c.date ASC",
                COMPLETION_SELECT
            ),
            rusqlite::params![user_id.get()],
        )
    }

    /// All completions on or after `from`, oldest day first
    pub fn completions_since(conn: &Connection, from: NaiveDate) -> Result<Vec<Completion>> {
        Self::query(
            conn,
            &format!(
                "{} WHERE c.date >= ?1 ORDER BY c.date ASC, u.id ASC",
                COMPLETION_SELECT
            ),
            rusqlite::params![from],
        )
    }

    fn query(
        conn: &Connection,
        sql: &str,
        params: &[&dyn rusqlite::ToSql],
    ) -> Result<Vec<Completion>> {
        let mut stmt = conn.prepare(sql).map_err(from_rusqlite)?;
        let rows = stmt
            .query_map(params, completion_from_row)
            .map_err(from_rusqlite)?
            .collect::<std::result::Result<Vec<_>, _>>()
            .map_err(from_rusqlite)?;
        Ok(rows)
    }
}

fn completion_from_row(row: &Row<'_>) -> rusqlite::Result<Completion> {
    Ok(Completion {
        user_id: UserId(row.get(0)?),
        date: row.get(1)?,
        recorded_at: from_millis(row.get(2)?),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db;
    use crate::migrations::apply_migrations;
    use crate::repo::UserRepo;
    use goaltrack_core::model::NewRegistration;

    fn setup_with_user(id: i64) -> Connection {
        let mut conn = db::open_in_memory().unwrap();
        apply_migrations(&mut conn).unwrap();
        let reg = NewRegistration::new(UserId(id), "Ann", "run", "🏃").unwrap();
        UserRepo::upsert_user(&conn, &reg, Utc::now()).unwrap();
        conn
    }

    fn d(day: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 3, day).unwrap()
    }

    #[test]
    fn test_insert_twice_writes_once() {
        let conn = setup_with_user(1);
        assert!(CompletionRepo::insert_completion(&conn, UserId(1), d(1), Utc::now()).unwrap());
        assert!(!CompletionRepo::insert_completion(&conn, UserId(1), d(1), Utc::now()).unwrap());
        assert_eq!(CompletionRepo::completions_on(&conn, d(1)).unwrap().len(), 1);
    }

    #[test]
    fn test_insert_for_unknown_user_writes_nothing() {
        let conn = setup_with_user(1);
        assert!(!CompletionRepo::insert_completion(&conn, UserId(2), d(1), Utc::now()).unwrap());
        assert!(CompletionRepo::completions_on(&conn, d(1)).unwrap().is_empty());
    }

    #[test]
    fn test_dates_are_stored_as_iso_text() {
        let conn = setup_with_user(1);
        CompletionRepo::insert_completion(&conn, UserId(1), d(9), Utc::now()).unwrap();
        let stored: String = conn
            .query_row("SELECT date FROM completions", [], |row| row.get(0))
            .unwrap();
        assert_eq!(stored, "2024-03-09");
    }

    #[test]
    fn test_get_completion() {
        let conn = setup_with_user(1);
        CompletionRepo::insert_completion(&conn, UserId(1), d(2), Utc::now()).unwrap();
        let found = CompletionRepo::get_completion(&conn, UserId(1), d(2)).unwrap();
        assert_eq!(found.map(|c| c.date), Some(d(2)));
        assert!(CompletionRepo::get_completion(&conn, UserId(1), d(3))
            .unwrap()
            .is_none());
    }
}

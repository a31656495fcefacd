//! Registry operation handlers with boundary logging.
//!
//! ## Logging Ownership
//!
//! The engine layer owns lifecycle logging for registry operations:
//! - `log_op_start!` at entry
//! - `log_op_end!` on success
//! - `log_op_error!` on failure
//!
//! The store only uses `tracing::debug!()` for internal details.

use chrono::{DateTime, Utc};
use goaltrack_core::model::{NewRegistration, User, UserId};
use goaltrack_core::{log_op_end, log_op_error, log_op_start, GoalTrackError};
use goaltrack_store::errors::Result;
use goaltrack_store::UserRepo;
use rusqlite::Connection;

/// Register a user, or update goal/emoji/name of an existing one
///
/// Repeated calls are updates, never a second user.
///
/// ## Errors
///
/// - `Persistence`: Database error
pub fn register(
    conn: &Connection,
    registration: &NewRegistration,
    now: DateTime<Utc>,
) -> Result<User> {
    log_op_start!("register", user_id = registration.user_id.get());
    let start = std::time::Instant::now();

    let user = UserRepo::upsert_user(conn, registration, now).map_err(|e| {
        log_op_error!(
            "register",
            e.clone(),
            duration_ms = start.elapsed().as_millis() as u64,
            user_id = registration.user_id.get()
        );
        e
    })?;

    log_op_end!(
        "register",
        duration_ms = start.elapsed().as_millis() as u64,
        user_id = user.user_id.get()
    );

    Ok(user)
}

/// Look up a registered user
///
/// ## Errors
///
/// - `NotFound`: The user never registered
/// - `Persistence`: Database error
pub fn lookup(conn: &Connection, user_id: UserId) -> Result<User> {
    log_op_start!("lookup", user_id = user_id.get());
    let start = std::time::Instant::now();

    let user = lookup_impl(conn, user_id).map_err(|e| {
        log_op_error!(
            "lookup",
            e.clone(),
            duration_ms = start.elapsed().as_millis() as u64,
            user_id = user_id.get()
        );
        e
    })?;

    log_op_end!(
        "lookup",
        duration_ms = start.elapsed().as_millis() as u64,
        user_id = user_id.get()
    );

    Ok(user)
}

fn lookup_impl(conn: &Connection, user_id: UserId) -> Result<User> {
    UserRepo::get_user(conn, user_id)?.ok_or_else(|| {
        GoalTrackError::UserNotFound {
            user_id: user_id.get(),
        }
        .into()
    })
}

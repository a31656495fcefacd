//! Completion ledger operation handlers with boundary logging.
//!
//! Dates arrive as the raw `DD.MM.YYYY` text the user typed and are parsed
//! here, so every ledger entry point rejects bad dates the same way.

use chrono::{DateTime, NaiveDate, Utc};
use goaltrack_core::errors::ExError;
use goaltrack_core::model::day::{format_day, parse_day};
use goaltrack_core::model::{Completion, MarkOutcome, UserId};
use goaltrack_core::{log_op_end, log_op_error, log_op_start, GoalTrackError};
use goaltrack_store::errors::Result;
use goaltrack_store::{CompletionRepo, UserRepo};
use rusqlite::Connection;

/// Mark `user_id`'s goal as done on the day given by `date_text`
///
/// Idempotent: a repeat for the same (user, date) returns the existing
/// completion with `newly_recorded == false`.
///
/// ## Errors
///
/// - `InvalidDate`: `date_text` is not a real `DD.MM.YYYY` day
/// - `UnregisteredUser`: the user never ran `/start`
/// - `Persistence`: Database error
pub fn mark_complete(
    conn: &Connection,
    user_id: UserId,
    date_text: &str,
    now: DateTime<Utc>,
) -> Result<MarkOutcome> {
    log_op_start!("mark_complete", user_id = user_id.get(), date = date_text);
    let start = std::time::Instant::now();

    let outcome = mark_complete_impl(conn, user_id, date_text, now).map_err(|e| {
        log_op_error!(
            "mark_complete",
            e.clone(),
            duration_ms = start.elapsed().as_millis() as u64,
            user_id = user_id.get()
        );
        e
    })?;

    log_op_end!(
        "mark_complete",
        duration_ms = start.elapsed().as_millis() as u64,
        user_id = user_id.get(),
        newly_recorded = outcome.newly_recorded
    );

    Ok(outcome)
}

fn mark_complete_impl(
    conn: &Connection,
    user_id: UserId,
    date_text: &str,
    now: DateTime<Utc>,
) -> Result<MarkOutcome> {
    let date = parse_day(date_text)?;

    if UserRepo::get_user(conn, user_id)?.is_none() {
        return Err(GoalTrackError::UnregisteredUser {
            user_id: user_id.get(),
        }
        .into());
    }

    let newly_recorded = CompletionRepo::insert_completion(conn, user_id, date, now)?;

    // The user can disappear between the two statements only if someone
    // deletes rows by hand.
    let completion = CompletionRepo::get_completion(conn, user_id, date)?.ok_or_else(|| {
        ExError::from(GoalTrackError::Internal {
            message: format!("completion for {} missing after insert", format_day(date)),
        })
        .with_op("mark_complete")
        .with_entity_id(user_id.to_string())
    })?;

    Ok(MarkOutcome {
        completion,
        newly_recorded,
    })
}

/// Every completion on the day given by `date_text`
///
/// An empty vector means nobody completed that day.
///
/// ## Errors
///
/// - `InvalidDate`: `date_text` is not a real `DD.MM.YYYY` day
/// - `Persistence`: Database error
pub fn get_by_date(conn: &Connection, date_text: &str) -> Result<Vec<Completion>> {
    log_op_start!("get_by_date", date = date_text);
    let start = std::time::Instant::now();

    let result = parse_day(date_text)
        .map_err(ExError::from)
        .and_then(|date| get_by_date_impl(conn, date))
        .map_err(|e| {
            log_op_error!(
                "get_by_date",
                e.clone(),
                duration_ms = start.elapsed().as_millis() as u64
            );
            e
        })?;

    log_op_end!(
        "get_by_date",
        duration_ms = start.elapsed().as_millis() as u64,
        row_count = result.len() as u64
    );

    Ok(result)
}

pub(crate) fn get_by_date_impl(conn: &Connection, date: NaiveDate) -> Result<Vec<Completion>> {
    CompletionRepo::completions_on(conn, date)
}

/// One user's completions, oldest day first
///
/// ## Errors
///
/// - `Persistence`: Database error
pub fn get_all(conn: &Connection, user_id: UserId) -> Result<Vec<Completion>> {
    log_op_start!("get_all", user_id = user_id.get());
    let start = std::time::Instant::now();

    let result = get_all_impl(conn, user_id).map_err(|e| {
        log_op_error!(
            "get_all",
            e.clone(),
            duration_ms = start.elapsed().as_millis() as u64
        );
        e
    })?;

    log_op_end!(
        "get_all",
        duration_ms = start.elapsed().as_millis() as u64,
        row_count = result.len() as u64
    );

    Ok(result)
}

pub(crate) fn get_all_impl(conn: &Connection, user_id: UserId) -> Result<Vec<Completion>> {
    CompletionRepo::completions_for_user(conn, user_id)
}

/// Every completion on or after `from`, oldest day first
///
/// `from` is computed by the caller (e.g. today minus 30 days); nothing in
/// the ledger reads the clock.
///
/// ## Errors
///
/// - `Persistence`: Database error
pub fn get_since(conn: &Connection, from: NaiveDate) -> Result<Vec<Completion>> {
    log_op_start!("get_since", date = %from);
    let start = std::time::Instant::now();

    let result = get_since_impl(conn, from).map_err(|e| {
        log_op_error!(
            "get_since",
            e.clone(),
            duration_ms = start.elapsed().as_millis() as u64
        );
        e
    })?;

    log_op_end!(
        "get_since",
        duration_ms = start.elapsed().as_millis() as u64,
        row_count = result.len() as u64
    );

    Ok(result)
}

pub(crate) fn get_since_impl(conn: &Connection, from: NaiveDate) -> Result<Vec<Completion>> {
    CompletionRepo::completions_since(conn, from)
}

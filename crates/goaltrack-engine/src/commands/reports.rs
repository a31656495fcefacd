//! Report operations
//!
//! Each report reads the registry plus the relevant slice of the ledger and
//! hands both to the pure builders in `goaltrack_core::reports`.

use chrono::NaiveDate;
use goaltrack_core::model::day::{format_day, month_window_start, parse_day};
use goaltrack_core::reports::{DailyReport, TallyReport, TallyWindow};
use goaltrack_core::{log_op_end, log_op_error, log_op_start, GoalTrackError};
use goaltrack_store::errors::Result;
use goaltrack_store::UserRepo;
use rusqlite::Connection;

use crate::commands::ledger::{get_all_impl, get_by_date_impl, get_since_impl};

/// `/result <date>`: completed and missed users for one day
///
/// ## Errors
///
/// - `InvalidDate`: `date_text` is not a real `DD.MM.YYYY` day
/// - `Persistence`: Database error
pub fn daily_report(conn: &Connection, date_text: &str) -> Result<DailyReport> {
    log_op_start!("daily_report", date = date_text);
    let start = std::time::Instant::now();

    let report = daily_report_impl(conn, date_text).map_err(|e| {
        log_op_error!(
            "daily_report",
            e.clone(),
            duration_ms = start.elapsed().as_millis() as u64
        );
        e
    })?;

    log_op_end!(
        "daily_report",
        duration_ms = start.elapsed().as_millis() as u64,
        row_count = report.completed.len() as u64
    );

    Ok(report)
}

fn daily_report_impl(conn: &Connection, date_text: &str) -> Result<DailyReport> {
    let date = parse_day(date_text)?;
    let users = UserRepo::list_users(conn)?;
    let completions = get_by_date_impl(conn, date)?;
    Ok(DailyReport::build(date, &users, &completions))
}

/// `/result_all`: total completions per registered user
///
/// ## Errors
///
/// - `Persistence`: Database error
pub fn all_time_report(conn: &Connection) -> Result<TallyReport> {
    log_op_start!("all_time_report");
    let start = std::time::Instant::now();

    let report = all_time_report_impl(conn).map_err(|e| {
        log_op_error!(
            "all_time_report",
            e.clone(),
            duration_ms = start.elapsed().as_millis() as u64
        );
        e
    })?;

    log_op_end!(
        "all_time_report",
        duration_ms = start.elapsed().as_millis() as u64,
        row_count = report.rows.len() as u64
    );

    Ok(report)
}

fn all_time_report_impl(conn: &Connection) -> Result<TallyReport> {
    let users = UserRepo::list_users(conn)?;
    let mut completions = Vec::new();
    for user in &users {
        completions.extend(get_all_impl(conn, user.user_id)?);
    }
    Ok(TallyReport::build(TallyWindow::AllTime, &users, &completions))
}

/// `/result_month`: completions on or after `today` minus 30 days
///
/// ## Errors
///
/// - `Persistence`: Database error
pub fn month_report(conn: &Connection, today: NaiveDate) -> Result<TallyReport> {
    log_op_start!("month_report", date = %today);
    let start = std::time::Instant::now();

    let window = TallyWindow::Month {
        from: month_window_start(today),
    };
    let report = tally_in_window(conn, window).map_err(|e| {
        log_op_error!(
            "month_report",
            e.clone(),
            duration_ms = start.elapsed().as_millis() as u64
        );
        e
    })?;

    log_op_end!(
        "month_report",
        duration_ms = start.elapsed().as_millis() as u64,
        row_count = report.rows.len() as u64
    );

    Ok(report)
}

/// `/result_step <date>`: completions from a chosen day through `today`
///
/// ## Errors
///
/// - `InvalidDate`: `from_text` is not a real day, or is after `today`
/// - `Persistence`: Database error
pub fn step_report(conn: &Connection, from_text: &str, today: NaiveDate) -> Result<TallyReport> {
    log_op_start!("step_report", date = from_text);
    let start = std::time::Instant::now();

    let report = step_report_impl(conn, from_text, today).map_err(|e| {
        log_op_error!(
            "step_report",
            e.clone(),
            duration_ms = start.elapsed().as_millis() as u64
        );
        e
    })?;

    log_op_end!(
        "step_report",
        duration_ms = start.elapsed().as_millis() as u64,
        row_count = report.rows.len() as u64
    );

    Ok(report)
}

fn step_report_impl(conn: &Connection, from_text: &str, today: NaiveDate) -> Result<TallyReport> {
    let from = parse_day(from_text)?;
    if from > today {
        return Err(GoalTrackError::InvalidDate {
            input: from_text.trim().to_string(),
            reason: format!("start day is after today ({})", format_day(today)),
        }
        .into());
    }
    tally_in_window(conn, TallyWindow::Since { from, to: today })
}

/// Windowed tallies read `[from, ..)` from the ledger; for `Since` the
/// builder drops anything after the window end.
fn tally_in_window(conn: &Connection, window: TallyWindow) -> Result<TallyReport> {
    let completions = match window {
        TallyWindow::AllTime => return all_time_report_impl(conn),
        TallyWindow::Month { from, .. } | TallyWindow::Since { from, .. } => {
            get_since_impl(conn, from)?
        }
    };
    let users = UserRepo::list_users(conn)?;
    Ok(TallyReport::build(window, &users, &completions))
}

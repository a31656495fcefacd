//! Explicit request values routed to the registry, ledger and reports.

use chrono::{DateTime, NaiveDate, Utc};
use goaltrack_core::model::{MarkOutcome, NewRegistration, User, UserId};
use goaltrack_core::reports::{DailyReport, TallyReport};
use goaltrack_core_types::RequestId;
use goaltrack_store::errors::Result;
use rusqlite::Connection;

use crate::commands::{ledger, registry, reports};

/// Per-request inputs that would otherwise come from ambient state
#[derive(Debug, Clone)]
pub struct CommandContext {
    pub request_id: RequestId,
    /// The calendar day reports are computed against
    pub today: NaiveDate,
    /// Timestamp written into created/updated/recorded columns
    pub now: DateTime<Utc>,
}

impl CommandContext {
    /// Context for the current wall-clock time, with a fresh request id
    pub fn now() -> Self {
        let now = Utc::now();
        Self {
            request_id: RequestId::new(),
            today: now.date_naive(),
            now,
        }
    }

    /// Context pinned to a given day (tests, replays)
    pub fn for_day(today: NaiveDate) -> Self {
        let now = today
            .and_hms_opt(12, 0, 0)
            .map(|dt| dt.and_utc())
            .unwrap_or_else(Utc::now);
        Self {
            request_id: RequestId::new(),
            today,
            now,
        }
    }
}

/// Engine-level commands that touch the database
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EngineCommand {
    /// Create or update a user
    Register(NewRegistration),
    /// Fetch one user
    Lookup { user_id: UserId },
    /// Mark a day done; `date` is the raw `DD.MM.YYYY` text
    MarkComplete { user_id: UserId, date: String },
    ResultForDay { date: String },
    ResultAll,
    ResultMonth,
    ResultStep { from: String },
}

impl EngineCommand {
    pub fn op_name(&self) -> &'static str {
        match self {
            EngineCommand::Register(_) => "register",
            EngineCommand::Lookup { .. } => "lookup",
            EngineCommand::MarkComplete { .. } => "mark_complete",
            EngineCommand::ResultForDay { .. } => "daily_report",
            EngineCommand::ResultAll => "all_time_report",
            EngineCommand::ResultMonth => "month_report",
            EngineCommand::ResultStep { .. } => "step_report",
        }
    }
}

/// Result of applying an engine command
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EngineCommandResult {
    Registered(User),
    User(User),
    Marked(MarkOutcome),
    Daily(DailyReport),
    Tally(TallyReport),
}

/// Apply an engine command
///
/// Errors carry the request id from `ctx` so a failed reply can be matched
/// to its log lines.
pub fn apply_engine_command(
    cmd: EngineCommand,
    conn: &Connection,
    ctx: &CommandContext,
) -> Result<EngineCommandResult> {
    tracing::debug!(op = cmd.op_name(), request_id = %ctx.request_id, "applying engine command");

    let result = match cmd {
        EngineCommand::Register(registration) => {
            registry::register(conn, &registration, ctx.now).map(EngineCommandResult::Registered)
        }
        EngineCommand::Lookup { user_id } => {
            registry::lookup(conn, user_id).map(EngineCommandResult::User)
        }
        EngineCommand::MarkComplete { user_id, date } => {
            ledger::mark_complete(conn, user_id, &date, ctx.now).map(EngineCommandResult::Marked)
        }
        EngineCommand::ResultForDay { date } => {
            reports::daily_report(conn, &date).map(EngineCommandResult::Daily)
        }
        EngineCommand::ResultAll => reports::all_time_report(conn).map(EngineCommandResult::Tally),
        EngineCommand::ResultMonth => {
            reports::month_report(conn, ctx.today).map(EngineCommandResult::Tally)
        }
        EngineCommand::ResultStep { from } => {
            reports::step_report(conn, &from, ctx.today).map(EngineCommandResult::Tally)
        }
    };

    result.map_err(|e| e.with_request_id(ctx.request_id.clone()))
}

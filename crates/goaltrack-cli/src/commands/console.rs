//! Console command
//!
//! Usage: goaltrack console [--today DD.MM.YYYY]
//!
//! Each stdin line is `<user_id> <text>`. Registration conversations and
//! throttling persist for the whole session, as they would for a bot
//! connected to a chat.
//!
//! Piped scripts arrive faster than the default one second throttle, so
//! every line after a user's first would be dropped without a reply. Run
//! scripts with `--throttle-ms 0`:
//!
//! ```text
//! goaltrack --throttle-ms 0 console --today 10.03.2024 < session.txt
//! ```

use std::io::{BufRead, IsTerminal, Write};
use std::time::Duration;

use clap::Args;
use goaltrack_core::model::UserId;
use goaltrack_core_types::TraceId;
use goaltrack_engine::{ChatDispatcher, IncomingMessage};

use crate::config::BotConfig;

#[derive(Debug, Args)]
pub struct ConsoleArgs {
    /// Treat this day as today (DD.MM.YYYY) for every message
    #[arg(long)]
    pub today: Option<String>,
}

/// Execute console command
pub fn execute(args: ConsoleArgs, config: &BotConfig) -> Result<(), Box<dyn std::error::Error>> {
    let today = super::parse_today(args.today.as_deref())?;
    let conn = config.open_store()?;
    let mut dispatcher = ChatDispatcher::new(config.throttle);
    if let Some(note) = piped_throttle_note(config.throttle, std::io::stdin().is_terminal()) {
        eprintln!("{}", note);
    }
    let trace_id = TraceId::new();
    tracing::info!(
        trace_id = trace_id.as_str(),
        db = %config.db_path.display(),
        bot = ?config.token.as_ref().and_then(|t| t.hint()),
        "console session started"
    );

    let stdin = std::io::stdin();
    let mut stdout = std::io::stdout().lock();
    let mut handled = 0_u64;

    for line in stdin.lock().lines() {
        let line = line?;
        let line = line.trim();
        if line.is_empty() || line.starts_with('#') {
            continue;
        }

        let Some((user_id, text)) = parse_line(line) else {
            eprintln!("skipping malformed line (expected `<user_id> <text>`): {}", line);
            continue;
        };

        let ctx = super::context_for(today);
        let message = IncomingMessage::new(user_id, text);
        if let Some(reply) = dispatcher.handle(&conn, &message, &ctx) {
            writeln!(stdout, "{}", reply)?;
        }
        handled += 1;
    }

    stdout.flush()?;
    tracing::info!(trace_id = trace_id.as_str(), handled, "console session ended");
    Ok(())
}

fn piped_throttle_note(throttle: Duration, stdin_is_terminal: bool) -> Option<String> {
    if stdin_is_terminal || throttle.is_zero() {
        return None;
    }
    Some(format!(
        "note: stdin is not a terminal and messages from one user closer than {}ms apart are dropped; pass --throttle-ms 0 to replay a script",
        throttle.as_millis()
    ))
}

fn parse_line(line: &str) -> Option<(UserId, &str)> {
    let (id, text) = line.split_once(char::is_whitespace)?;
    let id = id.parse::<i64>().ok()?;
    Some((UserId(id), text.trim()))
}

//! Chat command parsing
//!
//! Turns the text of an inbound chat message into a [`ChatCommand`]. Date
//! arguments are kept as raw text here; the ledger operations parse them so
//! that `InvalidDate` is raised in exactly one place.

use crate::errors::{GoalTrackError, Result};

/// A parsed inbound message
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ChatCommand {
    /// `/start` - begin (or restart) registration
    Start,
    /// `/complete DD.MM.YYYY`
    Complete { date: String },
    /// `/result DD.MM.YYYY`
    ResultForDay { date: String },
    /// `/result_all`, or `/result` without a date
    ResultAll,
    /// `/result_month`
    ResultMonth,
    /// `/result_step DD.MM.YYYY`
    ResultStep { from: String },
    /// `/help`
    Help,
    /// Anything that is not a command (registration answers, chatter)
    Text(String),
}

impl ChatCommand {
    /// Parse message text
    ///
    /// Command names are case-insensitive and may carry the `@botname`
    /// suffix that group chats append.
    ///
    /// # Errors
    ///
    /// Returns `UnknownCommand` for `/something` that is not a known command.
    pub fn parse(text: &str) -> Result<Self> {
        let text = text.trim();
        let Some(body) = text.strip_prefix('/') else {
            return Ok(ChatCommand::Text(text.to_string()));
        };

        let (head, args) = match body.split_once(char::is_whitespace) {
            Some((head, rest)) => (head, rest.trim()),
            None => (body, ""),
        };
        let name = head
            .split_once('@')
            .map_or(head, |(name, _bot)| name)
            .to_ascii_lowercase();
        let first_arg = args.split_whitespace().next().unwrap_or("").to_string();

        let command = match name.as_str() {
            "start" => ChatCommand::Start,
            "complete" => ChatCommand::Complete { date: first_arg },
            "result" if first_arg.is_empty() => ChatCommand::ResultAll,
            "result" => ChatCommand::ResultForDay { date: first_arg },
            "result_all" => ChatCommand::ResultAll,
            "result_month" => ChatCommand::ResultMonth,
            "result_step" => ChatCommand::ResultStep { from: first_arg },
            "help" => ChatCommand::Help,
            _ => {
                return Err(GoalTrackError::UnknownCommand {
                    command: format!("/{}", name),
                })
            }
        };
        Ok(command)
    }

    /// Stable operation name used in logs
    pub fn op_name(&self) -> &'static str {
        match self {
            ChatCommand::Start => "start",
            ChatCommand::Complete { .. } => "complete",
            ChatCommand::ResultForDay { .. } => "result",
            ChatCommand::ResultAll => "result_all",
            ChatCommand::ResultMonth => "result_month",
            ChatCommand::ResultStep { .. } => "result_step",
            ChatCommand::Help => "help",
            ChatCommand::Text(_) => "text",
        }
    }
}

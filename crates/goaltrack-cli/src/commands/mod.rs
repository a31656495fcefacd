//! CLI subcommands

pub mod console;
pub mod migrate;
pub mod send;

use chrono::NaiveDate;
use goaltrack_core::model::day::parse_day;
use goaltrack_engine::CommandContext;

/// Parse the optional `--today DD.MM.YYYY` flag
pub(crate) fn parse_today(
    today: Option<&str>,
) -> Result<Option<NaiveDate>, Box<dyn std::error::Error>> {
    Ok(today.map(parse_day).transpose()?)
}

/// Request context for one message, pinned to `today` when given
pub(crate) fn context_for(today: Option<NaiveDate>) -> CommandContext {
    today.map_or_else(CommandContext::now, CommandContext::for_day)
}

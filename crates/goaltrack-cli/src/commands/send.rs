//! Send command
//!
//! Usage: goaltrack send --user <ID> [--today DD.MM.YYYY] <TEXT>...

use clap::Args;
use goaltrack_core::model::UserId;
use goaltrack_engine::{ChatDispatcher, IncomingMessage};

use crate::config::BotConfig;

#[derive(Debug, Args)]
pub struct SendArgs {
    /// Platform user id of the sender
    #[arg(long)]
    pub user: i64,

    /// Treat this day as today (DD.MM.YYYY)
    #[arg(long)]
    pub today: Option<String>,

    /// Message text, e.g. `/complete 01.03.2024`
    #[arg(required = true, num_args = 1.., allow_hyphen_values = true)]
    pub text: Vec<String>,
}

/// Execute send command
///
/// Registration answers need the conversation state kept by `console`;
/// a one-shot `send /start` only prints the first prompt.
pub fn execute(args: SendArgs, config: &BotConfig) -> Result<(), Box<dyn std::error::Error>> {
    let conn = config.open_store()?;
    let ctx = super::context_for(super::parse_today(args.today.as_deref())?);
    let mut dispatcher = ChatDispatcher::new(config.throttle);

    let message = IncomingMessage::new(UserId(args.user), args.text.join(" "));
    if let Some(reply) = dispatcher.handle(&conn, &message, &ctx) {
        println!("{}", reply);
    }
    Ok(())
}

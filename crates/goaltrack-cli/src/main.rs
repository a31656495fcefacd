//! goaltrack CLI
//!
//! Command-line front end for the goal-tracking bot: schema migration,
//! one-shot message dispatch, and an interactive console that stands in
//! for the chat transport.

use clap::{Parser, Subcommand};

mod commands;
mod config;

#[derive(Debug, Parser)]
#[command(name = "goaltrack")]
#[command(about = "goaltrack - group goal tracking bot", long_about = None)]
struct Cli {
    #[command(flatten)]
    config: config::ConfigArgs,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Debug, Subcommand)]
enum Commands {
    /// Apply database migrations
    Migrate(commands::migrate::MigrateArgs),
    /// Dispatch a single chat message and print the reply
    Send(commands::send::SendArgs),
    /// Read `<user_id> <text>` lines from stdin and print replies
    Console(commands::console::ConsoleArgs),
}

fn main() {
    // Missing .env is fine; env vars and flags still apply.
    let _ = dotenvy::dotenv();

    let cli = Cli::parse();
    let config = config::BotConfig::from_args(cli.config);
    goaltrack_core::logging_facility::init(config.log_profile);
    tracing::debug!(?config, "configuration loaded");

    let result = match cli.command {
        Commands::Migrate(args) => commands::migrate::execute(args, &config),
        Commands::Send(args) => commands::send::execute(args, &config),
        Commands::Console(args) => commands::console::execute(args, &config),
    };

    if let Err(e) = result {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}

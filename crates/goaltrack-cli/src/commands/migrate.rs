//! Migrate command
//!
//! Usage: goaltrack migrate

use clap::Args;
use goaltrack_store::UserRepo;

use crate::config::BotConfig;

#[derive(Debug, Args)]
pub struct MigrateArgs {}

/// Execute migrate command
pub fn execute(_args: MigrateArgs, config: &BotConfig) -> Result<(), Box<dyn std::error::Error>> {
    let conn = config.open_store()?;
    let users = UserRepo::count_users(&conn)?;

    println!(
        "✓ Database ready at {} ({} registered users)",
        config.db_path.display(),
        users
    );
    Ok(())
}

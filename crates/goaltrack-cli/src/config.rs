//! Runtime configuration
//!
//! Flags win over environment variables, which win over defaults. A `.env`
//! file in the working directory is loaded before parsing.

use std::path::PathBuf;
use std::time::Duration;

use clap::Args;
use goaltrack_core::logging_facility::Profile;
use goaltrack_core_types::Sensitive;
use goaltrack_store::errors::Result;
use rusqlite::Connection;

#[derive(Debug, Args)]
pub struct ConfigArgs {
    /// SQLite database file
    #[arg(long, global = true, env = "GOALTRACK_DB", default_value = "goaltrack.db")]
    pub db: PathBuf,

    /// Log profile: development, production or test
    #[arg(
        long,
        global = true,
        env = "GOALTRACK_LOG_PROFILE",
        default_value = "development"
    )]
    pub log_profile: Profile,

    /// Minimum gap between two messages from one user, in milliseconds
    #[arg(long, global = true, env = "GOALTRACK_THROTTLE_MS", default_value_t = 1000)]
    pub throttle_ms: u64,

    /// Chat platform token
    #[arg(long, global = true, env = "GOALTRACK_TOKEN", hide_env_values = true)]
    pub token: Option<String>,
}

/// Resolved configuration shared by all subcommands
#[derive(Debug, Clone)]
pub struct BotConfig {
    pub db_path: PathBuf,
    pub log_profile: Profile,
    pub throttle: Duration,
    /// Unused by the console transport; kept redacted in logs
    pub token: Option<Sensitive<String>>,
}

impl BotConfig {
    pub fn from_args(args: ConfigArgs) -> Self {
        Self {
            db_path: args.db,
            log_profile: args.log_profile,
            throttle: Duration::from_millis(args.throttle_ms),
            token: args.token.filter(|t| !t.is_empty()).map(Sensitive::new),
        }
    }

    /// Open the configured database and bring its schema up to date
    pub fn open_store(&self) -> Result<Connection> {
        goaltrack_store::db::open_and_migrate(&self.db_path)
    }
}

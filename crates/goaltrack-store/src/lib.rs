//! goaltrack store - SQLite persistence for the registry and the ledger
//!
//! Provides:
//! - Connection management (`db`)
//! - Embedded, checksummed schema migrations (`migrations`)
//! - Repositories for users and completions (`repo`)

pub mod db;
pub mod errors;
pub mod migrations;
pub mod repo;

// Re-export key types
pub use errors::Result;
pub use repo::{CompletionRepo, UserRepo};

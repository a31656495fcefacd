//! Migration framework
//!
//! - Embedded SQL migrations applied in order
//! - Idempotent re-application
//! - SHA-256 checksum recorded per migration and verified on every run

mod checksums;
mod embedded;
mod runner;

pub use runner::apply_migrations;

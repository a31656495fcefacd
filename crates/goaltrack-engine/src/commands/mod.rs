//! Command orchestration layer.
//!
//! Each public function here is one operation boundary: it logs
//! start/end/error and delegates to an `_impl` that does the work.

pub mod engine_command;
pub mod ledger;
pub mod registry;
pub mod reports;

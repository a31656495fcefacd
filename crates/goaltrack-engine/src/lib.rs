//! goaltrack engine - orchestration layer
//!
//! Coordinates the domain kernel (`goaltrack-core`) and persistence
//! (`goaltrack-store`): registry and ledger operations with boundary
//! logging, report assembly, and the chat dispatcher that turns inbound
//! messages into replies.

pub mod commands;
pub mod dispatcher;

pub use commands::engine_command::{
    apply_engine_command, CommandContext, EngineCommand, EngineCommandResult,
};
pub use dispatcher::{ChatDispatcher, IncomingMessage, DEFAULT_THROTTLE};

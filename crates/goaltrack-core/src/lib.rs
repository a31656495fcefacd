//! goaltrack core - domain kernel for the group goal-tracking bot
//!
//! This crate provides the pure, I/O-free parts of goaltrack:
//! - User and Completion models and the fixed `DD.MM.YYYY` day format
//! - Input validation for goals, display names and emoji tags
//! - Chat command parsing into explicit request values
//! - The `/start` registration conversation state machine
//! - Report aggregation and reply rendering
//! - The canonical error and logging facilities shared by all crates

pub mod commands;
pub mod errors;
pub mod logging_facility;
pub mod model;
pub mod registration;
pub mod render;
pub mod reports;
pub mod rules;

// Re-export commonly used types
pub use commands::ChatCommand;
pub use errors::{ExError, ExErrorKind, GoalTrackError, Result};
pub use model::{Completion, MarkOutcome, NewRegistration, User, UserId};
pub use registration::RegistrationFlow;

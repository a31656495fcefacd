pub mod completion;
pub mod day;
pub mod user;

pub use completion::{Completion, MarkOutcome};
pub use user::{NewRegistration, User, UserId};

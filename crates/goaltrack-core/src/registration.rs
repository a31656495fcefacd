//! The `/start` conversation
//!
//! Registration collects three answers in order: display name, goal, emoji.
//! The flow is a plain value; whoever owns the chat session keeps one per
//! user and feeds it the user's next message.

use crate::errors::Result;
use crate::model::{NewRegistration, UserId};
use crate::rules::validation;

/// Where the conversation currently is
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RegistrationStep {
    AwaitingName,
    AwaitingGoal { name: String },
    AwaitingEmoji { name: String, goal: String },
}

/// One user's in-progress registration
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RegistrationFlow {
    user_id: UserId,
    step: RegistrationStep,
}

/// What happened after feeding an answer to the flow
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FlowProgress {
    /// More answers needed; the string is the next prompt
    Continue(&'static str),
    /// All answers collected and validated
    Complete(NewRegistration),
}

impl RegistrationFlow {
    pub fn start(user_id: UserId) -> Self {
        Self {
            user_id,
            step: RegistrationStep::AwaitingName,
        }
    }

    pub fn user_id(&self) -> UserId {
        self.user_id
    }

    pub fn step(&self) -> &RegistrationStep {
        &self.step
    }

    /// Prompt for the current step
    pub fn prompt(&self) -> &'static str {
        match self.step {
            RegistrationStep::AwaitingName => "Let's get you registered! What should we call you?",
            RegistrationStep::AwaitingGoal { .. } => "What is your goal? (one line)",
            RegistrationStep::AwaitingEmoji { .. } => "Which emoji should mark you in reports?",
        }
    }

    /// Feed the user's answer to the current step
    ///
    /// # Errors
    ///
    /// Returns the validation error for the current field; the flow stays
    /// on the same step so the user can answer again.
    pub fn advance(&mut self, answer: &str) -> Result<FlowProgress> {
        match &self.step {
            RegistrationStep::AwaitingName => {
                let name = validation::validate_display_name(answer)?;
                self.step = RegistrationStep::AwaitingGoal { name };
            }
            RegistrationStep::AwaitingGoal { name } => {
                let goal = validation::validate_goal(answer)?;
                self.step = RegistrationStep::AwaitingEmoji {
                    name: name.clone(),
                    goal,
                };
            }
            RegistrationStep::AwaitingEmoji { name, goal } => {
                let registration = NewRegistration::new(self.user_id, name, goal, answer)?;
                return Ok(FlowProgress::Complete(registration));
            }
        }
        tracing::debug!(user_id = self.user_id.get(), step = ?self.step, "registration advanced");
        Ok(FlowProgress::Continue(self.prompt()))
    }
}

//! Chat dispatcher
//!
//! Owns the only per-chat state the bot keeps in memory: open registration
//! conversations and the time of each user's last accepted message. Every
//! error is turned into a reply here; nothing propagates to the transport.

use std::collections::HashMap;
use std::time::{Duration, Instant};

use goaltrack_core::errors::{ExError, ExErrorKind};
use goaltrack_core::registration::FlowProgress;
use goaltrack_core::render::{
    render_daily, render_error, render_help, render_marked, render_registered, render_restart,
    render_tally,
};
use goaltrack_core::{log_op_end, log_op_error, log_op_start};
use goaltrack_core::{ChatCommand, RegistrationFlow, UserId};
use goaltrack_store::errors::Result;
use rusqlite::Connection;

use crate::commands::engine_command::{
    apply_engine_command, CommandContext, EngineCommand, EngineCommandResult,
};

/// Minimum gap between two handled messages from the same user
pub const DEFAULT_THROTTLE: Duration = Duration::from_secs(1);

/// One inbound chat message
#[derive(Debug, Clone)]
pub struct IncomingMessage {
    pub user_id: UserId,
    pub text: String,
    pub received_at: Instant,
}

impl IncomingMessage {
    pub fn new(user_id: UserId, text: impl Into<String>) -> Self {
        Self {
            user_id,
            text: text.into(),
            received_at: Instant::now(),
        }
    }

    pub fn at(mut self, received_at: Instant) -> Self {
        self.received_at = received_at;
        self
    }
}

/// Routes inbound messages to engine commands and renders the replies
#[derive(Debug)]
pub struct ChatDispatcher {
    throttle: Duration,
    sessions: HashMap<UserId, RegistrationFlow>,
    last_seen: HashMap<UserId, Instant>,
}

impl Default for ChatDispatcher {
    fn default() -> Self {
        Self::new(DEFAULT_THROTTLE)
    }
}

impl ChatDispatcher {
    pub fn new(throttle: Duration) -> Self {
        Self {
            throttle,
            sessions: HashMap::new(),
            last_seen: HashMap::new(),
        }
    }

    pub fn throttle(&self) -> Duration {
        self.throttle
    }

    /// Whether `user_id` is in the middle of `/start`
    pub fn in_registration(&self, user_id: UserId) -> bool {
        self.sessions.contains_key(&user_id)
    }

    /// Handle one message
    ///
    /// Returns the reply text, or `None` when the message gets no reply
    /// (throttled, or plain chatter outside a registration).
    pub fn handle(
        &mut self,
        conn: &Connection,
        msg: &IncomingMessage,
        ctx: &CommandContext,
    ) -> Option<String> {
        if self.is_throttled(msg) {
            tracing::warn!(
                user_id = msg.user_id.get(),
                request_id = %ctx.request_id,
                throttle_ms = self.throttle.as_millis() as u64,
                "message throttled"
            );
            return None;
        }

        log_op_start!(
            "handle_message",
            user_id = msg.user_id.get(),
            request_id = %ctx.request_id
        );
        let start = Instant::now();

        match self.route(conn, msg, ctx) {
            Ok(reply) => {
                log_op_end!(
                    "handle_message",
                    duration_ms = start.elapsed().as_millis() as u64,
                    replied = reply.is_some()
                );
                reply
            }
            Err(err) => {
                let err = err.with_request_id(ctx.request_id.clone());
                log_op_error!(
                    "handle_message",
                    err.clone(),
                    duration_ms = start.elapsed().as_millis() as u64,
                    user_id = msg.user_id.get()
                );
                Some(render_error(&err))
            }
        }
    }

    /// Number of users whose last accepted message is still inside the throttle
    pub fn tracked_senders(&self) -> usize {
        self.last_seen.len()
    }

    fn is_throttled(&mut self, msg: &IncomingMessage) -> bool {
        if let Some(previous) = self.last_seen.get(&msg.user_id) {
            if msg.received_at.saturating_duration_since(*previous) < self.throttle {
                return true;
            }
        }
        // Entries older than the throttle can no longer hold anyone back.
        let throttle = self.throttle;
        self.last_seen
            .retain(|_, seen| msg.received_at.saturating_duration_since(*seen) < throttle);
        if !throttle.is_zero() {
            self.last_seen.insert(msg.user_id, msg.received_at);
        }
        false
    }

    fn route(
        &mut self,
        conn: &Connection,
        msg: &IncomingMessage,
        ctx: &CommandContext,
    ) -> Result<Option<String>> {
        let user_id = msg.user_id;
        let command = ChatCommand::parse(&msg.text);

        // Any command, known or not, ends an open registration.
        if !matches!(command, Ok(ChatCommand::Text(_))) && self.sessions.remove(&user_id).is_some()
        {
            tracing::debug!(user_id = user_id.get(), "registration cancelled");
        }

        let engine_command = match command? {
            ChatCommand::Start => return self.begin_registration(conn, user_id, ctx).map(Some),
            ChatCommand::Text(answer) => {
                return self.continue_registration(conn, user_id, &answer, ctx)
            }
            ChatCommand::Help => return Ok(Some(render_help())),
            ChatCommand::Complete { date } => EngineCommand::MarkComplete { user_id, date },
            ChatCommand::ResultForDay { date } => EngineCommand::ResultForDay { date },
            ChatCommand::ResultAll => EngineCommand::ResultAll,
            ChatCommand::ResultMonth => EngineCommand::ResultMonth,
            ChatCommand::ResultStep { from } => EngineCommand::ResultStep { from },
        };

        let result = apply_engine_command(engine_command, conn, ctx)?;
        Ok(Some(render_result(&result)))
    }

    fn begin_registration(
        &mut self,
        conn: &Connection,
        user_id: UserId,
        ctx: &CommandContext,
    ) -> Result<String> {
        let existing = match apply_engine_command(EngineCommand::Lookup { user_id }, conn, ctx) {
            Ok(EngineCommandResult::User(user)) => Some(user),
            Ok(_) => None,
            Err(e) if e.kind() == ExErrorKind::NotFound => None,
            Err(e) => return Err(e),
        };

        let flow = RegistrationFlow::start(user_id);
        let prompt = flow.prompt();
        self.sessions.insert(user_id, flow);

        Ok(match existing {
            Some(user) => render_restart(&user, prompt),
            None => prompt.to_string(),
        })
    }

    fn continue_registration(
        &mut self,
        conn: &Connection,
        user_id: UserId,
        answer: &str,
        ctx: &CommandContext,
    ) -> Result<Option<String>> {
        let Some(flow) = self.sessions.get_mut(&user_id) else {
            return Ok(None);
        };

        let registration = match flow.advance(answer).map_err(ExError::from)? {
            FlowProgress::Continue(prompt) => return Ok(Some(prompt.to_string())),
            FlowProgress::Complete(registration) => registration,
        };

        let result = apply_engine_command(EngineCommand::Register(registration), conn, ctx)?;
        self.sessions.remove(&user_id);
        Ok(Some(render_result(&result)))
    }
}

fn render_result(result: &EngineCommandResult) -> String {
    match result {
        EngineCommandResult::Registered(user) => render_registered(user),
        EngineCommandResult::User(user) => format!("{} Goal: {}", user.label(), user.goal),
        EngineCommandResult::Marked(outcome) => render_marked(outcome),
        EngineCommandResult::Daily(report) => render_daily(report),
        EngineCommandResult::Tally(report) => render_tally(report),
    }
}

use goaltrack_core_types::RequestId;
use thiserror::Error;

/// Result type alias using GoalTrackError
pub type Result<T> = std::result::Result<T, GoalTrackError>;

// ========== Error Facility ==========

/// Canonical error kind taxonomy
///
/// Every error that reaches the chat dispatcher is classified by one of
/// these kinds. The kind decides the user-facing reply; the stable code is
/// what shows up in logs and tests.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExErrorKind {
    // Input
    InvalidInput,
    InvalidDate,
    InvalidGoal,
    InvalidEmoji,
    InvalidName,

    // Registry / ledger
    UnregisteredUser,
    NotFound,

    // Integration/IO
    Io,
    Persistence,

    // Internal
    Internal,
}

impl ExErrorKind {
    /// Get the stable error code for this kind
    pub fn code(&self) -> &'static str {
        match self {
            ExErrorKind::InvalidInput => "ERR_INVALID_INPUT",
            ExErrorKind::InvalidDate => "ERR_INVALID_DATE",
            ExErrorKind::InvalidGoal => "ERR_INVALID_GOAL",
            ExErrorKind::InvalidEmoji => "ERR_INVALID_EMOJI",
            ExErrorKind::InvalidName => "ERR_INVALID_NAME",
            ExErrorKind::UnregisteredUser => "ERR_UNREGISTERED_USER",
            ExErrorKind::NotFound => "ERR_NOT_FOUND",
            ExErrorKind::Io => "ERR_IO",
            ExErrorKind::Persistence => "ERR_PERSISTENCE",
            ExErrorKind::Internal => "ERR_INTERNAL",
        }
    }

    /// Whether the error was caused by what the user typed
    ///
    /// User errors are logged at `warn`, everything else at `error`.
    pub fn is_user_error(&self) -> bool {
        matches!(
            self,
            ExErrorKind::InvalidInput
                | ExErrorKind::InvalidDate
                | ExErrorKind::InvalidGoal
                | ExErrorKind::InvalidEmoji
                | ExErrorKind::InvalidName
                | ExErrorKind::UnregisteredUser
                | ExErrorKind::NotFound
        )
    }
}

/// Canonical structured error type
///
/// Classification fields for programmatic handling plus free-form context
/// for debugging. Store and engine functions return this type.
#[derive(Debug, Clone)]
pub struct ExError {
    kind: ExErrorKind,
    op: Option<String>,
    entity_id: Option<String>,
    request_id: Option<RequestId>,
    message: String,
}

impl ExError {
    /// Create a new error with the specified kind
    pub fn new(kind: ExErrorKind) -> Self {
        Self {
            kind,
            op: None,
            entity_id: None,
            request_id: None,
            message: String::new(),
        }
    }

    /// Add operation context
    pub fn with_op(mut self, op: impl Into<String>) -> Self {
        self.op = Some(op.into());
        self
    }

    /// Add entity ID context (platform user id, date, migration id, ...)
    pub fn with_entity_id(mut self, id: impl Into<String>) -> Self {
        self.entity_id = Some(id.into());
        self
    }

    /// Add request ID context
    pub fn with_request_id(mut self, request_id: RequestId) -> Self {
        self.request_id = Some(request_id);
        self
    }

    /// Add custom message
    pub fn with_message(mut self, message: impl Into<String>) -> Self {
        self.message = message.into();
        self
    }

    pub fn kind(&self) -> ExErrorKind {
        self.kind
    }

    pub fn code(&self) -> &'static str {
        self.kind.code()
    }

    pub fn op(&self) -> Option<&str> {
        self.op.as_deref()
    }

    pub fn entity_id(&self) -> Option<&str> {
        self.entity_id.as_deref()
    }

    pub fn request_id(&self) -> Option<&RequestId> {
        self.request_id.as_ref()
    }

    pub fn message(&self) -> &str {
        &self.message
    }
}

impl std::fmt::Display for ExError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "[{}]", self.code())?;
        if let Some(op) = &self.op {
            write!(f, " in operation '{}'", op)?;
        }
        if !self.message.is_empty() {
            write!(f, ": {}", self.message)?;
        }
        if let Some(entity_id) = &self.entity_id {
            write!(f, " (entity_id: {})", entity_id)?;
        }
        Ok(())
    }
}

impl std::error::Error for ExError {}

// ========== End Error Facility ==========

/// Domain error taxonomy for goaltrack operations
#[derive(Error, Debug, Clone, PartialEq)]
pub enum GoalTrackError {
    // ===== Input Errors =====
    /// Date text did not parse as DD.MM.YYYY or is not a real calendar day
    #[error("Invalid date '{input}': {reason}")]
    InvalidDate { input: String, reason: String },

    /// Goal text failed validation
    #[error("Invalid goal: {reason}")]
    InvalidGoal { reason: String },

    /// Emoji tag is not a single displayable glyph
    #[error("Invalid emoji '{emoji}': {reason}")]
    InvalidEmoji { emoji: String, reason: String },

    /// Display name failed validation
    #[error("Invalid name: {reason}")]
    InvalidName { reason: String },

    /// Text started with '/' but named no known command
    #[error("Unknown command: {command}")]
    UnknownCommand { command: String },

    // ===== Registry Errors =====
    /// Ledger write attempted by a user who never ran /start
    #[error("User {user_id} is not registered")]
    UnregisteredUser { user_id: i64 },

    /// Registry lookup found no user
    #[error("User not found: {user_id}")]
    UserNotFound { user_id: i64 },

    // ===== Generic Errors =====
    /// Generic internal error
    #[error("Internal error: {message}")]
    Internal { message: String },
}

/// Conversion from GoalTrackError to ExError
impl From<GoalTrackError> for ExError {
    fn from(err: GoalTrackError) -> Self {
        match err {
            GoalTrackError::InvalidDate { input, reason } => {
                ExError::new(ExErrorKind::InvalidDate)
                    .with_entity_id(input)
                    .with_message(reason)
            }

            GoalTrackError::InvalidGoal { reason } => {
                ExError::new(ExErrorKind::InvalidGoal).with_message(reason)
            }

            GoalTrackError::InvalidEmoji { emoji, reason } => {
                ExError::new(ExErrorKind::InvalidEmoji)
                    .with_entity_id(emoji)
                    .with_message(reason)
            }

            GoalTrackError::InvalidName { reason } => {
                ExError::new(ExErrorKind::InvalidName).with_message(reason)
            }

            GoalTrackError::UnknownCommand { command } => {
                ExError::new(ExErrorKind::InvalidInput)
                    .with_entity_id(command)
                    .with_message("Unknown command")
            }

            GoalTrackError::UnregisteredUser { user_id } => {
                ExError::new(ExErrorKind::UnregisteredUser)
                    .with_entity_id(user_id.to_string())
                    .with_message("User must register with /start first")
            }

            GoalTrackError::UserNotFound { user_id } => ExError::new(ExErrorKind::NotFound)
                .with_entity_id(user_id.to_string())
                .with_message("User not found"),

            GoalTrackError::Internal { message } => {
                ExError::new(ExErrorKind::Internal).with_message(message)
            }
        }
    }
}

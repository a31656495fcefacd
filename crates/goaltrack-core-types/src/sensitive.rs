//! Redaction wrapper for secrets
//!
//! The chat platform token travels through configuration; `BotConfig`
//! derives `Debug`, so the token is wrapped to keep it out of log lines.

use std::fmt;

const REDACTED: &str = "<redacted>";

/// A value that never shows up in `Debug` or `Display` output
///
/// ```
/// use goaltrack_core_types::Sensitive;
///
/// let token = Sensitive::new("123456:ABC-DEF".to_string());
/// assert_eq!(format!("{:?}", token), "Sensitive(<redacted>)");
/// assert_eq!(token.expose(), "123456:ABC-DEF");
/// ```
#[derive(Clone, PartialEq, Eq)]
pub struct Sensitive<T>(T);

impl<T> Sensitive<T> {
    pub fn new(value: T) -> Self {
        Self(value)
    }

    /// Borrow the secret; call sites are the places that leak it
    pub fn expose(&self) -> &T {
        &self.0
    }

    pub fn into_inner(self) -> T {
        self.0
    }
}

impl Sensitive<String> {
    /// Loggable hint for a `<bot_id>:<secret>` token: the bot id only
    ///
    /// Tokens without a numeric id prefix give no hint.
    pub fn hint(&self) -> Option<&str> {
        let (bot_id, secret) = self.0.split_once(':')?;
        let numeric = !bot_id.is_empty() && bot_id.bytes().all(|b| b.is_ascii_digit());
        (numeric && !secret.is_empty()).then_some(bot_id)
    }
}

impl<T> fmt::Debug for Sensitive<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("Sensitive").field(&format_args!("{}", REDACTED)).finish()
    }
}

impl<T> fmt::Display for Sensitive<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(REDACTED)
    }
}

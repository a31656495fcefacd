//! Canonical schema constants for structured logging and events
//!
//! The boundary macros emit these event names, and the test capture layer
//! reads events back by the same op and event keys.

// Canonical field keys read back by the test capture layer
pub const FIELD_OP: &str = "op";
pub const FIELD_EVENT: &str = "event";

// Canonical event names
pub const EVENT_START: &str = "start";
pub const EVENT_END: &str = "end";
pub const EVENT_END_ERROR: &str = "end_error";

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_event_names_are_distinct() {
        assert_ne!(EVENT_START, EVENT_END);
        assert_ne!(EVENT_START, EVENT_END_ERROR);
        assert_ne!(EVENT_END, EVENT_END_ERROR);
    }

    #[test]
    fn test_capture_keys_are_distinct() {
        assert_ne!(FIELD_OP, FIELD_EVENT);
    }
}

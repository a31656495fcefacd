#![allow(clippy::unwrap_used, clippy::expect_used)]

use goaltrack_core::errors::{ExError, ExErrorKind, GoalTrackError};
use goaltrack_core::logging_facility::test_capture::init_test_capture;
use goaltrack_core::{log_op_end, log_op_error, log_op_start};
use goaltrack_core_types::schema::{EVENT_END, EVENT_END_ERROR, EVENT_START};
use tracing::Level;

#[test]
fn test_log_op_start_records_extra_fields() {
    let capture = init_test_capture();
    let op_name = "test_log_op_start_unique_1";

    log_op_start!(op_name, user_id = 42_i64);

    let starts = capture.matching(op_name, |e| e.is(EVENT_START));
    assert_eq!(starts.len(), 1);
    assert_eq!(starts[0].field("user_id"), Some("42"));
}

#[test]
fn test_log_op_end_records_duration() {
    let capture = init_test_capture();
    let op_name = "test_log_op_end_unique_2";

    log_op_end!(op_name, duration_ms = 42);

    let ends = capture.matching(op_name, |e| e.is(EVENT_END));
    assert_eq!(ends.len(), 1);
    assert_eq!(ends[0].field("duration_ms"), Some("42"));
}

#[test]
fn test_user_errors_are_logged_as_warnings() {
    let capture = init_test_capture();
    let op_name = "test_log_op_error_unique_3";

    let err = GoalTrackError::UnregisteredUser { user_id: 5 };
    log_op_error!(op_name, err, duration_ms = 10);

    let errors = capture.matching(op_name, |e| e.is(EVENT_END_ERROR));
    assert_eq!(errors.len(), 1);
    assert_eq!(errors[0].level, Level::WARN);
    assert_eq!(errors[0].field("err_code"), Some("ERR_UNREGISTERED_USER"));
}

#[test]
fn test_system_errors_are_logged_as_errors() {
    let capture = init_test_capture();
    let op_name = "test_log_op_error_unique_4";

    let err = ExError::new(ExErrorKind::Persistence).with_message("disk full");
    log_op_error!(op_name, err, duration_ms = 1, user_id = 7_i64);

    let errors = capture.matching(op_name, |e| e.is(EVENT_END_ERROR));
    assert_eq!(errors.len(), 1);
    assert_eq!(errors[0].level, Level::ERROR);
    assert_eq!(errors[0].field("err_message"), Some("disk full"));
    assert_eq!(errors[0].field("user_id"), Some("7"));
}

#[test]
fn test_capture_keeps_display_form_of_plain_fields() {
    let capture = init_test_capture();

    tracing::info!(op = "capture_plain_fields_unique_5", user_id = 42_i64, ok = true, "hello");

    let events = capture.matching("capture_plain_fields_unique_5", |_| true);
    assert_eq!(events.len(), 1);
    assert_eq!(events[0].field("user_id"), Some("42"));
    assert_eq!(events[0].field("ok"), Some("true"));
    assert_eq!(events[0].field("message"), Some("hello"));
    assert_eq!(events[0].event(), None);
}

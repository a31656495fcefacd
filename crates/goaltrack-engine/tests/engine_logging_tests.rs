#![allow(clippy::unwrap_used, clippy::expect_used)]

mod common;

use chrono::Utc;
use common::{register, setup_db};
use goaltrack_core::logging_facility::test_capture::init_test_capture;
use goaltrack_core::model::UserId;
use goaltrack_core_types::schema::{EVENT_END, EVENT_END_ERROR, EVENT_START};
use goaltrack_engine::commands::ledger;
use goaltrack_engine::{ChatDispatcher, CommandContext, IncomingMessage};
use tracing::Level;

// Each test uses its own user id; the capture is shared by the whole binary.

#[test]
fn test_mark_complete_logs_start_and_end() {
    let capture = init_test_capture();
    let conn = setup_db();
    register(&conn, 101, "Ann", "run", "🏃");

    ledger::mark_complete(&conn, UserId(101), "01.03.2024", Utc::now()).unwrap();

    let mine = |event: &'static str| {
        capture.matching("mark_complete", move |e| {
            e.is(event) && e.field("user_id") == Some("101")
        })
    };
    assert_eq!(mine(EVENT_START).len(), 1);
    let ends = mine(EVENT_END);
    assert_eq!(ends.len(), 1);
    assert!(ends[0].field("duration_ms").is_some());
    assert_eq!(ends[0].field("newly_recorded"), Some("true"));
}

#[test]
fn test_unregistered_mark_logs_warning_with_code() {
    let capture = init_test_capture();
    let conn = setup_db();

    ledger::mark_complete(&conn, UserId(202), "01.03.2024", Utc::now()).unwrap_err();

    let errors = capture.matching("mark_complete", |e| {
        e.is(EVENT_END_ERROR) && e.field("user_id") == Some("202")
    });
    assert_eq!(errors.len(), 1);
    assert_eq!(errors[0].level, Level::WARN);
    assert_eq!(errors[0].field("err_code"), Some("ERR_UNREGISTERED_USER"));
}

#[test]
fn test_register_logs_boundary() {
    let capture = init_test_capture();
    let conn = setup_db();
    register(&conn, 303, "Cy", "cook", "🍳");

    let ends = capture.matching("register", |e| {
        e.is(EVENT_END) && e.field("user_id") == Some("303")
    });
    assert_eq!(ends.len(), 1);
}

#[test]
fn test_start_goes_through_logged_lookup() {
    let capture = init_test_capture();
    let conn = setup_db();
    let ctx = CommandContext::for_day(common::day(10, 3, 2024));
    let mut dispatcher = ChatDispatcher::new(std::time::Duration::ZERO);

    dispatcher
        .handle(&conn, &IncomingMessage::new(UserId(404), "/start"), &ctx)
        .unwrap();
    let misses = capture.matching("lookup", |e| {
        e.is(EVENT_END_ERROR) && e.field("user_id") == Some("404")
    });
    assert_eq!(misses.len(), 1);
    assert_eq!(misses[0].field("err_code"), Some("ERR_NOT_FOUND"));

    register(&conn, 404, "Dee", "swim", "🏊");
    let reply = dispatcher
        .handle(&conn, &IncomingMessage::new(UserId(404), "/start"), &ctx)
        .unwrap();
    assert!(reply.contains("Dee"));
    let hits = capture.matching("lookup", |e| {
        e.is(EVENT_END) && e.field("user_id") == Some("404")
    });
    assert_eq!(hits.len(), 1);
}

#![allow(clippy::unwrap_used, clippy::expect_used)]

mod common;

use chrono::{Duration, Utc};
use common::{day, register, setup_db};
use goaltrack_core::errors::ExErrorKind;
use goaltrack_core::model::UserId;
use goaltrack_engine::commands::ledger;
use proptest::prelude::*;

#[test]
fn test_mark_then_query_by_date() {
    let conn = setup_db();
    register(&conn, 1, "U1", "run", "🏃");

    let outcome = ledger::mark_complete(&conn, UserId(1), "01.03.2024", Utc::now()).unwrap();
    assert!(outcome.newly_recorded);
    assert_eq!(outcome.completion.date, day(1, 3, 2024));

    let on_first = ledger::get_by_date(&conn, "01.03.2024").unwrap();
    assert_eq!(on_first.len(), 1);
    assert_eq!(on_first[0].user_id, UserId(1));

    assert!(ledger::get_by_date(&conn, "02.03.2024").unwrap().is_empty());
}

#[test]
fn test_mark_impossible_date_is_invalid_date() {
    let conn = setup_db();
    register(&conn, 1, "U1", "run", "🏃");

    let err = ledger::mark_complete(&conn, UserId(1), "31.02.2024", Utc::now()).unwrap_err();

    assert_eq!(err.kind(), ExErrorKind::InvalidDate);
    assert!(ledger::get_all(&conn, UserId(1)).unwrap().is_empty());
}

#[test]
fn test_mark_malformed_or_missing_date_is_invalid_date() {
    let conn = setup_db();
    register(&conn, 1, "U1", "run", "🏃");

    for input in ["2024-03-01", "1.3", "", "tomorrow"] {
        let err = ledger::mark_complete(&conn, UserId(1), input, Utc::now()).unwrap_err();
        assert_eq!(err.kind(), ExErrorKind::InvalidDate, "input {:?}", input);
    }
}

#[test]
fn test_mark_before_start_is_unregistered_user() {
    let conn = setup_db();

    let err = ledger::mark_complete(&conn, UserId(9), "01.03.2024", Utc::now()).unwrap_err();

    assert_eq!(err.kind(), ExErrorKind::UnregisteredUser);
    assert_eq!(err.entity_id(), Some("9"));
}

#[test]
fn test_repeat_mark_returns_existing_completion() {
    let conn = setup_db();
    register(&conn, 1, "U1", "run", "🏃");
    let t0 = Utc::now();

    let first = ledger::mark_complete(&conn, UserId(1), "05.03.2024", t0).unwrap();
    let second =
        ledger::mark_complete(&conn, UserId(1), "05.03.2024", t0 + Duration::hours(2)).unwrap();

    assert!(!second.newly_recorded);
    assert_eq!(second.completion, first.completion);
}

#[test]
fn test_get_since_is_inclusive_and_ordered() {
    let conn = setup_db();
    register(&conn, 1, "U1", "run", "🏃");
    register(&conn, 2, "U2", "read", "📚");
    for (user, date) in [(1, "03.03.2024"), (2, "01.03.2024"), (2, "02.03.2024"), (1, "02.03.2024")] {
        ledger::mark_complete(&conn, UserId(user), date, Utc::now()).unwrap();
    }

    let since = ledger::get_since(&conn, day(2, 3, 2024)).unwrap();

    let dates: Vec<_> = since.iter().map(|c| c.date).collect();
    assert_eq!(dates, vec![day(2, 3, 2024), day(2, 3, 2024), day(3, 3, 2024)]);
}

#[test]
fn test_get_all_for_user_without_completions_is_empty() {
    let conn = setup_db();
    register(&conn, 1, "U1", "run", "🏃");

    assert!(ledger::get_all(&conn, UserId(1)).unwrap().is_empty());
    assert!(ledger::get_all(&conn, UserId(2)).unwrap().is_empty());
}

proptest! {
    #[test]
    fn marking_is_idempotent_and_get_all_is_ordered(
        days in proptest::collection::vec((1u32..=28, 1u32..=12), 1..30),
    ) {
        let conn = setup_db();
        register(&conn, 1, "U1", "run", "🏃");

        for (d, m) in &days {
            let text = format!("{:02}.{:02}.2024", d, m);
            ledger::mark_complete(&conn, UserId(1), &text, Utc::now()).unwrap();
            ledger::mark_complete(&conn, UserId(1), &text, Utc::now()).unwrap();
        }

        let all = ledger::get_all(&conn, UserId(1)).unwrap();
        let mut distinct: Vec<_> = days.iter().map(|(d, m)| day(*d, *m, 2024)).collect();
        distinct.sort();
        distinct.dedup();

        prop_assert_eq!(all.iter().map(|c| c.date).collect::<Vec<_>>(), distinct);
    }
}

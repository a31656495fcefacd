#![allow(dead_code)]

use chrono::{NaiveDate, Utc};
use goaltrack_core::model::{NewRegistration, User, UserId};
use goaltrack_engine::commands::registry;
use rusqlite::Connection;

pub fn setup_db() -> Connection {
    goaltrack_store::db::open_and_migrate(":memory:").unwrap()
}

pub fn day(d: u32, m: u32, y: i32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap()
}

pub fn register(conn: &Connection, id: i64, name: &str, goal: &str, emoji: &str) -> User {
    let reg = NewRegistration::new(UserId(id), name, goal, emoji).unwrap();
    registry::register(conn, &reg, Utc::now()).unwrap()
}

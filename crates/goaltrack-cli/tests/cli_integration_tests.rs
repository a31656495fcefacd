//! CLI integration tests
//!
//! Run the built `goaltrack` binary against a temporary database.

use rusqlite::Connection;
use std::io::Write;
use std::path::{Path, PathBuf};
use std::process::{Command, Output, Stdio};
use tempfile::TempDir;

fn goaltrack(db_path: &Path) -> Command {
    let mut cmd = Command::new(env!("CARGO_BIN_EXE_goaltrack"));
    cmd.env_remove("GOALTRACK_TOKEN")
        .env("RUST_LOG", "off")
        .args(["--db", db_path.to_str().unwrap(), "--throttle-ms", "0"]);
    cmd
}

fn db_in(temp_dir: &TempDir) -> PathBuf {
    temp_dir.path().join("data").join("goaltrack.db")
}

fn stdout_of(output: &Output) -> String {
    assert!(
        output.status.success(),
        "command failed: {}",
        String::from_utf8_lossy(&output.stderr)
    );
    String::from_utf8(output.stdout.clone()).unwrap()
}

fn console(db_path: &Path, today: &str, script: &str) -> String {
    let mut child = goaltrack(db_path)
        .args(["console", "--today", today])
        .stdin(Stdio::piped())
        .stdout(Stdio::piped())
        .stderr(Stdio::piped())
        .spawn()
        .expect("Failed to spawn CLI");

    child
        .stdin
        .take()
        .unwrap()
        .write_all(script.as_bytes())
        .unwrap();

    stdout_of(&child.wait_with_output().unwrap())
}

fn send(db_path: &Path, user: &str, today: &str, text: &[&str]) -> String {
    let output = goaltrack(db_path)
        .args(["send", "--user", user, "--today", today])
        .args(text)
        .output()
        .expect("Failed to execute CLI");
    stdout_of(&output)
}

#[test]
fn test_cli_migrate_creates_schema() {
    let temp_dir = TempDir::new().unwrap();
    let db_path = db_in(&temp_dir);

    let output = goaltrack(&db_path).arg("migrate").output().unwrap();
    let stdout = stdout_of(&output);

    assert!(stdout.contains("0 registered users"), "{}", stdout);
    let conn = Connection::open(&db_path).unwrap();
    let applied: i64 = conn
        .query_row("SELECT COUNT(*) FROM schema_version", [], |row| row.get(0))
        .unwrap();
    assert_eq!(applied, 2);
}

#[test]
fn test_cli_console_registration_then_send() {
    let temp_dir = TempDir::new().unwrap();
    let db_path = db_in(&temp_dir);

    let transcript = console(
        &db_path,
        "10.03.2024",
        "1 /start\n1 Ann\n1 run\n1 🏃\n# comment\n1 /complete 09.03.2024\n",
    );
    assert!(transcript.contains("Registration complete!"), "{}", transcript);
    assert!(transcript.contains("Completion for 09.03.2024 recorded."));

    let again = send(&db_path, "1", "10.03.2024", &["/complete", "09.03.2024"]);
    assert_eq!(again.trim(), "You have already marked 09.03.2024 as done.");

    let month = send(&db_path, "2", "10.03.2024", &["/result_month"]);
    assert_eq!(month.trim(), "🏃 Ann: 1/30");
}

#[test]
fn test_cli_send_reports_user_errors_as_replies() {
    let temp_dir = TempDir::new().unwrap();
    let db_path = db_in(&temp_dir);

    let unregistered = send(&db_path, "5", "10.03.2024", &["/complete", "01.03.2024"]);
    assert_eq!(
        unregistered.trim(),
        "Please register first with the /start command."
    );

    let bad_step = send(&db_path, "5", "10.03.2024", &["/result_step", "11.03.2024"]);
    assert!(bad_step.starts_with("Please give the date in DD.MM.YYYY format"));
}

#[test]
fn test_cli_rejects_bad_today_flag() {
    let temp_dir = TempDir::new().unwrap();
    let db_path = db_in(&temp_dir);

    let output = goaltrack(&db_path)
        .args(["send", "--user", "1", "--today", "2024-03-10", "/help"])
        .output()
        .unwrap();

    assert!(!output.status.success());
    assert!(String::from_utf8_lossy(&output.stderr).starts_with("Error:"));
}

#[test]
fn test_cli_piped_console_warns_about_default_throttle() {
    let temp_dir = TempDir::new().unwrap();
    let db_path = db_in(&temp_dir);

    let mut child = Command::new(env!("CARGO_BIN_EXE_goaltrack"))
        .env_remove("GOALTRACK_TOKEN")
        .env_remove("GOALTRACK_THROTTLE_MS")
        .env("RUST_LOG", "off")
        .args(["--db", db_path.to_str().unwrap()])
        .args(["console", "--today", "10.03.2024"])
        .stdin(Stdio::piped())
        .stdout(Stdio::piped())
        .stderr(Stdio::piped())
        .spawn()
        .expect("Failed to spawn CLI");
    child
        .stdin
        .take()
        .unwrap()
        .write_all(b"1 /help\n1 /help\n")
        .unwrap();
    let output = child.wait_with_output().unwrap();

    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("--throttle-ms 0"), "{}", stderr);
    // The second /help arrives inside the throttle and gets no reply.
    let stdout = stdout_of(&output);
    assert_eq!(stdout.matches("/complete").count(), 1, "{}", stdout);
}

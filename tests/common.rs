#![allow(dead_code)]
use assert_cmd::{Command, cargo_bin_cmd};
use std::env;
use std::fs;
use std::path::PathBuf;

pub fn rci() -> Command {
    cargo_bin_cmd!("rclockin")
}

/// Create a unique test DB path inside the system temp dir and remove any existing file
pub fn setup_test_db(name: &str) -> String {
    let mut path: PathBuf = env::temp_dir();
    path.push(format!("{}_rclockin.sqlite", name));
    let db_path = path.to_string_lossy().to_string();
    fs::remove_file(&db_path).ok();
    db_path
}

/// Create a temporary output file path inside tempdir and ensure it's removed
pub fn temp_out(name: &str, ext: &str) -> String {
    let mut path: PathBuf = env::temp_dir();
    path.push(format!("{}_rclockin_out.{}", name, ext));
    let p = path.to_string_lossy().to_string();
    fs::remove_file(&p).ok();
    p
}

/// Initialize DB and register two employees (ana, bob)
pub fn init_db_with_users(db_path: &str) {
    rci()
        .args(["--db", db_path, "--test", "init"])
        .assert()
        .success();

    rci()
        .args(["--db", db_path, "user", "add", "ana", "Ana Ruiz", "ana@example.com"])
        .assert()
        .success();

    rci()
        .args([
            "--db",
            db_path,
            "user",
            "add",
            "bob",
            "Bob Stone",
            "bob@example.com",
            "--weekly-hours",
            "20",
        ])
        .assert()
        .success();
}

/// Register a scan at a fixed RFC 3339 timestamp
pub fn scan_at(db_path: &str, user: &str, ts: &str) {
    rci()
        .args(["--db", db_path, "scan", user, "Office-1", "--at", ts])
        .assert()
        .success();
}

/// One complete day for `ana`: 09:00 -> 17:30 (+02:00)
pub fn ana_full_day(db_path: &str, date: &str) {
    scan_at(db_path, "ana", &format!("{date}T09:00:00+02:00"));
    scan_at(db_path, "ana", &format!("{date}T17:30:00+02:00"));
}

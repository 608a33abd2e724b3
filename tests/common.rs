#![allow(dead_code)]
use assert_cmd::{Command, cargo_bin_cmd};
use rattendance::core::AttendanceService;
use rattendance::store::SqliteStorage;
use std::env;
use std::fs;
use std::path::PathBuf;

pub fn rat() -> Command {
    cargo_bin_cmd!("rattendance")
}

/// Create a unique test DB path inside the system temp dir and remove any existing file
pub fn setup_test_db(name: &str) -> String {
    let mut path: PathBuf = env::temp_dir();
    path.push(format!("{}_rattendance.sqlite", name));
    let db_path = path.to_string_lossy().to_string();
    fs::remove_file(&db_path).ok();
    db_path
}

/// Create a temporary output file path inside tempdir and ensure it's removed
pub fn temp_out(name: &str, ext: &str) -> String {
    let mut path: PathBuf = env::temp_dir();
    path.push(format!("{}_out.{}", name, ext));
    let p = path.to_string_lossy().to_string();
    fs::remove_file(&p).ok();
    p
}

/// `init` in test mode: schema and default students, no config file.
pub fn init_db(db_path: &str) {
    rat()
        .args(["--db", db_path, "--test", "init"])
        .assert()
        .success();
}

pub fn login(db_path: &str) {
    rat()
        .args(["--db", db_path, "admin", "login", "admin123"])
        .assert()
        .success();
}

pub fn check_in(db_path: &str, id: &str, first: &str, last: &str) {
    rat()
        .args(["--db", db_path, "checkin", id, first, last])
        .assert()
        .success();
}

/// Records as stored, read back through the library.
pub fn service(db_path: &str) -> AttendanceService<SqliteStorage> {
    AttendanceService::new(SqliteStorage::open(db_path).expect("open db"))
}

pub fn record_ids(db_path: &str) -> Vec<String> {
    service(db_path)
        .records()
        .iter()
        .map(|r| r.id.clone())
        .collect()
}

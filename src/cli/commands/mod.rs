pub mod admin;
pub mod backup;
pub mod checkin;
pub mod config;
pub mod correct;
pub mod db;
pub mod del;
pub mod export;
pub mod init;
pub mod list;
pub mod log;
pub mod stats;
pub mod timetable;

use crate::config::Config;
use crate::core::AdminAuth;
use crate::errors::AppResult;
use crate::store::SqliteStorage;

/// Open the configured database (migrations included).
pub(crate) fn open_storage(cfg: &Config) -> AppResult<SqliteStorage> {
    SqliteStorage::open(&cfg.database)
}

/// Fail with `NotAuthenticated` unless an administrator is logged in.
pub(crate) fn require_admin(cfg: &Config) -> AppResult<()> {
    AdminAuth::new(open_storage(cfg)?, &cfg.admin_password).require()
}

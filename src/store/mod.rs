//! Key-value storage backends.
//!
//! Every collection is kept as one text value (a JSON array) under a fixed
//! key and is read and rewritten wholesale.

mod memory;
mod sqlite;

pub use memory::MemoryStorage;
pub use sqlite::SqliteStorage;

use crate::errors::AppResult;

pub const ATTENDANCE_KEY: &str = "attendance_records";
pub const TIMETABLE_KEY: &str = "timetable_data";
pub const STUDENTS_KEY: &str = "students_data";
pub const ADMIN_AUTH_KEY: &str = "admin_authenticated";

/// Text key-value store the services persist through.
pub trait Storage {
    fn get_item(&self, key: &str) -> AppResult<Option<String>>;

    fn set_item(&mut self, key: &str, value: &str) -> AppResult<()>;

    fn remove_item(&mut self, key: &str) -> AppResult<()>;

    /// Best-effort audit trail. Backends without one ignore it.
    fn audit(&self, _operation: &str, _target: &str, _message: &str) -> AppResult<()> {
        Ok(())
    }
}

impl<S: Storage + ?Sized> Storage for Box<S> {
    fn get_item(&self, key: &str) -> AppResult<Option<String>> {
        (**self).get_item(key)
    }

    fn set_item(&mut self, key: &str, value: &str) -> AppResult<()> {
        (**self).set_item(key, value)
    }

    fn remove_item(&mut self, key: &str) -> AppResult<()> {
        (**self).remove_item(key)
    }

    fn audit(&self, operation: &str, target: &str, message: &str) -> AppResult<()> {
        (**self).audit(operation, target, message)
    }
}

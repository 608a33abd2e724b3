use super::Storage;
use crate::errors::{AppError, AppResult};
use std::cell::RefCell;
use std::collections::HashMap;
use std::rc::Rc;

/// In-process storage. Clones share the same map, so a test can keep a
/// handle and inspect what a service wrote.
#[derive(Debug, Clone, Default)]
pub struct MemoryStorage {
    items: Rc<RefCell<HashMap<String, String>>>,
    fail_writes: Rc<RefCell<bool>>,
    fail_audit: Rc<RefCell<bool>>,
    audit_lines: Rc<RefCell<Vec<(String, String, String)>>>,
}

impl MemoryStorage {
    pub fn new() -> Self {
        Self::default()
    }

    /// Make every subsequent `set_item`/`remove_item` fail.
    pub fn fail_writes(&self, fail: bool) {
        *self.fail_writes.borrow_mut() = fail;
    }

    /// Make every subsequent `audit` call fail.
    pub fn fail_audit(&self, fail: bool) {
        *self.fail_audit.borrow_mut() = fail;
    }

    pub fn raw(&self, key: &str) -> Option<String> {
        self.items.borrow().get(key).cloned()
    }

    pub fn audit_lines(&self) -> Vec<(String, String, String)> {
        self.audit_lines.borrow().clone()
    }

    fn check_writable(&self) -> AppResult<()> {
        if *self.fail_writes.borrow() {
            return Err(AppError::Storage("storage is read-only".into()));
        }
        Ok(())
    }
}

impl Storage for MemoryStorage {
    fn get_item(&self, key: &str) -> AppResult<Option<String>> {
        Ok(self.items.borrow().get(key).cloned())
    }

    fn set_item(&mut self, key: &str, value: &str) -> AppResult<()> {
        self.check_writable()?;
        self.items
            .borrow_mut()
            .insert(key.to_string(), value.to_string());
        Ok(())
    }

    fn remove_item(&mut self, key: &str) -> AppResult<()> {
        self.check_writable()?;
        self.items.borrow_mut().remove(key);
        Ok(())
    }

    fn audit(&self, operation: &str, target: &str, message: &str) -> AppResult<()> {
        if *self.fail_audit.borrow() {
            return Err(AppError::Storage("audit log unavailable".into()));
        }
        self.audit_lines.borrow_mut().push((
            operation.to_string(),
            target.to_string(),
            message.to_string(),
        ));
        Ok(())
    }
}

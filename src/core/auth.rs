//! Admin gate: a persisted flag set by a password comparison.
//! This only hides admin commands; the password is plain configuration.

use crate::errors::{AppError, AppResult};
use crate::store::{ADMIN_AUTH_KEY, Storage};
use crate::ui::messages::{error, warning};

pub const DEFAULT_ADMIN_PASSWORD: &str = "admin123";

pub struct AdminAuth<S: Storage> {
    storage: S,
    password: String,
}

impl<S: Storage> AdminAuth<S> {
    pub fn new(storage: S, password: &str) -> Self {
        Self {
            storage,
            password: password.to_string(),
        }
    }

    fn audit(&self, operation: &str, message: &str) {
        if let Err(e) = self.storage.audit(operation, "admin", message) {
            warning(format!("Failed to write internal log: {e}"));
        }
    }

    pub fn is_authenticated(&self) -> bool {
        match self.storage.get_item(ADMIN_AUTH_KEY) {
            Ok(flag) => flag.as_deref() == Some("true"),
            Err(e) => {
                error(format!("Error checking auth status: {e}"));
                false
            }
        }
    }

    /// Returns whether the password matched. A failure to persist the flag
    /// is reported but does not change the answer.
    pub fn login(&mut self, password: &str) -> bool {
        if password != self.password {
            self.audit("login", "Wrong password");
            return false;
        }

        if let Err(e) = self.storage.set_item(ADMIN_AUTH_KEY, "true") {
            error(format!("Error saving auth status: {e}"));
        }
        self.audit("login", "Administrator logged in");
        true
    }

    pub fn logout(&mut self) {
        if let Err(e) = self.storage.remove_item(ADMIN_AUTH_KEY) {
            error(format!("Error during logout: {e}"));
        }
        self.audit("logout", "Administrator logged out");
    }

    /// Gate for admin-only operations.
    pub fn require(&self) -> AppResult<()> {
        if self.is_authenticated() {
            Ok(())
        } else {
            Err(AppError::NotAuthenticated)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::MemoryStorage;

    #[test]
    fn login_persists_until_logout() {
        let storage = MemoryStorage::new();
        let mut auth = AdminAuth::new(storage.clone(), DEFAULT_ADMIN_PASSWORD);
        assert!(!auth.is_authenticated());
        assert!(matches!(auth.require(), Err(AppError::NotAuthenticated)));

        assert!(!auth.login("guess"));
        assert!(!auth.is_authenticated());

        assert!(auth.login("admin123"));
        let other = AdminAuth::new(storage.clone(), DEFAULT_ADMIN_PASSWORD);
        assert!(other.is_authenticated());
        assert!(other.require().is_ok());

        auth.logout();
        assert!(!other.is_authenticated());
        assert_eq!(storage.raw(ADMIN_AUTH_KEY), None);
    }

    #[test]
    fn broken_audit_log_does_not_block_login() {
        let storage = MemoryStorage::new();
        storage.fail_audit(true);
        let mut auth = AdminAuth::new(storage.clone(), DEFAULT_ADMIN_PASSWORD);

        assert!(auth.login(DEFAULT_ADMIN_PASSWORD));
        assert!(auth.is_authenticated());
        auth.logout();
        assert!(!auth.is_authenticated());
        assert!(storage.audit_lines().is_empty());
    }

    #[test]
    fn configured_password_replaces_default() {
        let mut auth = AdminAuth::new(MemoryStorage::new(), "s3cret");
        assert!(!auth.login(DEFAULT_ADMIN_PASSWORD));
        assert!(auth.login("s3cret"));
    }
}

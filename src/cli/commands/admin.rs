use crate::cli::commands::open_storage;
use crate::cli::parser::{AdminAction, Commands};
use crate::config::Config;
use crate::core::AdminAuth;
use crate::errors::{AppError, AppResult};
use crate::ui::messages::{info, success};

pub fn handle(cmd: &Commands, cfg: &Config) -> AppResult<()> {
    if let Commands::Admin { action } = cmd {
        let mut auth = AdminAuth::new(open_storage(cfg)?, &cfg.admin_password);

        match action {
            AdminAction::Login { password } => {
                if !auth.login(password) {
                    return Err(AppError::WrongPassword);
                }
                success("Administrator logged in.");
            }
            AdminAction::Logout => {
                auth.logout();
                success("Administrator logged out.");
            }
            AdminAction::Status => {
                if auth.is_authenticated() {
                    info("Administrator is logged in.");
                } else {
                    info("Administrator is not logged in.");
                }
            }
        }
    }

    Ok(())
}

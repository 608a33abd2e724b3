use crate::cli::commands::{open_storage, require_admin};
use crate::cli::parser::Commands;
use crate::config::Config;
use crate::core::AttendanceService;
use crate::errors::AppResult;
use crate::export::ExportLogic;
use crate::utils::date;

pub fn handle(cmd: &Commands, cfg: &Config) -> AppResult<()> {
    if let Commands::Export {
        student_id,
        date: date_arg,
        format,
        file,
        force,
    } = cmd
    {
        require_admin(cfg)?;

        let day = date_arg.as_deref().map(date::parse_date_arg).transpose()?;
        let service = AttendanceService::new(open_storage(cfg)?);
        ExportLogic::export(&service, student_id, day, *format, file, *force)?;
    }
    Ok(())
}

use crate::cli::commands::{open_storage, require_admin};
use crate::cli::parser::Commands;
use crate::config::Config;
use crate::core::AttendanceService;
use crate::errors::AppResult;
use crate::ui::messages::{info, success, warning};
use crate::utils::prompt::confirm;
use crate::utils::time::{local_date, local_hhmm};

pub fn handle(cmd: &Commands, cfg: &Config) -> AppResult<()> {
    if let Commands::Del { record_id, force } = cmd {
        require_admin(cfg)?;

        let mut service = AttendanceService::new(open_storage(cfg)?);

        let Some(record) = service.find(record_id) else {
            warning(format!("No attendance record with id {record_id}."));
            return Ok(());
        };

        let prompt = format!(
            "Delete the record of {} from {} {}? This action is irreversible.",
            record.student_name(),
            local_date(&record.check_in_time),
            local_hhmm(&record.check_in_time)
        );

        if !*force && !confirm(&prompt) {
            info("Operation cancelled.");
            return Ok(());
        }

        if service.delete_attendance_record(record_id) {
            success(format!("Record {record_id} has been deleted."));
        }
    }

    Ok(())
}

use crate::cli::commands::{open_storage, require_admin};
use crate::cli::parser::Commands;
use crate::config::Config;
use crate::core::AttendanceService;
use crate::errors::{AppError, AppResult};
use crate::models::{TimeCorrection, TimeField};
use crate::ui::messages::success;
use crate::utils::time::{at_local_time, local_hhmm, parse_optional_time};
use clap::ValueEnum;

/// Admin correction of a check-in or check-out time.
pub fn handle(cmd: &Commands, cfg: &Config) -> AppResult<()> {
    if let Commands::Correct {
        record_id,
        field,
        round,
        time,
    } = cmd
    {
        require_admin(cfg)?;

        let mut service = AttendanceService::new(open_storage(cfg)?);
        let record = service
            .find(record_id)
            .ok_or_else(|| AppError::RecordNotFound(record_id.clone()))?;

        let current = match field {
            TimeField::CheckIn => record.check_in_time,
            TimeField::CheckOut => record
                .check_out_time
                .ok_or_else(|| AppError::NoCheckOutToCorrect(record_id.clone()))?,
        };

        let new_time = match (round, parse_optional_time(time.as_ref())?) {
            (Some(preset), _) => preset
                .apply(current)
                .ok_or_else(|| AppError::InvalidTime(preset.label().to_string()))?,
            (None, Some(t)) => at_local_time(&current, t)?,
            (None, None) => {
                let presets: Vec<String> = TimeCorrection::all()
                    .iter()
                    .filter_map(|p| p.to_possible_value())
                    .map(|v| v.get_name().to_string())
                    .collect();
                return Err(AppError::Other(format!(
                    "specify either --round <{}> or --time HH:MM",
                    presets.join("|")
                )));
            }
        };

        let updated = service.update_attendance_time(record_id, *field, new_time)?;
        success(format!(
            "{} {} time set to {} (was {}).",
            updated.student_name(),
            field.label(),
            local_hhmm(&new_time),
            local_hhmm(&current)
        ));
    }

    Ok(())
}

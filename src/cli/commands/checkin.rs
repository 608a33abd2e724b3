use crate::cli::parser::{Commands, ScanMode};
use crate::cli::commands::open_storage;
use crate::config::Config;
use crate::core::AttendanceService;
use crate::errors::{AppError, AppResult};
use crate::models::QrPayload;
use crate::store::Storage;
use crate::ui::messages::{success, warning};
use crate::utils::time::{format_duration, local_hhmm};

/// `checkin`, `checkout` and `scan`.
pub fn handle(cmd: &Commands, cfg: &Config) -> AppResult<()> {
    match cmd {
        Commands::Checkin {
            student_id,
            first_name,
            last_name,
            location,
        } => {
            let mut service = AttendanceService::new(open_storage(cfg)?);
            let location = location.as_deref().unwrap_or(&cfg.default_location);
            check_in(&mut service, student_id, first_name, last_name, location)?;
        }

        Commands::Checkout { student_id } => {
            let mut service = AttendanceService::new(open_storage(cfg)?);
            check_out(&mut service, student_id)?;
        }

        Commands::Scan { mode, payload } => {
            let qr = QrPayload::parse(payload, &cfg.default_location)?;
            let mut service = AttendanceService::new(open_storage(cfg)?);

            match mode {
                ScanMode::In => {
                    match check_in(
                        &mut service,
                        &qr.student_id,
                        &qr.first_name,
                        &qr.last_name,
                        &qr.location,
                    ) {
                        // a second scan at the door is not a failure
                        Err(AppError::AlreadyCheckedIn { name, since }) => {
                            warning(format!("{name} is already checked in since {since}."));
                        }
                        other => {
                            other?;
                        }
                    }
                }
                ScanMode::Out => match check_out(&mut service, &qr.student_id) {
                    Err(AppError::NoActiveCheckIn(_)) => {
                        warning(format!("{} is not checked in.", qr.student_name()));
                    }
                    other => {
                        other?;
                    }
                },
            }
        }

        _ => {}
    }

    Ok(())
}

fn check_in<S: Storage>(
    service: &mut AttendanceService<S>,
    student_id: &str,
    first_name: &str,
    last_name: &str,
    location: &str,
) -> AppResult<()> {
    let record = service.check_in(student_id, first_name, last_name, location)?;
    success(format!(
        "{} checked in at {} ({}).",
        record.student_name(),
        local_hhmm(&record.check_in_time),
        record.location
    ));
    Ok(())
}

fn check_out<S: Storage>(service: &mut AttendanceService<S>, student_id: &str) -> AppResult<()> {
    let record = service.check_out(student_id)?;
    let out = record
        .check_out_time
        .as_ref()
        .map(local_hhmm)
        .unwrap_or_default();
    let duration = record.duration().map(format_duration).unwrap_or_default();
    success(format!(
        "{} checked out at {} ({duration}).",
        record.student_name(),
        out
    ));
    Ok(())
}

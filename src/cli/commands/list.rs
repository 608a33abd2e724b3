use crate::cli::commands::open_storage;
use crate::cli::parser::Commands;
use crate::config::Config;
use crate::core::AttendanceService;
use crate::errors::AppResult;
use crate::models::AttendanceRecord;
use crate::ui::messages::{header, info};
use crate::utils::colors::{colorize_in_out, colorize_optional};
use crate::utils::date;
use crate::utils::describe_status;
use crate::utils::table::Table;
use crate::utils::time::{format_duration, local_date, local_hhmm};
use chrono::NaiveDate;

/// `list` and `active`.
pub fn handle(cmd: &Commands, cfg: &Config) -> AppResult<()> {
    match cmd {
        Commands::Active => {
            let service = AttendanceService::new(open_storage(cfg)?);
            let active = service.get_active_check_ins();

            if active.is_empty() {
                info("No students are currently checked in.");
                return Ok(());
            }

            header(format!("Currently checked in ({})", active.len()));
            print_records(&active, cfg);
        }

        Commands::List {
            today,
            date: date_arg,
            period,
            student,
        } => {
            let service = AttendanceService::new(open_storage(cfg)?);

            let (title, mut records) = if *today {
                ("Today".to_string(), service.get_todays_records())
            } else if let Some(d) = date_arg {
                let d = date::parse_date_arg(d)?;
                (d.to_string(), service.records_for_date(d))
            } else if let Some(p) = period {
                let (from, to) = date::parse_period(p)?;
                (period_title(from, to), service.records_between(from, to))
            } else {
                ("All records".to_string(), service.records().iter().collect())
            };

            if let Some(id) = student {
                records.retain(|r| &r.student_id == id);
            }

            if records.is_empty() {
                info("No attendance records found.");
                return Ok(());
            }

            // newest first
            records.sort_by(|a, b| b.check_in_time.cmp(&a.check_in_time));

            header(format!("{title} ({} records)", records.len()));
            print_records(&records, cfg);
        }

        _ => {}
    }

    Ok(())
}

fn period_title(from: NaiveDate, to: NaiveDate) -> String {
    if from == to {
        from.to_string()
    } else {
        format!("{from} to {to}")
    }
}

fn print_records(records: &[&AttendanceRecord], cfg: &Config) {
    let mut table = Table::new(
        &[
            "ID", "Student", "Name", "Date", "In", "Out", "Duration", "Location", "Status",
        ],
        &cfg.separator_char,
    );

    for r in records {
        let (label, color) = describe_status(r.status());
        let out = r
            .check_out_time
            .as_ref()
            .map(local_hhmm)
            .unwrap_or_else(|| "--:--".to_string());

        table.add_row(vec![
            r.id.clone(),
            r.student_id.clone(),
            r.student_name(),
            local_date(&r.check_in_time),
            colorize_in_out(&local_hhmm(&r.check_in_time), true),
            colorize_in_out(&out, false),
            colorize_optional(&r.duration().map(format_duration).unwrap_or_else(|| "-".into())),
            r.location.clone(),
            format!("{color}{label}\x1b[0m"),
        ]);
    }

    print!("{}", table.render());
}

use crate::cli::commands::{open_storage, require_admin};
use crate::cli::parser::{Commands, TimetableAction};
use crate::config::Config;
use crate::core::TimetableService;
use crate::core::timetable::day_name;
use crate::errors::{AppError, AppResult};
use crate::models::{NewTimeSlot, TimeSlot, TimeSlotPatch};
use crate::ui::messages::{header, success, warning};
use crate::utils::colors::{GREY, RESET};
use crate::utils::table::Table;

pub fn handle(cmd: &Commands, cfg: &Config) -> AppResult<()> {
    let Commands::Timetable { action } = cmd else {
        return Ok(());
    };

    if action.is_mutation() {
        require_admin(cfg)?;
    }

    let mut service = TimetableService::new(open_storage(cfg)?);

    match action {
        TimetableAction::Show { day } => match day {
            Some(d) => {
                let name = day_name(*d)
                    .ok_or(AppError::InvalidDay(*d))?;
                header(name);
                print_slots(&service.time_slots_for_day(*d));
            }
            None => {
                for (_, name, slots) in service.week() {
                    header(name);
                    print_slots(&slots);
                }
            }
        },

        TimetableAction::Add {
            day,
            start,
            end,
            student,
            subject,
            location,
        } => {
            let slot = service.add_time_slot(NewTimeSlot {
                start_time: start.clone(),
                end_time: end.clone(),
                day_of_week: *day,
                student_id: student.clone(),
                student_name: None,
                subject: subject.clone(),
                location: location.clone(),
            })?;
            success(format!(
                "Time slot {} added ({} {}-{}).",
                slot.id,
                day_label(slot.day_of_week),
                slot.start_time,
                slot.end_time
            ));
        }

        TimetableAction::Update {
            id,
            day,
            start,
            end,
            student,
            subject,
            location,
        } => {
            let patch = TimeSlotPatch {
                start_time: start.clone(),
                end_time: end.clone(),
                day_of_week: *day,
                student_id: student.clone(),
                student_name: None,
                subject: subject.clone(),
                location: location.clone(),
            };

            if patch.is_empty() {
                warning("Nothing to update.");
                return Ok(());
            }

            match service.update_time_slot(id, patch)? {
                Some(slot) => success(format!(
                    "Time slot {} updated ({} {}-{}).",
                    slot.id,
                    day_label(slot.day_of_week),
                    slot.start_time,
                    slot.end_time
                )),
                None => return Err(AppError::TimeSlotNotFound(id.clone())),
            }
        }

        TimetableAction::Del { id } => {
            if service.delete_time_slot(id) {
                success(format!("Time slot {id} deleted."));
            } else {
                warning(format!("No time slot with id {id}."));
            }
        }

        TimetableAction::Students => {
            let mut table = Table::new(&["ID", "Name"], &cfg.separator_char);
            for s in service.students() {
                table.add_row(vec![s.id.clone(), s.name.clone()]);
            }
            print!("{}", table.render());
        }

        TimetableAction::AddStudent { name } => {
            let student = service.add_student(name)?;
            success(format!("Student {} added with id {}.", student.name, student.id));
        }
    }

    Ok(())
}

impl TimetableAction {
    fn is_mutation(&self) -> bool {
        !matches!(self, TimetableAction::Show { .. } | TimetableAction::Students)
    }
}

fn day_label(day: u8) -> &'static str {
    day_name(day).unwrap_or("?")
}

fn print_slots(slots: &[&TimeSlot]) {
    if slots.is_empty() {
        println!("  {GREY}no appointments{RESET}");
        return;
    }

    for s in slots {
        let mut line = format!("  {}-{}  ", s.start_time, s.end_time);
        if let Some(name) = &s.student_name {
            line.push_str(name);
        }
        if let Some(subject) = &s.subject {
            line.push_str(&format!(" · {subject}"));
        }
        if let Some(location) = &s.location {
            line.push_str(&format!(" @ {location}"));
        }
        line.push_str(&format!("  {GREY}[{}]{RESET}", s.id));
        println!("{line}");
    }
}

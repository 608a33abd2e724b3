//! Weekly timetable and the student list it assigns slots to.
//! Persisted the same way as attendance: whole list per key.

use crate::core::clock::{Clock, SystemClock, fresh_id};
use crate::errors::{AppError, AppResult};
use crate::models::{NewTimeSlot, Student, TimeSlot, TimeSlotPatch};
use crate::store::{STUDENTS_KEY, Storage, TIMETABLE_KEY};
use crate::ui::messages::{error, warning};
use crate::utils::time::normalize_hhmm;
use serde::Serialize;
use serde::de::DeserializeOwned;

const DAY_NAMES: [&str; 7] = [
    "Sunday",
    "Monday",
    "Tuesday",
    "Wednesday",
    "Thursday",
    "Friday",
    "Saturday",
];

/// English weekday name, 0 = Sunday.
pub fn day_name(day: u8) -> Option<&'static str> {
    DAY_NAMES.get(day as usize).copied()
}

/// Students available before anyone has been added.
pub fn default_students() -> Vec<Student> {
    vec![
        Student::new("1", "Max Mustermann"),
        Student::new("2", "Anna Schmidt"),
        Student::new("3", "Tom Weber"),
    ]
}

pub struct TimetableService<S: Storage> {
    storage: S,
    clock: Box<dyn Clock>,
    time_slots: Vec<TimeSlot>,
    students: Vec<Student>,
}

impl<S: Storage> TimetableService<S> {
    pub fn new(storage: S) -> Self {
        Self::with_clock(storage, Box::new(SystemClock))
    }

    pub fn with_clock(storage: S, clock: Box<dyn Clock>) -> Self {
        let mut svc = Self {
            storage,
            clock,
            time_slots: Vec::new(),
            students: Vec::new(),
        };
        svc.reload();
        svc
    }

    /// Load slots and students; seed the default students on first run.
    pub fn reload(&mut self) {
        match self.read_list::<TimeSlot>(TIMETABLE_KEY) {
            Ok(slots) => self.time_slots = slots.unwrap_or_default(),
            Err(e) => error(format!("Error loading timetable data: {e}")),
        }

        match self.read_list::<Student>(STUDENTS_KEY) {
            Ok(Some(students)) => self.students = students,
            Ok(None) => {
                let seeded = default_students();
                if self.write_list(STUDENTS_KEY, &seeded, "students") {
                    self.audit("seed", "students", "Default students created");
                }
                self.students = seeded;
            }
            Err(e) => error(format!("Error loading students: {e}")),
        }
    }

    fn read_list<T: DeserializeOwned>(&self, key: &str) -> AppResult<Option<Vec<T>>> {
        match self.storage.get_item(key)? {
            Some(raw) => Ok(Some(serde_json::from_str(&raw)?)),
            None => Ok(None),
        }
    }

    fn write_list<T: Serialize>(&mut self, key: &str, items: &[T], what: &str) -> bool {
        let written = serde_json::to_string(items)
            .map_err(AppError::from)
            .and_then(|json| self.storage.set_item(key, &json));

        match written {
            Ok(()) => true,
            Err(e) => {
                error(format!("Error saving {what}: {e}"));
                false
            }
        }
    }

    fn save_time_slots(&mut self, slots: Vec<TimeSlot>) -> bool {
        let ok = self.write_list(TIMETABLE_KEY, &slots, "timetable data");
        if ok {
            self.time_slots = slots;
        }
        ok
    }

    fn audit(&self, operation: &str, target: &str, message: &str) {
        if let Err(e) = self.storage.audit(operation, target, message) {
            warning(format!("Failed to write internal log: {e}"));
        }
    }

    fn next_id(&self) -> String {
        fresh_id(self.clock.now(), |candidate| {
            self.time_slots.iter().any(|s| s.id == candidate)
                || self.students.iter().any(|s| s.id == candidate)
        })
    }

    fn check_day(day: u8) -> AppResult<u8> {
        if (day as usize) < DAY_NAMES.len() {
            Ok(day)
        } else {
            Err(AppError::InvalidDay(day))
        }
    }

    /// Fill in the student's name when only the id was given.
    fn resolve_student_name(&self, id: Option<&String>, name: Option<String>) -> Option<String> {
        name.or_else(|| {
            id.and_then(|id| self.find_student(id))
                .map(|s| s.name.clone())
        })
    }

    pub fn time_slots(&self) -> &[TimeSlot] {
        &self.time_slots
    }

    pub fn students(&self) -> &[Student] {
        &self.students
    }

    pub fn find_student(&self, id: &str) -> Option<&Student> {
        self.students.iter().find(|s| s.id == id)
    }

    pub fn add_time_slot(&mut self, new: NewTimeSlot) -> AppResult<TimeSlot> {
        let student_name = self.resolve_student_name(new.student_id.as_ref(), new.student_name);

        let slot = TimeSlot {
            id: self.next_id(),
            start_time: normalize_hhmm(&new.start_time)?,
            end_time: normalize_hhmm(&new.end_time)?,
            day_of_week: Self::check_day(new.day_of_week)?,
            student_id: new.student_id,
            student_name,
            subject: new.subject,
            location: new.location,
        };

        let mut updated = self.time_slots.clone();
        updated.push(slot.clone());
        if self.save_time_slots(updated) {
            self.audit(
                "slot_add",
                &slot.id,
                &format!(
                    "{} {}-{}",
                    DAY_NAMES[slot.day_of_week as usize], slot.start_time, slot.end_time
                ),
            );
        }

        Ok(slot)
    }

    /// Merge `patch` into the slot with `id`. Unknown ids change nothing
    /// and yield `None`.
    pub fn update_time_slot(
        &mut self,
        id: &str,
        mut patch: TimeSlotPatch,
    ) -> AppResult<Option<TimeSlot>> {
        if let Some(t) = patch.start_time.take() {
            patch.start_time = Some(normalize_hhmm(&t)?);
        }
        if let Some(t) = patch.end_time.take() {
            patch.end_time = Some(normalize_hhmm(&t)?);
        }
        if let Some(d) = patch.day_of_week {
            Self::check_day(d)?;
        }
        if patch.student_id.is_some() && patch.student_name.is_none() {
            patch.student_name = self.resolve_student_name(patch.student_id.as_ref(), None);
        }

        let Some(idx) = self.time_slots.iter().position(|s| s.id == id) else {
            return Ok(None);
        };

        let mut updated = self.time_slots.clone();
        patch.merge_into(&mut updated[idx]);
        let slot = updated[idx].clone();

        if self.save_time_slots(updated) {
            self.audit("slot_edit", id, "Time slot updated");
        }

        Ok(Some(slot))
    }

    /// Remove a slot; returns whether one was removed.
    pub fn delete_time_slot(&mut self, id: &str) -> bool {
        let updated: Vec<TimeSlot> = self
            .time_slots
            .iter()
            .filter(|s| s.id != id)
            .cloned()
            .collect();

        if updated.len() == self.time_slots.len() {
            return false;
        }

        let removed = self.save_time_slots(updated);
        if removed {
            self.audit("slot_del", id, "Time slot deleted");
        }
        removed
    }

    /// Slots of one day ordered by start time.
    pub fn time_slots_for_day(&self, day: u8) -> Vec<&TimeSlot> {
        let mut slots: Vec<&TimeSlot> = self
            .time_slots
            .iter()
            .filter(|s| s.day_of_week == day)
            .collect();
        slots.sort_by(|a, b| a.start_time.cmp(&b.start_time));
        slots
    }

    /// All seven days, Sunday first, each with its sorted slots.
    pub fn week(&self) -> Vec<(u8, &'static str, Vec<&TimeSlot>)> {
        (0u8..7)
            .map(|d| (d, DAY_NAMES[d as usize], self.time_slots_for_day(d)))
            .collect()
    }

    pub fn add_student(&mut self, name: &str) -> AppResult<Student> {
        let name = name.trim();
        if name.is_empty() {
            return Err(AppError::Other("student name must not be empty".into()));
        }

        let student = Student::new(&self.next_id(), name);
        let mut updated = self.students.clone();
        updated.push(student.clone());

        if self.write_list(STUDENTS_KEY, &updated, "students") {
            self.students = updated;
            self.audit("student_add", &student.id, name);
        }

        Ok(student)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::clock::ManualClock;
    use crate::store::MemoryStorage;
    use chrono::{Duration, TimeZone, Utc};

    fn service() -> (TimetableService<MemoryStorage>, MemoryStorage, ManualClock) {
        let storage = MemoryStorage::new();
        let clock = ManualClock::new(Utc.with_ymd_and_hms(2025, 3, 1, 8, 0, 0).unwrap());
        let svc = TimetableService::with_clock(storage.clone(), Box::new(clock.clone()));
        (svc, storage, clock)
    }

    fn slot(day: u8, start: &str, end: &str) -> NewTimeSlot {
        NewTimeSlot {
            start_time: start.into(),
            end_time: end.into(),
            day_of_week: day,
            ..Default::default()
        }
    }

    #[test]
    fn first_load_seeds_students_once() {
        let (mut svc, storage, _) = service();
        assert_eq!(svc.students(), default_students().as_slice());
        assert!(storage.raw(STUDENTS_KEY).is_some());

        svc.add_student("Lena Koch").unwrap();
        let again = TimetableService::new(storage);
        assert_eq!(again.students().len(), 4);
    }

    #[test]
    fn day_listing_is_sorted_by_start() {
        let (mut svc, _, clock) = service();
        svc.add_time_slot(slot(1, "13:00", "14:00")).unwrap();
        clock.advance(Duration::milliseconds(1));
        svc.add_time_slot(slot(1, "8:30", "9:15")).unwrap();
        svc.add_time_slot(slot(2, "07:00", "08:00")).unwrap();

        let monday: Vec<&str> = svc
            .time_slots_for_day(1)
            .iter()
            .map(|s| s.start_time.as_str())
            .collect();
        assert_eq!(monday, ["08:30", "13:00"]);

        let week = svc.week();
        assert_eq!(week.len(), 7);
        assert_eq!(week[0].1, "Sunday");
        assert_eq!(week[2].2.len(), 1);
    }

    #[test]
    fn invalid_slots_are_rejected() {
        let (mut svc, _, _) = service();
        assert!(matches!(
            svc.add_time_slot(slot(7, "08:00", "09:00")),
            Err(AppError::InvalidDay(7))
        ));
        assert!(matches!(
            svc.add_time_slot(slot(1, "8am", "09:00")),
            Err(AppError::InvalidTime(_))
        ));
        assert!(svc.time_slots().is_empty());
    }

    #[test]
    fn reassigning_to_unknown_student_drops_old_name() {
        let (mut svc, _, _) = service();
        let created = svc
            .add_time_slot(NewTimeSlot {
                student_id: Some("1".into()),
                ..slot(4, "09:00", "10:00")
            })
            .unwrap();
        assert_eq!(created.student_name.as_deref(), Some("Max Mustermann"));

        let patch = TimeSlotPatch {
            student_id: Some("99".into()),
            ..Default::default()
        };
        let updated = svc.update_time_slot(&created.id, patch).unwrap().unwrap();
        assert_eq!(updated.student_id.as_deref(), Some("99"));
        assert_eq!(updated.student_name, None);
        assert_eq!(svc.time_slots()[0].student_name, None);

        let patch = TimeSlotPatch {
            student_id: Some("3".into()),
            ..Default::default()
        };
        let updated = svc.update_time_slot(&created.id, patch).unwrap().unwrap();
        assert_eq!(updated.student_name.as_deref(), Some("Tom Weber"));
    }

    #[test]
    fn update_merges_only_given_fields() {
        let (mut svc, storage, _) = service();
        let created = svc
            .add_time_slot(NewTimeSlot {
                subject: Some("Math".into()),
                student_id: Some("2".into()),
                ..slot(3, "10:00", "11:00")
            })
            .unwrap();
        assert_eq!(created.student_name.as_deref(), Some("Anna Schmidt"));

        let updated = svc
            .update_time_slot(
                &created.id,
                TimeSlotPatch {
                    end_time: Some("11:30".into()),
                    location: Some("Room 4".into()),
                    ..Default::default()
                },
            )
            .unwrap()
            .unwrap();

        assert_eq!(updated.start_time, "10:00");
        assert_eq!(updated.end_time, "11:30");
        assert_eq!(updated.subject.as_deref(), Some("Math"));
        assert_eq!(updated.location.as_deref(), Some("Room 4"));

        let reloaded = TimetableService::new(storage);
        assert_eq!(reloaded.time_slots(), &[updated]);
    }

    #[test]
    fn unknown_ids_change_nothing() {
        let (mut svc, _, _) = service();
        svc.add_time_slot(slot(1, "08:00", "09:00")).unwrap();

        let patch = TimeSlotPatch {
            subject: Some("Art".into()),
            ..Default::default()
        };
        assert_eq!(svc.update_time_slot("missing", patch).unwrap(), None);
        assert!(!svc.delete_time_slot("missing"));
        assert_eq!(svc.time_slots().len(), 1);
    }

    #[test]
    fn delete_removes_slot() {
        let (mut svc, _, _) = service();
        let s = svc.add_time_slot(slot(5, "08:00", "09:00")).unwrap();
        assert!(svc.delete_time_slot(&s.id));
        assert!(svc.time_slots_for_day(5).is_empty());
    }

    #[test]
    fn day_names() {
        assert_eq!(day_name(0), Some("Sunday"));
        assert_eq!(day_name(6), Some("Saturday"));
        assert_eq!(day_name(7), None);
    }
}

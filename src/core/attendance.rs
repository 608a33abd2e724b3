//! Attendance service: in-memory mirror of the persisted record list.
//!
//! Every mutation builds the complete new list, writes it to storage and
//! only then replaces the in-memory copy. A failed write is reported and
//! swallowed, leaving both sides at the pre-mutation state.

use crate::core::clock::{Clock, SystemClock, fresh_id};
use crate::errors::{AppError, AppResult};
use crate::models::{AttendanceRecord, AttendanceStats, TimeField};
use crate::store::{ATTENDANCE_KEY, Storage};
use crate::ui::messages::{error, warning};
use crate::utils::time::local_hhmm;
use chrono::{DateTime, Local, NaiveDate, Utc};
use std::collections::HashSet;

pub struct AttendanceService<S: Storage> {
    storage: S,
    clock: Box<dyn Clock>,
    records: Vec<AttendanceRecord>,
}

impl<S: Storage> AttendanceService<S> {
    pub fn new(storage: S) -> Self {
        Self::with_clock(storage, Box::new(SystemClock))
    }

    pub fn with_clock(storage: S, clock: Box<dyn Clock>) -> Self {
        let mut svc = Self {
            storage,
            clock,
            records: Vec::new(),
        };
        svc.reload();
        svc
    }

    /// Re-read the list from storage. Unreadable data leaves the list empty.
    pub fn reload(&mut self) {
        match self.read_records() {
            Ok(records) => self.records = records,
            Err(e) => {
                error(format!("Error loading attendance records: {e}"));
                self.records.clear();
            }
        }
    }

    fn read_records(&self) -> AppResult<Vec<AttendanceRecord>> {
        match self.storage.get_item(ATTENDANCE_KEY)? {
            Some(raw) => Ok(serde_json::from_str(&raw)?),
            None => Ok(Vec::new()),
        }
    }

    /// Persist `records` and adopt them. Returns false if the write failed.
    fn save_records(&mut self, records: Vec<AttendanceRecord>) -> bool {
        let written = serde_json::to_string(&records)
            .map_err(AppError::from)
            .and_then(|json| self.storage.set_item(ATTENDANCE_KEY, &json));

        match written {
            Ok(()) => {
                self.records = records;
                true
            }
            Err(e) => {
                error(format!("Error saving attendance records: {e}"));
                false
            }
        }
    }

    fn audit(&self, operation: &str, target: &str, message: &str) {
        if let Err(e) = self.storage.audit(operation, target, message) {
            warning(format!("Failed to write internal log: {e}"));
        }
    }

    pub fn records(&self) -> &[AttendanceRecord] {
        &self.records
    }

    pub fn storage(&self) -> &S {
        &self.storage
    }

    pub fn now(&self) -> DateTime<Utc> {
        self.clock.now()
    }

    /// Open a session. A student can hold at most one open session.
    pub fn check_in(
        &mut self,
        student_id: &str,
        first_name: &str,
        last_name: &str,
        location: &str,
    ) -> AppResult<AttendanceRecord> {
        if let Some(open) = self.active_check_in_for(student_id) {
            return Err(AppError::AlreadyCheckedIn {
                name: open.student_name(),
                since: local_hhmm(&open.check_in_time),
            });
        }

        let now = self.clock.now();
        let id = fresh_id(now, |candidate| self.records.iter().any(|r| r.id == candidate));

        let record = AttendanceRecord {
            id,
            student_id: student_id.to_string(),
            first_name: first_name.to_string(),
            last_name: last_name.to_string(),
            check_in_time: now,
            check_out_time: None,
            location: location.to_string(),
        };

        let mut updated = self.records.clone();
        updated.push(record.clone());
        if self.save_records(updated) {
            self.audit(
                "checkin",
                student_id,
                &format!("{} checked in at {}", record.student_name(), record.location),
            );
        }

        Ok(record)
    }

    /// Close the first open session of `student_id`.
    pub fn check_out(&mut self, student_id: &str) -> AppResult<AttendanceRecord> {
        let idx = self
            .records
            .iter()
            .position(|r| r.student_id == student_id && r.is_active())
            .ok_or_else(|| AppError::NoActiveCheckIn(student_id.to_string()))?;

        let mut updated = self.records.clone();
        updated[idx].check_out_time = Some(self.clock.now());
        let record = updated[idx].clone();

        if self.save_records(updated) {
            self.audit(
                "checkout",
                student_id,
                &format!("{} checked out", record.student_name()),
            );
        }

        Ok(record)
    }

    /// Overwrite one timestamp of a record. The order of check-in and
    /// check-out is not validated.
    pub fn update_attendance_time(
        &mut self,
        record_id: &str,
        field: TimeField,
        new_time: DateTime<Utc>,
    ) -> AppResult<AttendanceRecord> {
        let idx = self
            .records
            .iter()
            .position(|r| r.id == record_id)
            .ok_or_else(|| AppError::RecordNotFound(record_id.to_string()))?;

        let mut updated = self.records.clone();
        let old = match field {
            TimeField::CheckIn => std::mem::replace(&mut updated[idx].check_in_time, new_time),
            TimeField::CheckOut => match updated[idx].check_out_time.as_mut() {
                Some(out) => std::mem::replace(out, new_time),
                None => return Err(AppError::NoCheckOutToCorrect(record_id.to_string())),
            },
        };
        let record = updated[idx].clone();

        if self.save_records(updated) {
            self.audit(
                "correct",
                record_id,
                &format!(
                    "{} {} time {} -> {}",
                    record.student_name(),
                    field.label(),
                    local_hhmm(&old),
                    local_hhmm(&new_time)
                ),
            );
        }

        Ok(record)
    }

    /// Remove a record. Unknown ids are a no-op; returns whether one was removed.
    pub fn delete_attendance_record(&mut self, record_id: &str) -> bool {
        let updated: Vec<AttendanceRecord> = self
            .records
            .iter()
            .filter(|r| r.id != record_id)
            .cloned()
            .collect();

        if updated.len() == self.records.len() {
            return false;
        }

        let removed = self.save_records(updated);
        if removed {
            self.audit("del", record_id, "Attendance record deleted");
        }
        removed
    }

    pub fn get_active_check_ins(&self) -> Vec<&AttendanceRecord> {
        self.records.iter().filter(|r| r.is_active()).collect()
    }

    pub fn active_check_in_for(&self, student_id: &str) -> Option<&AttendanceRecord> {
        self.records
            .iter()
            .find(|r| r.student_id == student_id && r.is_active())
    }

    /// Records checked in between local midnight today and local midnight
    /// tomorrow.
    pub fn get_todays_records(&self) -> Vec<&AttendanceRecord> {
        let today = self.clock.now().with_timezone(&Local).date_naive();
        self.records_for_date(today)
    }

    pub fn records_for_date(&self, date: NaiveDate) -> Vec<&AttendanceRecord> {
        self.records_between(date, date)
    }

    /// Records whose local check-in day lies in `from..=to`.
    pub fn records_between(&self, from: NaiveDate, to: NaiveDate) -> Vec<&AttendanceRecord> {
        self.records
            .iter()
            .filter(|r| {
                let d = r.check_in_date();
                d >= from && d <= to
            })
            .collect()
    }

    pub fn records_for_student(&self, student_id: &str) -> Vec<&AttendanceRecord> {
        self.records
            .iter()
            .filter(|r| r.student_id == student_id)
            .collect()
    }

    pub fn find(&self, record_id: &str) -> Option<&AttendanceRecord> {
        self.records.iter().find(|r| r.id == record_id)
    }

    pub fn stats_for_date(&self, date: NaiveDate) -> AttendanceStats {
        AttendanceStats::compute(self.records_for_date(date))
    }

    /// Distinct students across the whole store.
    pub fn unique_students(&self) -> usize {
        self.records
            .iter()
            .map(|r| r.student_id.as_str())
            .collect::<HashSet<_>>()
            .len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::clock::ManualClock;
    use crate::models::AttendanceStatus;
    use crate::store::MemoryStorage;
    use chrono::{Duration, TimeZone};

    fn t0() -> DateTime<Utc> {
        Local
            .with_ymd_and_hms(2025, 3, 3, 12, 0, 0)
            .single()
            .unwrap()
            .with_timezone(&Utc)
    }

    fn service() -> (AttendanceService<MemoryStorage>, MemoryStorage, ManualClock) {
        let storage = MemoryStorage::new();
        let clock = ManualClock::new(t0());
        let svc = AttendanceService::with_clock(storage.clone(), Box::new(clock.clone()));
        (svc, storage, clock)
    }

    #[test]
    fn check_in_then_out_scenario() {
        let (mut svc, _, clock) = service();

        let rec = svc.check_in("S1", "Max", "Mustermann", "Room A").unwrap();
        assert_eq!(rec.check_in_time, t0());

        let active = svc.get_active_check_ins();
        assert_eq!(active.len(), 1);
        assert_eq!(active[0].student_id, "S1");
        assert_eq!(active[0].status(), AttendanceStatus::CheckedIn);
        assert!(active[0].check_out_time.is_none());

        let today = svc.get_todays_records();
        assert_eq!(today.len(), 1);
        assert_eq!(today[0].id, rec.id);

        clock.advance(Duration::minutes(95));
        let closed = svc.check_out("S1").unwrap();
        assert_eq!(closed.id, rec.id);
        assert_eq!(closed.check_out_time, Some(t0() + Duration::minutes(95)));
        assert_eq!(closed.status(), AttendanceStatus::CheckedOut);
        assert!(svc.get_active_check_ins().is_empty());

        let err = svc.check_out("S1").unwrap_err();
        assert!(matches!(err, AppError::NoActiveCheckIn(ref s) if s == "S1"));
        assert_eq!(svc.records().len(), 1);
    }

    #[test]
    fn second_open_session_is_refused() {
        let (mut svc, _, clock) = service();
        svc.check_in("S1", "Max", "Mustermann", "Room A").unwrap();
        clock.advance(Duration::seconds(5));

        let err = svc.check_in("S1", "Max", "Mustermann", "Room A").unwrap_err();
        assert!(matches!(err, AppError::AlreadyCheckedIn { .. }));
        assert_eq!(svc.records().len(), 1);

        svc.check_out("S1").unwrap();
        svc.check_in("S1", "Max", "Mustermann", "Room A").unwrap();
        assert_eq!(svc.records().len(), 2);
    }

    #[test]
    fn same_millisecond_check_ins_get_distinct_ids() {
        let (mut svc, _, _) = service();
        let a = svc.check_in("S1", "Max", "Mustermann", "Room A").unwrap();
        let b = svc.check_in("S2", "Anna", "Schmidt", "Room A").unwrap();
        assert_ne!(a.id, b.id);
    }

    #[test]
    fn correction_touches_only_the_target_field() {
        let (mut svc, _, clock) = service();
        let rec = svc.check_in("S1", "Max", "Mustermann", "Room A").unwrap();
        clock.advance(Duration::minutes(50));
        let closed = svc.check_out("S1").unwrap();

        let new_in = t0() - Duration::minutes(7);
        let fixed = svc
            .update_attendance_time(&rec.id, TimeField::CheckIn, new_in)
            .unwrap();

        assert_eq!(fixed.check_in_time, new_in);
        assert_eq!(fixed.check_out_time, closed.check_out_time);
        assert_eq!(fixed.id, rec.id);
        assert_eq!(fixed.student_id, rec.student_id);
        assert_eq!(fixed.first_name, rec.first_name);
        assert_eq!(fixed.last_name, rec.last_name);
        assert_eq!(fixed.location, rec.location);
        assert_eq!(svc.find(&rec.id), Some(&fixed));
    }

    #[test]
    fn correction_errors() {
        let (mut svc, _, _) = service();
        let rec = svc.check_in("S1", "Max", "Mustermann", "Room A").unwrap();

        let missing = svc.update_attendance_time("nope", TimeField::CheckIn, t0());
        assert!(matches!(missing, Err(AppError::RecordNotFound(_))));

        let open = svc.update_attendance_time(&rec.id, TimeField::CheckOut, t0());
        assert!(matches!(open, Err(AppError::NoCheckOutToCorrect(_))));
        assert!(svc.find(&rec.id).unwrap().is_active());
    }

    #[test]
    fn check_out_may_be_corrected_before_check_in() {
        let (mut svc, _, clock) = service();
        let rec = svc.check_in("S1", "Max", "Mustermann", "Room A").unwrap();
        clock.advance(Duration::minutes(10));
        svc.check_out("S1").unwrap();

        let earlier = t0() - Duration::hours(1);
        let fixed = svc
            .update_attendance_time(&rec.id, TimeField::CheckOut, earlier)
            .unwrap();
        assert_eq!(fixed.check_out_time, Some(earlier));
    }

    #[test]
    fn deleting_unknown_id_is_a_no_op() {
        let (mut svc, storage, _) = service();
        svc.check_in("S1", "Max", "Mustermann", "Room A").unwrap();
        let before = storage.raw(ATTENDANCE_KEY);

        assert!(!svc.delete_attendance_record("does-not-exist"));
        assert_eq!(svc.records().len(), 1);
        assert_eq!(storage.raw(ATTENDANCE_KEY), before);
    }

    #[test]
    fn delete_removes_and_persists() {
        let (mut svc, storage, clock) = service();
        let rec = svc.check_in("S1", "Max", "Mustermann", "Room A").unwrap();
        assert!(svc.delete_attendance_record(&rec.id));
        assert!(svc.records().is_empty());

        let reloaded = AttendanceService::with_clock(storage, Box::new(clock));
        assert!(reloaded.records().is_empty());
    }

    #[test]
    fn reload_keeps_millisecond_timestamps() {
        let (mut svc, storage, clock) = service();
        clock.set(t0() + Duration::milliseconds(123));
        svc.check_in("S1", "Max", "Mustermann", "Room A").unwrap();
        clock.advance(Duration::milliseconds(45_678));
        svc.check_out("S1").unwrap();

        let reloaded = AttendanceService::with_clock(storage, Box::new(clock));
        assert_eq!(reloaded.records(), svc.records());
    }

    #[test]
    fn failed_write_leaves_memory_untouched() {
        let (mut svc, storage, _) = service();
        svc.check_in("S1", "Max", "Mustermann", "Room A").unwrap();
        let before = svc.records().to_vec();

        storage.fail_writes(true);
        let ghost = svc.check_in("S2", "Anna", "Schmidt", "Room B").unwrap();
        assert_eq!(ghost.student_id, "S2");
        assert_eq!(svc.records(), before.as_slice());

        assert!(svc.check_out("S1").is_ok());
        assert!(svc.records()[0].is_active());
        assert!(!svc.delete_attendance_record(&before[0].id));
        assert_eq!(svc.records().len(), 1);
    }

    #[test]
    fn corrupt_storage_loads_empty() {
        let mut storage = MemoryStorage::new();
        storage.set_item(ATTENDANCE_KEY, "{not json").unwrap();
        let svc = AttendanceService::new(storage);
        assert!(svc.records().is_empty());
    }

    #[test]
    fn date_filters_use_local_days() {
        let (mut svc, _, clock) = service();
        svc.check_in("S1", "Max", "Mustermann", "Room A").unwrap();
        clock.advance(Duration::days(1));
        svc.check_in("S2", "Anna", "Schmidt", "Room A").unwrap();

        let day0 = t0().with_timezone(&Local).date_naive();
        let day1 = day0.succ_opt().unwrap();

        assert_eq!(svc.records_for_date(day0).len(), 1);
        assert_eq!(svc.get_todays_records()[0].student_id, "S2");
        assert_eq!(svc.records_between(day0, day1).len(), 2);
        assert_eq!(svc.records_for_student("S1").len(), 1);
        assert_eq!(svc.unique_students(), 2);
        assert_eq!(svc.stats_for_date(day1).active_check_ins, 1);
    }

    #[test]
    fn mutations_are_audited() {
        let (mut svc, storage, _) = service();
        let rec = svc.check_in("S1", "Max", "Mustermann", "Room A").unwrap();
        svc.check_out("S1").unwrap();
        svc.delete_attendance_record(&rec.id);

        let ops: Vec<String> = storage.audit_lines().into_iter().map(|(op, _, _)| op).collect();
        assert_eq!(ops, ["checkin", "checkout", "del"]);
    }
}

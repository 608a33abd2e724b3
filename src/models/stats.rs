use crate::models::attendance::{AttendanceRecord, AttendanceStatus};
use chrono::Duration;

/// Dashboard figures for a set of records.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct AttendanceStats {
    pub total_records: usize,
    pub active_check_ins: usize,
    pub completed_sessions: usize,
    /// Mean length of completed sessions, rounded to whole minutes.
    pub average_duration_minutes: i64,
}

impl AttendanceStats {
    pub fn compute<'a, I>(records: I) -> Self
    where
        I: IntoIterator<Item = &'a AttendanceRecord>,
    {
        let mut stats = AttendanceStats::default();
        let mut total = Duration::zero();

        for r in records {
            stats.total_records += 1;
            match r.status() {
                AttendanceStatus::CheckedIn => stats.active_check_ins += 1,
                AttendanceStatus::CheckedOut => stats.completed_sessions += 1,
            }
            if let Some(d) = r.duration() {
                total += d;
            }
        }

        if stats.completed_sessions > 0 {
            let mean_minutes =
                total.num_milliseconds() as f64 / stats.completed_sessions as f64 / 60_000.0;
            // half-up, also for negative means left by uncorrected data
            stats.average_duration_minutes = (mean_minutes + 0.5).floor() as i64;
        }

        stats
    }
}

/// Sum of completed session lengths in hours.
pub fn total_hours<'a, I>(records: I) -> f64
where
    I: IntoIterator<Item = &'a AttendanceRecord>,
{
    records
        .into_iter()
        .filter_map(|r| r.duration())
        .map(|d| d.num_milliseconds() as f64 / 3_600_000.0)
        .sum()
}

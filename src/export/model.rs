use crate::models::AttendanceRecord;
use crate::models::stats::total_hours;
use crate::utils::time::{format_duration, local_date, local_hhmm};
use chrono::{DateTime, Local, NaiveDate, Utc};
use serde::Serialize;

const STILL_ACTIVE: &str = "still active";

/// Flat row for CSV / JSON / PDF.
#[derive(Serialize, Clone, Debug, PartialEq)]
pub struct RecordExport {
    pub id: String,
    pub student_id: String,
    pub student_name: String,
    pub date: String,
    pub check_in: String,
    pub check_out: String,
    pub duration: String,
    pub location: String,
    pub status: String,
}

impl From<&AttendanceRecord> for RecordExport {
    fn from(r: &AttendanceRecord) -> Self {
        Self {
            id: r.id.clone(),
            student_id: r.student_id.clone(),
            student_name: r.student_name(),
            date: local_date(&r.check_in_time),
            check_in: local_hhmm(&r.check_in_time),
            check_out: r
                .check_out_time
                .as_ref()
                .map(local_hhmm)
                .unwrap_or_else(|| "-".to_string()),
            duration: r
                .duration()
                .map(format_duration)
                .unwrap_or_else(|| STILL_ACTIVE.to_string()),
            location: r.location.clone(),
            status: r.status().label().to_string(),
        }
    }
}

/// Hours sheet for one student.
#[derive(Serialize, Clone, Debug)]
pub struct StudentSummary {
    pub student_id: String,
    pub student_name: String,
    pub period: String,
    pub generated_at: String,
    pub entries: usize,
    pub total_hours: f64,
    pub active_sessions: usize,
    pub completed_sessions: usize,
    pub records: Vec<RecordExport>,
}

impl StudentSummary {
    pub fn build(
        student_id: &str,
        records: &[&AttendanceRecord],
        date: Option<NaiveDate>,
        generated_at: DateTime<Utc>,
    ) -> Self {
        let student_name = records
            .first()
            .map(|r| r.student_name())
            .unwrap_or_else(|| student_id.to_string());

        let generated = generated_at.with_timezone(&Local);

        Self {
            student_id: student_id.to_string(),
            student_name,
            period: date
                .map(|d| d.format("%d.%m.%Y").to_string())
                .unwrap_or_else(|| "All dates".to_string()),
            generated_at: format!(
                "{} at {}",
                generated.format("%d.%m.%Y"),
                generated.format("%H:%M")
            ),
            entries: records.len(),
            total_hours: total_hours(records.iter().copied()),
            active_sessions: records.iter().filter(|r| r.is_active()).count(),
            completed_sessions: records.iter().filter(|r| !r.is_active()).count(),
            records: records.iter().map(|r| RecordExport::from(*r)).collect(),
        }
    }

    pub fn title(&self) -> String {
        format!("Hours overview - {}", self.student_name)
    }

    /// Label/value lines printed above the table.
    pub(crate) fn header_lines(&self) -> Vec<(String, String)> {
        vec![
            ("Student".into(), self.student_name.clone()),
            ("Period".into(), self.period.clone()),
            ("Created".into(), self.generated_at.clone()),
            ("Entries".into(), self.entries.to_string()),
            ("Total hours".into(), format!("{:.2} hours", self.total_hours)),
            ("Active sessions".into(), self.active_sessions.to_string()),
            ("Completed sessions".into(), self.completed_sessions.to_string()),
        ]
    }
}

pub(crate) fn get_headers() -> Vec<&'static str> {
    vec!["Date", "Check-in", "Check-out", "Duration", "Location", "Status"]
}

pub(crate) fn record_to_row(e: &RecordExport) -> Vec<String> {
    vec![
        e.date.clone(),
        e.check_in.clone(),
        e.check_out.clone(),
        e.duration.clone(),
        e.location.clone(),
        e.status.clone(),
    ]
}

pub(crate) fn records_to_table(records: &[RecordExport]) -> Vec<Vec<String>> {
    records.iter().map(record_to_row).collect()
}

use crate::models::qr::de_text;
use crate::utils::time::iso_millis;
use chrono::{DateTime, Duration, Local, NaiveDate, Utc};
use clap::ValueEnum;
use serde::{Deserialize, Serialize};

/// Placeholder for names missing from legacy records.
const UNKNOWN_NAME: &str = "Unknown";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum AttendanceStatus {
    CheckedIn,
    CheckedOut,
}

impl AttendanceStatus {
    /// Human label used in listings and exports.
    pub fn label(&self) -> &'static str {
        match self {
            AttendanceStatus::CheckedIn => "Active",
            AttendanceStatus::CheckedOut => "Completed",
        }
    }
}

/// Which timestamp of a record an admin correction targets.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum TimeField {
    #[value(name = "in")]
    CheckIn,
    #[value(name = "out")]
    CheckOut,
}

impl TimeField {
    pub fn label(&self) -> &'static str {
        match self {
            TimeField::CheckIn => "check-in",
            TimeField::CheckOut => "check-out",
        }
    }
}

/// One attendance session of a student.
///
/// The status is not stored: a record is open exactly while
/// `check_out_time` is `None`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(into = "StoredRecord", from = "StoredRecord")]
pub struct AttendanceRecord {
    pub id: String,
    pub student_id: String,
    pub first_name: String,
    pub last_name: String,
    pub check_in_time: DateTime<Utc>,
    pub check_out_time: Option<DateTime<Utc>>,
    pub location: String,
}

impl AttendanceRecord {
    pub fn student_name(&self) -> String {
        format!("{} {}", self.first_name, self.last_name)
    }

    pub fn status(&self) -> AttendanceStatus {
        match self.check_out_time {
            Some(_) => AttendanceStatus::CheckedOut,
            None => AttendanceStatus::CheckedIn,
        }
    }

    pub fn is_active(&self) -> bool {
        self.check_out_time.is_none()
    }

    /// Session length, `None` while still open.
    pub fn duration(&self) -> Option<Duration> {
        self.check_out_time.map(|out| out - self.check_in_time)
    }

    /// Local calendar day the session started on.
    pub fn check_in_date(&self) -> NaiveDate {
        self.check_in_time.with_timezone(&Local).date_naive()
    }
}

/// Wire form kept in storage: camelCase keys, ISO timestamps and the
/// redundant `studentName`/`status` fields older readers expect.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
struct StoredRecord {
    #[serde(deserialize_with = "de_text")]
    id: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    student_name: Option<String>,
    #[serde(default)]
    first_name: Option<String>,
    #[serde(default)]
    last_name: Option<String>,
    #[serde(deserialize_with = "de_text")]
    student_id: String,
    #[serde(with = "iso_millis")]
    check_in_time: DateTime<Utc>,
    #[serde(
        default,
        with = "iso_millis::option",
        skip_serializing_if = "Option::is_none"
    )]
    check_out_time: Option<DateTime<Utc>>,
    #[serde(default)]
    location: String,
    #[serde(default, skip_deserializing)]
    status: Option<AttendanceStatus>,
}

fn non_empty(s: Option<String>) -> Option<String> {
    s.filter(|v| !v.trim().is_empty())
}

impl From<StoredRecord> for AttendanceRecord {
    fn from(s: StoredRecord) -> Self {
        let legacy = s.student_name.unwrap_or_default();
        let mut words = legacy.split_whitespace();
        let legacy_first = words.next().map(str::to_string);
        let legacy_last = Some(words.collect::<Vec<_>>().join(" "));

        let first_name = non_empty(s.first_name)
            .or_else(|| non_empty(legacy_first))
            .unwrap_or_else(|| UNKNOWN_NAME.to_string());
        let last_name = non_empty(s.last_name)
            .or_else(|| non_empty(legacy_last))
            .unwrap_or_else(|| UNKNOWN_NAME.to_string());

        AttendanceRecord {
            id: s.id,
            student_id: s.student_id,
            first_name,
            last_name,
            check_in_time: s.check_in_time,
            check_out_time: s.check_out_time,
            location: s.location,
        }
    }
}

impl From<AttendanceRecord> for StoredRecord {
    fn from(r: AttendanceRecord) -> Self {
        StoredRecord {
            student_name: Some(r.student_name()),
            status: Some(r.status()),
            id: r.id,
            first_name: Some(r.first_name),
            last_name: Some(r.last_name),
            student_id: r.student_id,
            check_in_time: r.check_in_time,
            check_out_time: r.check_out_time,
            location: r.location,
        }
    }
}
